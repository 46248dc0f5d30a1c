use scowl_create::cli::run_cli;
use scowl_create::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let _logging = init_logging(&LogConfig::from_env())?;
    run_cli()
}
