use crate::config::ServiceConfig;
use crate::header::dump_params;
use crate::params::{GenerationParameters, QueryParams};
use crate::pipeline::{CreateContext, Reply};
use crate::runtime_config::RuntimeConfig;
use crate::server::{CreateService, HttpServer};
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the SCOWL word list creator
#[derive(Parser, Debug)]
#[command(name = "scowl-create", version)]
#[command(about = "Custom SCOWL word list and dictionary creator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to find configuration and the lexical source.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// TOML configuration file
    #[arg(short, long, env = "SCOWL_CREATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SCOWL checkout holding Copyright, README.md and speller/
    #[arg(long)]
    pub scowl_root: Option<PathBuf>,

    /// Word table (defaults to <scowl-root>/wordlist.tsv)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Revision string to report instead of asking git
    #[arg(long)]
    pub revision: Option<String>,
}

impl SourceArgs {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut config = ServiceConfig::load_or_default(self.config.as_deref())?;
        if let Some(root) = &self.scowl_root {
            config.scowl.root = root.clone();
        }
        if let Some(database) = &self.database {
            config.scowl.database = Some(database.clone());
        }
        if let Some(revision) = &self.revision {
            config.scowl.revision = Some(revision.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the create endpoint over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Listen address, overriding [server] addr
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run one request offline and write the result to a file
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Query string, as sent to GET /create
        #[arg(short, long)]
        query: String,

        /// File to write the artifact (or form) to
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the resolved parameter dump for a query or preset
    DumpParams {
        /// TOML configuration file (only [vocabulary] is used)
        #[arg(short, long, env = "SCOWL_CREATE_CONFIG")]
        config: Option<PathBuf>,

        /// Query string to resolve
        #[arg(short, long, default_value = "", conflicts_with = "preset")]
        query: String,

        /// Form preset to resolve instead of a query
        #[arg(long)]
        preset: Option<String>,
    },
}

/// Parse `std::env::args` and run.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { source, addr } => serve(&source, addr),
        Commands::Generate {
            source,
            query,
            output,
        } => generate(&source, &query, &output),
        Commands::DumpParams {
            config,
            query,
            preset,
        } => {
            let config = ServiceConfig::load_or_default(config.as_deref())?;
            print!("{}", dump_params_text(&config, &query, preset.as_deref())?);
            Ok(())
        }
    }
}

fn serve(source: &SourceArgs, addr: Option<String>) -> anyhow::Result<()> {
    let mut config = source.load_config()?;
    if let Some(addr) = addr {
        config.server.addr = addr;
    }
    RuntimeConfig::from_env().apply();
    let ctx = CreateContext::from_config(&config)?;
    let service = CreateService::new(Arc::new(ctx));
    let handle = HttpServer(service)
        .start(config.server.addr.as_str())
        .with_context(|| format!("Failed to listen on {}", config.server.addr))?;
    info!(
        addr = %handle.addr(),
        path = %config.server.path,
        stack_size = may::config().get_stack_size(),
        "Listening"
    );
    handle
        .join()
        .map_err(|e| anyhow!("server coroutine panicked: {e:?}"))
}

fn generate(source: &SourceArgs, query: &str, output: &std::path::Path) -> anyhow::Result<()> {
    let config = source.load_config()?;
    let ctx = CreateContext::from_config(&config)?;
    let query = QueryParams::parse(query);
    let bytes = match ctx.handle(&query).context("Request failed")? {
        Reply::Form(html) => html.into_bytes(),
        Reply::Download(payload) => {
            info!(
                content_type = payload.content_type,
                filename = payload.filename,
                "Artifact built"
            );
            payload.bytes
        }
    };
    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "Output written");
    Ok(())
}

/// Parameter dump for `query`, or for `preset` when given.
pub fn dump_params_text(
    config: &ServiceConfig,
    query: &str,
    preset: Option<&str>,
) -> anyhow::Result<String> {
    let vocab = &config.vocabulary;
    let params = match preset {
        Some(name) => vocab
            .preset(name)
            .and_then(GenerationParameters::from_preset)
            .ok_or_else(|| anyhow!("Unknown or empty preset: {name}"))?,
        None => GenerationParameters::resolve(&QueryParams::parse(query))?,
    };
    Ok(dump_params(vocab, &params, ""))
}
