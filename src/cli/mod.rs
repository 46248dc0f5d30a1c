//! # Command Line
//!
//! The `scowl-create` binary:
//!
//! ```bash
//! # Run the HTTP service
//! scowl-create serve --config config/scowl-create.toml --addr 127.0.0.1:8080
//!
//! # Build one artifact offline, same pipeline as GET /create
//! scowl-create generate --scowl-root /srv/scowl \
//!     --query 'download=wordlist&spelling=GBs&format=zip' --output SCOWL-wl.zip
//!
//! # Show how a query resolves
//! scowl-create dump-params --query 'max_variant=2&spelling=CA'
//! ```
//!
//! `--scowl-root`, `--database` and `--revision` override the `[scowl]`
//! section of the config file; `--addr` overrides `[server] addr`.

mod commands;


pub use commands::{dump_params_text, run, run_cli, Cli, Commands, SourceArgs};
