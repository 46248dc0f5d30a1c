//! # scowl-create
//!
//! **scowl-create** builds custom English word lists and spell-checker
//! dictionaries from the SCOWL database, on demand, over HTTP.
//!
//! ## Overview
//!
//! A caller picks a size, one or more regional spellings, a variant level,
//! a diacritic policy and optional special categories. The service answers
//! with either
//!
//! - a plain word list (inline text, `tar.gz` or `zip`, UTF-8 or
//!   ISO-8859-1), prefixed by a provenance header, or
//! - a Hunspell or Aspell dictionary built by the shell tooling shipped with
//!   SCOWL, run in a private temporary directory.
//!
//! Without a `download` parameter it renders the selection form instead.
//!
//! ## Architecture
//!
//! - **[`params`]** - query parsing and validation into canonical parameters
//! - **[`lexicon`]** - the lexical database seam and the bundled word table
//! - **[`header`]** - provenance header and parameter dump
//! - **[`naming`]** - dictionary package names
//! - **[`package`]** - inline, `tar.gz` and `zip` word list output
//! - **[`builder`]** - external Hunspell/Aspell builder invocation
//! - **[`pipeline`]** - one request end to end, shared by HTTP and CLI
//! - **[`server`]** - `may_minihttp` service
//! - **[`cli`]** - `scowl-create serve | generate | dump-params`
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Service as server::CreateService
//!     participant Params as params::CreateRequest
//!     participant Lexicon as lexicon::WordSet
//!     participant Header as header::HeaderBuilder
//!     participant Package as package / builder
//!
//!     Client->>Service: GET /create?download=wordlist&...
//!     Service->>Params: resolve(query, vocabulary)
//!     Params-->>Service: Download { target, params } or ValidationError (400)
//!     Service->>Lexicon: fetch(database, params)
//!     Lexicon-->>Service: sorted words, diacritics applied
//!     Service->>Header: build(params) / dump(params)
//!     Service->>Package: package_wordlist(...) or DictionaryBuilder::build(...)
//!     Package-->>Service: Payload or EncodingError (422) / PackagingError (500)
//!     Service-->>Client: body + Content-Type [+ Content-Disposition]
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! scowl-create serve --scowl-root /srv/scowl --addr 127.0.0.1:8080
//! curl 'http://127.0.0.1:8080/create?download=wordlist&spelling=GBs&max_size=70'
//! ```
//!
//! ## Runtime Considerations
//!
//! Requests run on `may` coroutines. All shared state is read-only and
//! loaded once at start-up, so requests never lock. Coroutine stack size is
//! tuned with `SCOWL_CREATE_STACK_SIZE` (see [`runtime_config`]); logging
//! with the `SCOWL_CREATE_LOG_*` variables (see [`logging`]).

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod header;
pub mod lexicon;
pub mod logging;
pub mod naming;
pub mod package;
pub mod params;
pub mod pipeline;
pub mod provenance;
pub mod runtime_config;
pub mod server;
pub mod vocab;

pub use builder::{DictionaryBuilder, Toolchain};
pub use error::{CreateError, EncodingError, PackagingError, ValidationError};
pub use header::HeaderBuilder;
pub use lexicon::{LexicalDatabase, WordSet, WordTable};
pub use naming::{dict_name, DictName};
pub use package::{OutputFormat, Payload, TextEncoding};
pub use params::{CreateRequest, DownloadTarget, GenerationParameters, QueryParams};
pub use pipeline::{CreateContext, Reply};
