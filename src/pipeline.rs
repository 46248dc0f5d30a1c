//! # Create Pipeline
//!
//! One request, end to end:
//!
//! ```text
//! query ─► CreateRequest::resolve ─┬─► Form ─► askama ─► HTML
//!                                  └─► Download
//!                                        │ WordSet::fetch (lexicon + diacritics)
//!                                        ├─► wordlist ─► HeaderBuilder ─► package_wordlist
//!                                        ├─► hunspell ─► DictionaryBuilder::Hunspell
//!                                        └─► aspell   ─► DictionaryBuilder::Aspell
//! ```
//!
//! [`CreateContext`] holds everything that is loaded once and shared
//! read-only by all requests. It is used by the HTTP service and by the
//! offline `generate` command alike.

use crate::builder::{DictionaryBuilder, Toolchain};
use crate::config::ServiceConfig;
use crate::error::{Result, ValidationError};
use crate::form::CreateForm;
use crate::header::HeaderBuilder;
use crate::lexicon::{LexicalDatabase, WordSet, WordTable};
use crate::naming::dict_name;
use crate::package::{package_wordlist, Payload};
use crate::params::{CreateRequest, DownloadTarget, GenerationParameters, QueryParams};
use crate::provenance::SourceInfo;
use crate::vocab::Vocabulary;
use anyhow::Context;
use askama::Template;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Rendered selection form.
    Form(String),
    Download(Payload),
}

/// Process-lifetime, read-only state shared by every request.
pub struct CreateContext {
    pub vocab: Vocabulary,
    pub source: SourceInfo,
    pub lexicon: Arc<dyn LexicalDatabase>,
    pub toolchain: Toolchain,
    /// Path the form submits to.
    pub form_action: String,
}

impl CreateContext {
    /// Load provenance and the word table named by `config`.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let root = &config.scowl.root;
        let toolchain = Toolchain::new(root)
            .with_context(|| format!("Invalid SCOWL root {}", root.display()))?;
        let source = SourceInfo::load(toolchain.root(), config.scowl.revision.as_deref())?;
        let lexicon = WordTable::load(&config.scowl.database_path())?;
        Ok(Self {
            vocab: config.vocabulary.clone(),
            source,
            lexicon: Arc::new(lexicon),
            toolchain,
            form_action: config.server.path.clone(),
        })
    }

    /// Validate `query` and produce the form or the requested artifact.
    pub fn handle(&self, query: &QueryParams) -> Result<Reply> {
        match CreateRequest::resolve(query, &self.vocab)? {
            CreateRequest::Form { preset } => self.form(&preset).map(Reply::Form),
            CreateRequest::Download { target, params } => {
                self.download(target, &params).map(Reply::Download)
            }
        }
    }

    /// The selection form pre-filled from a named preset.
    pub fn form(&self, preset: &str) -> Result<String> {
        let preset = self.vocab.preset(preset).ok_or_else(|| {
            ValidationError::new("defaults", format!("Invalid defaults preset: {preset}"))
        })?;
        let html = CreateForm::new(&self.vocab, preset, &self.form_action, &self.source.revision)
            .render()?;
        Ok(html)
    }

    /// Build the artifact for an already validated download.
    pub fn download(&self, target: DownloadTarget, params: &GenerationParameters) -> Result<Payload> {
        let started = Instant::now();
        let words = WordSet::fetch(self.lexicon.as_ref(), params)?;
        debug!(target = target.as_str(), words = words.len(), "Word list selected");

        let header = HeaderBuilder::new(&self.vocab, &self.source);
        let payload = match target {
            DownloadTarget::WordList { encoding, format } => package_wordlist(
                &header.build(params),
                &words,
                &self.source.readme,
                encoding,
                format,
            )?,
            DownloadTarget::Hunspell => DictionaryBuilder::Hunspell {
                name: dict_name(params.spelling()),
            }
            .build(&self.toolchain, &header.dump(params), &words)?,
            DownloadTarget::Aspell => DictionaryBuilder::Aspell {
                revision: self.source.revision.clone(),
            }
            .build(&self.toolchain, &header.dump(params), &words)?,
        };
        info!(
            target = target.as_str(),
            words = words.len(),
            bytes = payload.bytes.len(),
            content_type = payload.content_type,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Download built"
        );
        Ok(payload)
    }
}

impl std::fmt::Debug for CreateContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateContext")
            .field("revision", &self.source.revision)
            .field("toolchain", &self.toolchain)
            .field("form_action", &self.form_action)
            .finish_non_exhaustive()
    }
}
