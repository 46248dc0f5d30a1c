//! # External Dictionary Builders
//!
//! Spell-checker packages are produced by the shell tooling that ships with
//! SCOWL under `<root>/speller/`. This module drives those scripts as child
//! processes:
//!
//! | builder  | command                                        | artifact                    |
//! |----------|------------------------------------------------|-----------------------------|
//! | Hunspell | `make-hunspell-dict -one <name> parms.txt`     | `hunspell-<name>.zip`       |
//! | Aspell   | `make-aspell-custom <revision> parms.txt`      | `aspell6-en-custom.tar.bz2` |
//!
//! ## Protocol
//!
//! 1. Encode the word list as ISO-8859-1, one word per line. Unencodable
//!    words fail here, before anything is spawned.
//! 2. Create a private temporary workspace and write `parms.txt` into it.
//! 3. Run the script with the workspace as its working directory, `SCOWL`
//!    set to the absolute toolchain root and `SCOWL_VERSION` removed.
//!    Words go to stdin, stdout is discarded, stderr is collected.
//! 4. On a zero exit status read the artifact back.
//!
//! The workspace is a [`tempfile::TempDir`], removed when the build returns
//! on every path. Concurrent builds never share a directory.

use crate::error::{BuilderName, CreateError, PackagingError};
use crate::lexicon::WordSet;
use crate::naming::DictName;
use crate::package::{encode, Payload, TextEncoding};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Control file handed to every builder script.
pub const CONTROL_FILE: &str = "parms.txt";
/// Directory under the toolchain root holding the builder scripts.
pub const SCRIPT_DIR: &str = "speller";

const ASPELL_ARTIFACT: &str = "aspell6-en-custom.tar.bz2";

/// Location of the SCOWL checkout whose scripts build dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    root: PathBuf,
}

impl Toolchain {
    /// Resolve `root` to an absolute path; the scripts are looked up lazily.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            root: std::path::absolute(root.as_ref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn script(&self, name: &str) -> PathBuf {
        self.root.join(SCRIPT_DIR).join(name)
    }
}

/// One external dictionary build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryBuilder {
    /// Single Hunspell dictionary named after the selected region.
    Hunspell { name: DictName },
    /// Aspell custom package stamped with the source revision.
    Aspell { revision: String },
}

impl DictionaryBuilder {
    pub fn kind(&self) -> BuilderName {
        match self {
            DictionaryBuilder::Hunspell { .. } => BuilderName::Hunspell,
            DictionaryBuilder::Aspell { .. } => BuilderName::Aspell,
        }
    }

    pub fn script_name(&self) -> &'static str {
        match self {
            DictionaryBuilder::Hunspell { .. } => "make-hunspell-dict",
            DictionaryBuilder::Aspell { .. } => "make-aspell-custom",
        }
    }

    fn args(&self) -> Vec<&str> {
        match self {
            DictionaryBuilder::Hunspell { name } => vec!["-one", name.as_str(), CONTROL_FILE],
            DictionaryBuilder::Aspell { revision } => vec![revision.as_str(), CONTROL_FILE],
        }
    }

    /// Contents of `parms.txt` for a given parameter dump.
    pub fn control_text(&self, dump: &str) -> String {
        match self {
            DictionaryBuilder::Hunspell { .. } => format!("With Parameters:\n{dump}"),
            DictionaryBuilder::Aspell { .. } => dump.to_string(),
        }
    }

    /// File the script leaves in its working directory.
    pub fn artifact(&self) -> &'static str {
        match self {
            DictionaryBuilder::Hunspell { name } => name.hunspell_archive(),
            DictionaryBuilder::Aspell { .. } => ASPELL_ARTIFACT,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DictionaryBuilder::Hunspell { .. } => "application/zip",
            DictionaryBuilder::Aspell { .. } => "application/octet-stream",
        }
    }

    /// Run the builder over `words` and return its artifact.
    pub fn build(
        &self,
        toolchain: &Toolchain,
        dump: &str,
        words: &WordSet,
    ) -> Result<Payload, CreateError> {
        let stdin_bytes = encode(&words.joined("\n"), TextEncoding::Latin1, "stdin")?;
        let bytes = self.run(toolchain, dump, &stdin_bytes)?;
        Ok(Payload {
            bytes,
            content_type: self.content_type(),
            filename: Some(self.artifact()),
        })
    }

    fn run(&self, toolchain: &Toolchain, dump: &str, input: &[u8]) -> Result<Vec<u8>, PackagingError> {
        let builder = self.kind();
        let io_err = |source: io::Error| PackagingError::Io { builder, source };

        let workspace = tempfile::Builder::new()
            .prefix("scowl-create-")
            .tempdir()
            .map_err(io_err)?;
        std::fs::write(workspace.path().join(CONTROL_FILE), self.control_text(dump))
            .map_err(io_err)?;

        let program = toolchain.script(self.script_name());
        let started = Instant::now();
        info!(
            builder = %builder,
            program = %program.display(),
            workspace = %workspace.path().display(),
            input_bytes = input.len(),
            "Dictionary builder started"
        );

        let mut child = Command::new(&program)
            .args(self.args())
            .current_dir(workspace.path())
            .env("SCOWL", toolchain.root())
            .env_remove("SCOWL_VERSION")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PackagingError::Spawn {
                builder,
                program: program.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take();
        let diagnostics = match feed_and_drain(stdin, stderr, input) {
            Ok(diagnostics) => diagnostics,
            Err(source) => {
                warn!(builder = %builder, error = %source, "Builder pipe failed, killing child");
                reap(&mut child);
                return Err(io_err(source));
            }
        };
        let status = child.wait().map_err(io_err)?;

        if !status.success() {
            let diagnostics = String::from_utf8_lossy(&diagnostics).into_owned();
            warn!(
                builder = %builder,
                status = %status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                diagnostics = %diagnostics,
                "Dictionary builder failed"
            );
            return Err(PackagingError::Failed {
                builder,
                status,
                diagnostics,
            });
        }

        let artifact = workspace.path().join(self.artifact());
        let bytes = std::fs::read(&artifact).map_err(|source| PackagingError::MissingArtifact {
            builder,
            artifact: self.artifact().to_string(),
            source,
        })?;
        info!(
            builder = %builder,
            artifact = self.artifact(),
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dictionary builder finished"
        );
        Ok(bytes)
    }
}

/// Kill `child` and wait for it, so it is gone before the workspace is removed.
fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "Builder already exited");
    }
    if let Err(e) = child.wait() {
        warn!(error = %e, "Failed to reap builder");
    }
}

/// Write `input` to the child's stdin while collecting its stderr.
///
/// Both pipes are serviced at once so neither side can block the other on a
/// full pipe buffer.
fn feed_and_drain<W, R>(stdin: Option<W>, stderr: Option<R>, input: &[u8]) -> io::Result<Vec<u8>>
where
    W: Write + Send,
    R: Read,
{
    std::thread::scope(|scope| {
        let writer = scope.spawn(move || -> io::Result<()> {
            let Some(mut pipe) = stdin else {
                return Ok(());
            };
            match pipe.write_all(input) {
                // The script may exit without reading everything.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
            // pipe dropped here, closing the child's stdin
        });

        let mut diagnostics = Vec::new();
        let read = match stderr {
            Some(mut pipe) => pipe.read_to_end(&mut diagnostics).map(|_| ()),
            None => Ok(()),
        };
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
        read?;
        written?;
        debug!(stderr_bytes = diagnostics.len(), "Builder pipes closed");
        Ok(diagnostics)
    })
}
