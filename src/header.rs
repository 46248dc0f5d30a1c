//! # Provenance Header
//!
//! Renders the text prepended to every exported word list and the parameter
//! dump handed to the dictionary builders.
//!
//! ```text
//! Custom wordlist generated from https://app.aspell.net/create using SCOWL
//! with parameters:
//!   Size: 60 (default)
//!   Spelling: US
//!   Variant Level: 1 *default*
//!   Special: <none>
//!   Diacritics: strip
//!
//! https://wordlist.aspell.net
//!
//! Using Git Commit From: <revision>
//!
//! <copyright base>
//!
//! <AU section, only with AU spelling>
//!
//! <UKACD section, only above the large-list threshold>
//! ```
//!
//! Blocks are separated by one blank line and the header ends with one.
//! Output depends only on its inputs, so identical parameters always yield
//! identical bytes.

use crate::params::{GenerationParameters, Spelling};
use crate::provenance::{SourceInfo, SECTION_AU, SECTION_LARGE_LIST};
use crate::vocab::Vocabulary;

/// Project home page line.
pub const PROJECT_URL: &str = "https://wordlist.aspell.net";

const GENERATED_BY: &str =
    "Custom wordlist generated from https://app.aspell.net/create using SCOWL\nwith parameters:\n";

/// Prefix applied to every parameter dump line.
pub const DUMP_INDENT: &str = "  ";

/// Renders headers from shared, read-only vocabulary and provenance.
#[derive(Debug, Clone, Copy)]
pub struct HeaderBuilder<'a> {
    vocab: &'a Vocabulary,
    source: &'a SourceInfo,
}

impl<'a> HeaderBuilder<'a> {
    pub fn new(vocab: &'a Vocabulary, source: &'a SourceInfo) -> Self {
        Self { vocab, source }
    }

    /// The full provenance header, ending in a blank line.
    pub fn build(&self, params: &GenerationParameters) -> String {
        let mut dump_block = String::from(GENERATED_BY);
        dump_block.push_str(&dump_params(self.vocab, params, DUMP_INDENT));
        let dump_block = dump_block.trim_end_matches('\n');

        let revision_line = format!("Using Git Commit From: {}", self.source.revision);
        let mut blocks: Vec<&str> = vec![
            dump_block,
            PROJECT_URL,
            revision_line.as_str(),
            self.source.copyright_base.as_str(),
        ];
        if params.spelling().contains(&Spelling::Au) {
            blocks.extend(self.source.section(SECTION_AU));
        }
        if params.max_size() > self.vocab.large_list_threshold {
            blocks.extend(self.source.section(SECTION_LARGE_LIST));
        }

        let mut header = blocks.join("\n\n");
        header.push_str("\n\n");
        header
    }

    /// Parameter dump with the standard indent, as written to builder control files.
    pub fn dump(&self, params: &GenerationParameters) -> String {
        dump_params(self.vocab, params, DUMP_INDENT)
    }
}

/// One `Label: value` line per parameter, each prefixed with `prefix`.
pub fn dump_params(vocab: &Vocabulary, params: &GenerationParameters, prefix: &str) -> String {
    let special = if params.special().is_empty() {
        "<none>".to_string()
    } else {
        params
            .special()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };
    [
        format!("Size: {}", vocab.size_label(params.max_size())),
        format!("Spelling: {}", spelling_codes(params)),
        format!("Variant Level: {}", vocab.variant_label(params.variant_level())),
        format!("Special: {special}"),
        format!("Diacritics: {}", params.diacritic().as_str()),
    ]
    .iter()
    .map(|line| format!("{prefix}{line}\n"))
    .collect()
}

/// Compact region codes in the order US GB CA AU.
///
/// The British variants collapse to `GB` only when both are selected.
fn spelling_codes(params: &GenerationParameters) -> String {
    let spelling = params.spelling();
    let has = |s: Spelling| spelling.contains(&s);
    let mut parts: Vec<&str> = Vec::new();
    if has(Spelling::Us) {
        parts.push("US");
    }
    match (has(Spelling::GbIse), has(Spelling::GbIze)) {
        (true, true) => parts.push("GB"),
        (true, false) => parts.push("GB(-ise)"),
        (false, true) => parts.push("GB(-ize/oed)"),
        (false, false) => {}
    }
    if has(Spelling::Ca) {
        parts.push("CA");
    }
    if has(Spelling::Au) {
        parts.push("AU");
    }
    if parts.is_empty() {
        "<none>".to_string()
    } else {
        parts.join(" ")
    }
}
