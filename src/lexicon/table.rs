use super::{LexicalDatabase, WordQuery};
use crate::error::LexiconError;
use crate::params::Special;
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// One row of the word table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    word: String,
    size: u8,
    /// Empty means every spelling.
    spellings: Vec<char>,
    variant_level: u8,
    category: Option<Special>,
}

/// In-memory word table read from a tab-separated file.
///
/// ```text
/// # word   size  spellings  variant  category
/// color    35    AC         0
/// colour   35    BZD        0
/// café     50    *          1
/// grepped  60    *          0        hacker
/// ```
///
/// `spellings` holds single-letter database codes or `*` for all; the
/// category column is optional. Blank lines and `#` comments are skipped.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    entries: Vec<Entry>,
}

impl WordTable {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word table {}", path.display()))?;
        let table = Self::parse(&text)
            .with_context(|| format!("Failed to parse word table {}", path.display()))?;
        info!(path = %path.display(), entries = table.len(), "Word table loaded");
        Ok(table)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let entry = parse_entry(line).with_context(|| format!("line {}", idx + 1))?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(line: &str) -> anyhow::Result<Entry> {
    let mut cols = line.split('\t');
    let word = cols
        .next()
        .filter(|w| !w.is_empty())
        .context("missing word")?
        .to_string();
    let size = cols
        .next()
        .context("missing size")?
        .trim()
        .parse()
        .context("invalid size")?;
    let spellings = match cols.next().context("missing spellings")?.trim() {
        "*" => Vec::new(),
        codes => codes.chars().collect(),
    };
    let variant_level = cols
        .next()
        .context("missing variant level")?
        .trim()
        .parse()
        .context("invalid variant level")?;
    let category = match cols.next().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            Special::from_param(raw).with_context(|| format!("unknown category {raw:?}"))?,
        ),
    };
    Ok(Entry {
        word,
        size,
        spellings,
        variant_level,
        category,
    })
}

impl Entry {
    fn matches(&self, query: &WordQuery) -> bool {
        self.size <= query.max_size
            && self.variant_level <= query.variant_level
            && (self.spellings.is_empty()
                || self.spellings.iter().any(|c| query.spellings.contains(c)))
            && self
                .category
                .is_none_or(|cat| query.categories.contains(&cat))
    }
}

impl LexicalDatabase for WordTable {
    fn words(&self, query: &WordQuery) -> Result<Vec<String>, LexiconError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.matches(query))
            .map(|e| e.word.clone())
            .collect())
    }
}
