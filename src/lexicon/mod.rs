//! # Lexical Database
//!
//! The word corpus is an external collaborator: given canonical parameters it
//! returns the qualifying words, and it can fold the accents off a single
//! word. [`LexicalDatabase`] is that seam. [`WordTable`] is the bundled
//! backend, a tab-separated table loaded into memory once at start-up.
//!
//! [`WordSet`] is the per-request result after diacritic handling. It is a
//! sorted set, so every output format sees the same lexicographic order.

mod table;

pub use table::WordTable;

use crate::error::LexiconError;
use crate::params::{Diacritic, GenerationParameters, Special};
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A word list query in the database's own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery {
    pub max_size: u8,
    /// Single-letter spelling codes (`A`, `B`, `Z`, `C`, `D`).
    pub spellings: Vec<char>,
    pub variant_level: u8,
    /// Special categories to include on top of the general list.
    pub categories: Vec<Special>,
}

impl WordQuery {
    pub fn from_params(params: &GenerationParameters) -> Self {
        Self {
            max_size: params.max_size(),
            spellings: params.database_spellings(),
            variant_level: params.variant_level(),
            categories: params.special().iter().copied().collect(),
        }
    }
}

/// Source of raw, un-folded words.
///
/// Implementations are shared by every request thread and must tolerate
/// concurrent queries.
pub trait LexicalDatabase: Send + Sync {
    /// Every qualifying word, accents intact. Order and duplicates do not matter.
    fn words(&self, query: &WordQuery) -> Result<Vec<String>, LexiconError>;

    /// Accent-folded form of one word.
    fn deaccent(&self, word: &str) -> String {
        deaccent(word)
    }
}

/// Strip combining marks after canonical decomposition (`café` → `cafe`).
pub fn deaccent(word: &str) -> String {
    word.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// The sorted, de-duplicated words of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: BTreeSet<String>,
}

impl WordSet {
    /// Query `db` and apply the diacritic policy of `params`.
    pub fn fetch(
        db: &dyn LexicalDatabase,
        params: &GenerationParameters,
    ) -> Result<Self, LexiconError> {
        let raw = db.words(&WordQuery::from_params(params))?;
        Ok(Self::with_diacritics(db, raw, params.diacritic()))
    }

    /// Apply a diacritic policy to raw database words.
    pub fn with_diacritics<I>(db: &dyn LexicalDatabase, raw: I, diacritic: Diacritic) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let raw = raw.into_iter();
        let words = match diacritic {
            Diacritic::Keep => raw.collect(),
            Diacritic::Strip => raw.map(|w| db.deaccent(&w)).collect(),
            Diacritic::Both => {
                let mut words = BTreeSet::new();
                for w in raw {
                    let folded = db.deaccent(&w);
                    if folded != w {
                        words.insert(folded);
                    }
                    words.insert(w);
                }
                words
            }
        };
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Words joined by `eol`, plus one trailing `eol`.
    ///
    /// An empty set still yields a single `eol`.
    pub fn joined(&self, eol: &str) -> String {
        let mut out = self.iter().collect::<Vec<_>>().join(eol);
        out.push_str(eol);
        out
    }
}

impl<S: Into<String>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
