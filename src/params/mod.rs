//! # Parameter Resolution
//!
//! Turns raw query parameters into one canonical [`GenerationParameters`]
//! record, and resolves what the caller asked for ([`CreateRequest`]).
//!
//! Two encodings of the spelling-variant setting are accepted:
//!
//! - `variant_level` (current): an integer 0–9
//! - `max_variant` (legacy): an integer 0–3, mapped through
//!   [`LEGACY_VARIANT_MAP`]
//!
//! When both are present `variant_level` wins. Every value is checked here,
//! before any word list query or packaging work starts.
//!
//! ```rust
//! use scowl_create::params::{GenerationParameters, QueryParams};
//!
//! let query = QueryParams::parse("max_size=70&spelling=GBs&spelling=GBz&max_variant=1");
//! let params = GenerationParameters::resolve(&query).unwrap();
//! assert_eq!(params.max_size(), 70);
//! assert_eq!(params.variant_level(), 4);
//! ```

mod query;
mod types;


pub use query::QueryParams;
pub use types::{Diacritic, Region, Special, Spelling};

use crate::error::ValidationError;
use crate::package::{OutputFormat, TextEncoding};
use crate::vocab::Vocabulary;
use std::collections::BTreeSet;
use tracing::debug;

/// Size used when `max_size` is absent.
pub const DEFAULT_MAX_SIZE: u8 = 60;
/// Largest accepted `max_size`; unknown tiers below it are kept as-is.
pub const MAX_SIZE_LIMIT: i64 = 99;
/// Variant level used when neither `variant_level` nor `max_variant` is given.
pub const DEFAULT_VARIANT_LEVEL: u8 = 1;
/// Largest accepted `variant_level`.
pub const MAX_VARIANT_LEVEL: i64 = 9;
/// Legacy `max_variant` value → `variant_level`.
pub const LEGACY_VARIANT_MAP: [(i64, u8); 4] = [(0, 1), (1, 4), (2, 6), (3, 8)];

/// Canonical, validated word list parameters.
///
/// Only constructed through [`GenerationParameters::resolve`] or
/// [`GenerationParameters::from_preset`], so `spelling` is never empty and
/// `variant_level` is always within 0–9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParameters {
    max_size: u8,
    spelling: BTreeSet<Spelling>,
    variant_level: u8,
    diacritic: Diacritic,
    special: BTreeSet<Special>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            spelling: BTreeSet::from([Spelling::Us]),
            variant_level: DEFAULT_VARIANT_LEVEL,
            diacritic: Diacritic::Strip,
            special: BTreeSet::new(),
        }
    }
}

impl GenerationParameters {
    /// Validate and default every generation parameter in `query`.
    pub fn resolve(query: &QueryParams) -> Result<Self, ValidationError> {
        let max_size = resolve_max_size(query)?;
        let spelling = resolve_spelling(query)?;
        let variant_level = resolve_variant_level(query)?;
        let diacritic = match query.get("diacritic") {
            Some(raw) => Diacritic::from_param(raw).ok_or_else(|| {
                ValidationError::new("diacritic", format!("Invalid diacritic: {raw}"))
            })?,
            None => Diacritic::Strip,
        };
        let special = query
            .get_all("special")
            .into_iter()
            .map(|raw| {
                Special::from_param(raw).ok_or_else(|| {
                    ValidationError::new("special", format!("Invalid special: {raw}"))
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let params = Self {
            max_size,
            spelling,
            variant_level,
            diacritic,
            special,
        };
        debug!(
            max_size = params.max_size,
            spelling = ?params.spelling,
            variant_level = params.variant_level,
            diacritic = params.diacritic.as_str(),
            special = ?params.special,
            "Parameters resolved"
        );
        Ok(params)
    }

    /// Parameters a form preset starts from.
    ///
    /// Returns `None` for a preset that fails [`Preset::validate`].
    ///
    /// [`Preset::validate`]: crate::vocab::Preset::validate
    pub fn from_preset(preset: &crate::vocab::Preset) -> Option<Self> {
        preset.validate().ok()?;
        Some(Self {
            max_size: preset.max_size,
            spelling: preset.spelling.iter().copied().collect(),
            variant_level: preset.variant_level,
            diacritic: preset.diacritic,
            special: preset.specials().into_iter().collect(),
        })
    }

    pub fn max_size(&self) -> u8 {
        self.max_size
    }

    /// Selected spellings, in the fixed order US, GBs, GBz, CA, AU.
    pub fn spelling(&self) -> &BTreeSet<Spelling> {
        &self.spelling
    }

    pub fn variant_level(&self) -> u8 {
        self.variant_level
    }

    pub fn diacritic(&self) -> Diacritic {
        self.diacritic
    }

    /// Selected special categories, in the fixed order hacker, roman-numerals.
    pub fn special(&self) -> &BTreeSet<Special> {
        &self.special
    }

    /// Spellings as the lexical database's single-letter codes.
    pub fn database_spellings(&self) -> Vec<char> {
        self.spelling.iter().map(|s| s.database_code()).collect()
    }
}

/// Python-style integer parsing: surrounding whitespace and a sign are allowed.
fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn resolve_max_size(query: &QueryParams) -> Result<u8, ValidationError> {
    let Some(raw) = query.get("max_size") else {
        return Ok(DEFAULT_MAX_SIZE);
    };
    let value = parse_int(raw)
        .ok_or_else(|| ValidationError::new("max_size", "max_size must be an integer"))?;
    if !(0..=MAX_SIZE_LIMIT).contains(&value) {
        return Err(ValidationError::new("max_size", "max_size must be 0-99"));
    }
    Ok(value as u8)
}

fn resolve_spelling(query: &QueryParams) -> Result<BTreeSet<Spelling>, ValidationError> {
    let raw = query.get_all("spelling");
    if raw.is_empty() {
        return Ok(BTreeSet::from([Spelling::Us]));
    }
    raw.into_iter()
        .map(|s| {
            Spelling::from_param(s)
                .ok_or_else(|| ValidationError::new("spelling", format!("Invalid spelling: {s}")))
        })
        .collect()
}

/// Current `variant_level` first, legacy `max_variant` second, default last.
fn resolve_variant_level(query: &QueryParams) -> Result<u8, ValidationError> {
    if let Some(raw) = query.get("variant_level") {
        let level = parse_int(raw).ok_or_else(|| {
            ValidationError::new("variant_level", "variant_level must be an integer")
        })?;
        if !(0..=MAX_VARIANT_LEVEL).contains(&level) {
            return Err(ValidationError::new("variant_level", "variant_level must be 0-9"));
        }
        Ok(level as u8)
    } else if let Some(raw) = query.get("max_variant") {
        let legacy = parse_int(raw)
            .ok_or_else(|| ValidationError::new("max_variant", "max_variant must be an integer"))?;
        legacy_variant_level(legacy)
            .ok_or_else(|| ValidationError::new("max_variant", "max_variant must be 0-3"))
    } else {
        Ok(DEFAULT_VARIANT_LEVEL)
    }
}

/// Map a legacy `max_variant` value onto the current 0–9 scale.
pub fn legacy_variant_level(max_variant: i64) -> Option<u8> {
    LEGACY_VARIANT_MAP
        .iter()
        .find(|(legacy, _)| *legacy == max_variant)
        .map(|(_, level)| *level)
}

/// What the caller wants built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    WordList {
        encoding: TextEncoding,
        format: OutputFormat,
    },
    Hunspell,
    Aspell,
}

impl DownloadTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadTarget::WordList { .. } => "wordlist",
            DownloadTarget::Hunspell => "hunspell",
            DownloadTarget::Aspell => "aspell",
        }
    }
}

/// A fully validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequest {
    /// Render the selection form, pre-filled from the named preset.
    Form { preset: String },
    /// Build and return an artifact.
    Download {
        target: DownloadTarget,
        params: GenerationParameters,
    },
}

impl CreateRequest {
    /// Validate the whole query, including the download target and the
    /// word list output options, before any work is done.
    pub fn resolve(query: &QueryParams, vocab: &Vocabulary) -> Result<Self, ValidationError> {
        let download = query.get("download").filter(|d| !d.is_empty());
        let Some(download) = download else {
            let preset = query.get("defaults").unwrap_or(vocab.default_preset.as_str());
            if vocab.preset(preset).is_none() {
                return Err(ValidationError::new(
                    "defaults",
                    format!("Invalid defaults preset: {preset}"),
                ));
            }
            return Ok(CreateRequest::Form {
                preset: preset.to_string(),
            });
        };

        if !matches!(download, "wordlist" | "hunspell" | "aspell") {
            return Err(ValidationError::new(
                "download",
                format!("Invalid download type: {download}"),
            ));
        }
        let params = GenerationParameters::resolve(query)?;

        let target = match download {
            "hunspell" => DownloadTarget::Hunspell,
            "aspell" => DownloadTarget::Aspell,
            _ => DownloadTarget::WordList {
                encoding: resolve_encoding(query)?,
                format: resolve_format(query)?,
            },
        };
        Ok(CreateRequest::Download { target, params })
    }
}

fn resolve_encoding(query: &QueryParams) -> Result<TextEncoding, ValidationError> {
    match query.get("encoding") {
        Some(raw) => TextEncoding::from_param(raw)
            .ok_or_else(|| ValidationError::new("encoding", format!("Invalid encoding: {raw}"))),
        None => Ok(TextEncoding::Utf8),
    }
}

fn resolve_format(query: &QueryParams) -> Result<OutputFormat, ValidationError> {
    match query.get("format") {
        Some(raw) => OutputFormat::from_param(raw)
            .ok_or_else(|| ValidationError::new("format", format!("Invalid format: {raw}"))),
        None => Ok(OutputFormat::Inline),
    }
}
