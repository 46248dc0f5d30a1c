use serde::{Deserialize, Serialize};
use std::fmt;

/// Regional spelling selectable in a request.
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spelling {
    #[serde(rename = "US")]
    Us,
    /// British, -ise spelling.
    #[serde(rename = "GBs")]
    GbIse,
    /// British, -ize (Oxford) spelling.
    #[serde(rename = "GBz")]
    GbIze,
    #[serde(rename = "CA")]
    Ca,
    #[serde(rename = "AU")]
    Au,
}

impl Spelling {
    pub const ALL: [Spelling; 5] = [
        Spelling::Us,
        Spelling::GbIse,
        Spelling::GbIze,
        Spelling::Ca,
        Spelling::Au,
    ];

    pub fn from_param(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_param() == raw)
    }

    /// Query string value.
    pub fn as_param(self) -> &'static str {
        match self {
            Spelling::Us => "US",
            Spelling::GbIse => "GBs",
            Spelling::GbIze => "GBz",
            Spelling::Ca => "CA",
            Spelling::Au => "AU",
        }
    }

    /// Code used by the lexical database.
    pub fn database_code(self) -> char {
        match self {
            Spelling::Us => 'A',
            Spelling::GbIse => 'B',
            Spelling::GbIze => 'Z',
            Spelling::Ca => 'C',
            Spelling::Au => 'D',
        }
    }

    pub fn region(self) -> Region {
        match self {
            Spelling::Us => Region::Us,
            Spelling::GbIse | Spelling::GbIze => Region::Gb,
            Spelling::Ca => Region::Ca,
            Spelling::Au => Region::Au,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Spelling::Us => "American",
            Spelling::GbIse => "British (-ise spelling)",
            Spelling::GbIze => "British (-ize/OED spelling)",
            Spelling::Ca => "Canadian",
            Spelling::Au => "Australian",
        }
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A spelling with the two British variants merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Us,
    Gb,
    Ca,
    Au,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Gb => "GB",
            Region::Ca => "CA",
            Region::Au => "AU",
        }
    }
}

/// How accented words are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diacritic {
    /// Replace every word by its accent-folded form.
    Strip,
    Keep,
    /// Keep accented words and add their folded forms.
    Both,
}

impl Diacritic {
    pub const ALL: [Diacritic; 3] = [Diacritic::Strip, Diacritic::Keep, Diacritic::Both];

    pub fn from_param(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Diacritic::Strip => "strip",
            Diacritic::Keep => "keep",
            Diacritic::Both => "both",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Diacritic::Strip => "Strip (café becomes cafe)",
            Diacritic::Keep => "Keep",
            Diacritic::Both => "Include Both (cafe & café)",
        }
    }
}

/// Optional extra word categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Special {
    Hacker,
    RomanNumerals,
}

impl Special {
    pub const ALL: [Special; 2] = [Special::Hacker, Special::RomanNumerals];

    pub fn from_param(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Special::Hacker => "hacker",
            Special::RomanNumerals => "roman-numerals",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Special::Hacker => "Hacker (for example grepped)",
            Special::RomanNumerals => "Roman Numerals",
        }
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
