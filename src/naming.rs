//! Dictionary package naming.

use crate::params::{Region, Spelling};
use std::collections::BTreeSet;
use std::fmt;

/// Short name of a generated dictionary package.
///
/// `en_<REGION>-custom` when the selected spellings cover a single region
/// (both British variants count as one), `en-custom` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictName {
    Region(Region),
    Generic,
}

impl DictName {
    pub fn from_spellings<'a, I>(spellings: I) -> Self
    where
        I: IntoIterator<Item = &'a Spelling>,
    {
        let regions: BTreeSet<Region> = spellings.into_iter().map(|s| s.region()).collect();
        let mut iter = regions.into_iter();
        match (iter.next(), iter.next()) {
            (Some(region), None) => DictName::Region(region),
            _ => DictName::Generic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DictName::Region(Region::Us) => "en_US-custom",
            DictName::Region(Region::Gb) => "en_GB-custom",
            DictName::Region(Region::Ca) => "en_CA-custom",
            DictName::Region(Region::Au) => "en_AU-custom",
            DictName::Generic => "en-custom",
        }
    }

    /// File name of the Hunspell package built for this name.
    pub fn hunspell_archive(self) -> &'static str {
        match self {
            DictName::Region(Region::Us) => "hunspell-en_US-custom.zip",
            DictName::Region(Region::Gb) => "hunspell-en_GB-custom.zip",
            DictName::Region(Region::Ca) => "hunspell-en_CA-custom.zip",
            DictName::Region(Region::Au) => "hunspell-en_AU-custom.zip",
            DictName::Generic => "hunspell-en-custom.zip",
        }
    }
}

impl fmt::Display for DictName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenience wrapper over [`DictName::from_spellings`].
pub fn dict_name(spellings: &BTreeSet<Spelling>) -> DictName {
    DictName::from_spellings(spellings)
}
