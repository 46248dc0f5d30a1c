//! # Vocabulary
//!
//! Display labels, form presets and thresholds used when rendering headers
//! and the selection form. These tables track the deployed SCOWL database,
//! so they are data rather than code: the built-in defaults below can be
//! replaced from the `[vocabulary]` table of the service configuration.
//!
//! The enumerations that are part of the request contract (spellings,
//! diacritic modes, special categories) live in [`crate::params`] and are
//! not configurable.

use crate::params::{Diacritic, Special, Spelling, MAX_SIZE_LIMIT, MAX_VARIANT_LEVEL};
use serde::{Deserialize, Serialize};

/// A numeric tier with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub value: u8,
    pub label: String,
}

impl Tier {
    fn new(value: u8, label: &str) -> Self {
        Self {
            value,
            label: label.to_string(),
        }
    }
}

/// Named defaults for the selection form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub max_size: u8,
    pub spelling: Vec<Spelling>,
    pub variant_level: u8,
    pub diacritic: Diacritic,
    /// `None` checks every special category on the form.
    #[serde(default)]
    pub special: Option<Vec<Special>>,
}

impl Preset {
    fn new(name: &str, max_size: u8, spelling: &[Spelling], variant_level: u8) -> Self {
        Self {
            name: name.to_string(),
            max_size,
            spelling: spelling.to_vec(),
            variant_level,
            diacritic: Diacritic::Strip,
            special: None,
        }
    }
}

impl Preset {
    /// Special categories the preset selects; an absent list selects all.
    pub fn specials(&self) -> Vec<Special> {
        match &self.special {
            Some(list) => list.clone(),
            None => Special::ALL.to_vec(),
        }
    }

    /// Reject values a request could never carry.
    pub fn validate(&self) -> Result<(), String> {
        if self.spelling.is_empty() {
            return Err(format!("preset {:?} has no spelling", self.name));
        }
        if i64::from(self.max_size) > MAX_SIZE_LIMIT {
            return Err(format!(
                "preset {:?}: max_size must be 0-{MAX_SIZE_LIMIT}, got {}",
                self.name, self.max_size
            ));
        }
        if i64::from(self.variant_level) > MAX_VARIANT_LEVEL {
            return Err(format!(
                "preset {:?}: variant_level must be 0-{MAX_VARIANT_LEVEL}, got {}",
                self.name, self.variant_level
            ));
        }
        Ok(())
    }
}

/// Process-wide label and preset tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub sizes: Vec<Tier>,
    pub variant_levels: Vec<Tier>,
    pub presets: Vec<Preset>,
    pub default_preset: String,
    /// Sizes above this pull in the large-list copyright clause.
    pub large_list_threshold: u8,
}

impl Default for Vocabulary {
    fn default() -> Self {
        use Spelling::*;
        Self {
            sizes: vec![
                Tier::new(35, "35 (small)"),
                Tier::new(50, "50 (medium)"),
                Tier::new(60, "60 (default)"),
                Tier::new(70, "70 (large)"),
                Tier::new(80, "80 (huge)"),
                Tier::new(85, "85 (huge+)"),
            ],
            variant_levels: vec![
                Tier::new(0, "0 (none)"),
                Tier::new(1, "1 *default*"),
                Tier::new(2, "2 (equal)"),
                Tier::new(3, "3 (disagreement)"),
                Tier::new(4, "4 *common*"),
                Tier::new(5, "5 (variant)"),
                Tier::new(6, "6 *acceptable*"),
                Tier::new(7, "7 (uncommon)"),
                Tier::new(8, "8 (archaic)"),
                Tier::new(9, "9 (invalid)"),
            ],
            presets: vec![
                Preset::new("en_US", 60, &[Us], 1),
                Preset::new("en_GB-ise", 60, &[GbIse], 1),
                Preset::new("en_GB-ize", 60, &[GbIze], 1),
                Preset::new("en_CA", 60, &[Ca], 1),
                Preset::new("en_AU", 60, &[Au], 1),
                Preset::new("en_US-large", 70, &[Us], 4),
                Preset::new("en_GB-large", 70, &[GbIse, GbIze], 4),
                Preset::new("en_CA-large", 70, &[Ca], 4),
                Preset::new("en_AU-large", 70, &[Au], 4),
            ],
            default_preset: "en_US".to_string(),
            large_list_threshold: 80,
        }
    }
}

impl Vocabulary {
    /// Label for a size tier; unknown sizes render as the bare number.
    pub fn size_label(&self, size: u8) -> String {
        Self::label(&self.sizes, size)
    }

    /// Label for a variant level; unknown levels render as the bare number.
    pub fn variant_label(&self, level: u8) -> String {
        Self::label(&self.variant_levels, level)
    }

    fn label(tiers: &[Tier], value: u8) -> String {
        tiers
            .iter()
            .find(|t| t.value == value)
            .map(|t| t.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    /// Check every preset and that the default preset exists.
    pub fn validate(&self) -> Result<(), String> {
        for preset in &self.presets {
            preset.validate()?;
        }
        if self.preset(&self.default_preset).is_none() {
            return Err(format!(
                "default_preset {:?} names no preset",
                self.default_preset
            ));
        }
        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Size tiers sorted by value, as shown on the form.
    pub fn sorted_sizes(&self) -> Vec<&Tier> {
        let mut sizes: Vec<&Tier> = self.sizes.iter().collect();
        sizes.sort_by_key(|t| t.value);
        sizes
    }

    /// Variant levels sorted by value, as shown on the form.
    pub fn sorted_variant_levels(&self) -> Vec<&Tier> {
        let mut levels: Vec<&Tier> = self.variant_levels.iter().collect();
        levels.sort_by_key(|t| t.value);
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_literal_fallback() {
        let v = Vocabulary::default();
        assert_eq!(v.size_label(60), "60 (default)");
        assert_eq!(v.size_label(95), "95");
        assert_eq!(v.variant_label(4), "4 *common*");
        assert_eq!(v.variant_label(0), "0 (none)");
    }

    #[test]
    fn test_presets() {
        let v = Vocabulary::default();
        assert!(v.preset(&v.default_preset).is_some());
        let gb = v.preset("en_GB-large").unwrap();
        assert_eq!(gb.spelling, vec![Spelling::GbIse, Spelling::GbIze]);
        assert_eq!(gb.max_size, 70);
        assert_eq!(gb.variant_level, 4);
        assert!(v.preset("en_NZ").is_none());
    }

    #[test]
    fn test_deserialize_partial_override() {
        let v: Vocabulary = toml::from_str(
            r#"
            large_list_threshold = 70

            [[sizes]]
            value = 95
            label = "95 (insane)"
            "#,
        )
        .unwrap();
        assert_eq!(v.large_list_threshold, 70);
        assert_eq!(v.size_label(95), "95 (insane)");
        assert_eq!(v.size_label(60), "60");
        // untouched tables keep their defaults
        assert_eq!(v.variant_levels.len(), 10);
        assert_eq!(v.presets.len(), 9);
    }

    #[test]
    fn test_preset_from_toml() {
        let v: Vocabulary = toml::from_str(
            r#"
            default_preset = "en_GB"

            [[presets]]
            name = "en_GB"
            max_size = 60
            spelling = ["GBs", "GBz"]
            variant_level = 1
            diacritic = "keep"
            special = ["hacker"]
            "#,
        )
        .unwrap();
        let p = v.preset("en_GB").unwrap();
        assert_eq!(p.diacritic, Diacritic::Keep);
        assert_eq!(p.special, Some(vec![Special::Hacker]));
        assert_eq!(p.specials(), vec![Special::Hacker]);
    }

    #[test]
    fn test_absent_special_list_selects_all() {
        let v = Vocabulary::default();
        let p = v.preset("en_US").unwrap();
        assert_eq!(p.special, None);
        assert_eq!(p.specials(), Special::ALL.to_vec());
    }

    #[test]
    fn test_validate_rejects_out_of_range_presets() {
        assert!(Vocabulary::default().validate().is_ok());

        let mut v = Vocabulary::default();
        v.presets[0].max_size = 100;
        assert!(v.validate().unwrap_err().contains("max_size must be 0-99"));

        let mut v = Vocabulary::default();
        v.presets[0].variant_level = 10;
        assert!(v.validate().unwrap_err().contains("variant_level must be 0-9"));

        let mut v = Vocabulary::default();
        v.presets[0].spelling.clear();
        assert!(v.validate().unwrap_err().contains("no spelling"));

        let v = Vocabulary {
            default_preset: "en_XX".to_string(),
            ..Vocabulary::default()
        };
        assert!(v.validate().is_err());
    }
}
