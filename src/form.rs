//! HTML selection form, rendered with askama from `templates/create_form.html`.

use crate::params::{Diacritic, Special, Spelling};
use crate::vocab::{Preset, Tier, Vocabulary};
use askama::Template;

/// One `<option>` or checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    fn new(value: impl ToString, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
            selected,
        }
    }
}

#[derive(Template)]
#[template(path = "create_form.html")]
pub struct CreateForm<'a> {
    /// Path the form submits to.
    pub action: &'a str,
    pub presets: Vec<Choice>,
    pub sizes: Vec<Choice>,
    pub spellings: Vec<Choice>,
    pub variant_levels: Vec<Choice>,
    pub diacritics: Vec<Choice>,
    pub specials: Vec<Choice>,
    pub revision: &'a str,
}

impl<'a> CreateForm<'a> {
    /// Form pre-filled from `preset`.
    pub fn new(vocab: &Vocabulary, preset: &Preset, action: &'a str, revision: &'a str) -> Self {
        let tiers = |tiers: Vec<&Tier>, current: u8| -> Vec<Choice> {
            tiers
                .into_iter()
                .map(|t| Choice::new(t.value, t.label.clone(), t.value == current))
                .collect()
        };
        let selected_specials = preset.specials();
        Self {
            action,
            presets: vocab
                .presets
                .iter()
                .map(|p| Choice::new(&p.name, p.name.clone(), p.name == preset.name))
                .collect(),
            sizes: tiers(vocab.sorted_sizes(), preset.max_size),
            spellings: Spelling::ALL
                .into_iter()
                .map(|s| Choice::new(s.as_param(), s.label(), preset.spelling.contains(&s)))
                .collect(),
            variant_levels: tiers(vocab.sorted_variant_levels(), preset.variant_level),
            diacritics: Diacritic::ALL
                .into_iter()
                .map(|d| Choice::new(d.as_str(), d.label(), d == preset.diacritic))
                .collect(),
            specials: Special::ALL
                .into_iter()
                .map(|s| {
                    Choice::new(s.as_str(), s.label(), selected_specials.contains(&s))
                })
                .collect(),
            revision,
        }
    }
}
