//! # Source Provenance
//!
//! Text fragments describing where a word list comes from, read once from
//! the SCOWL checkout at start-up:
//!
//! - `Copyright`: a base block followed by optional sections, each introduced
//!   by a line starting with `===` and the section key (`=== AU`, `=== UKACD`)
//! - `README.md`: shipped inside archives as `README_SCOWL.md`
//! - the commit the checkout is at, from `git log`
//!
//! ```text
//! SCOWL is Copyright ...
//!
//! === AU
//! Additional Australian terms ...
//! === UKACD
//! The UK Advanced Cryptics Dictionary ...
//! ```

use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Copyright section pulled in when Australian spelling is selected.
pub const SECTION_AU: &str = "AU";
/// Copyright section pulled in for large lists.
pub const SECTION_LARGE_LIST: &str = "UKACD";

/// Read-only provenance data shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    /// Revision of the word source, e.g. `Tue Mar 5 12:00:00 2024 -0500 [abc1234]`.
    pub revision: String,
    pub copyright_base: String,
    pub copyright_sections: BTreeMap<String, String>,
    /// The lexical source's own README.
    pub readme: String,
}

impl SourceInfo {
    /// Load provenance from a SCOWL checkout.
    ///
    /// `revision` overrides the `git log` lookup, for deployments that are
    /// not a git working tree.
    pub fn load(scowl_root: &Path, revision: Option<&str>) -> anyhow::Result<Self> {
        let copyright_path = scowl_root.join("Copyright");
        let copyright = std::fs::read_to_string(&copyright_path)
            .with_context(|| format!("Failed to read {}", copyright_path.display()))?;
        let readme_path = scowl_root.join("README.md");
        let readme = std::fs::read_to_string(&readme_path)
            .with_context(|| format!("Failed to read {}", readme_path.display()))?;
        let revision = match revision {
            Some(rev) => rev.to_string(),
            None => git_revision(scowl_root)?,
        };

        let (copyright_base, copyright_sections) = parse_copyright(&copyright);
        for key in [SECTION_AU, SECTION_LARGE_LIST] {
            if !copyright_sections.contains_key(key) {
                warn!(section = key, path = %copyright_path.display(), "Copyright section missing");
            }
        }
        info!(
            revision = %revision,
            sections = ?copyright_sections.keys().collect::<Vec<_>>(),
            readme_bytes = readme.len(),
            "Source provenance loaded"
        );

        Ok(Self {
            revision,
            copyright_base,
            copyright_sections,
            readme,
        })
    }

    pub fn section(&self, key: &str) -> Option<&str> {
        self.copyright_sections.get(key).map(String::as_str)
    }
}

/// Split a `Copyright` file into its base block and keyed sections.
pub fn parse_copyright(text: &str) -> (String, BTreeMap<String, String>) {
    let text = text.trim_end_matches('\n');
    let mut parts = text.split("\n===");
    let base = parts.next().unwrap_or_default().trim_matches('\n').to_string();
    let mut sections = BTreeMap::new();
    for part in parts {
        let (first_line, body) = part.split_once('\n').unwrap_or((part, ""));
        let key = first_line.trim();
        if !key.is_empty() {
            sections.insert(key.to_string(), body.trim_matches('\n').to_string());
        }
    }
    (base, sections)
}

/// `git log` date and short hash of the newest commit in `dir`.
pub fn git_revision(dir: &Path) -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(["log", "--pretty=format:%cd [%h]", "-n", "1"])
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git in {}", dir.display()))?;
    if !output.status.success() {
        bail!(
            "git log failed in {}: {}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
