//! Sentence templates per theme and complexity.
//!
//! Templates use `{character}`, `{place}`, `{object}`, `{action}` and
//! `{colour}` placeholders. A template may use any subset of them and may
//! repeat one.

use crate::types::{Category, Complexity};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const SPACE_SIMPLE: &[&str] = &[
    "The {colour} {character} discovered a {object} on the {place}.",
    "An {character} traveled to the {place} carrying a {colour} {object}.",
    "While exploring the {place}, the {character} found a {colour} {object}.",
    "The {character} used a {colour} {object} to navigate the {place}.",
];

const SPACE_ADVANCED: &[&str] = &[
    "The {character} {action} carefully with the {colour} {object} while exploring the distant {place}.",
    "After finding a {colour} {object}, the {character} {action} across the mysterious {place}.",
    "The brave {character} {action} to the {place} using only a {colour} {object} as a guide.",
    "Using the {colour} {object}, the clever {character} managed to {action} around the {place}.",
];

const MAGIC_SIMPLE: &[&str] = &[
    "The {colour} {character} enchanted a {object} inside the {place}.",
    "A {character} journeyed to the {place} with a {colour} {object}.",
    "Deep within the {place}, the {character} discovered a {colour} {object}.",
    "The {character} cast a spell using a {colour} {object} near the {place}.",
];

const MAGIC_ADVANCED: &[&str] = &[
    "The {character} {action} mysteriously with the {colour} {object} while exploring the ancient {place}.",
    "After enchanting a {colour} {object}, the {character} {action} through the magical {place}.",
    "The wise {character} {action} to the {place} wielding only a {colour} {object}.",
    "Channeling power through the {colour} {object}, the {character} {action} confidently around the {place}.",
];

const OCEAN_SIMPLE: &[&str] = &[
    "The {colour} {character} discovered a {object} beneath the {place}.",
    "A {character} ventured to the {place} carrying a {colour} {object}.",
    "Deep within the {place}, the {character} found a {colour} {object}.",
    "The {character} used a {colour} {object} to navigate the {place}.",
];

const OCEAN_ADVANCED: &[&str] = &[
    "The {character} {action} gracefully with the {colour} {object} while exploring the mysterious {place}.",
    "After finding a {colour} {object}, the {character} {action} through the vast {place}.",
    "The agile {character} {action} to the {place} guided only by a {colour} {object}.",
    "Using the {colour} {object}, the clever {character} managed to {action} around the dangerous {place}.",
];

const DEFAULT_SIMPLE: &[&str] = &[
    "The {colour} {character} with the {object}.",
    "A {character} finds a {object}.",
    "The {character} at the {place}.",
    "The {colour} {object} in the {place}.",
];

const DEFAULT_ADVANCED: &[&str] = &[
    "The {character} {action} with the {object} in the {place}.",
    "The {character} {action} to the {place} with the {object}.",
    "The {colour} {character} {action} through the {place}.",
    "The {character} uses the {object} while {action} near the {place}.",
];

/// Templates for one theme (or the default set), split by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(default)]
    pub simple: Vec<String>,
    #[serde(default)]
    pub advanced: Vec<String>,
}

impl TemplateSet {
    fn from_static(simple: &[&str], advanced: &[&str]) -> Self {
        Self {
            simple: simple.iter().map(|t| t.to_string()).collect(),
            advanced: advanced.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn get(&self, complexity: Complexity) -> &[String] {
        match complexity {
            Complexity::Simple => &self.simple,
            Complexity::Advanced => &self.advanced,
        }
    }
}

/// Theme-specific template sets plus a theme-agnostic default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    #[serde(default)]
    pub themes: HashMap<String, TemplateSet>,
    pub default: TemplateSet,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    /// The catalog shipped with the generator: space, magic and ocean
    pub fn builtin() -> Self {
        let mut themes = HashMap::new();
        themes.insert(
            "space".to_string(),
            TemplateSet::from_static(SPACE_SIMPLE, SPACE_ADVANCED),
        );
        themes.insert(
            "magic".to_string(),
            TemplateSet::from_static(MAGIC_SIMPLE, MAGIC_ADVANCED),
        );
        themes.insert(
            "ocean".to_string(),
            TemplateSet::from_static(OCEAN_SIMPLE, OCEAN_ADVANCED),
        );

        Self {
            themes,
            default: TemplateSet::from_static(DEFAULT_SIMPLE, DEFAULT_ADVANCED),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a custom catalog: `{ "themes": { "<theme>": { "simple": [...], "advanced": [...] } }, "default": {...} }`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template catalog {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse template catalog {:?}", path))
    }

    /// Templates for `theme` at `complexity`, falling back to the default
    /// catalog when the theme has none for that tier. `None` means no theme
    /// is active.
    pub fn templates(&self, theme: Option<&str>, complexity: Complexity) -> &[String] {
        theme
            .and_then(|t| self.themes.get(t))
            .map(|set| set.get(complexity))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| self.default.get(complexity))
    }
}

/// Categories whose placeholder appears literally in `template`, in
/// substitution order
pub fn placeholders_in(template: &str) -> Vec<Category> {
    Category::ALL
        .iter()
        .copied()
        .filter(|category| template.contains(&category.placeholder()))
        .collect()
}
