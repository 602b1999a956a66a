use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Relative size of a character or object, used by the coherence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Tiny,
    Small,
    Large,
}

/// Optional capability flags attached to a word.
///
/// A `None` field places no constraint on the word. Values of the wrong
/// shape (`"size": "huge"`, `"canRun": "no"`) are read as `None` so one odd
/// entry never rejects the whole word list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traits {
    #[serde(default, deserialize_with = "lenient_trait", skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, deserialize_with = "lenient_trait", skip_serializing_if = "Option::is_none")]
    pub can_run: Option<bool>,
    #[serde(default, deserialize_with = "lenient_trait", skip_serializing_if = "Option::is_none")]
    pub can_hide: Option<bool>,
    #[serde(default, deserialize_with = "lenient_trait", skip_serializing_if = "Option::is_none")]
    pub can_fly: Option<bool>,
    #[serde(default, deserialize_with = "lenient_trait", skip_serializing_if = "Option::is_none")]
    pub can_be_carried: Option<bool>,
}

fn lenient_trait<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            warn!("Ignoring unrecognised word trait value: {}", raw);
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichWord {
    pub word: String,
    #[serde(flatten)]
    pub traits: Traits,
}

/// A vocabulary item: either a bare string or a word with trait metadata.
///
/// In the JSON word lists both shapes may appear in the same category:
/// `"nebula"` or `{ "word": "robot", "size": "large", "canRun": false }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordEntry {
    Plain(String),
    Rich(RichWord),
}

impl WordEntry {
    pub fn plain(word: impl Into<String>) -> Self {
        WordEntry::Plain(word.into())
    }

    pub fn rich(word: impl Into<String>, traits: Traits) -> Self {
        WordEntry::Rich(RichWord {
            word: word.into(),
            traits,
        })
    }

    /// The word itself, whichever shape the entry has
    pub fn word(&self) -> &str {
        match self {
            WordEntry::Plain(word) => word,
            WordEntry::Rich(rich) => &rich.word,
        }
    }

    /// Trait metadata, or `None` for a bare string
    pub fn traits(&self) -> Option<&Traits> {
        match self {
            WordEntry::Plain(_) => None,
            WordEntry::Rich(rich) => Some(&rich.traits),
        }
    }

    pub fn is_rich(&self) -> bool {
        matches!(self, WordEntry::Rich(_))
    }

    pub fn size(&self) -> Option<Size> {
        self.traits().and_then(|t| t.size)
    }

    pub fn can_run(&self) -> Option<bool> {
        self.traits().and_then(|t| t.can_run)
    }

    pub fn can_hide(&self) -> Option<bool> {
        self.traits().and_then(|t| t.can_hide)
    }

    pub fn can_fly(&self) -> Option<bool> {
        self.traits().and_then(|t| t.can_fly)
    }

    pub fn can_be_carried(&self) -> Option<bool> {
        self.traits().and_then(|t| t.can_be_carried)
    }
}

impl From<&str> for WordEntry {
    fn from(word: &str) -> Self {
        WordEntry::plain(word)
    }
}

/// The five word categories of a story.
///
/// Word lists key them by plural US spelling (`colors`), templates by the
/// singular UK-spelled placeholder (`{colour}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Character,
    Place,
    Object,
    Action,
    Colour,
}

impl Category {
    /// Substitution order used when rendering a template
    pub const ALL: [Category; 5] = [
        Category::Character,
        Category::Place,
        Category::Object,
        Category::Action,
        Category::Colour,
    ];

    /// Key of this category in a word list document
    pub fn lexicon_key(&self) -> &'static str {
        match self {
            Category::Character => "characters",
            Category::Place => "places",
            Category::Object => "objects",
            Category::Action => "actions",
            Category::Colour => "colors",
        }
    }

    /// Name the generator asks the lexicon for. Colour is requested with the
    /// UK spelling and translated at lookup time.
    pub fn request_key(&self) -> &'static str {
        match self {
            Category::Colour => "colours",
            other => other.lexicon_key(),
        }
    }

    /// Placeholder key inside templates, without braces
    pub fn placeholder_key(&self) -> &'static str {
        match self {
            Category::Character => "character",
            Category::Place => "place",
            Category::Object => "object",
            Category::Action => "action",
            Category::Colour => "colour",
        }
    }

    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.placeholder_key())
    }
}

/// Template tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Advanced,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Complexity::Simple),
            "advanced" => Ok(Complexity::Advanced),
            other => Err(anyhow::anyhow!(
                "Invalid complexity: {}. Use 'simple' or 'advanced'",
                other
            )),
        }
    }
}

/// Vocabulary document for one theme: `{ "words": { "characters": [...], ... } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeWords {
    pub words: HashMap<String, Vec<WordEntry>>,
}

impl ThemeWords {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Non-empty list for a lexicon category key
    pub fn category(&self, key: &str) -> Option<&[WordEntry]> {
        self.words
            .get(key)
            .map(|list| list.as_slice())
            .filter(|list| !list.is_empty())
    }
}

/// One sampled word per category for a single generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    pub character: WordEntry,
    pub place: WordEntry,
    pub object: WordEntry,
    pub action: WordEntry,
    pub colour: WordEntry,
}

impl WordBank {
    pub fn get(&self, category: Category) -> &WordEntry {
        match category {
            Category::Character => &self.character,
            Category::Place => &self.place,
            Category::Object => &self.object,
            Category::Action => &self.action,
            Category::Colour => &self.colour,
        }
    }

    /// Plain words keyed by category, in substitution order
    pub fn flatten(&self) -> Vec<(Category, String)> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.get(category).word().to_string()))
            .collect()
    }
}

/// What a story-password generation hands to the display layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub story: String,
    pub words: Vec<String>,
    pub password: String,
}
