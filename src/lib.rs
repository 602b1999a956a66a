pub mod coherence;
pub mod config;
pub mod deriver;
pub mod display;
pub mod generator;
pub mod lexicon;
pub mod random;
pub mod settings;
pub mod source;
pub mod standard;
pub mod strength;
pub mod templates;
pub mod test_utils;
pub mod types;

pub use coherence::{is_coherent, CoherenceCheck, RuleChecker};
pub use deriver::{derive, find_word, password_from_words};
pub use display::{format_result, highlight_story, HighlightMode, Notifier};
pub use generator::{StoryGenerator, FAILURE_MESSAGE, MAX_COHERENCE_ATTEMPTS};
pub use lexicon::LexiconStore;
pub use random::{RandomSource, RngSource};
pub use settings::{PasswordType, Settings, SettingsStore};
pub use source::{DirectorySource, EmbeddedSource, HttpSource, WordListSource};
pub use standard::generate_standard_password;
pub use strength::{assess_strength, Strength, StrengthReport};
pub use templates::TemplateCatalog;
pub use types::{Category, Complexity, GenerationResult, ThemeWords, WordBank, WordEntry};
