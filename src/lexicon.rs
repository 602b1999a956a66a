use crate::random::{choose, RandomSource};
use crate::source::WordListSource;
use crate::types::{ThemeWords, WordEntry};
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

type ThemeCell = Arc<OnceCell<Arc<ThemeWords>>>;

/// Per-theme vocabulary cache in front of a `WordListSource`.
///
/// Each theme is fetched at most once per store. Concurrent loads of the same
/// theme wait on the one in-flight fetch; a failed fetch leaves the theme
/// unloaded so a later call can try again. Clones share the cache.
#[derive(Debug)]
pub struct LexiconStore<S> {
    source: Arc<S>,
    themes: Arc<Mutex<HashMap<String, ThemeCell>>>,
}

impl<S> Clone for LexiconStore<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            themes: self.themes.clone(),
        }
    }
}

impl<S: WordListSource> LexiconStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            themes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn cell(&self, theme: &str) -> ThemeCell {
        let mut themes = self.themes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        themes
            .entry(theme.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Load a theme's vocabulary, returning whether it is now available
    pub async fn load_theme(&self, theme: &str) -> bool {
        let cell = self.cell(theme);
        if cell.initialized() {
            return true;
        }

        info!("Loading theme: {}", theme);
        let loaded = cell
            .get_or_try_init(|| async {
                self.source.fetch(theme).await.map(Arc::new)
            })
            .await;

        match loaded {
            Ok(words) => {
                info!(
                    "Theme {} loaded ({} categories)",
                    theme,
                    words.words.len()
                );
                true
            }
            Err(e) => {
                error!("Error loading theme {}: {:#}", theme, e);
                false
            }
        }
    }

    pub fn is_loaded(&self, theme: &str) -> bool {
        self.words(theme).is_some()
    }

    /// Vocabulary of a loaded theme
    pub fn words(&self, theme: &str) -> Option<Arc<ThemeWords>> {
        let themes = self.themes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        themes.get(theme).and_then(|cell| cell.get().cloned())
    }

    /// Uniformly random entry from `category` of `theme`.
    ///
    /// `colours` is looked up as `colors`. When the theme is not loaded, or the
    /// category is missing or empty, the category name itself comes back as a
    /// plain word so generation can carry on.
    pub fn random_word(
        &self,
        theme: Option<&str>,
        category: &str,
        rng: &mut dyn RandomSource,
    ) -> WordEntry {
        let actual_category = if category == "colours" { "colors" } else { category };

        let Some(words) = theme.and_then(|t| self.words(t)) else {
            warn!(
                "No theme loaded, using fallback word for category: {}",
                category
            );
            return WordEntry::plain(category);
        };

        match words.category(actual_category).and_then(|list| choose(rng, list)) {
            Some(entry) => entry.clone(),
            None => {
                warn!("No words found for category: {}", actual_category);
                WordEntry::plain(category)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedRandom, StaticSource};

    fn sample_theme() -> ThemeWords {
        ThemeWords::from_json(
            r#"{"words": {
                "characters": ["fox", {"word": "mouse", "size": "small"}],
                "colors": ["red", "blue", "green"],
                "places": []
            }}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_theme_success_and_failure() {
        let store = LexiconStore::new(StaticSource::new().with_theme("forest", sample_theme()));
        assert!(store.load_theme("forest").await);
        assert!(store.is_loaded("forest"));

        assert!(!store.load_theme("desert").await);
        assert!(!store.is_loaded("desert"));
    }

    #[tokio::test]
    async fn test_theme_fetched_once() {
        let source = StaticSource::new().with_theme("forest", sample_theme());
        let store = LexiconStore::new(source);

        let (a, b) = tokio::join!(store.load_theme("forest"), store.load_theme("forest"));
        assert!(a && b);
        assert!(store.load_theme("forest").await);
        assert_eq!(store.source().fetch_count("forest"), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let store = LexiconStore::new(StaticSource::new());
        assert!(!store.load_theme("forest").await);
        assert!(!store.load_theme("forest").await);
        assert_eq!(store.source().fetch_count("forest"), 2);
    }

    #[tokio::test]
    async fn test_random_word_uses_scripted_index() {
        let store = LexiconStore::new(StaticSource::new().with_theme("forest", sample_theme()));
        store.load_theme("forest").await;

        let mut rng = ScriptedRandom::new(vec![1]);
        let entry = store.random_word(Some("forest"), "characters", &mut rng);
        assert_eq!(entry.word(), "mouse");
        assert!(entry.is_rich());
    }

    #[tokio::test]
    async fn test_colours_alias() {
        let store = LexiconStore::new(StaticSource::new().with_theme("forest", sample_theme()));
        store.load_theme("forest").await;

        for index in 0..3 {
            let uk = store.random_word(Some("forest"), "colours", &mut ScriptedRandom::new(vec![index]));
            let us = store.random_word(Some("forest"), "colors", &mut ScriptedRandom::new(vec![index]));
            assert_eq!(uk, us);
        }
    }

    #[tokio::test]
    async fn test_fallback_words() {
        let store = LexiconStore::new(StaticSource::new().with_theme("forest", sample_theme()));
        let mut rng = ScriptedRandom::new(vec![0]);

        // Not loaded yet
        assert_eq!(
            store.random_word(Some("forest"), "characters", &mut rng),
            WordEntry::plain("characters")
        );

        store.load_theme("forest").await;
        // Missing and empty categories
        assert_eq!(
            store.random_word(Some("forest"), "actions", &mut rng),
            WordEntry::plain("actions")
        );
        assert_eq!(
            store.random_word(Some("forest"), "places", &mut rng),
            WordEntry::plain("places")
        );
        // No active theme at all
        assert_eq!(
            store.random_word(None, "colours", &mut rng),
            WordEntry::plain("colours")
        );
    }
}
