use crate::coherence::{CoherenceCheck, RuleChecker};
use crate::deriver::{capitalize, derive};
use crate::display::{LogNotifier, Notifier};
use crate::lexicon::LexiconStore;
use crate::random::{choose, RandomSource};
use crate::settings::Settings;
use crate::source::WordListSource;
use crate::templates::{placeholders_in, TemplateCatalog};
use crate::types::{Category, Complexity, GenerationResult, WordBank};
use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Sampling attempts before an incoherent word bank is accepted anyway
pub const MAX_COHERENCE_ATTEMPTS: usize = 3;

pub const FAILURE_MESSAGE: &str = "Oops! Something went wrong generating your password.";

/// Story password generator for one theme and complexity.
///
/// Randomness is drawn, in order, for the template and then for the
/// character, place, object, action and colour of each sampling attempt.
pub struct StoryGenerator<S> {
    lexicon: LexiconStore<S>,
    catalog: TemplateCatalog,
    checker: Box<dyn CoherenceCheck + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    current_theme: Option<String>,
    complexity: Complexity,
}

impl<S: WordListSource> StoryGenerator<S> {
    pub fn new(source: S) -> Self {
        Self::with_lexicon(LexiconStore::new(source))
    }

    /// Build on an existing (possibly shared) lexicon store
    pub fn with_lexicon(lexicon: LexiconStore<S>) -> Self {
        Self {
            lexicon,
            catalog: TemplateCatalog::builtin(),
            checker: Box::new(RuleChecker),
            notifier: Arc::new(LogNotifier),
            current_theme: None,
            complexity: Complexity::Simple,
        }
    }

    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_checker(mut self, checker: impl CoherenceCheck + Send + Sync + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier + Send + Sync>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn lexicon(&self) -> &LexiconStore<S> {
        &self.lexicon
    }

    /// Theme whose vocabulary is in use, if one loaded successfully
    pub fn current_theme(&self) -> Option<&str> {
        self.current_theme.as_deref()
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn set_complexity(&mut self, complexity: Complexity) {
        self.complexity = complexity;
    }

    /// Adopt the configured complexity and load the configured theme
    pub async fn initialise(&mut self, settings: &Settings) -> bool {
        info!("Loading theme from settings: {}", settings.story_theme);
        self.complexity = settings.story_complexity;
        self.load_theme(&settings.story_theme).await
    }

    /// Load a theme and switch to it. On failure the previous theme (or none)
    /// stays active.
    pub async fn load_theme(&mut self, theme: &str) -> bool {
        if self.lexicon.load_theme(theme).await {
            self.current_theme = Some(theme.to_string());
            true
        } else {
            false
        }
    }

    /// One word per category from the active theme
    pub fn sample_bank(&self, rng: &mut dyn RandomSource) -> WordBank {
        let theme = self.current_theme();
        let mut pick = |category: Category| {
            self.lexicon.random_word(theme, category.request_key(), rng)
        };

        WordBank {
            character: pick(Category::Character),
            place: pick(Category::Place),
            object: pick(Category::Object),
            action: pick(Category::Action),
            colour: pick(Category::Colour),
        }
    }

    /// Sample until the checker accepts or the attempts run out.
    ///
    /// Returns the bank and the number of attempts made. After the last
    /// attempt the bank is used whether or not it is coherent.
    pub fn sample_coherent_bank(&self, rng: &mut dyn RandomSource) -> (WordBank, usize) {
        let mut attempts = 0;
        loop {
            let bank = self.sample_bank(rng);
            attempts += 1;

            if self.checker.is_coherent(&bank) {
                return (bank, attempts);
            }
            debug!("Incoherent word bank on attempt {}: {:?}", attempts, bank);

            if attempts >= MAX_COHERENCE_ATTEMPTS {
                warn!(
                    "No coherent word bank after {} attempts, using the last one",
                    attempts
                );
                return (bank, attempts);
            }
        }
    }

    /// Generate a story password.
    ///
    /// Never panics on bad data: any failure is logged, reported through the
    /// notifier and turned into `None`.
    pub fn generate(&self, rng: &mut dyn RandomSource) -> Option<GenerationResult> {
        match self.try_generate(rng) {
            Ok(result) => {
                info!("Generated story password with {} words", result.words.len());
                Some(result)
            }
            Err(e) => {
                error!("Error generating story password: {:#}", e);
                self.notifier.notify(FAILURE_MESSAGE);
                None
            }
        }
    }

    fn try_generate(&self, rng: &mut dyn RandomSource) -> Result<GenerationResult> {
        let templates = self.catalog.templates(self.current_theme(), self.complexity);
        let template = choose(rng, templates).ok_or_else(|| {
            anyhow::anyhow!(
                "No templates for theme {:?} at {} complexity",
                self.current_theme(),
                self.complexity
            )
        })?;
        debug!("Using template: {}", template);

        let (bank, attempts) = self.sample_coherent_bank(rng);
        debug!("Word bank chosen after {} attempt(s)", attempts);

        let words = bank.flatten();
        let story = improve_readability(&render(template, &words));
        let used = placeholders_in(template);
        let (words, password) = derive(&story, &used, &words);

        Ok(GenerationResult {
            story,
            words,
            password,
        })
    }
}

/// Substitute every placeholder occurrence, category by category
pub fn render(template: &str, words: &[(Category, String)]) -> String {
    words
        .iter()
        .fold(template.to_string(), |story, (category, word)| {
            story.replace(&category.placeholder(), word)
        })
}

/// Capitalise the first letter and make sure the story ends with `.`, `!` or `?`
pub fn improve_readability(story: &str) -> String {
    let mut story = if story.starts_with(|c: char| c.is_ascii_uppercase()) {
        story.to_string()
    } else {
        capitalize(story)
    };

    if !story.ends_with(&['.', '!', '?'][..]) {
        story.push('.');
    }
    story
}
