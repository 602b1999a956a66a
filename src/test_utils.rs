//! Deterministic stand-ins for randomness, word-list fetching, coherence
//! checking and notification.

use crate::coherence::CoherenceCheck;
use crate::display::Notifier;
use crate::random::RandomSource;
use crate::source::WordListSource;
use crate::types::{ThemeWords, WordBank};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays a fixed sequence of indices, cycling when it runs out.
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, next: 0 }
    }

    /// Always returns `value` (modulo the bound)
    pub fn repeating(value: usize) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, bound: usize) -> usize {
        if self.values.is_empty() || bound == 0 {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % bound
    }
}

/// In-memory word-list source that counts fetches per theme
#[derive(Debug, Default)]
pub struct StaticSource {
    themes: HashMap<String, ThemeWords>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, name: &str, words: ThemeWords) -> Self {
        self.themes.insert(name.to_string(), words);
        self
    }

    pub fn fetch_count(&self, theme: &str) -> usize {
        let fetches = self.fetches.lock().unwrap_or_else(|p| p.into_inner());
        fetches.get(theme).copied().unwrap_or(0)
    }
}

impl WordListSource for StaticSource {
    async fn fetch(&self, theme: &str) -> anyhow::Result<ThemeWords> {
        {
            let mut fetches = self.fetches.lock().unwrap_or_else(|p| p.into_inner());
            *fetches.entry(theme.to_string()).or_insert(0) += 1;
        }
        // Let concurrent loaders observe the fetch in flight
        tokio::task::yield_now().await;

        self.themes
            .get(theme)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP error! status: 404"))
    }
}

/// Coherence check with a fixed verdict that counts its calls
#[derive(Debug, Clone)]
pub struct CountingChecker {
    accept: bool,
    calls: Arc<AtomicUsize>,
}

impl CountingChecker {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, still readable after the checker is moved
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl CoherenceCheck for CountingChecker {
    fn is_coherent(&self, _bank: &WordBank) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.accept
    }
}

/// Keeps every notification for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}
