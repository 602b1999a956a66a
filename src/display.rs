use crate::deriver::find_word_span;
use crate::types::GenerationResult;
use log::warn;

/// How password words are marked inside the story
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HighlightMode {
    None,
    #[default]
    Bars,
    Highlight,
}

/// Side channel for user-facing messages (the speech bubble of a UI)
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Sends messages to the log only
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Prints messages to stderr so stdout only carries results
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn mark(word: &str, mode: HighlightMode) -> String {
    match mode {
        HighlightMode::None => word.to_string(),
        HighlightMode::Bars => format!("|{word}|"),
        HighlightMode::Highlight => format!("\x1b[32m{word}\x1b[0m"),
    }
}

/// Mark the first whole-word occurrence of each word in the story.
///
/// Words are located one after another in the already-marked text, so the
/// markers of earlier words never split a later match.
pub fn highlight_story(story: &str, words: &[String], mode: HighlightMode) -> String {
    if mode == HighlightMode::None {
        return story.to_string();
    }

    let mut result = story.to_string();
    for word in words {
        if let Some(span) = find_word_span(&result, word) {
            let marked = mark(&result[span.clone()], mode);
            result.replace_range(span, &marked);
        }
    }
    result
}

/// Multi-line rendering of a result for a terminal
pub fn format_result(result: &GenerationResult, mode: HighlightMode) -> String {
    let mut out = String::new();
    out.push_str("Your Story:\n");
    out.push_str(&format!("  {}\n", highlight_story(&result.story, &result.words, mode)));
    out.push_str("  Remember your password by using each highlighted word in order.\n\n");
    out.push_str("Your Words:\n");
    out.push_str(&format!("  {}\n\n", result.words.join(" → ")));
    out.push_str("Your Password:\n");
    out.push_str(&format!("  {}\n", result.password));
    out
}
