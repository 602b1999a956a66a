use crate::display::HighlightMode;
use crate::settings::{PasswordType, DEFAULT_SETTINGS_FILE};
use crate::standard::DEFAULT_LENGTH;
use crate::types::Complexity;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line configuration for the story password generator
#[derive(Debug, Clone, Parser)]
#[command(name = "story-password")]
#[command(about = "Generate memorable passwords from short themed stories")]
pub struct Config {
    /// Settings file (JSON)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate story passwords
    Story(StoryArgs),

    /// Generate a random password from letters, digits and symbols
    Standard {
        /// Password length
        #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
        length: usize,

        /// Seed for a reproducible password
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rate a password by length and character variety
    Strength {
        password: String,
    },

    /// Show the saved settings, or change them
    Settings {
        /// Story theme (space, magic, ocean, or any theme your word lists provide)
        #[arg(long)]
        theme: Option<String>,

        /// Story complexity (simple, advanced)
        #[arg(long)]
        complexity: Option<Complexity>,

        /// Password type used by `generate` (story, standard)
        #[arg(long)]
        password_type: Option<PasswordType>,
    },

    /// Generate whichever password type the settings select
    Generate {
        #[command(flatten)]
        story: StoryArgs,

        /// Length of a standard password
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },
}

/// Options shared by `story` and `generate`
#[derive(Debug, Clone, Args)]
pub struct StoryArgs {
    /// Theme for this run only (defaults to the saved theme)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Complexity for this run only (defaults to the saved complexity)
    #[arg(short, long)]
    pub complexity: Option<Complexity>,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Seed for random number generator (for deterministic output)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding <theme>.json word lists
    #[arg(long, conflicts_with = "wordlist_url")]
    pub wordlists: Option<PathBuf>,

    /// Base URL serving /wordlists/<theme>.json
    #[arg(long)]
    pub wordlist_url: Option<String>,

    /// Template catalog JSON file
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// How to mark the password words in the story
    #[arg(long, value_enum, default_value_t = HighlightMode::Bars)]
    pub highlight: HighlightMode,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_defaults() {
        let config = Config::try_parse_from(["story-password", "story"]).unwrap();
        assert_eq!(config.settings, PathBuf::from(DEFAULT_SETTINGS_FILE));
        assert_eq!(config.log_level, "info");

        let Command::Story(args) = config.command else {
            panic!("expected story command");
        };
        assert_eq!(args.count, 1);
        assert_eq!(args.theme, None);
        assert_eq!(args.highlight, HighlightMode::Bars);
        assert!(!args.json);
    }

    #[test]
    fn test_story_flags() {
        let config = Config::try_parse_from([
            "story-password",
            "story",
            "--theme",
            "ocean",
            "--complexity",
            "advanced",
            "-n",
            "3",
            "--seed",
            "42",
            "--highlight",
            "none",
            "--json",
        ])
        .unwrap();

        let Command::Story(args) = config.command else {
            panic!("expected story command");
        };
        assert_eq!(args.theme.as_deref(), Some("ocean"));
        assert_eq!(args.complexity, Some(Complexity::Advanced));
        assert_eq!(args.count, 3);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.highlight, HighlightMode::None);
        assert!(args.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = Config::try_parse_from([
            "story-password",
            "standard",
            "--length",
            "20",
            "--settings",
            "other.json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.settings, PathBuf::from("other.json"));
        assert_eq!(config.log_level, "debug");
        match config.command {
            Command::Standard { length, seed } => {
                assert_eq!(length, 20);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_settings_update_flags() {
        let config = Config::try_parse_from([
            "story-password",
            "settings",
            "--password-type",
            "standard",
            "--complexity",
            "simple",
        ])
        .unwrap();

        match config.command {
            Command::Settings {
                theme,
                complexity,
                password_type,
            } => {
                assert_eq!(theme, None);
                assert_eq!(complexity, Some(Complexity::Simple));
                assert_eq!(password_type, Some(PasswordType::Standard));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(Config::try_parse_from(["story-password", "story", "-n", "0"]).is_err());
        assert!(Config::try_parse_from(["story-password", "generate", "--count", "0"]).is_err());
    }

    #[test]
    fn test_invalid_complexity_rejected() {
        assert!(Config::try_parse_from(["story-password", "story", "--complexity", "expert"]).is_err());
    }

    #[test]
    fn test_source_flags_conflict() {
        assert!(Config::try_parse_from([
            "story-password",
            "story",
            "--wordlists",
            "lists",
            "--wordlist-url",
            "http://localhost:8080",
        ])
        .is_err());
    }
}
