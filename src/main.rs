use anyhow::Result;
use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::sync::Arc;
use story_password::config::{Command, Config, StoryArgs};
use story_password::display::{format_result, ConsoleNotifier};
use story_password::{
    assess_strength, generate_standard_password, DirectorySource, EmbeddedSource,
    GenerationResult, HttpSource, PasswordType, RngSource, Settings, SettingsStore,
    StoryGenerator, TemplateCatalog, WordListSource,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    debug!("Configuration: {:?}", config);
    let store = SettingsStore::new(&config.settings);

    match &config.command {
        Command::Story(args) => {
            let settings = store.load()?;
            run_story(args, &settings).await
        }
        Command::Standard { length, seed } => {
            let mut rng = rng_for(*seed);
            println!("{}", generate_standard_password(&mut rng, *length));
            Ok(())
        }
        Command::Strength { password } => {
            let report = assess_strength(password)?;
            println!("Strength: {} ({}/6)", report.strength, report.score);
            for tip in &report.feedback {
                println!("  - {}", tip);
            }
            Ok(())
        }
        Command::Settings {
            theme,
            complexity,
            password_type,
        } => {
            let mut settings = store.load()?;
            let changed = theme.is_some() || complexity.is_some() || password_type.is_some();
            if let Some(theme) = theme {
                settings.story_theme = theme.clone();
            }
            if let Some(complexity) = complexity {
                settings.story_complexity = *complexity;
            }
            if let Some(password_type) = password_type {
                settings.password_type = *password_type;
            }
            if changed {
                store.save(&settings)?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Command::Generate { story, length } => {
            let settings = store.load()?;
            info!("Generating {} password", settings.password_type);
            match settings.password_type {
                PasswordType::Story => run_story(story, &settings).await,
                PasswordType::Standard => {
                    let mut rng = rng_for(story.seed);
                    println!("{}", generate_standard_password(&mut rng, *length));
                    Ok(())
                }
            }
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let mut logger_builder = env_logger::Builder::from_default_env();
    logger_builder.filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info));

    if let Some(log_file_path) = &config.log_file {
        use std::fs::OpenOptions;
        use std::io::Write;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .map_err(|e| anyhow::anyhow!("Failed to open log file {:?}: {}", log_file_path, e))?;

        // stderr plus file; stdout is reserved for passwords
        struct DualWriter {
            file: std::fs::File,
        }

        impl Write for DualWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                std::io::stderr().write_all(buf)?;
                self.file.write_all(buf)?;
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                std::io::stderr().flush()?;
                self.file.flush()
            }
        }

        logger_builder.target(env_logger::Target::Pipe(Box::new(DualWriter { file })));
    }

    logger_builder.init();
    Ok(())
}

fn rng_for(seed: Option<u64>) -> RngSource<StdRng> {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    }
}

async fn run_story(args: &StoryArgs, settings: &Settings) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(theme) = &args.theme {
        settings.story_theme = theme.clone();
    }
    if let Some(complexity) = args.complexity {
        settings.story_complexity = complexity;
    }

    let results = if let Some(dir) = &args.wordlists {
        generate_stories(DirectorySource::new(dir), args, &settings).await?
    } else if let Some(url) = &args.wordlist_url {
        generate_stories(HttpSource::new(url.as_str()), args, &settings).await?
    } else {
        generate_stories(EmbeddedSource, args, &settings).await?
    };

    if results.is_empty() {
        anyhow::bail!("No password could be generated");
    }

    if args.json {
        let json = match results.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            many => serde_json::to_string_pretty(many)?,
        };
        println!("{}", json);
    } else {
        for result in &results {
            println!("{}", format_result(result, args.highlight));
        }
    }
    Ok(())
}

async fn generate_stories<S: WordListSource>(
    source: S,
    args: &StoryArgs,
    settings: &Settings,
) -> Result<Vec<GenerationResult>> {
    let mut generator = StoryGenerator::new(source).with_notifier(Arc::new(ConsoleNotifier));
    if let Some(path) = &args.templates {
        generator = generator.with_catalog(TemplateCatalog::from_file(path)?);
    }

    if !generator.initialise(settings).await {
        warn!(
            "Theme {} is unavailable, falling back to generic templates",
            settings.story_theme
        );
    }

    let mut rng = rng_for(args.seed);
    Ok((0..args.count)
        .filter_map(|_| generator.generate(&mut rng))
        .collect())
}
