use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use murmur::config::Config;
use murmur::output::{export, terminal};
use murmur::pipeline::analyze::{self, Analysis};
use murmur::sentiment::label::Sentiment;
use murmur::sentiment::lexicon::LexiconAnalyzer;
use murmur::sentiment::traits::PolarityAnalyzer;
use murmur::text::cloud::word_frequencies;
use murmur::text::normalize::normalize;
use murmur::twitter::client::TwitterClient;
use murmur::twitter::error::{CollectError, FetchError};

/// Murmur: what is Twitter saying about a topic?
///
/// Fetches recent English tweets for a topic, cleans them, classifies each
/// as Positive, Neutral or Negative, and summarizes the result.
#[derive(Parser)]
#[command(name = "murmur", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tweets about a topic and summarize their sentiment
    Analyze {
        /// The topic to search for (e.g. "bitcoin")
        topic: String,

        /// Max tweets to fetch (default: 200)
        #[arg(long, default_value = "200")]
        count: usize,

        /// How many extracted tweets to print (default: 10)
        #[arg(long, default_value = "10")]
        show: usize,

        /// Also print word clouds for all, positive and negative tweets
        #[arg(long)]
        clouds: bool,

        /// Write the analyzed tweets to a .csv or .json file
        #[arg(long = "export", value_name = "PATH")]
        export_path: Option<PathBuf>,
    },

    /// Show the most frequent words used in tweets about a topic
    Cloud {
        /// The topic to search for
        topic: String,

        /// Max tweets to fetch (default: 200)
        #[arg(long, default_value = "200")]
        count: usize,

        /// Only use tweets with this sentiment (positive, neutral, negative)
        #[arg(long)]
        label: Option<Sentiment>,

        /// Number of words to show (default: 50)
        #[arg(long, default_value = "50")]
        max_words: usize,
    },

    /// Classify a piece of text locally, without calling the API
    Classify {
        /// The text to classify
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("murmur=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            topic,
            count,
            show,
            clouds,
            export_path,
        } => {
            let config = Config::load()?;
            config.require_credentials()?;
            let analyzer = load_analyzer(&config)?;

            let analysis = fetch_and_analyze(&config, &analyzer, &topic, count).await?;

            terminal::display_summary(&analysis);
            terminal::display_breakdown(&analysis.counts());
            terminal::display_verified_breakdown(&analysis);
            terminal::display_posts(&analysis.posts, show);

            if clouds {
                for label in [None, Some(Sentiment::Positive), Some(Sentiment::Negative)] {
                    show_cloud(&analysis, label, 30);
                }
            }

            if let Some(path) = export_path {
                let format = export::export(&analysis, &path)?;
                println!(
                    "\n{}",
                    format!("Exported {} tweets ({format:?}) to {}", analysis.posts.len(), path.display())
                        .bold()
                );
            }
        }

        Commands::Cloud {
            topic,
            count,
            label,
            max_words,
        } => {
            let config = Config::load()?;
            config.require_credentials()?;
            let analyzer = load_analyzer(&config)?;

            let analysis = fetch_and_analyze(&config, &analyzer, &topic, count).await?;
            show_cloud(&analysis, label, max_words);
        }

        Commands::Classify { text } => {
            let config = Config::load()?;
            let analyzer = load_analyzer(&config)?;

            let normalized = normalize(&text);
            let polarity = analyzer.polarity(&normalized);
            let label = Sentiment::from_polarity(polarity);

            terminal::display_classification(&text, &normalized, polarity, label);
        }
    }

    Ok(())
}

/// Build the lexicon analyzer, merging the configured extra lexicon if any.
/// A lexicon that fails to load stops the run.
fn load_analyzer(config: &Config) -> Result<LexiconAnalyzer> {
    let mut analyzer = LexiconAnalyzer::default();
    if let Some(path) = &config.lexicon_path {
        let added = analyzer.extend_from_file(path)?;
        info!(added, path = %path.display(), "Extended sentiment lexicon");
    }
    Ok(analyzer)
}

/// Authenticate, collect and classify. Ctrl-C abandons the run without
/// reporting partial results.
async fn fetch_and_analyze(
    config: &Config,
    analyzer: &LexiconAnalyzer,
    topic: &str,
    count: usize,
) -> Result<Analysis> {
    // Refuse before authenticating, not just before searching
    if topic.trim().is_empty() {
        return Err(CollectError::EmptyTopic.into());
    }

    let client = TwitterClient::connect(&config.client_settings(), &config.credentials).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .expect("valid template"),
    );
    spinner.set_message(format!("Extracting tweets about '{topic}'"));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = tokio::select! {
        result = analyze::run(&client, analyzer, topic, count) => result,
        _ = tokio::signal::ctrl_c() => {
            spinner.finish_and_clear();
            anyhow::bail!("Interrupted before collection finished, no tweets were kept");
        }
    };
    spinner.finish_and_clear();

    if let Err(CollectError::Fetch {
        source: FetchError::RateLimited {
            reset_at: Some(reset),
        },
        ..
    }) = &result
    {
        if let Some(at) = chrono::DateTime::from_timestamp(*reset, 0) {
            warn!(reset_at = %at, "Search rate limit reached, retry after the window resets");
        }
    }

    let analysis = result.with_context(|| format!("Failed to analyze tweets about '{topic}'"))?;
    println!(
        "{}",
        format!("Extracted {} tweets about '{}'", analysis.posts.len(), analysis.topic).green()
    );
    Ok(analysis)
}

/// Print the word cloud for all tweets or only one label.
fn show_cloud(analysis: &Analysis, label: Option<Sentiment>, max_words: usize) {
    let text = analysis.cloud_text(label);
    let frequencies = word_frequencies(&text, max_words);
    let title = match label {
        Some(l) => format!("Word cloud for {} tweets about '{}'", l, analysis.topic),
        None => format!("Word cloud for all tweets about '{}'", analysis.topic),
    };
    terminal::display_word_cloud(&title, &frequencies);
}
