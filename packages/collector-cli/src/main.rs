//! Collection pipeline runner.
//!
//! Wires the HTTP content source, a classification strategy and the
//! CSV sink into the collection loop. Rerunning against the same
//! output files resumes where the previous run stopped.

mod settings;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use collector::{
    collect, CollectorConfig, CsvSink, EngagementFilter, HttpSource, InferenceBackend,
    LexiconClassifier, SentimentClassifier, ZeroShotClassifier,
};
use settings::{Settings, DEFAULT_QUERY};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Keyword-indicator counting with sentiment fallback.
    Lexicon,
    /// Pure sentiment comparison.
    Sentiment,
    /// Zero-shot labeling against the category set.
    ZeroShot,
}

#[derive(Debug, Parser)]
#[command(name = "collector", about = "Collect and classify posts from a search feed")]
struct Args {
    /// Search query passed verbatim to the content source.
    #[arg(long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Classification strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Lexicon)]
    strategy: Strategy,

    /// Stop once this many posts have been collected overall.
    #[arg(long, default_value_t = 1000)]
    target: u64,

    /// Posts per session before a long cool-down.
    #[arg(long, default_value_t = 100)]
    session_ceiling: u32,

    /// Minimum reply count a post must have.
    #[arg(long, default_value_t = 5)]
    min_replies: u64,

    /// Maximum reply count a post may have.
    #[arg(long, default_value_t = 8)]
    max_replies: u64,

    /// Skip fetching reply conversations.
    #[arg(long)]
    no_replies: bool,

    /// Output file for collected posts.
    #[arg(long, default_value = "tweets.csv")]
    posts_file: String,

    /// Output file for collected replies.
    #[arg(long, default_value = "replies.csv")]
    replies_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,collector=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    let mut config = CollectorConfig::new(&args.query)
        .with_target(args.target)
        .with_session_ceiling(args.session_ceiling)
        .with_filter(EngagementFilter::ReplyBand {
            min: args.min_replies,
            max: args.max_replies,
        });
    if args.no_replies {
        config = config.without_replies();
    }
    config.validate().context("invalid configuration")?;

    let source = HttpSource::new(&settings.source_base_url, &settings.source_token);
    let backend = InferenceBackend::new(&settings.model_base_url, &settings.model_token);
    let sink = CsvSink::open(&args.posts_file, &args.replies_file)
        .context("failed to open output files")?;

    tracing::info!(
        query = %config.query,
        target = config.target_count,
        strategy = ?args.strategy,
        "Starting collection run"
    );

    let result = match args.strategy {
        Strategy::Lexicon => {
            let classifier = LexiconClassifier::new(backend);
            collect(&config, &source, &classifier, &sink).await?
        }
        Strategy::Sentiment => {
            let classifier = SentimentClassifier::new(backend);
            collect(&config, &source, &classifier, &sink).await?
        }
        Strategy::ZeroShot => {
            let classifier = ZeroShotClassifier::new(backend);
            collect(&config, &source, &classifier, &sink).await?
        }
    };

    tracing::info!(
        collected = result.collected,
        reached_target = result.reached_target,
        pages = result.pages_fetched,
        session_breaks = result.session_breaks,
        "Collection run finished"
    );

    Ok(())
}
