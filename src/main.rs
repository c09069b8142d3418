//! CLI for sentiment cards
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- train --corpus data/sample_corpus.tsv
//! cargo run -- analyze --text "I love this!"
//! cargo run -- fetch --username someone --count 5
//! cargo run -- interactive
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentiment_cards::{
    analyze_feed,
    config::{AppConfig, StopwordSource},
    nlp::{StopwordSet, TextNormalizer},
    presenter::{OutputFormat, ResultPresenter},
    run_interactive,
    sentiment::{read_corpus, save_artifacts, Trainer, TrainingParams},
    AppState, Error,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sentiment_cards")]
#[command(author, version)]
#[command(about = "Positive/negative sentiment cards for short texts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Output format: terminal or html
    #[arg(short, long, default_value = "terminal", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single text
    Analyze {
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },

    /// Fetch recent posts of a user and label each one
    Fetch {
        /// Username, with or without a leading @
        #[arg(short, long)]
        username: String,

        /// Number of posts to fetch
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },

    /// Menu driven session on stdin/stdout
    Interactive,

    /// Fit model.json and vectorizer.json from a labeled corpus
    Train {
        /// TSV file with `label<TAB>text` lines, labels 0 (negative) and 1 (positive)
        #[arg(long)]
        corpus: PathBuf,

        /// Fraction of the corpus held out for evaluation
        #[arg(long, default_value = "0.2")]
        holdout: f64,

        /// L2 penalty
        #[arg(long, default_value = "0.0")]
        l2: f64,

        /// Gradient descent iterations
        #[arg(long, default_value = "1000")]
        max_iter: usize,

        /// Stopwords used while training: builtin, none, or a word list path
        #[arg(long)]
        stopwords: Option<StopwordSource>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::from_env().context("Invalid configuration")?,
    };
    let presenter = ResultPresenter::new(cli.format);

    match cli.command {
        Commands::Analyze { text } => {
            let state = startup(config)?;
            run_analyze(&state, &presenter, &text);
        }
        Commands::Fetch { username, count } => {
            if let Some(count) = count {
                config.feed.post_count = usize::try_from(count).unwrap_or(usize::MAX);
            }
            let state = startup(config)?;
            run_fetch(&state, &presenter, &username).await;
        }
        Commands::Interactive => {
            let state = startup(config)?;
            let stdin = io::stdin();
            run_interactive(&state, &presenter, stdin.lock(), io::stdout())
                .await
                .context("Interactive session failed")?;
        }
        Commands::Train {
            corpus,
            holdout,
            l2,
            max_iter,
            stopwords,
        } => {
            if let Some(source) = stopwords {
                config.stopwords.source = source;
            }
            run_train(&config, &corpus, holdout, l2, max_iter)?;
        }
    }

    Ok(())
}

/// Build the application state; any failure here ends the process
fn startup(config: AppConfig) -> Result<AppState> {
    info!("Loading model artifacts...");
    AppState::initialize(config).context("Cannot start: train a model first with `train --corpus <FILE>`")
}

fn run_analyze(state: &AppState, presenter: &ResultPresenter, text: &str) {
    match state.analyze_text(text) {
        Ok(record) => print!("{}", presenter.render_verdict(record.label)),
        Err(e) => print!("{}", presenter.render_notice(&e.to_string())),
    }
}

async fn run_fetch(state: &AppState, presenter: &ResultPresenter, username: &str) {
    match analyze_feed(state, username).await {
        Ok(report) => {
            if !report.is_no_results() {
                info!("{} cards", report.records().len());
            }
            println!("{}", presenter.render_report(&report));
        }
        Err(Error::InvalidInput(message)) => print!("{}", presenter.render_notice(&message)),
        Err(e) => {
            error!("Fetch failed: {}", e);
            print!("{}", presenter.render_notice(&e.to_string()));
        }
    }
}

fn run_train(
    config: &AppConfig,
    corpus: &Path,
    holdout: f64,
    l2: f64,
    max_iter: usize,
) -> Result<()> {
    println!("\n📚 Training sentiment model...\n");

    let texts = read_corpus(corpus)
        .with_context(|| format!("Failed to read corpus {}", corpus.display()))?;
    info!("Loaded {} labeled texts", texts.len());

    let normalizer = TextNormalizer::new(StopwordSet::load(&config.stopwords.source));
    let params = TrainingParams {
        l2,
        max_iter,
        ..TrainingParams::default()
    };
    let (vectorizer, model, report) = Trainer::new(normalizer)
        .with_params(params)
        .with_holdout(holdout)
        .train(&texts)
        .context("Training failed")?;

    save_artifacts(&config.artifacts, &vectorizer, &model).context("Failed to save artifacts")?;

    println!("{}", report);
    println!(
        "✅ Wrote {} and {}",
        config.artifacts.vectorizer_path.display(),
        config.artifacts.model_path.display()
    );
    Ok(())
}
