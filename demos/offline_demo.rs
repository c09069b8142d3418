//! Example: the full flow without a network or artifact files
//!
//! Trains a model on the bundled corpus, then labels a manual text and an
//! in-memory feed.
//!
//! Run:
//! ```bash
//! cargo run --example offline_demo
//! ```

use sentiment_cards::api::StaticFeed;
use sentiment_cards::config::AppConfig;
use sentiment_cards::models::Post;
use sentiment_cards::nlp::{StopwordSet, TextNormalizer};
use sentiment_cards::presenter::{OutputFormat, ResultPresenter};
use sentiment_cards::sentiment::{parse_corpus, LoadedArtifacts, SentimentClassifier, Trainer};
use sentiment_cards::{analyze_feed, AppState};

const CORPUS: &str = include_str!("../data/sample_corpus.tsv");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("═══════════════════════════════════════════════════════════");
    println!("   Sentiment Cards Demo");
    println!("═══════════════════════════════════════════════════════════\n");

    // 1. Training
    println!("1️⃣  TRAINING");
    println!("──────────────────────────────────────────────\n");

    let corpus = parse_corpus(CORPUS)?;
    let (vectorizer, model, report) = Trainer::new(TextNormalizer::new(StopwordSet::english()))
        .with_holdout(0.2)
        .train(&corpus)?;
    println!("{}", report);

    let classifier = SentimentClassifier::from_artifacts(
        TextNormalizer::new(StopwordSet::english()),
        LoadedArtifacts { vectorizer, model },
    )?;

    let feed = StaticFeed::new().with_user(
        "demo",
        vec![
            Post::with_text("Loving the sunshine today, what a great morning"),
            Post::with_text("My train is late again, this is so annoying"),
            Post::default(),
            Post::with_text("Thanks everyone for the kind birthday wishes!"),
            Post::with_text("The new update broke everything, horrible"),
        ],
    );
    let state = AppState::with_parts(AppConfig::default(), classifier, Box::new(feed));
    let presenter = ResultPresenter::new(OutputFormat::Terminal);

    // 2. Manual text
    println!("\n2️⃣  ENTER MANUALLY");
    println!("──────────────────────────────────────────────\n");

    for text in ["I love this!!!", "What a disaster, I hate it", "12345"] {
        let record = state.analyze_text(text)?;
        println!("   \"{}\"", text);
        print!("   {}", presenter.render_verdict(record.label));
    }

    // 3. Feed
    println!("\n3️⃣  FETCH SOME POSTS (@demo)");
    println!("──────────────────────────────────────────────\n");

    let report = analyze_feed(&state, "@demo").await?;
    println!("{}", presenter.render_report(&report));

    let report = analyze_feed(&state, "nobody").await?;
    println!("{}", presenter.render_report(&report));

    println!("\n✅ Demo complete!\n");
    Ok(())
}
