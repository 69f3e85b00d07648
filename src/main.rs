use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use tracing::info;

use audio_topic_model::topics::tfidf::TfIdfTopicModel;
use audio_topic_model::topics::traits::TopicModel;
use audio_topic_model::{config, graph, ingest, report, status, topics};

/// audio-topic-model: Micro service for performing topic modeling on audio data.
///
/// Discovers the topics running through a directory of audio-derived
/// transcripts, writes a per-document results CSV, and persists a
/// Topic/Document/Keyword knowledge graph.
#[derive(Parser)]
#[command(name = "audio-topic-model", version, about)]
struct Cli {
    /// Bare invocation prints help and exits cleanly
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the knowledge graph database
    Init,

    /// Run topic modeling over a directory of transcripts
    Topic {
        /// Path to directory of transcript files to be read into the tool
        #[arg(long)]
        input: PathBuf,

        /// Path to directory for destination of results
        #[arg(long)]
        output: PathBuf,

        /// Name of the run, used in naming the results file
        #[arg(long)]
        name: String,

        /// Stopword language (default: from ATM_LANGUAGE, or french)
        #[arg(long)]
        language: Option<String>,

        /// Extra stopword file, one word per line
        #[arg(long)]
        stopwords: Option<PathBuf>,

        /// Maximum number of topics to produce (default: 10)
        #[arg(long, default_value = "10")]
        max_topics: usize,

        /// How many top keywords to extract before clustering (default: 60)
        #[arg(long, default_value = "60")]
        top_keywords: usize,

        /// Knowledge graph database path (default: from ATM_DB_PATH)
        #[arg(long)]
        db: Option<String>,
    },

    /// Show the topics stored in the knowledge graph
    Show {
        /// Redisplay a stored run's full result instead of the graph topics
        #[arg(long)]
        run: Option<String>,
    },

    /// Show system status (DB stats, graph size, recent runs)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("audio_topic_model=info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init => {
            info!("Initializing knowledge graph database...");
            let config = config::Config::load()?;
            let store = graph::initialize(&config.db_path)?;
            let table_count = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nReady. Next step:");
            println!("  audio-topic-model topic --input <dir> --output <dir> --name <run>");
        }

        Commands::Topic {
            input,
            output,
            name,
            language,
            stopwords,
            max_topics,
            top_keywords,
            db,
        } => {
            let mut config = config::Config::load()?;
            if let Some(db) = db {
                config.db_path = db;
            }
            if let Some(language) = language {
                config.language = language;
            }
            if let Some(stopwords) = stopwords {
                config.stopwords_file = Some(stopwords);
            }
            config.require_stopwords_file()?;

            println!("Reading transcripts from {}...", input.display());
            let corpus = ingest::load_corpus(&input)?;
            println!(
                "  {} documents from {} files",
                corpus.documents.len(),
                corpus.files_read
            );

            let stopword_list =
                topics::stopwords::assemble(&config.language, config.stopwords_file.as_deref())?;
            info!(
                stopwords = stopword_list.len(),
                language = %config.language,
                "Assembled stopword list"
            );

            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Fitting topic model...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let model = TfIdfTopicModel {
                top_n_keywords: top_keywords,
                max_topics,
                stopwords: stopword_list,
            };
            let result = model.fit(&corpus.documents)?;

            spinner.finish_and_clear();

            report::terminal::display_result(&result);

            let csv_path = report::csv::write_document_info(&result, &output, &name)?;
            println!("Results CSV: {}", csv_path.display());

            // Persist the knowledge graph. The database is created on first
            // use — no separate init required for a one-shot run.
            let store = graph::initialize(&config.db_path)?;
            store.save_model(&result).await?;
            store
                .record_run(&name, &result, csv_path.to_str())
                .await?;

            let counts = store.counts().await?;
            println!("\n{}", "Run complete.".bold());
            println!(
                "  Graph now holds {} topics, {} documents, {} keywords",
                counts.topics, counts.documents, counts.keywords
            );
        }

        Commands::Show { run } => {
            let config = config::Config::load()?;
            let store = graph::open(&config.db_path)?;
            match run {
                Some(name) => match store.run_result(&name).await? {
                    Some(result) => report::terminal::display_result(&result),
                    None => {
                        println!("No stored run named '{name}'.");
                        println!("Run `audio-topic-model status` to list recent runs.");
                    }
                },
                None => {
                    let stored = store.get_topics().await?;
                    report::terminal::display_stored_topics(&stored);
                }
            }
        }

        Commands::Status => {
            let config = config::Config::load()?;
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `audio-topic-model init` to set up the database.");
                return Ok(());
            }
            let store = graph::open(&config.db_path)?;
            status::show(&store, &config.db_path).await?;
        }
    }

    Ok(())
}
