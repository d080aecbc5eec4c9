use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use lexigraph::memory::{SnapshotLoader, SnapshotWriter};
use lexigraph::reasoning::{describe_phrase, RelationQueryService};
use lexigraph::shell::Shell;
use lexigraph::training::{Trainer, TrainingConfig, WordnikClient, WordnikConfig};

#[derive(Parser)]
#[command(name = "lexigraph", version, about = "Concept graph CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive command prompt
    Shell {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long, env = "WORDNIK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        #[arg(long, default_value_t = 2)]
        max_depth: usize,
        #[arg(long, default_value = "training.db")]
        training_db: PathBuf,
    },
    Describe {
        #[arg(long)]
        graph: PathBuf,
        phrase: Vec<String>,
    },
    List {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        json: bool,
    },
    Train {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        word: String,
        #[arg(long, default_value_t = 2)]
        max_depth: usize,
        #[arg(long, env = "WORDNIK_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, default_value = "https://api.wordnik.com/v4")]
        endpoint: String,
        #[arg(long, default_value_t = 750)]
        pause_ms: u64,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_trainer(
    api_key: String,
    endpoint: Option<String>,
    config: TrainingConfig,
) -> anyhow::Result<Trainer> {
    let mut wordnik = WordnikConfig::new(api_key);
    if let Some(endpoint) = endpoint {
        wordnik = wordnik.with_endpoint(endpoint);
    }
    let client = WordnikClient::new(wordnik)?;
    Ok(Trainer::new(Arc::new(client), config))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Shell {
            db,
            api_key,
            max_depth,
            training_db,
        } => {
            let store = match &db {
                Some(path) => SnapshotLoader::load_store(path)?,
                None => Default::default(),
            };
            let mut shell = Shell::new(store);
            if let Some(api_key) = api_key {
                let config = TrainingConfig::new(max_depth).with_snapshot_path(training_db);
                shell = shell.with_trainer(build_trainer(api_key, None, config)?);
            }
            let stdin = io::stdin();
            shell.run_repl(stdin.lock(), io::stdout())?;
        }
        Commands::Describe { graph, phrase } => {
            let store = SnapshotLoader::load_store(&graph)?;
            let described = describe_phrase(&store, &phrase.join(" "))?;
            for concept in described {
                println!("{}", concept);
            }
        }
        Commands::List { graph, json } => {
            let store = SnapshotLoader::load_store(&graph)?;
            let listing = RelationQueryService::new(&store).listing();
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for summary in listing {
                    println!("{}", summary);
                }
            }
        }
        Commands::Train {
            graph,
            word,
            max_depth,
            api_key,
            endpoint,
            pause_ms,
        } => {
            let mut store = SnapshotLoader::load_store_or_default(&graph)?;
            let config = TrainingConfig::new(max_depth)
                .with_pause(Duration::from_millis(pause_ms))
                .with_snapshot_path(&graph);
            let trainer = build_trainer(api_key, Some(endpoint), config)?;
            let stats = trainer.train(&mut store, &word)?;
            SnapshotWriter::save_to_path(&graph, &store)?;
            info!(
                concepts = stats.concepts_created,
                relations = stats.relations_added,
                skipped = stats.relations_skipped,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                "message" = "entraînement enregistré"
            );
        }
    }

    Ok(())
}
