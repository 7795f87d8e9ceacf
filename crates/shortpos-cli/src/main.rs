//! Command-line interface for shortpos
//!
//! # Usage
//!
//! ```bash
//! # Load a disclosure CSV into the database
//! export DATABASE_FILE=short_positions.db
//! shortpos load --csv data/book_data.csv
//!
//! # Ask a question
//! shortpos ask "What are the most shorted stocks in Italy?"
//!
//! # Interactive session
//! shortpos chat
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use shortpos_core::ingest::{self, IngestOptions};
use shortpos_core::{ShortPositionEngine, SqliteStore};
use shortpos_utils::AppConfig;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

const SAMPLE_QUERIES: &[&str] = &[
    "In Germany, what are the most shorted stocks?",
    "Timeliness of short positions in UK?",
    "What is the average reporting timeliness for short positions in France?",
    "What are the most shorted stocks in Italy?",
    "How does Sweden compare to Norway",
    "What is the trend in Austria?",
    "Compare Sweden and Finland",
    "What is the reporting timeliness in Germany?",
    "Show me the most shorted stocks in France.",
];

#[derive(Parser, Debug)]
#[command(name = "shortpos")]
#[command(about = "Ask questions about short-selling position disclosures", long_about = None)]
struct Args {
    /// SQLite database file (defaults to $DATABASE_FILE or short_positions.db)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV of position disclosures into the database, replacing its contents
    Load {
        /// CSV file (defaults to $CSV_FILE)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also reject rows whose position date does not parse
        #[arg(long)]
        strict_dates: bool,
    },
    /// Answer a single question
    Ask {
        /// The question, e.g. "What is the trend in Austria?"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the structured answer as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive question loop; type 'exit' to quit
    Chat,
    /// Run the built-in sample questions
    Samples,
}

fn app_config(args: &Args) -> AppConfig {
    let mut builder = AppConfig::builder();
    if let Some(database) = &args.database {
        builder = builder.database_file(database.clone());
    }
    if let Command::Load { csv: Some(csv), .. } = &args.command {
        builder = builder.csv_file(csv.clone());
    }
    builder.with_env().build()
}

fn open_engine(config: &AppConfig) -> anyhow::Result<ShortPositionEngine<SqliteStore>> {
    let store = SqliteStore::open(&config.database_file)
        .with_context(|| format!("opening {}", config.database_file.display()))?;
    Ok(ShortPositionEngine::new(store))
}

fn load(config: &AppConfig, strict_dates: bool) -> anyhow::Result<()> {
    let Some(csv) = &config.csv_file else {
        bail!("no CSV file given; pass --csv or set CSV_FILE");
    };

    let (rows, report) = ingest::read_positions_from_path(csv, IngestOptions { strict_dates })
        .with_context(|| format!("reading {}", csv.display()))?;

    let mut store = SqliteStore::open(&config.database_file)
        .with_context(|| format!("opening {}", config.database_file.display()))?;
    let loaded = store.replace_all(&rows)?;

    println!(
        "Loaded {loaded} records into {} ({} rows read, {} missing fields, {} invalid positions, {} invalid dates, {} duplicates)",
        config.database_file.display(),
        report.rows_read,
        report.missing_fields,
        report.invalid_positions,
        report.invalid_dates,
        report.duplicates,
    );
    Ok(())
}

fn ask(config: &AppConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let engine = open_engine(config)?;
    let answer = engine.answer(query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{answer}");
    }
    Ok(())
}

fn chat(config: &AppConfig) -> anyhow::Result<()> {
    let engine = open_engine(config)?;
    println!("Welcome to the Short Position Chatbot!");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Ask a question (type 'exit' to quit): ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match engine.answer(input) {
            Ok(answer) => println!("{answer}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}

fn samples(config: &AppConfig) -> anyhow::Result<()> {
    let engine = open_engine(config)?;
    for query in SAMPLE_QUERIES {
        let answer = engine.answer(query)?;
        println!("Query: {query}\nResponse: {answer}\n");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = app_config(&args);

    shortpos_utils::init_tracing(&config.log_filter);
    info!("Using database {}", config.database_file.display());

    match &args.command {
        Command::Load { strict_dates, .. } => load(&config, *strict_dates),
        Command::Ask { query, json } => ask(&config, &query.join(" "), *json),
        Command::Chat => chat(&config),
        Command::Samples => samples(&config),
    }
}
