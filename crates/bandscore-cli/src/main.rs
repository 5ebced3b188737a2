//! bandscore CLI — grade answer sheets against answer keys.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use bandscore_core::model::Skill;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "bandscore",
    version,
    about = "Exam answer grading and band conversion"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an answer sheet
    Grade {
        /// Answer key .toml file
        #[arg(long)]
        key: PathBuf,

        /// Answer sheet .json file
        #[arg(long)]
        answers: PathBuf,

        /// Seconds the respondent spent on the test
        #[arg(long, default_value = "0")]
        time_taken: u64,

        /// Record the submission (optionally into this directory)
        #[arg(long, num_args = 0..=1)]
        record: Option<Option<PathBuf>>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate answer key TOML files
    Validate {
        /// Path to answer key file or directory (defaults to the configured directory)
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Print the raw score to band tables
    Bands {
        /// Only this skill: reading or listening
        #[arg(long)]
        skill: Option<Skill>,
    },

    /// List recorded submissions
    History {
        /// Submission directory (defaults to the configured directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Create starter config and example answer key
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bandscore=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = config::load_config_from(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Grade {
                key,
                answers,
                time_taken,
                record,
                format,
            } => commands::grade::execute(&config, key, answers, time_taken, record, format),
            Commands::Validate { key } => commands::validate::execute(&config, key),
            Commands::Bands { skill } => commands::bands::execute(skill),
            Commands::History { dir } => commands::history::execute(&config, dir),
            Commands::Init => commands::init::execute(),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
