//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod source;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Self-grading quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Quiz source: a JSON file path or an http(s) URL
        #[arg(long)]
        source: String,

        /// Directory holding persisted progress
        #[arg(long)]
        state_dir: Option<PathBuf>,

        /// Output directory for score reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats on submit: json, csv (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Shuffle question order even if the quiz does not ask for it
        #[arg(long)]
        shuffle: bool,

        /// Discard any persisted progress before starting
        #[arg(long)]
        fresh: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz JSON files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        source: PathBuf,
    },

    /// Score a persisted attempt non-interactively
    Score {
        /// Quiz source: a JSON file path or an http(s) URL
        #[arg(long)]
        source: String,

        /// Directory holding persisted progress
        #[arg(long)]
        state_dir: Option<PathBuf>,

        /// Output directory for score reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: json, csv (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-export a quiz as normalized JSON
    Export {
        /// Quiz source: a JSON file path or an http(s) URL
        #[arg(long)]
        source: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Generate a quiz from plain study text
    Generate {
        /// Plain-text input file
        #[arg(long)]
        input: PathBuf,

        /// Topic name used in the generated title
        #[arg(long, default_value = "General")]
        topic: String,

        /// Output quiz file
        #[arg(long)]
        output: PathBuf,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            source,
            state_dir,
            output,
            format,
            shuffle,
            fresh,
            config,
        } => commands::take::execute(source, state_dir, output, format, shuffle, fresh, config).await,
        Commands::Validate { source } => commands::validate::execute(source),
        Commands::Score {
            source,
            state_dir,
            output,
            format,
            config,
        } => commands::score::execute(source, state_dir, output, format, config).await,
        Commands::Export { source, output } => commands::export::execute(source, output).await,
        Commands::Generate {
            input,
            topic,
            output,
        } => commands::generate::execute(input, topic, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
