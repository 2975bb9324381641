//! markwise CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "markwise",
    version,
    about = "Exam topic analysis and class report generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example class file
    Init,

    /// List built-in exam schemes
    Presets,

    /// Validate a class file
    Validate {
        /// Path to class .toml file
        #[arg(long)]
        class: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show each student's percentage and weakest topics
    Analyze {
        /// Path to class .toml file
        #[arg(long)]
        class: PathBuf,

        /// Number of weak topics per student
        #[arg(long)]
        top_n: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate plain-text student reports
    Report {
        /// Path to class .toml file
        #[arg(long)]
        class: PathBuf,

        /// Report style: basic, detailed
        #[arg(long)]
        style: Option<String>,

        /// Number of weak topics per student
        #[arg(long)]
        top_n: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export class scores as CSV
    Export {
        /// Path to class .toml file
        #[arg(long)]
        class: PathBuf,

        /// Output CSV file (defaults to a timestamped file in the output directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Class statistics and weak-topic rank distribution
    Summary {
        /// Path to class .toml file
        #[arg(long)]
        class: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write an HTML summary to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("markwise=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Presets => commands::presets::execute(),
        Commands::Validate { class, config } => commands::validate::execute(class, config),
        Commands::Analyze {
            class,
            top_n,
            config,
        } => commands::analyze::execute(class, top_n, config),
        Commands::Report {
            class,
            style,
            top_n,
            output,
            config,
        } => commands::report::execute(class, style, top_n, output, config),
        Commands::Export {
            class,
            output,
            config,
        } => commands::export::execute(class, output, config),
        Commands::Summary {
            class,
            format,
            html,
            config,
        } => commands::summary::execute(class, format, html, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
