use anyhow::Result;
use clap::{Parser, Subcommand};
use curator::commands::{check, history, log_access, recommend};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Knowledge-base health checks and curation recommendations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run health checks and print a JSON report
    ///
    /// Exit status is 1 when Tier 1 finds fail-severity issues, 0 otherwise;
    /// warnings never affect it.
    Check {
        /// Knowledge-base root directory
        #[arg(long)]
        knowledge_root: PathBuf,

        /// Run Tier 2 pre-screening instead of Tier 1 checks
        #[arg(long, conflicts_with = "both")]
        tier2: bool,

        /// Run both Tier 1 checks and Tier 2 pre-screening
        #[arg(long)]
        both: bool,

        /// Check source URL accessibility (requires network)
        #[arg(long)]
        check_links: bool,
    },

    /// Generate utilization-driven curation recommendations
    Recommend {
        /// Knowledge-base root directory
        #[arg(long)]
        knowledge_root: PathBuf,

        /// Minimum total reads before recommendations are generated
        #[arg(long, default_value_t = 10)]
        min_reads: u64,

        /// Minimum days of utilization data before recommendations are generated
        #[arg(long, default_value_t = 7)]
        min_days: i64,
    },

    /// Show recent health snapshots
    History {
        /// Knowledge-base root directory
        #[arg(long)]
        knowledge_root: PathBuf,

        /// Number of snapshots to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Record a file access in the utilization log (read-hook entry point)
    LogAccess {
        /// Knowledge-base root directory
        #[arg(long)]
        knowledge_root: PathBuf,

        /// Path of the file that was read
        file: String,

        /// Label describing how the file was referenced
        #[arg(long, default_value = "hook")]
        context: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            knowledge_root,
            tier2,
            both,
            check_links,
        } => {
            let code = check::execute(&knowledge_root, tier2, both, check_links)?;
            std::process::exit(code)
        }
        Commands::Recommend {
            knowledge_root,
            min_reads,
            min_days,
        } => recommend::execute(&knowledge_root, min_reads, min_days),
        Commands::History {
            knowledge_root,
            limit,
        } => history::execute(&knowledge_root, limit),
        Commands::LogAccess {
            knowledge_root,
            file,
            context,
        } => log_access::execute(&knowledge_root, &file, &context),
    }
}
