//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use crate::config;


/// Weather Report - CLI for fetching, storing, and reporting hourly weather
/// observations
#[derive(Parser)]
#[command(name = "wxr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file path
    #[arg(long, global = true, env = "WXR_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Fetch hourly weather for a coordinate pair and store it
    Fetch {
        /// Latitude in decimal degrees (-90 to 90)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees (-180 to 180)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Number of past days to cover, ending today
        #[arg(long, default_value_t = config::DEFAULT_PAST_DAYS)]
        days: u8,
    },

    /// Export stored observations as a report
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Show the newest stored observations
    Recent {
        /// Report window in hours (1-168)
        #[arg(long, default_value_t = config::DEFAULT_REPORT_HOURS,
              value_parser = clap::value_parser!(u32).range(1..=168))]
        hours: u32,

        /// Maximum number of rows to display
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show totals for the stored data
    Summary,
}


#[derive(Subcommand)]
enum ExportCommands {
    /// Export the report window as an XLSX workbook
    Excel {
        /// Report window in hours (1-168)
        #[arg(long, default_value_t = config::DEFAULT_REPORT_HOURS,
              value_parser = clap::value_parser!(u32).range(1..=168))]
        hours: u32,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Open file after export
        #[arg(long)]
        open: bool,
    },

    /// Export the report window as a PDF with charts
    Pdf {
        /// Report window in hours (1-168)
        #[arg(long, default_value_t = config::DEFAULT_REPORT_HOURS,
              value_parser = clap::value_parser!(u32).range(1..=168))]
        hours: u32,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Open file after export
        #[arg(long)]
        open: bool,
    },
}


/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(config::default_db_path);

    match cli.command {
        Some(Commands::Fetch { lat, lon, days }) => {
            commands::fetch::run(lat, lon, days, &db_path)?;
        }
        Some(Commands::Export { command }) => match command {
            ExportCommands::Excel { hours, output, open } => {
                commands::export::run_excel(hours, output, open, &db_path)?;
            }
            ExportCommands::Pdf { hours, output, open } => {
                commands::export::run_pdf(hours, output, open, &db_path)?;
            }
        },
        Some(Commands::Recent { hours, limit }) => {
            commands::recent::run(hours, limit, &db_path)?;
        }
        Some(Commands::Summary) => {
            commands::summary::run(&db_path)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
