use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farmops", version, about = "Farm management CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Manage fields (parcels)
    Field {
        #[command(subcommand)]
        command: FieldCommands,
    },
    /// Record and list expenses
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Record and list sales
    Sale {
        #[command(subcommand)]
        command: SaleCommands,
    },
    /// Crop rotation planning
    Rotation {
        #[command(subcommand)]
        command: RotationCommands,
    },
    /// Farm-wide and per-crop margin report
    Margin,
    /// Check the weather forecast for actionable alerts
    Alerts {
        /// Place name (arad, timisoara, sibiu); defaults to configured coordinates
        #[arg(long)]
        place: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum FieldCommands {
    /// Add a field
    Add {
        name: String,
        /// Area in hectares
        area_ha: f64,
    },
    /// List fields
    List,
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense against a field
    Add {
        /// Field name or id
        field: String,
        /// Category: fuel, seeds, fertilizer, labor, services, other
        category: String,
        amount: f64,
        /// Crop the expense belongs to
        #[arg(long)]
        crop: Option<String>,
        /// Operation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List expenses
    List,
}

#[derive(Subcommand)]
pub enum SaleCommands {
    /// Record a sale from a field
    Add {
        /// Field name or id
        field: String,
        /// Quantity sold in tonnes
        quantity_t: f64,
        /// Unit price per tonne
        unit_price: f64,
        /// Crop sold
        #[arg(long)]
        crop: Option<String>,
        /// Operation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List sales
    List,
}

#[derive(Subcommand)]
pub enum RotationCommands {
    /// Check a proposed crop against the field's history and record it
    Propose {
        /// Field name or id
        field: String,
        /// Proposed crop (ex: porumb)
        crop: String,
        /// Season year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        /// Record the crop without asking, even when classified avoid
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show the crop history
    History {
        /// Limit to one field (name or id)
        field: Option<String>,
    },
}
