mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;

use app::App;
use clap::Parser;
use cli::{Cli, Commands, ExpenseCommands, FieldCommands, RotationCommands, SaleCommands};
use config::Config;
use db::Database;
use error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Setup runs before config loading
    if matches!(cli.command, Some(Commands::Init)) {
        Config::setup_interactive()?;
        return Ok(());
    }

    // Load configuration, offering setup on a fresh install
    let config = if Config::exists(cli.config.as_ref()) {
        match Config::load(cli.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let (config, _path) = Config::setup_interactive()?;
        config
    };

    // Initialize database
    let db = Database::open(cli.data_dir.as_ref())?;

    let app = App::new(config, db);

    match cli.command {
        Some(Commands::Init) => unreachable!("handled above"),
        Some(Commands::Check) => app.check().await?,
        Some(Commands::Field { command }) => match command {
            FieldCommands::Add { name, area_ha } => app.add_field(&name, area_ha)?,
            FieldCommands::List => app.list_fields()?,
        },
        Some(Commands::Expense { command }) => match command {
            ExpenseCommands::Add {
                field,
                category,
                amount,
                crop,
                date,
            } => app.add_expense(&field, &category, amount, crop.as_deref(), date)?,
            ExpenseCommands::List => app.list_expenses()?,
        },
        Some(Commands::Sale { command }) => match command {
            SaleCommands::Add {
                field,
                quantity_t,
                unit_price,
                crop,
                date,
            } => app.add_sale(&field, quantity_t, unit_price, crop.as_deref(), date)?,
            SaleCommands::List => app.list_sales()?,
        },
        Some(Commands::Rotation { command }) => match command {
            RotationCommands::Propose {
                field,
                crop,
                year,
                yes,
            } => app.propose_crop(&field, &crop, year, yes)?,
            RotationCommands::History { field } => app.rotation_history(field.as_deref())?,
        },
        Some(Commands::Margin) => app.margin_report()?,
        Some(Commands::Alerts { place }) => app.check_alerts(place.as_deref()).await?,
        None => app.dashboard()?,
    }

    Ok(())
}
