use std::{path::PathBuf, process::ExitCode, str::FromStr};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::error;
use product_import::{
    core::{
        job::{Job, JobBuilder},
        report::ImportReport,
    },
    item::rdbc::{MIGRATOR, product_lookup, product_writer},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

#[derive(Parser)]
#[command(name = "product-import")]
#[command(about = "Import product data from a delimited text file into the database")]
#[command(version)]
struct Cli {
    /// Delimited text file to import
    #[arg(short, long)]
    file: PathBuf,

    /// Validate and detect duplicates without inserting anything
    #[arg(long, alias = "test")]
    dry_run: bool,

    /// SQLite database receiving the products
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://products.db")]
    database_url: String,

    /// How the summary is printed
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(report) => match print(&report, cli.format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("{:#}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ImportReport> {
    let builder = JobBuilder::new()
        .name("import-product-data".to_string())
        .path(&cli.file)
        .dry_run(cli.dry_run);

    if cli.dry_run {
        let execution = builder.build()?.run()?;
        return Ok(execution.report);
    }

    let options = SqliteConnectOptions::from_str(&cli.database_url)
        .with_context(|| format!("invalid database url {}", cli.database_url))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options)
        .await
        .with_context(|| format!("unable to open {}", cli.database_url))?;
    MIGRATOR
        .run(&pool)
        .await
        .context("unable to prepare the product table")?;

    let writer = product_writer(&pool);
    let lookup = product_lookup(&pool);

    let execution = builder.lookup(&lookup).writer(&writer).build()?.run()?;

    pool.close().await;
    Ok(execution.report)
}

fn print(report: &ImportReport, format: Format) -> Result<()> {
    match format {
        Format::Text => println!("{}", report),
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
