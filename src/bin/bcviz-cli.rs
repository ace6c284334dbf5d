//! # bcviz-cli
//!
//! Headless access to the dashboard's data pipeline.
//!
//! ```bash
//! # What is in the spectra folder?
//! bcviz-cli list
//!
//! # Load and normalize two spectra, print as JSON
//! bcviz-cli --json batch BC01.dpt BC02.dpt
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use bcviz::batch::{load_batch, resolve_selection};
use bcviz::config::Config;
use bcviz::data::normalize::normalize;
use bcviz::Session;

/// bcviz - remote spectra and inventory from a Nextcloud folder
#[derive(Parser)]
#[command(name = "bcviz-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./bcviz.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a remote folder (defaults to the spectra folder)
    List {
        #[arg(value_name = "FOLDER")]
        folder: Option<String>,
    },

    /// Show the master inventory
    Master,

    /// Fetch one spectrum from the spectra folder
    Fetch {
        #[arg(value_name = "FILE")]
        file: String,

        /// Skip normalization
        #[arg(long)]
        raw: bool,
    },

    /// Load and normalize several spectra
    Batch {
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Load every file in the spectra folder
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::load(cli.config.as_deref())?;
    let mut session = Session::connect(&config);
    info!("Using {}", session.base_url());

    match cli.command {
        Commands::List { folder } => {
            let folder = folder.unwrap_or_else(|| config.paths.spectra_folder.clone());
            let entries = session
                .list_entries(&folder)
                .with_context(|| format!("listing {folder}"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in &entries {
                    println!("{e}");
                }
            }
        }
        Commands::Master => {
            let master = session
                .fetch_master(&config.paths.master)
                .context("loading master inventory")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&master)?);
            } else {
                print_csv(&master.columns, master.rows.iter().map(|r| r.iter().map(|v| v.to_string()).collect()))?;
            }
        }
        Commands::Fetch { file, raw } => {
            let path = session.spectrum_path(&file);
            let mut table = session.fetch_spectrum(&path)?;
            if !raw {
                table = normalize(&table, config.normalization)?;
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                let columns: Vec<String> = table.column_names().iter().map(|c| c.to_string()).collect();
                let rows = (0..table.len()).map(|i| {
                    let mut row = vec![table.wavenumber[i].to_string(), table.intensity[i].to_string()];
                    if let Some(norm) = &table.normalized {
                        row.push(norm[i].to_string());
                    }
                    row
                });
                print_csv(&columns, rows)?;
            }
        }
        Commands::Batch { files, all } => {
            let mut selection = files;
            if all {
                selection.push(bcviz::batch::ALL.to_string());
            }
            let listing = if selection.iter().any(|s| s == bcviz::batch::ALL) {
                session.spectra_entries()
            } else {
                Vec::new()
            };
            let names = resolve_selection(&selection, &listing);
            let samples = load_batch(&mut session, &names);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&samples)?);
            } else {
                for (name, table) in &samples {
                    println!("{name}\t{} points", table.len());
                }
            }
            eprintln!("Loaded {}/{} spectra", samples.len(), names.len());
        }
    }

    for w in session.warnings() {
        eprintln!("warning: {w}");
    }
    Ok(())
}

fn print_csv(columns: &[String], rows: impl Iterator<Item = Vec<String>>) -> Result<()> {
    let mut w = csv::Writer::from_writer(std::io::stdout().lock());
    w.write_record(columns)?;
    for row in rows {
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
