//! Orderlens dashboard - Main Entry Point

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{error, info};

use orderlens_common::{init_logging, LoggingConfig};
use orderlens_config::{Config, ConfigLoader};
use orderlens_data::DashboardSession;

mod commands;

use commands::{Command, Dashboard};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(LoggingConfig {
        level,
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("Loading dataset from {}", config.dataset.path);
    let session = match DashboardSession::load(&config.dataset.path) {
        Ok(session) => session,
        Err(e) => {
            // A missing dataset is fatal; surface it and terminate
            error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Orderlens - E-Commerce Order Dashboard");
    println!("Loaded {} order records.", session.order_count());
    println!("Type 'help' for available commands.");

    let mut dashboard = Dashboard::new(session, config);
    run_loop(&mut dashboard).await
}

/// Read commands from stdin until quit or end of input
async fn run_loop(dashboard: &mut Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("orderlens> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let quitting = matches!(command, Command::Quit);
        match dashboard.execute(command).await {
            Ok(output) => {
                for msg in output {
                    println!("{msg}");
                }
            }
            Err(e) if e.is_fatal() => {
                error!("{e}");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            Err(e) => println!("{e}"),
        }

        if quitting {
            break;
        }
    }

    Ok(())
}
