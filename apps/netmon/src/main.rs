#![warn(clippy::all)]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, error::ErrorKind};
use logger::init_tracing;
use tracing::{debug, error, info};

mod cli;
mod config;
mod database;
mod error;
mod pool;
mod probe;
mod web;


use cli::Cli;
use config::Config;
use database::{LibsqlStore, ResultStore};
use error::AppError;
use probe::{HttpChecker, run_batch};

/// Exit code for any unrecoverable startup failure
const EXIT_FAIL: u8 = 1;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_FAIL);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(EXIT_FAIL)
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_config(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.storage.path = Some(database);
    }
    debug!("{config}");

    let store = LibsqlStore::open(config.database_path()?).await?;
    store.migrate().await?;
    info!("Using result store at {}", store.location().display());

    if let Some(port) = cli.serve {
        web::serve(&config.server.bind, port, Arc::new(store)).await?;
        return Ok(());
    }

    let checker = HttpChecker::new(config.probe.timeout_seconds)?;
    let targets = config.targets(cli.url.as_deref());
    let report = run_batch(&checker, &store, &targets, &mut io::stdout().lock()).await?;
    info!("Batch finished: {report}");

    Ok(())
}
