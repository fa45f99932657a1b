use std::process::ExitCode;

use clap::Parser;
use sheet_sync::cli::Cli;
use sheet_sync::prettyprint::prettyprint::PrettyFormatter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

const LOG_FILE: &str = "sheet_sync.log";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing() {
        eprintln!("could not set up logging: {e}");
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    tracing::info!("Starting sheet-sync");

    match cli.run().await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(report) => {
            tracing::error!("❌ sync failed: {:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("sheet_sync", tracing::Level::TRACE),
        )
        .with(log_file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
