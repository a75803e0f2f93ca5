use library_ledger::{
    adapters::{csv::CsvSeedSource, file::JsonFileLibraryStore},
    application::library::{LoadOrigin, ServiceDependencies, bootstrap_library, save_library},
    cli::{Console, SessionEnd},
    config::AppConfig,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr keeps the menu on stdout readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        data_file = %config.data_file.display(),
        books_seed = %config.books_seed.display(),
        borrowers_seed = %config.borrowers_seed.display(),
        "Starting library ledger"
    );

    // Initialize adapters
    let store = Arc::new(JsonFileLibraryStore::new(config.data_file.clone()));
    let seeds = Arc::new(CsvSeedSource::new(
        config.books_seed.clone(),
        config.borrowers_seed.clone(),
    ));
    let deps = ServiceDependencies { store, seeds };

    let loaded = bootstrap_library(&deps).await;
    if let LoadOrigin::Recovered { reason } = &loaded.origin {
        eprintln!("Error loading data: {}. Starting with an empty library.", reason);
    }
    if let Some(report) = &loaded.seed_report {
        for error in &report.errors {
            eprintln!("{}", error);
        }
    }
    let mut library = loaded.library;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let end = match console.run(&mut library).await {
        Ok(end) => end,
        Err(e) => {
            tracing::error!(error = %e, "Console I/O failed");
            SessionEnd::EndOfInput
        }
    };

    match save_library(&deps, &library).await {
        Ok(()) => println!("Data saved successfully!"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save library");
            eprintln!("Error saving data: {}", e);
        }
    }

    if end == SessionEnd::SaveAndExit {
        println!("Exiting...");
    }
}
