use std::sync::Arc;

use clap::Parser;
use journal::{flush, run, Params};
use storage::{JournalConfig, RecordStore, StoreConfig};

#[tokio::main]
async fn main() {
    env_logger::init();
    let params = Params::parse();
    log::info!("args: {params:?}");

    if let Err(e) = execute(params).await {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn execute(params: Params) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &params.config {
        Some(path) => JournalConfig::load(path)?,
        None => JournalConfig::default(),
    };
    let store_config =
        StoreConfig::from_cli_or_env_or_yaml(params.database.clone(), config.database.clone());
    log::info!("Database: {}", store_config.url);

    let backend = store_config.connect().await?;
    let store = RecordStore::open(Arc::new(backend)).await;

    let pending = run(&store, params.command, &mut std::io::stdout().lock())?;
    flush(&store, pending, &config).await?;
    Ok(())
}
