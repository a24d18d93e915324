//! CLI entrypoint for `studio-content`.

mod cli;
mod error;
mod output;

use clap::Parser;
use studio_content::{ConfigLoader, ContentResolver, DefaultRecords, RestStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::error::CliError;

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}

fn run(args: Args) -> Result<(), CliError> {
    let mut loader = ConfigLoader::new().with_overrides(args.store.into_layer());
    if let Some(path) = args.config {
        loader = loader.with_file(path);
    }
    let config = loader.load()?;

    let defaults = load_defaults(&config)?;
    let store = RestStore::new(&config)?;
    let resolver =
        ContentResolver::new(store, defaults).with_collection(config.content_collection.clone());

    let value = match args.command {
        Command::Resolve { key } => resolver.resolve(&key)?.to_json(),
        Command::Get { path } => output::record_json(resolver.record(&path)?),
        Command::List { collection } => output::records_json(resolver.collection(&collection)?),
    };

    output::write_json(&mut std::io::stdout().lock(), &value)
}

fn load_defaults(config: &StoreConfig) -> Result<DefaultRecords, CliError> {
    let Some(path) = &config.defaults_path else {
        info!("no defaults file configured; resolve will reject every key");
        return Ok(DefaultRecords::new());
    };
    Ok(DefaultRecords::load(path)?)
}

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
