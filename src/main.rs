use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use people_registry::application::service::RegistryService;
use people_registry::config::RegistryConfig;
use people_registry::domain::address::Address;
use people_registry::domain::ports::LedgerStoreBox;
use people_registry::domain::wei::Wei;
use people_registry::infrastructure::in_memory::InMemoryStore;
use people_registry::interfaces::csv::call_reader::CallReader;
use people_registry::interfaces::csv::state_writer::StateWriter;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input calls CSV file
    input: PathBuf,

    /// Owner address used to deploy the registry if none exists yet
    #[arg(long)]
    owner: Option<Address>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// JSON file with registry rules (min_payment, max_age, senior_age)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum payment for creating a person, e.g. `1 ether` or `1000`
    #[arg(long)]
    min_payment: Option<Wei>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn in_memory_store() -> LedgerStoreBox {
    Box::new(InMemoryStore::new())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    use people_registry::infrastructure::rocksdb::RocksDBStore;

    let Some(db_path) = db_path else {
        return Ok(in_memory_store());
    };

    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(in_memory_store())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RegistryConfig::from_json_file(path).into_diagnostic()?,
        None => RegistryConfig::default(),
    };
    if let Some(min_payment) = cli.min_payment {
        config.min_payment = min_payment;
    }
    config.validate().into_diagnostic()?;

    let store = open_store(cli.db_path)?;
    let service = RegistryService::new(config, store);

    if let Some(owner) = cli.owner {
        service.deploy(owner).await.into_diagnostic()?;
    } else if !service.is_deployed().await.into_diagnostic()? {
        return Err(miette!("No registry deployed; pass --owner to deploy one"));
    }

    // Process calls
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CallReader::new(file);
    for call_result in reader.calls() {
        match call_result {
            Ok(call) => {
                let op = call.op;
                if let Err(e) = service.process_call(call).await {
                    tracing::warn!(?op, "Error processing call: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Error reading call: {}", e);
            }
        }
    }

    let (state, accounts) = service.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());
    writer.write_state(&state, &accounts).into_diagnostic()?;

    Ok(())
}
