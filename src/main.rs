use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use trade_summarizer::{
    aggregate_by_ticker, api, config::ColumnMap, config::Config, db::init_db, ingest, summarize,
    LedgerSnapshot, Repository, SnapshotStore, Synchronizer,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let columns = ColumnMap::load_or_init(Path::new(&config.column_map_path));

    // Decode the ledger; a file-level failure is fatal, bad rows are
    // dropped inside the reader.
    let transactions = match ingest::read_ledger(Path::new(&config.ledger_path), &columns) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read ledger {}: {}", config.ledger_path, e);
            std::process::exit(1);
        }
    };

    // The store must be reachable before reconciliation starts.
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    let repo = Arc::new(Repository::new(pool));

    // Batch run: aggregate, match, publish, reconcile.
    let aggregates = aggregate_by_ticker(&transactions);
    let results = summarize(&aggregates);

    let snapshots = Arc::new(SnapshotStore::new());
    snapshots.publish(LedgerSnapshot::from_results(results.clone()));

    let synchronizer = Synchronizer::new(repo);
    synchronizer.sync_all(&results).await;

    // Serve the read endpoints over the published snapshot.
    let app = api::create_router(api::AppState { snapshots });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
