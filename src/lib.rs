pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod snapshot;
pub mod sync;

pub use config::{ColumnMap, Config};
pub use db::{init_db, Repository};
pub use domain::{Side, Ticker, Transaction};
pub use engine::{aggregate_by_ticker, match_executed, summarize, MatchedResult, TickerAggregate};
pub use error::AppError;
pub use snapshot::{LedgerSnapshot, SnapshotStore};
pub use sync::{SyncReport, Synchronizer};
