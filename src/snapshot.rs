//! Published results of the latest batch run.
//!
//! Request handlers read a shared, immutable snapshot; a new batch run
//! replaces the whole snapshot rather than mutating it in place.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::domain::{Ticker, Transaction};
use crate::engine::MatchedResult;

/// The two read-facing result collections of one batch run.
#[derive(Debug, Default, Serialize)]
pub struct LedgerSnapshot {
    /// Ticker to validated (matched) transaction list.
    pub valid_by_ticker: BTreeMap<Ticker, Vec<Transaction>>,
    /// Full matched results, one per two-sided ticker.
    pub matched: Vec<MatchedResult>,
}

impl LedgerSnapshot {
    pub fn from_results(results: Vec<MatchedResult>) -> Self {
        let valid_by_ticker = results
            .iter()
            .map(|r| (r.ticker.clone(), r.valid_transactions.clone()))
            .collect();
        LedgerSnapshot {
            valid_by_ticker,
            matched: results,
        }
    }
}

/// Holder for the current snapshot.
///
/// `publish` swaps the Arc wholesale; `load` clones it. The lock is held
/// only for the pointer swap/clone, never while serializing a response.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<LedgerSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: LedgerSnapshot) {
        let mut guard = self.current.write().expect("snapshot lock poisoned");
        *guard = Arc::new(snapshot);
    }

    pub fn load(&self) -> Arc<LedgerSnapshot> {
        self.current.read().expect("snapshot lock poisoned").clone()
    }
}
