//! Reconciliation synchronizer: merges matched results into the
//! persisted store without duplicating previously stored transactions.
//!
//! Each lookup/insert/append is an independent store operation; there is
//! no cross-ticker transactionality. Re-running the whole batch over the
//! same or overlapping input is always safe, which is also the recovery
//! path after a partial failure.

use std::sync::Arc;

use tracing::{error, info};

use crate::db::Repository;
use crate::domain::Transaction;
use crate::engine::MatchedResult;

pub struct Synchronizer {
    repo: Arc<Repository>,
}

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub tickers_inserted: usize,
    pub transactions_appended: usize,
    pub transactions_skipped: usize,
    pub tickers_failed: usize,
}

impl Synchronizer {
    pub fn new(repo: Arc<Repository>) -> Self {
        Synchronizer { repo }
    }

    /// Reconcile every matched result into the store.
    ///
    /// A store failure for one ticker is reported and skipped; the
    /// remaining tickers still proceed. The per-ticker state left behind
    /// by a failure is repaired by the next idempotent run.
    pub async fn sync_all(&self, results: &[MatchedResult]) -> SyncReport {
        let mut report = SyncReport::default();

        for result in results {
            match self.sync_one(result).await {
                Ok(outcome) => {
                    report.tickers_inserted += outcome.tickers_inserted;
                    report.transactions_appended += outcome.transactions_appended;
                    report.transactions_skipped += outcome.transactions_skipped;
                }
                Err(e) => {
                    error!(ticker = %result.ticker, error = %e, "failed to reconcile ticker");
                    report.tickers_failed += 1;
                }
            }
        }

        info!(
            inserted = report.tickers_inserted,
            appended = report.transactions_appended,
            skipped = report.transactions_skipped,
            failed = report.tickers_failed,
            "reconciliation complete"
        );
        report
    }

    /// Reconcile a single matched result.
    ///
    /// The lookup happens before the insert/append decision for the same
    /// ticker; that ordering is what makes repeated runs idempotent.
    async fn sync_one(&self, result: &MatchedResult) -> Result<SyncReport, sqlx::Error> {
        let mut outcome = SyncReport::default();

        let existing = self
            .repo
            .find_transactions_by_ticker(&result.ticker)
            .await?;

        match existing {
            None => {
                self.repo
                    .insert_ticker_record(&result.ticker, &result.valid_transactions)
                    .await?;
                outcome.tickers_inserted = 1;
                info!(ticker = %result.ticker, "new ticker record saved");
            }
            Some(existing) => {
                for txn in &result.valid_transactions {
                    if contains(&existing, txn) {
                        outcome.transactions_skipped += 1;
                        continue;
                    }
                    self.repo.append_transaction(&result.ticker, txn).await?;
                    outcome.transactions_appended += 1;
                    info!(
                        ticker = %result.ticker,
                        id = %txn.id,
                        "appended new transaction to existing ticker"
                    );
                }
            }
        }

        Ok(outcome)
    }
}

/// Full-field equality against the already-persisted transactions.
fn contains(existing: &[Transaction], candidate: &Transaction) -> bool {
    existing.iter().any(|txn| txn == candidate)
}
