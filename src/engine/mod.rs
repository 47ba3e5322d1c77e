//! Pure computation engine for trade aggregation and buy/sell matching.

use crate::domain::{Ticker, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

pub mod aggregator;
pub mod matcher;

pub use aggregator::aggregate_by_ticker;
pub use matcher::{match_executed, summarize};

/// Per-instrument working set built from one pass over the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickerAggregate {
    pub ticker: Ticker,
    /// All transactions for this ticker, in input encounter order.
    pub transactions: Vec<Transaction>,
    /// Buy-side subset, same relative order as `transactions`.
    pub buys: Vec<Transaction>,
    /// Sell-side subset, same relative order as `transactions`.
    pub sells: Vec<Transaction>,
    pub buy_share_total: u32,
    pub sell_share_total: u32,
}

impl TickerAggregate {
    pub fn new(ticker: Ticker) -> Self {
        TickerAggregate {
            ticker,
            ..Default::default()
        }
    }

    /// A ticker is matchable only when both sides are present.
    pub fn is_two_sided(&self) -> bool {
        !self.buys.is_empty() && !self.sells.is_empty()
    }
}

/// Per-instrument output of the matching engine.
///
/// `valid_transactions` holds the executed buys and sells in the order
/// they were emitted during the reverse traversal (most-recent-first);
/// callers must not assume chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedResult {
    pub ticker: Ticker,
    pub valid_transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::float")]
    pub realized_buy_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub realized_sell_total: Decimal,
}

impl MatchedResult {
    /// Realized PnL for the ticker: matched sell value minus matched buy value.
    pub fn realized_pnl(&self) -> Decimal {
        self.realized_sell_total - self.realized_buy_total
    }
}
