//! Matching engine: decides which buys and sells are mutually executed
//! and computes realized PnL for one ticker.
//!
//! The traversal walks the ticker's transactions in reverse chronological
//! order with an eligibility window: a buy only counts if some sell
//! occurred earlier in the original order, and sells only count once an
//! eligible buy has opened the window. This produces FIFO-like pairing
//! anchored to the tail of the history. The rule is intentionally
//! preserved as observed in production, state machine and all; do not
//! re-derive it from textbook FIFO matching.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{Side, Ticker, Transaction};

use super::{MatchedResult, TickerAggregate};

/// Eligibility window for counting sells, opened by the first eligible
/// buy and never closed again within a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SellWindow {
    Closed,
    Open,
}

impl SellWindow {
    fn is_open(self) -> bool {
        self == SellWindow::Open
    }
}

/// Match one ticker's buys and sells and compute realized totals.
///
/// Precondition: the aggregate has at least one buy and one sell; callers
/// filter one-sided tickers out before invoking the engine.
///
/// `valid_transactions` is emitted in reverse-traversal order. A sell
/// larger than what remains to match (or than the currently open buy
/// quantity) is emitted as a pro-rated partial-fill copy and terminates
/// the traversal.
pub fn match_executed(agg: &TickerAggregate) -> MatchedResult {
    let matchable_shares = agg.sell_share_total.min(agg.buy_share_total);
    let mut remaining_matchable = matchable_shares;
    let mut open_buy_shares: u32 = 0;
    let mut window = SellWindow::Closed;

    let mut realized_buy_total = Decimal::ZERO;
    let mut realized_sell_total = Decimal::ZERO;
    let mut valid_transactions = Vec::new();

    for (index, txn) in agg.transactions.iter().enumerate().rev() {
        if remaining_matchable == 0 {
            break;
        }

        match &txn.side {
            Side::Sell => {
                if !window.is_open() || open_buy_shares == 0 {
                    continue;
                }
                if remaining_matchable < txn.shares || open_buy_shares < txn.shares {
                    // Terminal partial fill: pro-rate and stop.
                    let partial = txn.partial_fill(remaining_matchable);
                    realized_sell_total += partial.amount;
                    valid_transactions.push(partial);
                    remaining_matchable = 0;
                    break;
                }
                valid_transactions.push(txn.clone());
                realized_sell_total += txn.amount;
                remaining_matchable -= txn.shares;
                open_buy_shares -= txn.shares;
            }
            Side::Buy => {
                if !has_earlier_sell(&agg.transactions[..index]) {
                    continue;
                }
                valid_transactions.push(txn.clone());
                realized_buy_total += txn.amount;
                open_buy_shares += txn.shares;
                window = SellWindow::Open;
            }
            Side::Unrecognized(label) => {
                warn!(
                    ticker = %agg.ticker,
                    side = %label,
                    "transaction with unrecognized side excluded from matching"
                );
            }
        }
    }

    MatchedResult {
        ticker: agg.ticker.clone(),
        valid_transactions,
        realized_buy_total,
        realized_sell_total,
    }
}

/// Whether any sell occurs in the given prefix of the original order.
fn has_earlier_sell(prefix: &[Transaction]) -> bool {
    prefix.iter().rev().any(|txn| txn.side == Side::Sell)
}

/// Run the matching engine over all aggregates, skipping one-sided
/// tickers, and log the per-ticker and run-level PnL summary.
pub fn summarize(aggregates: &BTreeMap<Ticker, TickerAggregate>) -> Vec<MatchedResult> {
    let mut results = Vec::new();
    let mut total_pnl = Decimal::ZERO;
    let mut wins = 0u32;
    let mut losses = 0u32;

    for agg in aggregates.values() {
        if !agg.is_two_sided() {
            continue;
        }

        let result = match_executed(agg);
        let pnl = result.realized_pnl();
        total_pnl += pnl;
        if pnl > Decimal::ZERO {
            wins += 1;
        } else {
            losses += 1;
        }

        info!(ticker = %result.ticker, pnl = %pnl.round_dp(2), "ticker summarized");
        results.push(result);
    }

    info!(
        total = %total_pnl.round_dp(2),
        wins,
        losses,
        "ledger summary complete"
    );

    results
}
