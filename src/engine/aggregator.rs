//! Groups a flat transaction list into per-ticker aggregates.

use std::collections::BTreeMap;

use crate::domain::{Side, Ticker, Transaction};

use super::TickerAggregate;

/// Group transactions by ticker, splitting buy/sell sub-sequences and
/// accumulating per-side share totals.
///
/// Pure single pass: the same input always yields the same aggregates.
/// A transaction with an unrecognized side lands in `transactions` but in
/// neither `buys` nor `sells`, which keeps it out of matching entirely.
pub fn aggregate_by_ticker(transactions: &[Transaction]) -> BTreeMap<Ticker, TickerAggregate> {
    let mut aggregates: BTreeMap<Ticker, TickerAggregate> = BTreeMap::new();

    for txn in transactions {
        let agg = aggregates
            .entry(txn.ticker.clone())
            .or_insert_with(|| TickerAggregate::new(txn.ticker.clone()));

        match txn.side {
            Side::Buy => {
                agg.buys.push(txn.clone());
                agg.buy_share_total += txn.shares;
            }
            Side::Sell => {
                agg.sells.push(txn.clone());
                agg.sell_share_total += txn.shares;
            }
            Side::Unrecognized(_) => {}
        }

        agg.transactions.push(txn.clone());
    }

    aggregates
}
