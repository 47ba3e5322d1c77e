//! Transaction type representing a single ledger entry.

use crate::domain::{Side, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One buy/sell ledger entry.
///
/// Created once by the row decoder and immutable afterward; the matching
/// engine may derive a partial-fill copy via [`Transaction::partial_fill`],
/// which is a new value rather than a mutation.
///
/// Full-field equality is the basis for de-duplication during
/// reconciliation, so every field participates in `PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// External identifier from the source system; empty for legacy rows.
    pub id: String,
    /// Instrument symbol.
    pub ticker: Ticker,
    /// Trade side (Buy or Sell, or an unrecognized raw label).
    pub side: Side,
    /// Total cash value of the transaction, non-negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Instrument identifier.
    pub isin: String,
    /// Share count, always positive.
    pub shares: u32,
    /// Trade date as an opaque display string.
    pub date: String,
}

impl Transaction {
    /// Derive a partial-fill copy covering `matched_shares` of this sell.
    ///
    /// The amount is pro-rated at the per-share price; the original value
    /// is left untouched.
    pub fn partial_fill(&self, matched_shares: u32) -> Transaction {
        let per_share = self.amount / Decimal::from(self.shares);
        Transaction {
            amount: per_share * Decimal::from(matched_shares),
            shares: matched_shares,
            ..self.clone()
        }
    }
}
