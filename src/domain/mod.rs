//! Domain types for the trade summarizer.
//!
//! This module provides:
//! - Domain primitives: Ticker, Side
//! - The Transaction ledger entry with full-field equality

pub mod primitives;
pub mod transaction;

pub use primitives::{Side, Ticker};
pub use transaction::Transaction;
