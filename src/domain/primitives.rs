//! Domain primitives: Ticker and Side.

use serde::{Deserialize, Serialize};

/// Instrument symbol identifying a tradable security.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a Ticker from a string.
    pub fn new(ticker: impl Into<String>) -> Self {
        Ticker(ticker.into())
    }

    /// Get the ticker as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction direction, canonicalized to Buy or Sell.
///
/// Source systems use locale-specific labels; the ingest boundary maps
/// recognized labels onto `Buy`/`Sell`. Labels it cannot map pass through
/// as `Unrecognized` and never participate in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Buy,
    Sell,
    Unrecognized(String),
}

impl Side {
    /// Normalize a raw side label to a canonical side.
    ///
    /// Accepts the canonical English labels and the Finnish broker labels
    /// (`Osto` = buy, `Myynti` = sell). Anything else is kept verbatim.
    pub fn parse(label: &str) -> Self {
        match label {
            "Buy" | "Osto" => Side::Buy,
            "Sell" | "Myynti" => Side::Sell,
            other => Side::Unrecognized(other.to_string()),
        }
    }

    /// The canonical label for this side, or the raw label if unrecognized.
    pub fn as_label(&self) -> &str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
            Side::Unrecognized(label) => label,
        }
    }
}

impl From<String> for Side {
    fn from(label: String) -> Self {
        Side::parse(&label)
    }
}

impl From<Side> for String {
    fn from(side: Side) -> Self {
        side.as_label().to_string()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}
