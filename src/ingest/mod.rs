//! Ledger ingestion: CSV row decoding and side-label normalization.
//!
//! This is the boundary in front of the core pipeline. Rows that fail to
//! decode are logged and dropped here; the core treats its input as
//! pre-validated. Exports list the newest row first; the core's matching
//! traversal depends only on within-ticker list order.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ColumnMap;
use crate::domain::{Side, Ticker, Transaction};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open ledger file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read ledger file: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a ledger file into Transaction records.
///
/// The header row is skipped. Each remaining row is decoded through the
/// column map; rows with a missing column, a non-positive share count or
/// an invalid amount are reported and dropped.
pub fn read_ledger(path: &Path, columns: &ColumnMap) -> Result<Vec<Transaction>, IngestError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut transactions = Vec::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record?;
        match decode_row(&record, columns) {
            Ok(txn) => transactions.push(txn),
            Err(reason) => {
                // Header is row 0 of the file; records start at 1.
                warn!(row = row_number + 1, %reason, "dropping malformed ledger row");
            }
        }
    }

    info!(
        path = %path.display(),
        rows = transactions.len(),
        "ledger ingested"
    );
    Ok(transactions)
}

fn decode_row(record: &csv::StringRecord, columns: &ColumnMap) -> Result<Transaction, RowError> {
    let id = field(record, columns.id, "id")?.trim().to_string();
    let isin = field(record, columns.isin, "isin")?.trim().to_string();
    let side = Side::parse(field(record, columns.side, "side")?.trim());
    let ticker = Ticker::new(field(record, columns.ticker, "ticker")?.trim());
    let date = field(record, columns.date, "date")?.to_string();

    let shares_raw = field(record, columns.shares, "shares")?.trim();
    let shares: u32 = shares_raw
        .parse()
        .map_err(|_| RowError::InvalidShares(shares_raw.to_string()))?;
    if shares == 0 {
        return Err(RowError::InvalidShares(shares_raw.to_string()));
    }

    let amount_raw = field(record, columns.amount, "amount")?.trim();
    let amount = Decimal::from_str(amount_raw)
        .map_err(|_| RowError::InvalidAmount(amount_raw.to_string()))?;
    if amount.is_sign_negative() {
        return Err(RowError::InvalidAmount(amount_raw.to_string()));
    }

    Ok(Transaction {
        id,
        ticker,
        side,
        amount,
        isin,
        shares,
        date,
    })
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &'static str,
) -> Result<&'a str, RowError> {
    record.get(index).ok_or(RowError::MissingColumn(name))
}

#[derive(Debug, Error)]
enum RowError {
    #[error("missing column for field {0}")]
    MissingColumn(&'static str),
    #[error("invalid share count: {0}")]
    InvalidShares(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Narrow map so fixtures stay readable: id,side,ticker,isin,date,shares,amount
    fn test_columns() -> ColumnMap {
        ColumnMap {
            id: 0,
            side: 1,
            ticker: 2,
            isin: 3,
            date: 4,
            shares: 5,
            amount: 6,
        }
    }

    fn write_ledger(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_rows_and_normalizes_sides() {
        let file = write_ledger(
            "id,side,ticker,isin,date,shares,amount\n\
             T2,Myynti,NOKIA,FI0009000681,12.1.2024,10,150.5\n\
             T1,Osto,NOKIA,FI0009000681,11.1.2024,10,100\n",
        );

        let txns = read_ledger(file.path(), &test_columns()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].side, Side::Sell);
        assert_eq!(txns[0].amount, Decimal::from_str("150.5").unwrap());
        assert_eq!(txns[1].side, Side::Buy);
        assert_eq!(txns[1].ticker, Ticker::new("NOKIA"));
        assert_eq!(txns[1].shares, 10);
    }

    #[test]
    fn test_unrecognized_side_passes_through() {
        let file = write_ledger(
            "id,side,ticker,isin,date,shares,amount\n\
             T1,Lunastus,NOKIA,FI0009000681,11.1.2024,10,100\n",
        );

        let txns = read_ledger(file.path(), &test_columns()).unwrap();
        assert_eq!(txns[0].side, Side::Unrecognized("Lunastus".to_string()));
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let file = write_ledger(
            "id,side,ticker,isin,date,shares,amount\n\
             T1,Osto,NOKIA,FI0009000681,11.1.2024,ten,100\n\
             T2,Osto,NOKIA,FI0009000681,11.1.2024,0,100\n\
             T3,Osto,NOKIA,FI0009000681,11.1.2024,10,not-a-number\n\
             T4,Osto,NOKIA,FI0009000681,11.1.2024,10,-5\n\
             T5,Osto,NOKIA,FI0009000681,11.1.2024,10,100\n",
        );

        let txns = read_ledger(file.path(), &test_columns()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id, "T5");
    }

    #[test]
    fn test_short_row_is_dropped() {
        let file = write_ledger(
            "id,side,ticker,isin,date,shares,amount\n\
             T1,Osto,NOKIA\n\
             T2,Osto,NOKIA,FI0009000681,11.1.2024,10,100\n",
        );

        let txns = read_ledger(file.path(), &test_columns()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id, "T2");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_ledger(Path::new("/nonexistent/ledger.csv"), &test_columns());
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
