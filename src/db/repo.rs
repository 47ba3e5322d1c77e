//! Repository layer for the persisted ticker records.
//!
//! Amounts round-trip through canonical decimal strings; SQLite's REAL
//! would lose precision for financial values.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::warn;

use crate::domain::{Side, Ticker, Transaction};

/// Repository for persisted ticker records.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Load the persisted transactions for a ticker.
    ///
    /// Returns `None` when no record exists for the ticker, which is
    /// distinct from an existing record with zero transactions.
    pub async fn find_transactions_by_ticker(
        &self,
        ticker: &Ticker,
    ) -> Result<Option<Vec<Transaction>>, sqlx::Error> {
        let record = sqlx::query("SELECT ticker FROM ticker_records WHERE ticker = ?")
            .bind(ticker.as_str())
            .fetch_optional(&self.pool)
            .await?;
        if record.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(
            r#"
            SELECT ext_id, ticker, side, amount, isin, shares, trade_date
            FROM transactions
            WHERE ticker = ?
            ORDER BY id ASC
            "#,
        )
        .bind(ticker.as_str())
        .fetch_all(&self.pool)
        .await?;

        let transactions = rows.iter().map(row_to_transaction).collect();
        Ok(Some(transactions))
    }

    /// Insert a new ticker record with its transactions in one go.
    ///
    /// The record row and its transactions commit atomically so a retry
    /// never sees a half-written ticker.
    pub async fn insert_ticker_record(
        &self,
        ticker: &Ticker,
        transactions: &[Transaction],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO ticker_records (ticker) VALUES (?)")
            .bind(ticker.as_str())
            .execute(&mut *tx)
            .await?;

        for txn in transactions {
            insert_transaction(&mut tx, ticker, txn).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Append one transaction to an existing ticker record.
    pub async fn append_transaction(
        &self,
        ticker: &Ticker,
        txn: &Transaction,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        insert_transaction(&mut tx, ticker, txn).await?;
        tx.commit().await?;
        Ok(())
    }

    /// All tickers with a persisted record.
    pub async fn list_tickers(&self) -> Result<Vec<Ticker>, sqlx::Error> {
        let rows = sqlx::query("SELECT ticker FROM ticker_records ORDER BY ticker ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| Ticker::new(row.get::<String, _>("ticker")))
            .collect())
    }
}

async fn insert_transaction(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    ticker: &Ticker,
    txn: &Transaction,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO transactions (ticker, ext_id, side, amount, isin, shares, trade_date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(ticker.as_str())
    .bind(&txn.id)
    .bind(txn.side.as_label())
    .bind(txn.amount.to_string())
    .bind(&txn.isin)
    .bind(txn.shares as i64)
    .bind(&txn.date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Transaction {
    let ticker: String = row.get("ticker");
    let amount_str: String = row.get("amount");
    let amount = Decimal::from_str(&amount_str).unwrap_or_else(|e| {
        warn!(
            ticker = %ticker,
            amount = %amount_str,
            error = %e,
            "Failed to parse persisted amount decimal, using default"
        );
        Decimal::default()
    });

    Transaction {
        id: row.get("ext_id"),
        ticker: Ticker::new(ticker),
        side: Side::parse(row.get::<String, _>("side").as_str()),
        amount,
        isin: row.get("isin"),
        shares: row.get::<i64, _>("shares") as u32,
        date: row.get("trade_date"),
    }
}
