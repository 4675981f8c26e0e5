use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::CustomerId;
use pulse_core::domain::quote::Quote;
use pulse_core::repositories::{QuoteRepository, RepositoryError};

use super::{decimal_column, decode_error, store_error};
use crate::DbPool;

pub struct SqlQuoteRepository {
    pool: DbPool,
}

impl SqlQuoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for SqlQuoteRepository {
    async fn get_open_quotes(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Quote>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, quote_number, quote_date, amount, description, is_open
             FROM quote
             WHERE customer_id = ? AND is_open = 1
             ORDER BY quote_date DESC
             LIMIT ?",
        )
        .bind(customer_id.0)
        .bind(i64::from(top))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_quote).collect()
    }
}

fn map_quote(row: &SqliteRow) -> Result<Quote, RepositoryError> {
    Ok(Quote {
        id: row.try_get("id").map_err(decode_error)?,
        customer_id: CustomerId(row.try_get("customer_id").map_err(decode_error)?),
        quote_number: row.try_get("quote_number").map_err(decode_error)?,
        quote_date: row.try_get("quote_date").map_err(decode_error)?,
        amount: decimal_column(row, "amount")?,
        description: row.try_get("description").map_err(decode_error)?,
        is_open: row.try_get("is_open").map_err(decode_error)?,
    })
}
