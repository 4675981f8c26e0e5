use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::CustomerId;
use pulse_core::domain::order::Order;
use pulse_core::repositories::{OrderRepository, RepositoryError};

use super::{decimal_column, decode_error, store_error};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn get_orders(
        &self,
        customer_id: &CustomerId,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, order_date, total_amount, margin_amount
             FROM sales_order
             WHERE customer_id = ?
               AND (? IS NULL OR order_date >= ?)
               AND (? IS NULL OR order_date <= ?)
             ORDER BY order_date DESC",
        )
        .bind(customer_id.0)
        .bind(from)
        .bind(from)
        .bind(to)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_order).collect()
    }
}

fn map_order(row: &SqliteRow) -> Result<Order, RepositoryError> {
    Ok(Order {
        id: row.try_get("id").map_err(decode_error)?,
        customer_id: CustomerId(row.try_get("customer_id").map_err(decode_error)?),
        order_date: row.try_get("order_date").map_err(decode_error)?,
        total_amount: decimal_column(row, "total_amount")?,
        margin_amount: decimal_column(row, "margin_amount")?,
    })
}
