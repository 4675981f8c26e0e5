use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::{Customer, CustomerId};
use pulse_core::repositories::{CustomerRepository, RepositoryError};

use super::{decode_error, store_error};
use crate::DbPool;

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, code, name, segment, industry, last_refreshed_at
             FROM customer
             WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(|row| map_customer(&row)).transpose()
    }
}

fn map_customer(row: &SqliteRow) -> Result<Customer, RepositoryError> {
    Ok(Customer {
        id: CustomerId(row.try_get("id").map_err(decode_error)?),
        code: row.try_get("code").map_err(decode_error)?,
        name: row.try_get("name").map_err(decode_error)?,
        segment: row.try_get("segment").map_err(decode_error)?,
        industry: row.try_get("industry").map_err(decode_error)?,
        last_refreshed_at: row.try_get("last_refreshed_at").map_err(decode_error)?,
    })
}
