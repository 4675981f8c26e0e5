use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::CustomerId;
use pulse_core::domain::invoice::Invoice;
use pulse_core::repositories::{InvoiceRepository, RepositoryError};

use super::{decimal_column, decode_error, store_error};
use crate::DbPool;

pub struct SqlInvoiceRepository {
    pool: DbPool,
}

impl SqlInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for SqlInvoiceRepository {
    async fn get_invoices(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, invoice_number, invoice_date, due_date, amount, paid_date
             FROM invoice
             WHERE customer_id = ?
             ORDER BY invoice_date DESC",
        )
        .bind(customer_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_invoice).collect()
    }
}

fn map_invoice(row: &SqliteRow) -> Result<Invoice, RepositoryError> {
    Ok(Invoice {
        id: row.try_get("id").map_err(decode_error)?,
        customer_id: CustomerId(row.try_get("customer_id").map_err(decode_error)?),
        invoice_number: row.try_get("invoice_number").map_err(decode_error)?,
        invoice_date: row.try_get("invoice_date").map_err(decode_error)?,
        due_date: row.try_get("due_date").map_err(decode_error)?,
        amount: decimal_column(row, "amount")?,
        paid_date: row.try_get("paid_date").map_err(decode_error)?,
    })
}
