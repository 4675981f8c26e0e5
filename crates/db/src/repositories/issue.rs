use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::CustomerId;
use pulse_core::domain::issue::Issue;
use pulse_core::repositories::{IssueRepository, RepositoryError};

use super::{decode_error, store_error};
use crate::DbPool;

pub struct SqlIssueRepository {
    pool: DbPool,
}

impl SqlIssueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueRepository for SqlIssueRepository {
    async fn get_open_issues(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Issue>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, severity, status, summary, created_on
             FROM issue
             WHERE customer_id = ? AND status <> 'Closed'
             ORDER BY created_on DESC
             LIMIT ?",
        )
        .bind(customer_id.0)
        .bind(i64::from(top))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_issue).collect()
    }
}

fn map_issue(row: &SqliteRow) -> Result<Issue, RepositoryError> {
    Ok(Issue {
        id: row.try_get("id").map_err(decode_error)?,
        customer_id: CustomerId(row.try_get("customer_id").map_err(decode_error)?),
        severity: row.try_get("severity").map_err(decode_error)?,
        status: row.try_get("status").map_err(decode_error)?,
        summary: row.try_get("summary").map_err(decode_error)?,
        created_on: row.try_get("created_on").map_err(decode_error)?,
    })
}
