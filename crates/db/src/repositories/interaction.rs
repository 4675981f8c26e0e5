use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::domain::customer::CustomerId;
use pulse_core::domain::interaction::Interaction;
use pulse_core::repositories::{InteractionRepository, RepositoryError};

use super::{decode_error, store_error};
use crate::DbPool;

pub struct SqlInteractionRepository {
    pool: DbPool,
}

impl SqlInteractionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for SqlInteractionRepository {
    async fn get_recent_interactions(
        &self,
        customer_id: &CustomerId,
        take: u32,
    ) -> Result<Vec<Interaction>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, interaction_date, interaction_type, subject, owner
             FROM interaction
             WHERE customer_id = ?
             ORDER BY interaction_date DESC
             LIMIT ?",
        )
        .bind(customer_id.0)
        .bind(i64::from(take))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.iter().map(map_interaction).collect()
    }
}

fn map_interaction(row: &SqliteRow) -> Result<Interaction, RepositoryError> {
    Ok(Interaction {
        id: row.try_get("id").map_err(decode_error)?,
        customer_id: CustomerId(row.try_get("customer_id").map_err(decode_error)?),
        interaction_date: row.try_get("interaction_date").map_err(decode_error)?,
        interaction_type: row.try_get("interaction_type").map_err(decode_error)?,
        subject: row.try_get("subject").map_err(decode_error)?,
        owner: row.try_get("owner").map_err(decode_error)?,
    })
}
