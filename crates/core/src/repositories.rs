//! Fetch contracts consumed by the derivation pipeline.
//!
//! Implementations live in `pulse-db`; the pipeline only sees these traits.
//! All fetches are read-only and individually cancelable (dropping the
//! future aborts the underlying query).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::customer::{Customer, CustomerId};
use crate::domain::interaction::Interaction;
use crate::domain::invoice::Invoice;
use crate::domain::issue::Issue;
use crate::domain::order::Order;
use crate::domain::quote::Quote;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store failure: {0}")]
    Store(String),
    #[error("decode failure: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Date range is optional and inclusive on both ends.
    async fn get_orders(
        &self,
        customer_id: &CustomerId,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>, RepositoryError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Unfiltered; overdue/late status is derived by the pipeline.
    async fn get_invoices(&self, customer_id: &CustomerId)
        -> Result<Vec<Invoice>, RepositoryError>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Open quotes only, newest first, capped at `top`.
    async fn get_open_quotes(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Quote>, RepositoryError>;
}

#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Excludes status "Closed", newest first, capped at `top`.
    async fn get_open_issues(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Issue>, RepositoryError>;
}

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Newest first, capped at `take`.
    async fn get_recent_interactions(
        &self,
        customer_id: &CustomerId,
        take: u32,
    ) -> Result<Vec<Interaction>, RepositoryError>;
}
