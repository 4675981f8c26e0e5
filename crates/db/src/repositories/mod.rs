//! SQLite implementations of the fetch contracts, one file per entity,
//! plus in-memory counterparts for tests and demos.

pub mod customer;
pub mod interaction;
pub mod invoice;
pub mod issue;
pub mod memory;
pub mod order;
pub mod quote;

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use pulse_core::repositories::RepositoryError;

pub use customer::SqlCustomerRepository;
pub use interaction::SqlInteractionRepository;
pub use invoice::SqlInvoiceRepository;
pub use issue::SqlIssueRepository;
pub use memory::{
    InMemoryCustomerRepository, InMemoryInteractionRepository, InMemoryInvoiceRepository,
    InMemoryIssueRepository, InMemoryOrderRepository, InMemoryQuoteRepository,
};
pub use order::SqlOrderRepository;
pub use quote::SqlQuoteRepository;

pub(crate) fn store_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Store(error.to_string())
}

pub(crate) fn decode_error(error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode(error.to_string())
}

/// Money columns are TEXT; sqlx has no native SQLite codec for `Decimal`.
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, RepositoryError> {
    let raw: String = row.try_get(column).map_err(decode_error)?;
    Decimal::from_str(&raw)
        .map_err(|error| RepositoryError::Decode(format!("column `{column}`: {error}")))
}
