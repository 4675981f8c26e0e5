use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub customer_id: CustomerId,
    pub quote_number: String,
    pub quote_date: DateTime<Utc>,
    pub amount: Decimal,
    pub description: String,
    pub is_open: bool,
}
