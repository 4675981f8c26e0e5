use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub margin_amount: Decimal,
}
