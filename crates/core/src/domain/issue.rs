use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub customer_id: CustomerId,
    /// Free text in the store; compared case-insensitively ("Low", "Medium", "High").
    pub severity: String,
    /// Free text; rows with status "Closed" are excluded at fetch time.
    pub status: String,
    pub summary: String,
    pub created_on: DateTime<Utc>,
}

impl Issue {
    pub fn is_high_severity(&self) -> bool {
        self.severity.eq_ignore_ascii_case("high")
    }
}
