use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub customer_id: CustomerId,
    pub interaction_date: DateTime<Utc>,
    /// Call, Email, Meeting, Ticket, or Quote.
    pub interaction_type: String,
    pub subject: String,
    pub owner: String,
}
