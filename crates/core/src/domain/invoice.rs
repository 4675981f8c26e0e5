use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub customer_id: CustomerId,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub paid_date: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Overdue status is recomputed against the supplied evaluation time,
    /// never stored.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.paid_date.is_none() && now > self.due_date
    }

    pub fn days_to_pay(&self) -> i64 {
        match self.paid_date {
            Some(paid) => (paid - self.invoice_date).num_days(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use crate::domain::customer::CustomerId;

    use super::Invoice;

    fn invoice(paid_offset_days: Option<i64>, due_offset_days: i64) -> Invoice {
        let now = Utc::now();
        Invoice {
            id: 1,
            customer_id: CustomerId(1),
            invoice_number: "INV-1".to_string(),
            invoice_date: now - Duration::days(30),
            due_date: now + Duration::days(due_offset_days),
            amount: Decimal::from(250),
            paid_date: paid_offset_days.map(|days| now - Duration::days(days)),
        }
    }

    #[test]
    fn unpaid_invoice_past_due_is_overdue() {
        let invoice = invoice(None, -3);
        assert!(invoice.is_overdue(Utc::now()));
    }

    #[test]
    fn paid_invoice_is_never_overdue() {
        let invoice = invoice(Some(1), -3);
        assert!(!invoice.is_overdue(Utc::now()));
    }

    #[test]
    fn unpaid_invoice_before_due_date_is_not_overdue() {
        let invoice = invoice(None, 5);
        assert!(!invoice.is_overdue(Utc::now()));
    }

    #[test]
    fn days_to_pay_defaults_to_zero_when_unpaid() {
        assert_eq!(invoice(None, 5).days_to_pay(), 0);
        assert_eq!(invoice(Some(10), -3).days_to_pay(), 20);
    }
}
