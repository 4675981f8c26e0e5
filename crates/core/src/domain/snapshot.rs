//! Derived view-model types. Everything in this module is a pure function of
//! the fetched collections at evaluation time; nothing here is persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::interaction::Interaction;
use crate::domain::issue::Issue;
use crate::domain::quote::Quote;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginTrend {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for MarginTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Declining => "Declining",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentBehavior {
    #[serde(rename = "No payment history")]
    NoHistory,
    #[serde(rename = "Pays on time")]
    OnTime,
    #[serde(rename = "Occasional delays")]
    OccasionalDelays,
    #[serde(rename = "Frequently late")]
    FrequentlyLate,
}

impl std::fmt::Display for PaymentBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NoHistory => "No payment history",
            Self::OnTime => "Pays on time",
            Self::OccasionalDelays => "Occasional delays",
            Self::FrequentlyLate => "Frequently late",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRating {
    Good,
    Watch,
    Risky,
}

impl std::fmt::Display for RiskRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Good => "Good",
            Self::Watch => "Watch",
            Self::Risky => "Risky",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerKpis {
    pub total_spend_ytd: Decimal,
    pub total_spend_last_year: Decimal,
    pub percent_delta_vs_ly: Decimal,
    pub average_order_size_ytd: Decimal,
    pub average_order_size_last_year: Decimal,
    pub margin_trend: MarginTrend,
    pub payment_behavior: PaymentBehavior,
    pub average_days_to_pay: f64,
    pub percent_invoices_late: f64,
    pub risk_rating: RiskRating,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub communication_preference: String,
    pub value_orientation: String,
    pub response_cadence: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkingPoint {
    pub title: String,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextBestAction {
    pub label: String,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub open_count: usize,
    pub total_open_value: Decimal,
    pub top_quotes: Vec<Quote>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub open_count: usize,
    pub has_high_severity: bool,
    pub top_issues: Vec<Issue>,
}

/// One assembled snapshot. Lifetime is a single request; never cached or
/// persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotViewModel {
    pub customer: Customer,
    pub kpis: CustomerKpis,
    pub open_quotes: QuoteSummary,
    pub open_issues: IssueSummary,
    pub recent_interactions: Vec<Interaction>,
    pub personality: PersonalityProfile,
    pub talking_points: Vec<TalkingPoint>,
    pub next_action: NextBestAction,
}
