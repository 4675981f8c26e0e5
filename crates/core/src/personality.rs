//! Personality profiler: communication style, value orientation, and
//! response cadence heuristics over recent interactions, trailing-year
//! orders, and open quotes.

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal::Decimal;

use crate::domain::customer::CustomerId;
use crate::domain::interaction::Interaction;
use crate::domain::order::Order;
use crate::domain::quote::Quote;
use crate::domain::snapshot::PersonalityProfile;
use crate::render::{fractional_days, money, short_date};
use crate::repositories::{
    InteractionRepository, OrderRepository, QuoteRepository, RepositoryError,
};

const RECENT_INTERACTIONS: u32 = 25;
const OPEN_QUOTES: u32 = 10;
const TRAILING_ORDER_MONTHS: u32 = 12;

/// Subject lengths above this read as a preference for detail.
const DETAIL_SUBJECT_LENGTH: f64 = 45.0;
/// Average order values below this read as price sensitivity.
const PRICE_SENSITIVE_ORDER_VALUE: i64 = 500;
const PRICE_SENSITIVE_QUOTE_RATIO: f64 = 0.6;

/// Assumed gap when only one interaction exists, so a single data point
/// does not read as instant responsiveness.
const SINGLE_INTERACTION_GAP_DAYS: f64 = 14.0;
const FAST_GAP_DAYS: f64 = 5.0;
const WEEKLY_GAP_DAYS: f64 = 12.0;

pub fn derive_profile(
    interactions: &[Interaction],
    orders: &[Order],
    quotes: &[Quote],
) -> PersonalityProfile {
    let average_subject_length = if interactions.is_empty() {
        0.0
    } else {
        interactions.iter().map(|i| i.subject.chars().count() as f64).sum::<f64>()
            / interactions.len() as f64
    };
    let communication_preference = if average_subject_length > DETAIL_SUBJECT_LENGTH {
        "Prefers detail"
    } else {
        "Keeps it brief"
    };

    let average_order = if orders.is_empty() {
        Decimal::ZERO
    } else {
        orders.iter().map(|o| o.total_amount).sum::<Decimal>() / Decimal::from(orders.len())
    };
    let quote_to_order_ratio = if orders.is_empty() {
        quotes.len() as f64
    } else {
        quotes.len() as f64 / orders.len() as f64
    };
    let value_orientation = if quote_to_order_ratio > PRICE_SENSITIVE_QUOTE_RATIO
        || average_order < Decimal::from(PRICE_SENSITIVE_ORDER_VALUE)
    {
        "Price-sensitive"
    } else {
        "Value-first"
    };

    let response_cadence = response_cadence(interactions);

    let notes = build_notes(
        interactions,
        orders,
        quotes,
        communication_preference,
        value_orientation,
        response_cadence,
    );

    PersonalityProfile {
        communication_preference: communication_preference.to_string(),
        value_orientation: value_orientation.to_string(),
        response_cadence: response_cadence.to_string(),
        notes,
    }
}

fn response_cadence(interactions: &[Interaction]) -> &'static str {
    if interactions.is_empty() {
        return "Unknown cadence";
    }

    let mut ordered: Vec<&Interaction> = interactions.iter().collect();
    ordered.sort_by(|a, b| b.interaction_date.cmp(&a.interaction_date));

    let gaps: Vec<f64> = ordered
        .windows(2)
        .map(|pair| fractional_days(pair[1].interaction_date, pair[0].interaction_date))
        .collect();
    let average_gap = if gaps.is_empty() {
        SINGLE_INTERACTION_GAP_DAYS
    } else {
        gaps.iter().sum::<f64>() / gaps.len() as f64
    };

    if average_gap <= FAST_GAP_DAYS {
        "Fast responses"
    } else if average_gap <= WEEKLY_GAP_DAYS {
        "Responds within a week"
    } else {
        "Slow responses"
    }
}

fn build_notes(
    interactions: &[Interaction],
    orders: &[Order],
    quotes: &[Quote],
    communication_preference: &str,
    value_orientation: &str,
    response_cadence: &str,
) -> String {
    let mut summary = vec![
        communication_preference.to_string(),
        value_orientation.to_string(),
        response_cadence.to_string(),
    ];

    if let Some(last) = interactions.iter().max_by_key(|i| i.interaction_date) {
        summary.push(format!(
            "Last spoke on {} ({}).",
            short_date(last.interaction_date),
            last.interaction_type
        ));
    }

    if let Some(last) = orders.iter().max_by_key(|o| o.order_date) {
        summary.push(format!(
            "Last order {} for {}.",
            short_date(last.order_date),
            money(last.total_amount)
        ));
    }

    if !quotes.is_empty() {
        summary.push(format!("{} active quote(s) indicates evaluation mindset.", quotes.len()));
    }

    summary.join(" ")
}

pub struct PersonalityService {
    interactions: Arc<dyn InteractionRepository>,
    orders: Arc<dyn OrderRepository>,
    quotes: Arc<dyn QuoteRepository>,
}

impl PersonalityService {
    pub fn new(
        interactions: Arc<dyn InteractionRepository>,
        orders: Arc<dyn OrderRepository>,
        quotes: Arc<dyn QuoteRepository>,
    ) -> Self {
        Self { interactions, orders, quotes }
    }

    pub async fn build_profile(
        &self,
        customer_id: &CustomerId,
    ) -> Result<PersonalityProfile, RepositoryError> {
        let now = Utc::now();
        let interactions =
            self.interactions.get_recent_interactions(customer_id, RECENT_INTERACTIONS).await?;
        let orders = self
            .orders
            .get_orders(customer_id, Some(now - Months::new(TRAILING_ORDER_MONTHS)), Some(now))
            .await?;
        let quotes = self.quotes.get_open_quotes(customer_id, OPEN_QUOTES).await?;

        let profile = derive_profile(&interactions, &orders, &quotes);
        tracing::debug!(
            customer_id = %customer_id,
            cadence = %profile.response_cadence,
            "derived personality profile"
        );
        Ok(profile)
    }
}
