//! KPI engine: spend and margin KPIs, payment behavior, and the composite
//! risk rating, derived from orders and invoices.
//!
//! Year buckets use the calendar year of the order date relative to the
//! supplied evaluation time. All divisions are guarded; empty inputs
//! degrade to zero/neutral values rather than erroring.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::domain::customer::CustomerId;
use crate::domain::invoice::Invoice;
use crate::domain::order::Order;
use crate::domain::snapshot::{CustomerKpis, MarginTrend, PaymentBehavior, RiskRating};
use crate::render::{fractional_days, round1};
use crate::repositories::{InvoiceRepository, OrderRepository, RepositoryError};

pub fn compute_kpis(orders: &[Order], invoices: &[Invoice], now: DateTime<Utc>) -> CustomerKpis {
    let current_year = now.year();
    let (total_spend_ytd, average_order_size_ytd) = year_bucket(orders, current_year);
    let (total_spend_last_year, average_order_size_last_year) =
        year_bucket(orders, current_year - 1);

    let percent_delta_vs_ly = percent_delta(total_spend_ytd, total_spend_last_year);
    let margin_trend = evaluate_margin_trend(orders);
    let (average_days_to_pay, percent_invoices_late, payment_behavior) =
        evaluate_payment_behavior(invoices, now);
    let risk_rating =
        calculate_risk_rating(percent_delta_vs_ly, percent_invoices_late, margin_trend);

    CustomerKpis {
        total_spend_ytd,
        total_spend_last_year,
        percent_delta_vs_ly,
        average_order_size_ytd,
        average_order_size_last_year,
        margin_trend,
        payment_behavior,
        average_days_to_pay,
        percent_invoices_late,
        risk_rating,
    }
}

fn year_bucket(orders: &[Order], year: i32) -> (Decimal, Decimal) {
    let totals: Vec<Decimal> = orders
        .iter()
        .filter(|order| order.order_date.year() == year)
        .map(|order| order.total_amount)
        .collect();
    if totals.is_empty() {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let sum: Decimal = totals.iter().copied().sum();
    (sum, sum / Decimal::from(totals.len()))
}

/// Year-over-year spend delta in percent, rounded to one decimal. A zero
/// prior year maps to 0 (still zero) or 100 (any growth).
pub fn percent_delta(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current > Decimal::ZERO { Decimal::from(100) } else { Decimal::ZERO };
    }
    ((current - previous) / previous * Decimal::from(100)).round_dp(1)
}

/// Average of the consecutive margin-percent deltas across the three most
/// recent calendar months (newest minus next). Fewer than two months of
/// order history reads as Stable.
pub fn evaluate_margin_trend(orders: &[Order]) -> MarginTrend {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for order in orders {
        let entry = months
            .entry((order.order_date.year(), order.order_date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += order.margin_amount;
        entry.1 += order.total_amount;
    }
    if months.len() < 2 {
        return MarginTrend::Stable;
    }

    let recent: Vec<Decimal> = months
        .values()
        .rev()
        .take(3)
        .map(|(margin, revenue)| {
            if revenue.is_zero() {
                Decimal::ZERO
            } else {
                margin / revenue
            }
        })
        .collect();
    let deltas: Vec<Decimal> = recent.windows(2).map(|pair| pair[0] - pair[1]).collect();
    let average_change = deltas.iter().copied().sum::<Decimal>() / Decimal::from(deltas.len());

    let threshold = Decimal::new(1, 2);
    if average_change > threshold {
        MarginTrend::Improving
    } else if average_change < -threshold {
        MarginTrend::Declining
    } else {
        MarginTrend::Stable
    }
}

/// Returns (average days to pay, percent of invoices late, behavior label),
/// the averages rounded to one decimal. Unpaid invoices count as late once
/// the evaluation time passes their due date.
pub fn evaluate_payment_behavior(
    invoices: &[Invoice],
    now: DateTime<Utc>,
) -> (f64, f64, PaymentBehavior) {
    let pay_intervals: Vec<f64> = invoices
        .iter()
        .filter_map(|invoice| {
            invoice.paid_date.map(|paid| fractional_days(invoice.invoice_date, paid))
        })
        .collect();
    let average_days = if pay_intervals.is_empty() {
        0.0
    } else {
        pay_intervals.iter().sum::<f64>() / pay_intervals.len() as f64
    };

    let late_count = invoices
        .iter()
        .filter(|invoice| invoice.paid_date.unwrap_or(now) > invoice.due_date)
        .count();
    let percent_late = if invoices.is_empty() {
        0.0
    } else {
        late_count as f64 / invoices.len() as f64 * 100.0
    };

    // Exact-zero sentinel: both statistics at zero means no history at all.
    let behavior = if average_days == 0.0 && percent_late == 0.0 {
        PaymentBehavior::NoHistory
    } else if average_days <= 30.0 && percent_late < 10.0 {
        PaymentBehavior::OnTime
    } else if percent_late > 40.0 {
        PaymentBehavior::FrequentlyLate
    } else {
        PaymentBehavior::OccasionalDelays
    };

    (round1(average_days), round1(percent_late), behavior)
}

/// Additive risk score: +2 for shrinking spend, +2/+1 for heavy/moderate
/// late payment, +1 for a declining margin trend.
pub fn calculate_risk_rating(
    percent_delta_vs_ly: Decimal,
    percent_invoices_late: f64,
    margin_trend: MarginTrend,
) -> RiskRating {
    let mut score = 0u8;

    if percent_delta_vs_ly < Decimal::from(-10) {
        score += 2;
    }

    if percent_invoices_late > 30.0 {
        score += 2;
    } else if percent_invoices_late > 10.0 {
        score += 1;
    }

    if margin_trend == MarginTrend::Declining {
        score += 1;
    }

    match score {
        4.. => RiskRating::Risky,
        2 | 3 => RiskRating::Watch,
        _ => RiskRating::Good,
    }
}

pub struct KpiService {
    orders: Arc<dyn OrderRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl KpiService {
    pub fn new(orders: Arc<dyn OrderRepository>, invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { orders, invoices }
    }

    pub async fn customer_kpis(
        &self,
        customer_id: &CustomerId,
    ) -> Result<CustomerKpis, RepositoryError> {
        let orders = self.orders.get_orders(customer_id, None, None).await?;
        let invoices = self.invoices.get_invoices(customer_id).await?;
        let kpis = compute_kpis(&orders, &invoices, Utc::now());
        tracing::debug!(
            customer_id = %customer_id,
            risk_rating = %kpis.risk_rating,
            payment_behavior = %kpis.payment_behavior,
            "computed customer kpis"
        );
        Ok(kpis)
    }
}
