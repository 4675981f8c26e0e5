//! Next-best-action selector: a strict priority chain over invoices,
//! issues, quotes, and order cadence. The first matching rule wins and
//! exactly one action is returned.

use std::sync::Arc;

use chrono::{DateTime, Months, Utc};

use crate::domain::customer::CustomerId;
use crate::domain::interaction::Interaction;
use crate::domain::invoice::Invoice;
use crate::domain::issue::Issue;
use crate::domain::order::Order;
use crate::domain::quote::Quote;
use crate::domain::snapshot::NextBestAction;
use crate::render::{fractional_days, money, short_date};
use crate::repositories::{
    InteractionRepository, InvoiceRepository, IssueRepository, OrderRepository, QuoteRepository,
    RepositoryError,
};

const OPEN_QUOTES: u32 = 5;
const OPEN_ISSUES: u32 = 5;
const RECENT_INTERACTIONS: u32 = 5;
const TRAILING_ORDER_MONTHS: u32 = 18;

/// Assumed reorder cadence when only one order exists. Policy constant,
/// preserved from the original behavior.
const FALLBACK_CADENCE_DAYS: f64 = 45.0;
/// The reorder prompt fires this many days before the cadence elapses.
const REORDER_LEAD_DAYS: f64 = 5.0;

pub struct ActionContext<'a> {
    pub invoices: &'a [Invoice],
    pub quotes: &'a [Quote],
    pub issues: &'a [Issue],
    pub interactions: &'a [Interaction],
    pub orders: &'a [Order],
    pub now: DateTime<Utc>,
}

type ActionRule = fn(&ActionContext<'_>) -> Option<NextBestAction>;

/// Priority order is the contract; do not reorder.
const RULES: &[ActionRule] =
    &[overdue_invoice_rule, support_escalation_rule, quote_follow_up_rule, reorder_cadence_rule];

pub fn determine_next_action(context: &ActionContext<'_>) -> NextBestAction {
    RULES
        .iter()
        .find_map(|rule| rule(context))
        .unwrap_or_else(|| NextBestAction {
            label: "Call now — stay top of mind".to_string(),
            explanation: "No urgent blockers detected. A short value check-in keeps the account \
                          warm."
                .to_string(),
        })
}

/// Rule 1: any overdue invoice. Picks the one with the latest due date.
fn overdue_invoice_rule(context: &ActionContext<'_>) -> Option<NextBestAction> {
    let overdue = context
        .invoices
        .iter()
        .filter(|invoice| invoice.is_overdue(context.now))
        .max_by_key(|invoice| invoice.due_date)?;
    Some(NextBestAction {
        label: "Check in about overdue invoice".to_string(),
        explanation: format!(
            "Invoice {} due {} remains unpaid. Offer help removing blockers.",
            overdue.invoice_number,
            short_date(overdue.due_date)
        ),
    })
}

/// Rule 2: first high-severity issue in input order.
fn support_escalation_rule(context: &ActionContext<'_>) -> Option<NextBestAction> {
    let critical = context.issues.iter().find(|issue| issue.is_high_severity())?;
    Some(NextBestAction {
        label: "Escalate support".to_string(),
        explanation: format!(
            "High severity issue '{}' is {}. Resolve before pursuing new revenue.",
            critical.summary, critical.status
        ),
    })
}

/// Rule 3: freshest open quote.
fn quote_follow_up_rule(context: &ActionContext<'_>) -> Option<NextBestAction> {
    let freshest = context.quotes.iter().max_by_key(|quote| quote.quote_date)?;
    Some(NextBestAction {
        label: format!("Follow up on quote {}", freshest.quote_number),
        explanation: format!(
            "Quote from {} worth {}. Confirm decision path and close timing.",
            short_date(freshest.quote_date),
            money(freshest.amount)
        ),
    })
}

/// Rule 4: reorder cadence. Fires when the gap since the last order runs
/// within `REORDER_LEAD_DAYS` of the customer's average order interval.
fn reorder_cadence_rule(context: &ActionContext<'_>) -> Option<NextBestAction> {
    if context.orders.is_empty() {
        return None;
    }

    let mut ordered: Vec<&Order> = context.orders.iter().collect();
    ordered.sort_by_key(|order| order.order_date);

    let gaps: Vec<f64> = ordered
        .windows(2)
        .map(|pair| fractional_days(pair[0].order_date, pair[1].order_date))
        .collect();
    let cadence_days = if gaps.is_empty() {
        FALLBACK_CADENCE_DAYS
    } else {
        gaps.iter().sum::<f64>() / gaps.len() as f64
    };

    let last_order = ordered.last()?;
    let days_since_last_order = fractional_days(last_order.order_date, context.now);

    if days_since_last_order <= cadence_days - REORDER_LEAD_DAYS {
        return None;
    }

    let recency_note = context
        .interactions
        .iter()
        .max_by_key(|interaction| interaction.interaction_date)
        .map(|interaction| {
            format!("Last spoke on {}.", short_date(interaction.interaction_date))
        })
        .unwrap_or_else(|| "No recent interactions on record.".to_string());

    Some(NextBestAction {
        label: "Proactive reorder check".to_string(),
        explanation: format!(
            "Typical cadence {cadence_days:.0} days; it's been {days_since_last_order:.0}. \
             {recency_note} Call to capture the next cycle."
        ),
    })
}

pub struct NextBestActionService {
    invoices: Arc<dyn InvoiceRepository>,
    quotes: Arc<dyn QuoteRepository>,
    issues: Arc<dyn IssueRepository>,
    interactions: Arc<dyn InteractionRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl NextBestActionService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        quotes: Arc<dyn QuoteRepository>,
        issues: Arc<dyn IssueRepository>,
        interactions: Arc<dyn InteractionRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self { invoices, quotes, issues, interactions, orders }
    }

    pub async fn determine(
        &self,
        customer_id: &CustomerId,
    ) -> Result<NextBestAction, RepositoryError> {
        let now = Utc::now();
        let invoices = self.invoices.get_invoices(customer_id).await?;
        let quotes = self.quotes.get_open_quotes(customer_id, OPEN_QUOTES).await?;
        let issues = self.issues.get_open_issues(customer_id, OPEN_ISSUES).await?;
        let interactions =
            self.interactions.get_recent_interactions(customer_id, RECENT_INTERACTIONS).await?;
        let orders = self
            .orders
            .get_orders(customer_id, Some(now - Months::new(TRAILING_ORDER_MONTHS)), Some(now))
            .await?;

        let action = determine_next_action(&ActionContext {
            invoices: &invoices,
            quotes: &quotes,
            issues: &issues,
            interactions: &interactions,
            orders: &orders,
            now,
        });
        tracing::debug!(customer_id = %customer_id, label = %action.label, "selected next best action");
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::domain::customer::CustomerId;
    use crate::domain::interaction::Interaction;
    use crate::domain::invoice::Invoice;
    use crate::domain::issue::Issue;
    use crate::domain::order::Order;
    use crate::domain::quote::Quote;

    use super::{determine_next_action, ActionContext};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn context<'a>(
        invoices: &'a [Invoice],
        quotes: &'a [Quote],
        issues: &'a [Issue],
        interactions: &'a [Interaction],
        orders: &'a [Order],
    ) -> ActionContext<'a> {
        ActionContext { invoices, quotes, issues, interactions, orders, now: now() }
    }

    fn overdue_invoice(number: &str, due_days_ago: i64) -> Invoice {
        Invoice {
            id: due_days_ago,
            customer_id: CustomerId(1),
            invoice_number: number.to_string(),
            invoice_date: now() - Duration::days(due_days_ago + 30),
            due_date: now() - Duration::days(due_days_ago),
            amount: Decimal::from(400),
            paid_date: None,
        }
    }

    fn high_issue() -> Issue {
        Issue {
            id: 1,
            customer_id: CustomerId(1),
            severity: "High".to_string(),
            status: "Open".to_string(),
            summary: "outage during sync".to_string(),
            created_on: now() - Duration::days(2),
        }
    }

    fn quote(number: &str, days_ago: i64) -> Quote {
        Quote {
            id: days_ago,
            customer_id: CustomerId(1),
            quote_number: number.to_string(),
            quote_date: now() - Duration::days(days_ago),
            amount: Decimal::from(2500),
            description: "expansion".to_string(),
            is_open: true,
        }
    }

    fn order_on(day: i64) -> Order {
        // Orders placed on "day N" of a timeline ending at `now`.
        Order {
            id: day,
            customer_id: CustomerId(1),
            order_date: now() - Duration::days(118 - day),
            total_amount: Decimal::from(900),
            margin_amount: Decimal::from(180),
        }
    }

    #[test]
    fn overdue_invoice_outranks_high_severity_issue() {
        let invoices = vec![overdue_invoice("INV-9", 5)];
        let issues = vec![high_issue()];
        let action = determine_next_action(&context(&invoices, &[], &issues, &[], &[]));
        assert_eq!(action.label, "Check in about overdue invoice");
        assert!(action.explanation.contains("INV-9"));
        assert!(action.explanation.contains("remains unpaid"));
    }

    #[test]
    fn latest_due_date_wins_among_overdue_invoices() {
        let invoices = vec![overdue_invoice("INV-OLD", 40), overdue_invoice("INV-NEW", 3)];
        let action = determine_next_action(&context(&invoices, &[], &[], &[], &[]));
        assert!(action.explanation.contains("INV-NEW"));
    }

    #[test]
    fn high_severity_issue_outranks_open_quote() {
        let issues = vec![high_issue()];
        let quotes = vec![quote("Q-1", 2)];
        let action = determine_next_action(&context(&[], &quotes, &issues, &[], &[]));
        assert_eq!(action.label, "Escalate support");
        assert!(action.explanation.contains("outage during sync"));
        assert!(action.explanation.contains("Open"));
    }

    #[test]
    fn freshest_quote_gets_the_follow_up() {
        let quotes = vec![quote("Q-OLD", 30), quote("Q-NEW", 1)];
        let action = determine_next_action(&context(&[], &quotes, &[], &[], &[]));
        assert_eq!(action.label, "Follow up on quote Q-NEW");
        assert!(action.explanation.contains("$2500"));
    }

    #[test]
    fn reorder_check_fires_when_cadence_nearly_elapsed() {
        // Orders on day 0, 40, 80 of a 118-day timeline: cadence 40 days,
        // 38 days since the last order, 38 > 40 - 5.
        let orders = vec![order_on(0), order_on(40), order_on(80)];
        let action = determine_next_action(&context(&[], &[], &[], &[], &orders));
        assert_eq!(action.label, "Proactive reorder check");
        assert!(action.explanation.contains("Typical cadence 40 days"));
        assert!(action.explanation.contains("it's been 38"));
        assert!(action.explanation.contains("No recent interactions on record."));
    }

    #[test]
    fn reorder_check_cites_last_interaction_when_present() {
        let orders = vec![order_on(0), order_on(40), order_on(80)];
        let interactions = vec![Interaction {
            id: 1,
            customer_id: CustomerId(1),
            interaction_date: now() - Duration::days(4),
            interaction_type: "Call".to_string(),
            subject: "checking in".to_string(),
            owner: "rep".to_string(),
        }];
        let action = determine_next_action(&context(&[], &[], &[], &interactions, &orders));
        assert_eq!(action.label, "Proactive reorder check");
        assert!(action.explanation.contains("Last spoke on 2026-05-28."));
    }

    #[test]
    fn reorder_check_holds_inside_the_cadence_window() {
        // Same cadence but evaluated 30 days after the last order:
        // 30 <= 40 - 5, so the rule stays quiet and the default fires.
        let orders: Vec<Order> = [0_i64, 40, 80]
            .iter()
            .map(|day| Order {
                id: *day,
                customer_id: CustomerId(1),
                order_date: now() - Duration::days(110 - day),
                total_amount: Decimal::from(900),
                margin_amount: Decimal::from(180),
            })
            .collect();
        let action = determine_next_action(&context(&[], &[], &[], &[], &orders));
        assert_eq!(action.label, "Call now — stay top of mind");
    }

    #[test]
    fn single_order_uses_fallback_cadence() {
        // One order 40 days ago: no gaps, fallback cadence 45, and
        // 40 <= 45 - 5 leaves the rule quiet (boundary is exclusive).
        let orders = vec![Order {
            id: 1,
            customer_id: CustomerId(1),
            order_date: now() - Duration::days(40),
            total_amount: Decimal::from(900),
            margin_amount: Decimal::from(180),
        }];
        let action = determine_next_action(&context(&[], &[], &[], &[], &orders));
        assert_eq!(action.label, "Call now — stay top of mind");

        // A day later the window is crossed.
        let orders = vec![Order {
            id: 1,
            customer_id: CustomerId(1),
            order_date: now() - Duration::days(41),
            total_amount: Decimal::from(900),
            margin_amount: Decimal::from(180),
        }];
        let action = determine_next_action(&context(&[], &[], &[], &[], &orders));
        assert_eq!(action.label, "Proactive reorder check");
    }

    #[test]
    fn no_signals_fall_through_to_default_call() {
        let action = determine_next_action(&context(&[], &[], &[], &[], &[]));
        assert_eq!(action.label, "Call now — stay top of mind");
        assert!(action.explanation.contains("No urgent blockers"));
    }

    #[test]
    fn paid_invoices_are_not_overdue_candidates() {
        let mut paid = overdue_invoice("INV-PAID", 5);
        paid.paid_date = Some(now() - Duration::days(1));
        let quotes = vec![quote("Q-1", 2)];
        let action = determine_next_action(&context(&[paid], &quotes, &[], &[], &[]));
        assert_eq!(action.label, "Follow up on quote Q-1");
    }
}
