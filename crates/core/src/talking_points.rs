//! Talking-points builder: an ordered chain of producers, each conditional
//! on data presence, truncated to five points.
//!
//! Producer order is the priority order; it is part of the contract and
//! must not be reordered.

use std::sync::Arc;

use chrono::{DateTime, Months, Utc};

use crate::domain::customer::CustomerId;
use crate::domain::interaction::Interaction;
use crate::domain::invoice::Invoice;
use crate::domain::issue::Issue;
use crate::domain::order::Order;
use crate::domain::quote::Quote;
use crate::domain::snapshot::{PersonalityProfile, TalkingPoint};
use crate::render::{date_time, money, short_date};
use crate::repositories::{
    InteractionRepository, InvoiceRepository, IssueRepository, OrderRepository, QuoteRepository,
    RepositoryError,
};

const MAX_POINTS: usize = 5;
const SUBJECT_PREVIEW_CHARS: usize = 60;

const TRAILING_ORDER_MONTHS: u32 = 12;
const OPEN_QUOTES: u32 = 3;
const OPEN_ISSUES: u32 = 3;
const RECENT_INTERACTIONS: u32 = 5;

pub fn build_talking_points(
    orders: &[Order],
    invoices: &[Invoice],
    quotes: &[Quote],
    issues: &[Issue],
    interactions: &[Interaction],
    profile: &PersonalityProfile,
    now: DateTime<Utc>,
) -> Vec<TalkingPoint> {
    let producers: [&dyn Fn() -> Option<TalkingPoint>; 4] = [
        &|| recent_order_point(orders),
        &|| open_quote_point(quotes),
        &|| overdue_invoice_point(invoices, now),
        &|| support_issue_point(issues),
    ];

    let mut points: Vec<TalkingPoint> =
        producers.iter().filter_map(|produce| produce()).collect();

    if points.is_empty() {
        points.push(TalkingPoint {
            title: "Check-in".to_string(),
            detail: "No blockers found. Share a quick win or relevant product update tailored \
                     to their segment."
                .to_string(),
        });
    }

    if let Some(point) = communication_style_point(profile) {
        points.push(point);
    }
    if let Some(point) = last_touch_point(interactions) {
        points.push(point);
    }

    points.truncate(MAX_POINTS);
    points
}

fn recent_order_point(orders: &[Order]) -> Option<TalkingPoint> {
    let recent = orders.iter().max_by_key(|o| o.order_date)?;
    Some(TalkingPoint {
        title: "Lead with what worked".to_string(),
        detail: format!(
            "They spent {} on {}. Reference it to anchor value.",
            money(recent.total_amount),
            short_date(recent.order_date)
        ),
    })
}

fn open_quote_point(quotes: &[Quote]) -> Option<TalkingPoint> {
    let top = quotes.iter().max_by_key(|q| q.quote_date)?;
    Some(TalkingPoint {
        title: "Nudge open quote".to_string(),
        detail: format!(
            "Quote {} for {} is open since {}. Offer next step.",
            top.quote_number,
            money(top.amount),
            short_date(top.quote_date)
        ),
    })
}

fn overdue_invoice_point(invoices: &[Invoice], now: DateTime<Utc>) -> Option<TalkingPoint> {
    let overdue = invoices.iter().filter(|i| i.is_overdue(now)).count();
    if overdue == 0 {
        return None;
    }
    Some(TalkingPoint {
        title: "Acknowledge payment friction".to_string(),
        detail: format!(
            "{overdue} invoice(s) overdue; ask if anything is blocking payment and propose a plan."
        ),
    })
}

fn support_issue_point(issues: &[Issue]) -> Option<TalkingPoint> {
    if issues.is_empty() {
        return None;
    }
    match issues.iter().find(|i| i.is_high_severity()) {
        Some(critical) => Some(TalkingPoint {
            title: "Address high-severity issue".to_string(),
            detail: format!(
                "Issue '{}' is high severity ({}). Confirm mitigation before selling.",
                critical.summary, critical.status
            ),
        }),
        None => Some(TalkingPoint {
            title: "Close the loop on support".to_string(),
            detail: format!(
                "{} open issue(s); provide status and expected resolution dates.",
                issues.len()
            ),
        }),
    }
}

fn communication_style_point(profile: &PersonalityProfile) -> Option<TalkingPoint> {
    if profile.communication_preference.trim().is_empty() {
        return None;
    }
    let detail = if profile.communication_preference == "Keeps it brief" {
        "Keep the agenda to 3 bullets with clear next steps."
    } else {
        "Send a one-page summary with appendix-level details for their review."
    };
    Some(TalkingPoint {
        title: "Match communication style".to_string(),
        detail: detail.to_string(),
    })
}

fn last_touch_point(interactions: &[Interaction]) -> Option<TalkingPoint> {
    let last = interactions.iter().max_by_key(|i| i.interaction_date)?;
    Some(TalkingPoint {
        title: "Reference last touch".to_string(),
        detail: format!(
            "Last {} on {}: '{}'. Close that loop.",
            last.interaction_type.to_lowercase(),
            date_time(last.interaction_date),
            truncate_chars(&last.subject, SUBJECT_PREVIEW_CHARS)
        ),
    })
}

fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut preview: String = value.chars().take(max).collect();
    preview.push('…');
    preview
}

pub struct TalkingPointsService {
    orders: Arc<dyn OrderRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    quotes: Arc<dyn QuoteRepository>,
    issues: Arc<dyn IssueRepository>,
    interactions: Arc<dyn InteractionRepository>,
}

impl TalkingPointsService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        quotes: Arc<dyn QuoteRepository>,
        issues: Arc<dyn IssueRepository>,
        interactions: Arc<dyn InteractionRepository>,
    ) -> Self {
        Self { orders, invoices, quotes, issues, interactions }
    }

    pub async fn build_for(
        &self,
        customer_id: &CustomerId,
        profile: &PersonalityProfile,
    ) -> Result<Vec<TalkingPoint>, RepositoryError> {
        let now = Utc::now();
        let orders = self
            .orders
            .get_orders(customer_id, Some(now - Months::new(TRAILING_ORDER_MONTHS)), Some(now))
            .await?;
        let invoices = self.invoices.get_invoices(customer_id).await?;
        let quotes = self.quotes.get_open_quotes(customer_id, OPEN_QUOTES).await?;
        let issues = self.issues.get_open_issues(customer_id, OPEN_ISSUES).await?;
        let interactions =
            self.interactions.get_recent_interactions(customer_id, RECENT_INTERACTIONS).await?;

        let points = build_talking_points(
            &orders,
            &invoices,
            &quotes,
            &issues,
            &interactions,
            profile,
            now,
        );
        tracing::debug!(customer_id = %customer_id, count = points.len(), "built talking points");
        Ok(points)
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
    use crate::domain::snapshot::PersonalityProfile;

    use super::{build_talking_points, truncate_chars};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn order(days_ago: i64) -> Order {
        Order {
            id: days_ago,
            customer_id: CustomerId(1),
            order_date: now() - Duration::days(days_ago),
            total_amount: Decimal::from(1200),
            margin_amount: Decimal::from(240),
        }
    }

    fn overdue_invoice(id: i64) -> Invoice {
        Invoice {
            id,
            customer_id: CustomerId(1),
            invoice_number: format!("INV-{id}"),
            invoice_date: now() - Duration::days(45),
            due_date: now() - Duration::days(15),
            amount: Decimal::from(300),
            paid_date: None,
        }
    }

    fn quote(days_ago: i64) -> Quote {
        Quote {
            id: days_ago,
            customer_id: CustomerId(1),
            quote_number: format!("Q-{days_ago}"),
            quote_date: now() - Duration::days(days_ago),
            amount: Decimal::from(5000),
            description: "expansion".to_string(),
            is_open: true,
        }
    }

    fn issue(severity: &str) -> Issue {
        Issue {
            id: 1,
            customer_id: CustomerId(1),
            severity: severity.to_string(),
            status: "In Progress".to_string(),
            summary: "sync delays".to_string(),
            created_on: now() - Duration::days(3),
        }
    }

    fn interaction(subject: &str) -> Interaction {
        Interaction {
            id: 1,
            customer_id: CustomerId(1),
            interaction_date: now() - Duration::days(1),
            interaction_type: "Email".to_string(),
            subject: subject.to_string(),
            owner: "rep".to_string(),
        }
    }

    fn profile(preference: &str) -> PersonalityProfile {
        PersonalityProfile {
            communication_preference: preference.to_string(),
            value_orientation: "Value-first".to_string(),
            response_cadence: "Fast responses".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn empty_inputs_yield_exactly_one_check_in_point() {
        let points = build_talking_points(
            &[],
            &[],
            &[],
            &[],
            &[],
            &PersonalityProfile::default(),
            now(),
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].title, "Check-in");
    }

    #[test]
    fn never_more_than_five_points() {
        let points = build_talking_points(
            &[order(10)],
            &[overdue_invoice(1)],
            &[quote(5)],
            &[issue("Medium")],
            &[interaction("renewal details")],
            &profile("Keeps it brief"),
            now(),
        );
        assert_eq!(points.len(), 5);
        // Step 7 (last touch) is dropped once steps 1-6 fill the list.
        assert!(points.iter().all(|p| p.title != "Reference last touch"));
        assert_eq!(points[4].title, "Match communication style");
    }

    #[test]
    fn priority_order_is_fixed() {
        let points = build_talking_points(
            &[order(10)],
            &[overdue_invoice(1)],
            &[quote(5)],
            &[issue("Medium")],
            &[],
            &PersonalityProfile::default(),
            now(),
        );
        let titles: Vec<&str> = points.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Lead with what worked",
                "Nudge open quote",
                "Acknowledge payment friction",
                "Close the loop on support",
            ]
        );
    }

    #[test]
    fn high_severity_issue_takes_the_issue_slot() {
        let issues = vec![issue("Low"), issue("HIGH")];
        let points = build_talking_points(
            &[],
            &[],
            &[],
            &issues,
            &[],
            &PersonalityProfile::default(),
            now(),
        );
        assert_eq!(points[0].title, "Address high-severity issue");
        assert!(points[0].detail.contains("sync delays"));
        assert!(points[0].detail.contains("In Progress"));
    }

    #[test]
    fn freshest_quote_wins_the_quote_slot() {
        let points = build_talking_points(
            &[],
            &[],
            &[quote(20), quote(2), quote(9)],
            &[],
            &[],
            &PersonalityProfile::default(),
            now(),
        );
        assert!(points[0].detail.contains("Q-2"));
    }

    #[test]
    fn brief_profiles_get_a_brief_agenda() {
        let points =
            build_talking_points(&[], &[], &[], &[], &[], &profile("Keeps it brief"), now());
        let style = points
            .iter()
            .find(|p| p.title == "Match communication style")
            .expect("style point");
        assert!(style.detail.contains("3 bullets"));

        let points =
            build_talking_points(&[], &[], &[], &[], &[], &profile("Prefers detail"), now());
        let style = points
            .iter()
            .find(|p| p.title == "Match communication style")
            .expect("style point");
        assert!(style.detail.contains("one-page summary"));
    }

    #[test]
    fn last_touch_subject_is_truncated_to_sixty_chars() {
        let long_subject = "s".repeat(75);
        let points = build_talking_points(
            &[],
            &[],
            &[],
            &[],
            &[interaction(&long_subject)],
            &PersonalityProfile::default(),
            now(),
        );
        let touch = points
            .iter()
            .find(|p| p.title == "Reference last touch")
            .expect("last touch point");
        assert!(touch.detail.contains(&format!("{}…", "s".repeat(60))));
        assert!(touch.detail.contains("Last email on"));
    }

    #[test]
    fn truncate_keeps_short_values_verbatim() {
        assert_eq!(truncate_chars("short", 60), "short");
        assert_eq!(truncate_chars(&"x".repeat(60), 60), "x".repeat(60));
    }

    #[test]
    fn overdue_count_reflects_only_overdue_invoices() {
        let mut paid = overdue_invoice(2);
        paid.paid_date = Some(now() - Duration::days(10));
        let points = build_talking_points(
            &[],
            &[overdue_invoice(1), paid],
            &[],
            &[],
            &[],
            &PersonalityProfile::default(),
            now(),
        );
        assert_eq!(points[0].title, "Acknowledge payment friction");
        assert!(points[0].detail.starts_with("1 invoice(s) overdue"));
    }
}
