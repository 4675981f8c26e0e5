//! Snapshot orchestrator: fetches the customer, fans out to the derivation
//! services, and assembles one view model per request.
//!
//! A missing customer short-circuits to `Ok(None)` before any other fetch.
//! Independent branches run concurrently; the personality profile completes
//! before talking points inside its branch. Each service re-fetches the
//! collections it needs — there is no shared fetch cache.

use std::future::Future;
use std::sync::Arc;

use crate::domain::customer::CustomerId;
use crate::domain::issue::Issue;
use crate::domain::snapshot::{IssueSummary, QuoteSummary, SnapshotViewModel};
use crate::errors::SnapshotError;
use crate::kpi::KpiService;
use crate::next_action::NextBestActionService;
use crate::personality::PersonalityService;
use crate::repositories::{
    CustomerRepository, InteractionRepository, InvoiceRepository, IssueRepository,
    OrderRepository, QuoteRepository, RepositoryError,
};
use crate::talking_points::TalkingPointsService;

const TOP_QUOTES: u32 = 3;
const TOP_ISSUES: u32 = 3;
const RECENT_INTERACTIONS: u32 = 5;

pub struct SnapshotService {
    customers: Arc<dyn CustomerRepository>,
    quotes: Arc<dyn QuoteRepository>,
    issues: Arc<dyn IssueRepository>,
    interactions: Arc<dyn InteractionRepository>,
    kpis: KpiService,
    personality: PersonalityService,
    talking_points: TalkingPointsService,
    next_action: NextBestActionService,
}

impl SnapshotService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        orders: Arc<dyn OrderRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        quotes: Arc<dyn QuoteRepository>,
        issues: Arc<dyn IssueRepository>,
        interactions: Arc<dyn InteractionRepository>,
    ) -> Self {
        let kpis = KpiService::new(Arc::clone(&orders), Arc::clone(&invoices));
        let personality = PersonalityService::new(
            Arc::clone(&interactions),
            Arc::clone(&orders),
            Arc::clone(&quotes),
        );
        let talking_points = TalkingPointsService::new(
            Arc::clone(&orders),
            Arc::clone(&invoices),
            Arc::clone(&quotes),
            Arc::clone(&issues),
            Arc::clone(&interactions),
        );
        let next_action = NextBestActionService::new(
            Arc::clone(&invoices),
            Arc::clone(&quotes),
            Arc::clone(&issues),
            Arc::clone(&interactions),
            orders,
        );

        Self {
            customers,
            quotes,
            issues,
            interactions,
            kpis,
            personality,
            talking_points,
            next_action,
        }
    }

    /// `Ok(None)` for an unknown customer; any fetch failure aborts the
    /// whole assembly.
    pub async fn get_snapshot(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<SnapshotViewModel>, SnapshotError> {
        let Some(customer) = self.customers.get_customer(customer_id).await? else {
            tracing::debug!(customer_id = %customer_id, "customer not found, skipping assembly");
            return Ok(None);
        };

        let (kpis, (personality, talking_points), next_action, quotes, issues, interactions) =
            tokio::try_join!(
                self.kpis.customer_kpis(customer_id),
                async {
                    let profile = self.personality.build_profile(customer_id).await?;
                    let points = self.talking_points.build_for(customer_id, &profile).await?;
                    Ok::<_, RepositoryError>((profile, points))
                },
                self.next_action.determine(customer_id),
                self.quotes.get_open_quotes(customer_id, TOP_QUOTES),
                self.issues.get_open_issues(customer_id, TOP_ISSUES),
                self.interactions.get_recent_interactions(customer_id, RECENT_INTERACTIONS),
            )?;

        let open_quotes = QuoteSummary {
            open_count: quotes.len(),
            total_open_value: quotes.iter().map(|quote| quote.amount).sum(),
            top_quotes: quotes,
        };
        let open_issues = IssueSummary {
            open_count: issues.len(),
            has_high_severity: issues.iter().any(Issue::is_high_severity),
            top_issues: issues,
        };

        tracing::info!(
            customer_id = %customer_id,
            risk_rating = %kpis.risk_rating,
            next_action = %next_action.label,
            "assembled customer snapshot"
        );

        Ok(Some(SnapshotViewModel {
            customer,
            kpis,
            open_quotes,
            open_issues,
            recent_interactions: interactions,
            personality,
            talking_points,
            next_action,
        }))
    }

    /// Races assembly against `cancel`. When the cancel future completes
    /// first the in-flight fetches are dropped and the caller sees
    /// `SnapshotError::Canceled` — never a partially populated view model.
    pub async fn get_snapshot_with_cancel<F>(
        &self,
        customer_id: &CustomerId,
        cancel: F,
    ) -> Result<Option<SnapshotViewModel>, SnapshotError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::debug!(customer_id = %customer_id, "snapshot assembly canceled");
                Err(SnapshotError::Canceled)
            }
            result = self.get_snapshot(customer_id) => result,
        }
    }
}
