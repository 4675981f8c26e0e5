//! End-to-end run over the seeded demo customer: migrate, seed, and
//! assemble a snapshot through the real SQLite repositories.

use std::sync::Arc;

use pulse_core::domain::customer::CustomerId;
use pulse_core::SnapshotService;
use pulse_db::migrations::run_pending;
use pulse_db::repositories::{
    SqlCustomerRepository, SqlInteractionRepository, SqlInvoiceRepository, SqlIssueRepository,
    SqlOrderRepository, SqlQuoteRepository,
};
use pulse_db::{connect_with_settings, seed_demo_customer, DEMO_CUSTOMER_ID};

fn snapshot_service(pool: pulse_db::DbPool) -> SnapshotService {
    SnapshotService::new(
        Arc::new(SqlCustomerRepository::new(pool.clone())),
        Arc::new(SqlOrderRepository::new(pool.clone())),
        Arc::new(SqlInvoiceRepository::new(pool.clone())),
        Arc::new(SqlQuoteRepository::new(pool.clone())),
        Arc::new(SqlIssueRepository::new(pool.clone())),
        Arc::new(SqlInteractionRepository::new(pool)),
    )
}

#[tokio::test]
async fn seeded_customer_yields_a_full_snapshot() {
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    run_pending(&pool).await.expect("migrate");

    let summary = seed_demo_customer(&pool).await.expect("seed");
    assert_eq!(summary.customer_id, DEMO_CUSTOMER_ID);
    assert!(summary.orders > 0);

    let service = snapshot_service(pool);
    let snapshot = service
        .get_snapshot(&CustomerId(DEMO_CUSTOMER_ID))
        .await
        .expect("assemble")
        .expect("demo customer exists");

    assert_eq!(snapshot.customer.name, "Northwind Metals");
    // Two open quotes and one closed in the seed.
    assert_eq!(snapshot.open_quotes.open_count, 2);
    assert!(snapshot.open_issues.has_high_severity);
    assert!(!snapshot.recent_interactions.is_empty());
    assert!(!snapshot.talking_points.is_empty());
    assert!(snapshot.talking_points.len() <= 5);
    // The seed leaves one invoice past due and unpaid.
    assert_eq!(snapshot.next_action.label, "Check in about overdue invoice");
    assert!(!snapshot.personality.communication_preference.is_empty());
}

#[tokio::test]
async fn seeding_twice_is_idempotent() {
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    run_pending(&pool).await.expect("migrate");

    let first = seed_demo_customer(&pool).await.expect("first seed");
    let second = seed_demo_customer(&pool).await.expect("second seed");
    assert_eq!(first.orders, second.orders);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_order")
        .fetch_one(&pool)
        .await
        .expect("count orders");
    assert_eq!(count as usize, first.orders);
}
