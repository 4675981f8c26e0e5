//! Demo dataset for local runs. Rows use fixed ids and `INSERT OR
//! REPLACE`, so seeding is idempotent. Dates are generated relative to
//! the current time so the derived snapshot stays interesting.

use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::DbPool;

pub const DEMO_CUSTOMER_ID: i64 = 1;

#[derive(Debug, Serialize)]
pub struct SeedSummary {
    pub customer_id: i64,
    pub orders: usize,
    pub invoices: usize,
    pub quotes: usize,
    pub issues: usize,
    pub interactions: usize,
}

struct SeedOrder {
    id: i64,
    months_ago: u32,
    total: Decimal,
    margin: Decimal,
}

struct SeedInvoice {
    id: i64,
    number: &'static str,
    issued_days_ago: i64,
    due_days_after: i64,
    amount: Decimal,
    paid_days_after: Option<i64>,
}

pub async fn seed_demo_customer(pool: &DbPool) -> Result<SeedSummary, sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        "INSERT OR REPLACE INTO customer (id, code, name, segment, industry, last_refreshed_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(DEMO_CUSTOMER_ID)
    .bind("CUST-0001")
    .bind("Northwind Metals")
    .bind("Mid-market")
    .bind("Manufacturing")
    .bind(now)
    .execute(pool)
    .await?;

    let orders = seed_orders(pool, now).await?;
    let invoices = seed_invoices(pool, now).await?;
    let quotes = seed_quotes(pool, now).await?;
    let issues = seed_issues(pool, now).await?;
    let interactions = seed_interactions(pool, now).await?;

    info!(
        customer_id = DEMO_CUSTOMER_ID,
        orders, invoices, quotes, issues, interactions, "seeded demo customer"
    );

    Ok(SeedSummary {
        customer_id: DEMO_CUSTOMER_ID,
        orders,
        invoices,
        quotes,
        issues,
        interactions,
    })
}

async fn seed_orders(pool: &DbPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    // Margins slip over the recent months so the trend reads as declining.
    let orders = [
        SeedOrder { id: 1, months_ago: 16, total: Decimal::new(8_400, 0), margin: Decimal::new(2_100, 0) },
        SeedOrder { id: 2, months_ago: 13, total: Decimal::new(6_900, 0), margin: Decimal::new(1_800, 0) },
        SeedOrder { id: 3, months_ago: 10, total: Decimal::new(7_200, 0), margin: Decimal::new(1_900, 0) },
        SeedOrder { id: 4, months_ago: 7, total: Decimal::new(5_600, 0), margin: Decimal::new(1_350, 0) },
        SeedOrder { id: 5, months_ago: 4, total: Decimal::new(4_800, 0), margin: Decimal::new(1_050, 0) },
        SeedOrder { id: 6, months_ago: 2, total: Decimal::new(4_100, 0), margin: Decimal::new(820, 0) },
        SeedOrder { id: 7, months_ago: 1, total: Decimal::new(3_900, 0), margin: Decimal::new(700, 0) },
    ];

    for order in &orders {
        let order_date = now - Months::new(order.months_ago);
        sqlx::query(
            "INSERT OR REPLACE INTO sales_order (id, customer_id, order_date, total_amount, margin_amount)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order.id)
        .bind(DEMO_CUSTOMER_ID)
        .bind(order_date)
        .bind(order.total.to_string())
        .bind(order.margin.to_string())
        .execute(pool)
        .await?;
    }

    Ok(orders.len())
}

async fn seed_invoices(pool: &DbPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let invoices = [
        SeedInvoice { id: 1, number: "INV-1001", issued_days_ago: 400, due_days_after: 30, amount: Decimal::new(8_400, 0), paid_days_after: Some(28) },
        SeedInvoice { id: 2, number: "INV-1002", issued_days_ago: 310, due_days_after: 30, amount: Decimal::new(6_900, 0), paid_days_after: Some(41) },
        SeedInvoice { id: 3, number: "INV-1003", issued_days_ago: 220, due_days_after: 30, amount: Decimal::new(7_200, 0), paid_days_after: Some(33) },
        SeedInvoice { id: 4, number: "INV-1004", issued_days_ago: 130, due_days_after: 30, amount: Decimal::new(5_600, 0), paid_days_after: Some(29) },
        // Past due and still unpaid, which drives the overdue talking point.
        SeedInvoice { id: 5, number: "INV-1005", issued_days_ago: 55, due_days_after: 30, amount: Decimal::new(4_800, 0), paid_days_after: None },
    ];

    for invoice in &invoices {
        let invoice_date = now - Duration::days(invoice.issued_days_ago);
        let due_date = invoice_date + Duration::days(invoice.due_days_after);
        let paid_date = invoice
            .paid_days_after
            .map(|days| invoice_date + Duration::days(days));
        sqlx::query(
            "INSERT OR REPLACE INTO invoice (id, customer_id, invoice_number, invoice_date, due_date, amount, paid_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(invoice.id)
        .bind(DEMO_CUSTOMER_ID)
        .bind(invoice.number)
        .bind(invoice_date)
        .bind(due_date)
        .bind(invoice.amount.to_string())
        .bind(paid_date)
        .execute(pool)
        .await?;
    }

    Ok(invoices.len())
}

async fn seed_quotes(pool: &DbPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let quotes = [
        (1_i64, "QT-2001", 9_i64, Decimal::new(5_200, 0), "Replacement rollers, line 2", true),
        (2_i64, "QT-2002", 24, Decimal::new(3_450, 0), "Annual maintenance contract", true),
        (3_i64, "QT-2003", 60, Decimal::new(1_900, 0), "Spare belt inventory", false),
    ];

    for (id, number, days_ago, amount, description, is_open) in &quotes {
        sqlx::query(
            "INSERT OR REPLACE INTO quote (id, customer_id, quote_number, quote_date, amount, description, is_open)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(DEMO_CUSTOMER_ID)
        .bind(number)
        .bind(now - Duration::days(*days_ago))
        .bind(amount.to_string())
        .bind(description)
        .bind(is_open)
        .execute(pool)
        .await?;
    }

    Ok(quotes.len())
}

async fn seed_issues(pool: &DbPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let issues = [
        (1_i64, "High", "Open", "Line 2 conveyor jams intermittently", 6_i64),
        (2_i64, "Low", "Open", "Portal login occasionally times out", 18),
        (3_i64, "Medium", "Closed", "Invoice PDF missing PO number", 70),
    ];

    for (id, severity, status, summary, days_ago) in &issues {
        sqlx::query(
            "INSERT OR REPLACE INTO issue (id, customer_id, severity, status, summary, created_on)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(DEMO_CUSTOMER_ID)
        .bind(severity)
        .bind(status)
        .bind(summary)
        .bind(now - Duration::days(*days_ago))
        .execute(pool)
        .await?;
    }

    Ok(issues.len())
}

async fn seed_interactions(pool: &DbPool, now: DateTime<Utc>) -> Result<usize, sqlx::Error> {
    let interactions = [
        (1_i64, 3_i64, "Call", "Checked in on conveyor fix and open renewal quote", "dana"),
        (2_i64, 10, "Email", "Sent revised pricing for the annual maintenance contract", "dana"),
        (3_i64, 17, "Email", "Shared delivery schedule for March order", "sam"),
        (4_i64, 25, "Meeting", "Quarterly review: volumes down, asked about bundled pricing", "dana"),
        (5_i64, 33, "Call", "Intro call with new plant manager", "sam"),
        (6_i64, 48, "Email", "Confirmed receipt of signed order", "dana"),
    ];

    for (id, days_ago, interaction_type, subject, owner) in &interactions {
        sqlx::query(
            "INSERT OR REPLACE INTO interaction (id, customer_id, interaction_date, interaction_type, subject, owner)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(DEMO_CUSTOMER_ID)
        .bind(now - Duration::days(*days_ago))
        .bind(interaction_type)
        .bind(subject)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    Ok(interactions.len())
}
