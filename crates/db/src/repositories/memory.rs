//! In-memory repositories backed by `tokio::sync::RwLock`, useful for
//! tests and demos that do not want a SQLite file.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use pulse_core::domain::customer::{Customer, CustomerId};
use pulse_core::domain::interaction::Interaction;
use pulse_core::domain::invoice::Invoice;
use pulse_core::domain::issue::Issue;
use pulse_core::domain::order::Order;
use pulse_core::domain::quote::Quote;
use pulse_core::repositories::{
    CustomerRepository, InteractionRepository, InvoiceRepository, IssueRepository,
    OrderRepository, QuoteRepository, RepositoryError,
};

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, customer: Customer) {
        self.customers.write().await.push(customer);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == *id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: Order) {
        self.orders.write().await.push(order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_orders(
        &self,
        customer_id: &CustomerId,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut matched: Vec<Order> = orders
            .iter()
            .filter(|o| o.customer_id == *customer_id)
            .filter(|o| from.map_or(true, |from| o.order_date >= from))
            .filter(|o| to.map_or(true, |to| o.order_date <= to))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, invoice: Invoice) {
        self.invoices.write().await.push(invoice);
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get_invoices(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let invoices = self.invoices.read().await;
        let mut matched: Vec<Invoice> = invoices
            .iter()
            .filter(|i| i.customer_id == *customer_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, quote: Quote) {
        self.quotes.write().await.push(quote);
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn get_open_quotes(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Quote>, RepositoryError> {
        let quotes = self.quotes.read().await;
        let mut matched: Vec<Quote> = quotes
            .iter()
            .filter(|q| q.customer_id == *customer_id && q.is_open)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.quote_date.cmp(&a.quote_date));
        matched.truncate(top as usize);
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryIssueRepository {
    issues: RwLock<Vec<Issue>>,
}

impl InMemoryIssueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, issue: Issue) {
        self.issues.write().await.push(issue);
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn get_open_issues(
        &self,
        customer_id: &CustomerId,
        top: u32,
    ) -> Result<Vec<Issue>, RepositoryError> {
        let issues = self.issues.read().await;
        let mut matched: Vec<Issue> = issues
            .iter()
            .filter(|i| i.customer_id == *customer_id && i.status != "Closed")
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        matched.truncate(top as usize);
        Ok(matched)
    }
}

#[derive(Default)]
pub struct InMemoryInteractionRepository {
    interactions: RwLock<Vec<Interaction>>,
}

impl InMemoryInteractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, interaction: Interaction) {
        self.interactions.write().await.push(interaction);
    }
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn get_recent_interactions(
        &self,
        customer_id: &CustomerId,
        take: u32,
    ) -> Result<Vec<Interaction>, RepositoryError> {
        let interactions = self.interactions.read().await;
        let mut matched: Vec<Interaction> = interactions
            .iter()
            .filter(|i| i.customer_id == *customer_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.interaction_date.cmp(&a.interaction_date));
        matched.truncate(take as usize);
        Ok(matched)
    }
}
