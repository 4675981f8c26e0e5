pub mod config;
pub mod domain;
pub mod errors;
pub mod kpi;
pub mod next_action;
pub mod personality;
mod render;
pub mod repositories;
pub mod snapshot;
pub mod talking_points;

pub use chrono;
pub use rust_decimal;

pub use domain::customer::{Customer, CustomerId};
pub use domain::interaction::Interaction;
pub use domain::invoice::Invoice;
pub use domain::issue::Issue;
pub use domain::order::Order;
pub use domain::quote::Quote;
pub use domain::snapshot::{
    CustomerKpis, IssueSummary, MarginTrend, NextBestAction, PaymentBehavior, PersonalityProfile,
    QuoteSummary, RiskRating, SnapshotViewModel, TalkingPoint,
};
pub use errors::SnapshotError;
pub use repositories::{
    CustomerRepository, InteractionRepository, InvoiceRepository, IssueRepository,
    OrderRepository, QuoteRepository, RepositoryError,
};
pub use snapshot::SnapshotService;
