pub mod customer;
pub mod interaction;
pub mod invoice;
pub mod issue;
pub mod order;
pub mod quote;
pub mod snapshot;
