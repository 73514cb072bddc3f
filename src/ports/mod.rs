//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentEventHandler` - Side effect run for one kind of verified payment event
//! - `PaymentProcessor` - Read access to the sBTC Pay merchant API

mod payment_event_handler;
mod payment_processor;

pub use payment_event_handler::PaymentEventHandler;
pub use payment_processor::{
    CustomerHistory, CustomerIdentity, CustomerSummary, CustomerTransaction, PaymentProcessor,
    ProcessorError, Product, PurchasedProduct, TransactionProduct,
};
