//! Shared types for the clinic sales stack
//!
//! Domain and wire types used by both the sales engine and the HTTP client:
//! line items and orders, display-label tables, request payloads, entity
//! models and the backend response envelope.

pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use order::{ItemKind, LineItem, Order, OrderDiscount, PaymentMethod, SaleCategory};
pub use response::Envelope;
