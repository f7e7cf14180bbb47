//! Sales order module
//!
//! Types for composing a sales order on the client:
//! - Line items and the order header with its totals
//! - Display-label ↔ wire-enum tables for payment method and sale category
//! - Request payloads for the three sale endpoints

pub mod labels;
pub mod payload;
pub mod types;

// Re-exports
pub use labels::{PaymentMethod, SaleCategory};
pub use payload::*;
pub use types::*;
