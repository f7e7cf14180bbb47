//! Sales order composition engine
//!
//! Everything the order editor computes between "items picked" and
//! "order submitted":
//! - [`allocator`]: spreads an order-level discount across line items
//! - [`aggregator`]: recomputes subtotal / discount / grand total
//! - [`validation`]: submit-time checks that block the network call
//! - [`staging`]: the store that carries a half-built order across screens
//! - [`form`]: the editor's header fields as a stageable snapshot

pub mod aggregator;
pub mod allocator;
pub mod form;
pub mod money;
pub mod staging;
pub mod validation;

pub use aggregator::{OrderEditor, recompute};
pub use allocator::{ZeroSubtotalPolicy, allocate};
pub use form::SaleForm;
pub use staging::{SelectionBridge, StageKey, StagedSale, StagingError, StagingResult, StagingStore};
pub use validation::{IssueCode, ValidationIssue, validate_sale};
