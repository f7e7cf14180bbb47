//! Clinic Client - HTTP client for the clinic backend
//!
//! Provides the REST calls behind the sale editors and list screens:
//! - [`SubmissionAdapter`]: validates an order and sends it to one of the
//!   three sale endpoints
//! - [`ResourceList`]: list / search / CRUD / export for entity screens
//! - [`CatalogApi`]: product and therapy package lookups for the pickers

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod resource;
pub mod sales;
pub mod submission;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, SaleError};
pub use http::{HttpClient, NetworkHttpClient};
pub use resource::{Resource, ResourceList, Route, Routes};
pub use sales::{CatalogApi, SalesApi};
pub use submission::{
    LineFailure, SaleEndpoint, SubmissionAdapter, SubmissionReport, SubmissionState,
};

// Re-export shared types for convenience
pub use shared::models::{
    InventoryItem, Member, Product, ProductSellRecord, SalesOrderRow, Staff, TherapyPackage,
    TherapySellRecord,
};
pub use shared::response::{Ack, Body, Envelope};
