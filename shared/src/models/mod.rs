//! Data models
//!
//! Entity rows as returned by the clinic backend. The backend mixes column
//! spellings between routes (`Staff_Name` vs `name`), so fields carry serde
//! aliases for every spelling seen on the wire. All IDs are `i64`.

pub mod catalog;
pub mod inventory;
pub mod member;
pub mod sale_record;
pub mod staff;

// Re-exports
pub use catalog::*;
pub use inventory::*;
pub use member::*;
pub use sale_record::*;
pub use staff::*;
