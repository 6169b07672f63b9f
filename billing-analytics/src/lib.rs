//! Revenue analytics for hospital billing records
//!
//! Provides the reporting core behind the admin revenue dashboards:
//! - Billing record data model shared with the HTTP layer
//! - Calendar date-range parsing with end-of-day normalization
//! - Weekly/monthly/yearly revenue breakdowns with period-over-period growth
//! - Billed-vs-collected totals

pub mod error;
pub mod models;
pub mod range;
pub mod revenue;

pub use error::*;
pub use models::*;
pub use range::*;
pub use revenue::*;
