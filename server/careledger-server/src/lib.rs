//! CareLedger HTTP API server
//!
//! Serves the hospital billing endpoints the admin dashboards consume:
//! billing record CRUD, the weekly/monthly/yearly revenue summary, and the
//! paid-only collected totals. Aggregation itself lives in the
//! `billing-analytics` crate; this crate is the boundary layer (routing,
//! parameter validation, storage, error envelopes).

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod storage;

pub use routes::create_app;
pub use server::{CareledgerServer, ServerConfig};
