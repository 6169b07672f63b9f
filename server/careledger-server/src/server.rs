use std::sync::Arc;

use crate::storage::{BillingStore, InMemoryBillingStore};

/// Shared server state handed to every handler
#[derive(Clone)]
pub struct CareledgerServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Billing record store
    pub billing: Arc<dyn BillingStore>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "CareLedger Engine".to_string(),
            request_timeout: 30,
        }
    }
}

impl CareledgerServer {
    /// Create a server backed by a fresh in-memory billing store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryBillingStore::new()))
    }

    /// Create a server over an existing store. Useful for tests.
    pub fn with_store(billing: Arc<dyn BillingStore>) -> Self {
        Self {
            config: ServerConfig::default(),
            billing,
        }
    }
}

impl Default for CareledgerServer {
    fn default() -> Self {
        Self::new()
    }
}
