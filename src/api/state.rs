//! Application State
//!
//! Shared state accessible by all API handlers. The store session is the
//! only injected dependency; the executor, selector and catalog are thin
//! handles over it.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::fetch::FanOutExecutor;
use crate::resolution::ResolutionSelector;
use crate::store::StoreSession;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Injected store session
    pub session: Arc<dyn StoreSession>,
    /// Partition fan-out for fixed-resolution endpoints
    pub executor: FanOutExecutor,
    /// Adaptive resolution path for group endpoints
    pub selector: ResolutionSelector,
    /// Catalog lookups
    pub catalog: Catalog,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(session: Arc<dyn StoreSession>, config: ApiConfig) -> Self {
        Self {
            executor: FanOutExecutor::new(Arc::clone(&session)),
            selector: ResolutionSelector::new(Arc::clone(&session)),
            catalog: Catalog::new(Arc::clone(&session)),
            session,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8088,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
