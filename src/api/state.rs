//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::snapshot::{validate_address, SnapshotError, SnapshotSource};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where snapshot data comes from
    pub source: Arc<dyn SnapshotSource>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn SnapshotSource>, config: ApiConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Reject requests that could never be served before touching the network
    pub fn check_target(&self, chain_id: u64, address: &str) -> ApiResult<()> {
        if !self.source.chain_ids().contains(&chain_id) {
            return Err(ApiError::Snapshot(SnapshotError::UnsupportedChain(chain_id)));
        }
        validate_address(address)?;
        Ok(())
    }
}
