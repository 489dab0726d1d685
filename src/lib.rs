//! # Risedle
//!
//! Snapshot client for the Risedle leveraged token protocol, and the NAV
//! history aggregation behind its price charts.
//!
//! ## Features
//!
//! - **Timeframe windows**: Daily, weekly, two-weekly, monthly and three-monthly
//!   NAV change from hourly snapshots
//! - **Snapshot client**: Typed access to markets, token and vault history
//! - **REST API**: Axum server exposing aggregated windows as JSON
//!
//! ## Modules
//!
//! - [`history`]: NAV deduplication and timeframe windowing
//! - [`snapshot`]: Snapshot indexer client and records
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use risedle::history::{HistoricalData, LeveragedTokenHistoricalData};
//!
//! let series = vec![
//!     LeveragedTokenHistoricalData::new("2022-03-01T10:00:00Z", 100.0),
//!     LeveragedTokenHistoricalData::new("2022-03-01T11:00:00Z", 100.0),
//!     LeveragedTokenHistoricalData::new("2022-03-01T12:00:00Z", 110.0),
//! ];
//!
//! let data = HistoricalData::from_fetch(Some(series), None);
//! let daily = data.daily.unwrap();
//!
//! assert_eq!(daily.data.len(), 2);
//! assert_eq!(daily.oldest_nav, 100.0);
//! assert_eq!(daily.latest_nav, 110.0);
//! ```

pub mod api;
pub mod config;
pub mod history;
pub mod logging;
pub mod snapshot;

// Re-export top-level types for convenience
pub use history::{
    aggregate_timeframe, aggregate_timeframes, fetch_historical_data, filter_out_same_nav,
    HistoricalData, HistoricalTimeframes, HistoryError, HistoryResult,
    LeveragedTokenHistoricalData, Timeframe, TimeframeData,
};

pub use snapshot::{
    ChainEndpoint, ChainEndpoints, Market, MarketData, SnapshotClient, SnapshotClientConfig,
    SnapshotError, SnapshotResult, SnapshotSource, VaultHistoricalData,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SnapshotConfig};
