//! Snapshot Indexer Access
//!
//! Typed access to the off-chain indexer that records hourly protocol
//! snapshots.
//!
//! ## Endpoints
//!
//! - `GET /v1/markets` - Protocol totals and every market
//! - `GET /v1/markets/:address` - One market
//! - `GET /v1/leveragedTokens/3months/:address` - Hourly NAV history
//! - `GET /v1/vaults/3months/:address` - Hourly vault history

mod chain;
mod client;
mod error;
mod types;

pub use chain::{
    default_chains, validate_address, ChainEndpoint, ChainEndpoints, ARBITRUM_ONE, KOVAN,
};
pub use client::{SnapshotClient, SnapshotClientConfig, SnapshotSource};
pub use error::{SnapshotError, SnapshotResult};
pub use types::{Market, MarketData, VaultHistoricalData};

#[cfg(test)]
pub(crate) use types::fixtures;
