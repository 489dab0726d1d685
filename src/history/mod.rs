//! Leveraged Token NAV History
//!
//! Turns the indexer's three months of hourly samples into the chart
//! timeframes shown next to a leveraged token:
//!
//! - **types**: Samples, timeframes and windows
//! - **dedup**: Collapse repeated NAV values
//! - **aggregate**: Trailing windows and percent change
//! - **error**: Error types
//!
//! # Pipeline
//!
//! ```text
//!   fetch → filter_out_same_nav → aggregate_timeframes → HistoricalData
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use risedle::history::{fetch_historical_data, Timeframe};
//! use risedle::snapshot::{SnapshotClient, SnapshotClientConfig, KOVAN};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SnapshotClient::new(SnapshotClientConfig::default())?;
//!     let history = fetch_historical_data(
//!         &client,
//!         KOVAN,
//!         "0x46D06cf8052eA6FdbF71736AF33eD23686eA1452",
//!     )
//!     .await;
//!
//!     if let Some(weekly) = history.window(Timeframe::Weekly) {
//!         println!("1W change: {:.2}%", weekly.change);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod dedup;
pub mod error;
pub mod types;

pub use aggregate::{
    aggregate_timeframe, aggregate_timeframes, percent_change, HistoricalTimeframes,
};
pub use dedup::filter_out_same_nav;
pub use error::{HistoryError, HistoryResult};
pub use types::{LeveragedTokenHistoricalData, Timeframe, TimeframeData};

use std::sync::Arc;

use crate::snapshot::{SnapshotError, SnapshotSource};

/// Timeframe windows of a token plus the state of the fetch behind them
///
/// Windows are all `None` while loading, after a transport error, and when
/// the fetched series is empty.
#[derive(Debug, Clone, Default)]
pub struct HistoricalData {
    pub daily: Option<TimeframeData>,
    pub weekly: Option<TimeframeData>,
    pub two_weekly: Option<TimeframeData>,
    pub monthly: Option<TimeframeData>,
    pub three_monthly: Option<TimeframeData>,
    /// No data and no error yet
    pub is_loading: bool,
    /// Transport error, forwarded unchanged
    pub error: Option<Arc<SnapshotError>>,
}

impl HistoricalData {
    /// Derive windows from the outcome of a fetch
    pub fn from_fetch(
        data: Option<Vec<LeveragedTokenHistoricalData>>,
        error: Option<Arc<SnapshotError>>,
    ) -> Self {
        let is_loading = error.is_none() && data.is_none();
        let mut result = Self {
            is_loading,
            error,
            ..Default::default()
        };

        let Some(cleaned) = filter_out_same_nav(data.as_deref()) else {
            return result;
        };

        match aggregate_timeframes(&cleaned) {
            Ok(timeframes) => {
                result.daily = Some(timeframes.daily);
                result.weekly = Some(timeframes.weekly);
                result.two_weekly = Some(timeframes.two_weekly);
                result.monthly = Some(timeframes.monthly);
                result.three_monthly = Some(timeframes.three_monthly);
            }
            Err(e) => {
                tracing::debug!(error = %e, "No timeframe windows for empty series");
            }
        }

        result
    }

    /// Get the window for a timeframe
    pub fn window(&self, timeframe: Timeframe) -> Option<&TimeframeData> {
        match timeframe {
            Timeframe::Daily => self.daily.as_ref(),
            Timeframe::Weekly => self.weekly.as_ref(),
            Timeframe::TwoWeekly => self.two_weekly.as_ref(),
            Timeframe::Monthly => self.monthly.as_ref(),
            Timeframe::ThreeMonthly => self.three_monthly.as_ref(),
        }
    }

    /// True when every window is present
    pub fn is_ready(&self) -> bool {
        Timeframe::ALL.iter().all(|t| self.window(*t).is_some())
    }
}

/// Fetch a token's history once and derive its windows
pub async fn fetch_historical_data(
    source: &dyn SnapshotSource,
    chain_id: u64,
    leveraged_token: &str,
) -> HistoricalData {
    match source.leveraged_token_history(chain_id, leveraged_token).await {
        Ok(series) => HistoricalData::from_fetch(Some(series), None),
        Err(e) => {
            tracing::warn!(chain_id, leveraged_token, error = %e, "Failed to fetch NAV history");
            HistoricalData::from_fetch(None, Some(Arc::new(e)))
        }
    }
}
