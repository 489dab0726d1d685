//! Data Transfer Objects
//!
//! Response types for the API endpoints that are not plain snapshot records.

use serde::Serialize;

use crate::history::{HistoricalData, TimeframeData};

// ============================================
// TIMEFRAME DTOs
// ============================================

/// Every timeframe window of a leveraged token
///
/// Same shape the dashboard charts consume. Non-finite `change` values
/// serialize as `null`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframesResponse {
    pub daily: Option<TimeframeData>,
    pub weekly: Option<TimeframeData>,
    pub two_weekly: Option<TimeframeData>,
    pub monthly: Option<TimeframeData>,
    pub three_monthly: Option<TimeframeData>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl From<HistoricalData> for TimeframesResponse {
    fn from(data: HistoricalData) -> Self {
        Self {
            daily: data.daily,
            weekly: data.weekly,
            two_weekly: data.two_weekly,
            monthly: data.monthly,
            three_monthly: data.three_monthly,
            is_loading: data.is_loading,
            error: data.error.map(|e| e.to_string()),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
    /// Chains with a snapshot endpoint
    pub chains: Vec<u64>,
}
