//! Core data types for leveraged token NAV history
//!
//! - `LeveragedTokenHistoricalData`: one hourly snapshot sample
//! - `Timeframe`: the trailing windows charts are drawn over
//! - `TimeframeData`: a window annotated with its NAV change

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single hourly snapshot of a leveraged token
///
/// Field names match the snapshot indexer's JSON exactly so that a sample
/// serializes back to the same record it was decoded from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeveragedTokenHistoricalData {
    /// Observation time as delivered by the indexer (ISO 8601)
    pub timestamp: String,
    pub collateral_per_leveraged_token: f64,
    pub debt_per_leveraged_token: f64,
    pub leverage_ratio: f64,
    /// Net asset value per leveraged token
    pub nav: f64,
}

impl LeveragedTokenHistoricalData {
    /// Create a sample with the given timestamp and NAV, auxiliary fields zeroed
    pub fn new(timestamp: impl Into<String>, nav: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            collateral_per_leveraged_token: 0.0,
            debt_per_leveraged_token: 0.0,
            leverage_ratio: 0.0,
            nav,
        }
    }

    /// Builder method: set collateral and debt per token
    pub fn backing(mut self, collateral: f64, debt: f64) -> Self {
        self.collateral_per_leveraged_token = collateral;
        self.debt_per_leveraged_token = debt;
        self
    }

    /// Builder method: set leverage ratio
    pub fn leverage_ratio(mut self, ratio: f64) -> Self {
        self.leverage_ratio = ratio;
        self
    }

    /// Parse the timestamp, if it is valid RFC 3339
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Chart timeframes
///
/// Each timeframe is a trailing window measured in hourly samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Daily,
    Weekly,
    TwoWeekly,
    Monthly,
    ThreeMonthly,
}

impl Timeframe {
    /// Every timeframe, shortest first
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::TwoWeekly,
        Timeframe::Monthly,
        Timeframe::ThreeMonthly,
    ];

    /// Window size in samples (one sample per hour)
    pub fn samples(&self) -> usize {
        match self {
            Timeframe::Daily => 24,
            Timeframe::Weekly => 168,
            Timeframe::TwoWeekly => 336,
            Timeframe::Monthly => 672,
            Timeframe::ThreeMonthly => 2016,
        }
    }

    /// Wall-clock span covered by a full window
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.samples() as i64)
    }

    /// Short label for tables and chart tabs
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Daily => "1D",
            Timeframe::Weekly => "1W",
            Timeframe::TwoWeekly => "2W",
            Timeframe::Monthly => "1M",
            Timeframe::ThreeMonthly => "3M",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Daily => write!(f, "daily"),
            Timeframe::Weekly => write!(f, "weekly"),
            Timeframe::TwoWeekly => write!(f, "two-weekly"),
            Timeframe::Monthly => write!(f, "monthly"),
            Timeframe::ThreeMonthly => write!(f, "three-monthly"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1d" => Ok(Timeframe::Daily),
            "weekly" | "1w" => Ok(Timeframe::Weekly),
            "two-weekly" | "2w" => Ok(Timeframe::TwoWeekly),
            "monthly" | "1m" => Ok(Timeframe::Monthly),
            "three-monthly" | "3m" => Ok(Timeframe::ThreeMonthly),
            other => Err(format!("Unknown timeframe: {}", other)),
        }
    }
}

/// A trailing window of samples with its NAV change
///
/// Serialize-only: a non-finite `change` is written as `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeframeData {
    /// NAV of the newest sample in the window
    #[serde(rename = "latestNAV")]
    pub latest_nav: f64,
    /// NAV of the oldest sample in the window
    #[serde(rename = "oldestNAV")]
    pub oldest_nav: f64,
    /// Percent change from oldest to latest.
    /// Non-finite when `oldest_nav` is zero.
    pub change: f64,
    pub data: Vec<LeveragedTokenHistoricalData>,
}

impl TimeframeData {
    /// False when the change came out of a division by zero
    pub fn has_finite_change(&self) -> bool {
        self.change.is_finite()
    }

    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
