//! Snapshot indexer records
//!
//! Mirrors the JSON served under `/v1/markets` and `/v1/vaults`.
//! Leveraged token history lives in [`crate::history`].

use serde::{Deserialize, Serialize};

/// Latest snapshot of one leveraged token market and its vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Market {
    pub leveraged_token_address: String,
    pub leveraged_token_collateral_price: f64,
    pub leveraged_token_market_cap: f64,
    pub leveraged_token_total_supply: f64,
    pub leveraged_token_max_total_collateral: f64,
    pub leveraged_token_price_change: f64,
    pub leveraged_token_price_change_percent: f64,
    pub leveraged_token_total_collateral: f64,
    pub nav_last: f64,
    pub nav_past: f64,
    pub timestamp_last: String,
    pub timestamp_past: String,
    pub vault_address: String,
    pub vault_borrow_apy: f64,
    pub vault_max_total_deposit: f64,
    pub vault_supply_apy: f64,
    pub vault_timestamp: String,
    pub vault_total_available_cash: f64,
    pub vault_total_outstanding_debt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_utilization_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral_per_token: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_per_token: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage_ratio: Option<f64>,
}

/// Protocol-wide totals plus every market
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketData {
    /// Assets under management
    pub aum: f64,
    /// Total value locked
    pub tvl: f64,
    pub markets: Vec<Market>,
}

impl MarketData {
    /// Find a market by leveraged token address (case-insensitive)
    pub fn find(&self, leveraged_token: &str) -> Option<&Market> {
        self.markets
            .iter()
            .find(|m| m.leveraged_token_address.eq_ignore_ascii_case(leveraged_token))
    }
}

/// Hourly snapshot of a lending vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultHistoricalData {
    pub timestamp: String,
    pub borrow_apy: f64,
    pub supply_apy: f64,
    pub utilization_rate: f64,
    pub total_available_cash: f64,
    pub total_outstanding_debt: f64,
}
