//! Snapshot Indexer Client
//!
//! HTTP client for the snapshot indexer's read-only REST API.
//! One request per call: no caching and no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::chain::{validate_address, ChainEndpoints};
use super::error::{SnapshotError, SnapshotResult};
use super::types::{Market, MarketData, VaultHistoricalData};
use crate::history::LeveragedTokenHistoricalData;

/// Anything that can serve snapshot data for a chain
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Chains this source can answer for
    fn chain_ids(&self) -> Vec<u64>;

    /// Protocol totals and every market
    async fn markets(&self, chain_id: u64) -> SnapshotResult<MarketData>;

    /// Latest snapshot of one market
    async fn market(&self, chain_id: u64, leveraged_token: &str) -> SnapshotResult<Market>;

    /// Three months of hourly leveraged token samples, oldest first
    async fn leveraged_token_history(
        &self,
        chain_id: u64,
        leveraged_token: &str,
    ) -> SnapshotResult<Vec<LeveragedTokenHistoricalData>>;

    /// Three months of hourly vault samples, oldest first
    async fn vault_history(
        &self,
        chain_id: u64,
        vault: &str,
    ) -> SnapshotResult<Vec<VaultHistoricalData>>;
}

/// Configuration for the snapshot client
#[derive(Debug, Clone)]
pub struct SnapshotClientConfig {
    /// Base URL per chain
    pub endpoints: ChainEndpoints,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SnapshotClientConfig {
    fn default() -> Self {
        Self {
            endpoints: ChainEndpoints::default(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed [`SnapshotSource`]
pub struct SnapshotClient {
    client: Client,
    config: SnapshotClientConfig,
}

impl SnapshotClient {
    /// Create a new client with the given configuration
    pub fn new(config: SnapshotClientConfig) -> SnapshotResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Full URL for `path` on a chain's indexer
    fn url(&self, chain_id: u64, path: &str) -> SnapshotResult<String> {
        let base = self.config.endpoints.get(chain_id)?;
        Ok(format!("{}/v1/{}", base, path))
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, chain_id: u64, url: &str) -> SnapshotResult<T> {
        tracing::debug!(chain_id, url = %url, "Fetching snapshot");

        let response = self.client.get(url).send().await.map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(chain_id, url = %url, status = status.as_u16(), "Snapshot request failed");
            return Err(SnapshotError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let bytes = response.bytes().await.map_err(map_request_error)?;
        let decoded = serde_json::from_slice(&bytes)?;
        Ok(decoded)
    }
}

#[async_trait]
impl SnapshotSource for SnapshotClient {
    fn chain_ids(&self) -> Vec<u64> {
        self.config.endpoints.chain_ids()
    }

    async fn markets(&self, chain_id: u64) -> SnapshotResult<MarketData> {
        let url = self.url(chain_id, "markets")?;
        self.get_json(chain_id, &url).await
    }

    async fn market(&self, chain_id: u64, leveraged_token: &str) -> SnapshotResult<Market> {
        validate_address(leveraged_token)?;
        let url = self.url(chain_id, &format!("markets/{}", leveraged_token))?;
        self.get_json(chain_id, &url).await
    }

    async fn leveraged_token_history(
        &self,
        chain_id: u64,
        leveraged_token: &str,
    ) -> SnapshotResult<Vec<LeveragedTokenHistoricalData>> {
        validate_address(leveraged_token)?;
        let url = self.url(chain_id, &format!("leveragedTokens/3months/{}", leveraged_token))?;
        let series: Vec<LeveragedTokenHistoricalData> = self.get_json(chain_id, &url).await?;

        tracing::debug!(chain_id, leveraged_token, samples = series.len(), "Fetched NAV history");
        Ok(series)
    }

    async fn vault_history(
        &self,
        chain_id: u64,
        vault: &str,
    ) -> SnapshotResult<Vec<VaultHistoricalData>> {
        validate_address(vault)?;
        let url = self.url(chain_id, &format!("vaults/3months/{}", vault))?;
        self.get_json(chain_id, &url).await
    }
}

fn map_request_error(e: reqwest::Error) -> SnapshotError {
    if e.is_timeout() {
        SnapshotError::Timeout
    } else if e.is_connect() {
        SnapshotError::Unavailable
    } else if e.is_decode() {
        SnapshotError::Decode(e.to_string())
    } else {
        SnapshotError::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::chain::{ChainEndpoint, KOVAN};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    const ETHRISE: &str = "0x46D06cf8052eA6FdbF71736AF33eD23686eA1452";
    const LOCAL: u64 = 1337;
    const CLOSED: u64 = 1338;

    fn client() -> SnapshotClient {
        SnapshotClient::new(SnapshotClientConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SnapshotClientConfig::default();
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.endpoints.chain_ids(), vec![KOVAN]);
    }

    #[test]
    fn test_history_url() {
        let url = client()
            .url(KOVAN, &format!("leveragedTokens/3months/{}", ETHRISE))
            .unwrap();
        assert_eq!(
            url,
            "https://snapshot-kovan.risedle.com/v1/leveragedTokens/3months/0x46D06cf8052eA6FdbF71736AF33eD23686eA1452"
        );
    }

    #[test]
    fn test_custom_endpoint_url() {
        let chains = [ChainEndpoint::new(7, "local", "http://127.0.0.1:9000/")];
        let client = SnapshotClient::new(SnapshotClientConfig {
            endpoints: ChainEndpoints::from_chains(&chains),
            request_timeout_ms: 1_000,
        })
        .unwrap();

        assert_eq!(client.url(7, "markets").unwrap(), "http://127.0.0.1:9000/v1/markets");
        assert!(client.url(KOVAN, "markets").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_chain_fails_before_request() {
        let result = client().leveraged_token_history(1, ETHRISE).await;
        assert!(matches!(result, Err(SnapshotError::UnsupportedChain(1))));
    }

    #[tokio::test]
    async fn test_invalid_address_fails_before_request() {
        let result = client().vault_history(KOVAN, "not-an-address").await;
        assert!(matches!(result, Err(SnapshotError::InvalidAddress(_))));
    }
    /// Serve a fake indexer on an ephemeral port and return a client for it.
    /// `CLOSED` points at a port nothing listens on.
    async fn local_client() -> SnapshotClient {
        let app = Router::new()
            .route(
                "/v1/markets",
                get(|| async { Json(json!({ "aum": 2.0, "tvl": 3.0, "markets": [] })) }),
            )
            .route(
                "/v1/leveragedTokens/3months/:address",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/v1/vaults/3months/:address", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let chains = [
            ChainEndpoint::new(LOCAL, "local", format!("http://{}", addr)),
            ChainEndpoint::new(CLOSED, "closed", "http://127.0.0.1:1"),
        ];
        SnapshotClient::new(SnapshotClientConfig {
            endpoints: ChainEndpoints::from_chains(&chains),
            request_timeout_ms: 5_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_markets_decode() {
        let data = local_client().await.markets(LOCAL).await.unwrap();
        assert_eq!(data.aum, 2.0);
        assert_eq!(data.tvl, 3.0);
        assert!(data.markets.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let result = local_client().await.leveraged_token_history(LOCAL, ETHRISE).await;
        match result {
            Err(SnapshotError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_body_maps_to_decode() {
        let result = local_client().await.vault_history(LOCAL, ETHRISE).await;
        assert!(matches!(result, Err(SnapshotError::Decode(_))));
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_unavailable() {
        let result = local_client().await.markets(CLOSED).await;
        assert!(matches!(result, Err(SnapshotError::Unavailable)));
    }
}
