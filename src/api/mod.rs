//! Risedle REST API
//!
//! HTTP API layer in front of the snapshot indexer, built with Axum.
//!
//! # Endpoints
//!
//! ## Markets
//! - `GET /api/v1/chains/:chain_id/markets` - Protocol totals and every market
//! - `GET /api/v1/chains/:chain_id/markets/:address` - One market
//!
//! ## Leveraged Tokens
//! - `GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes` - All NAV windows
//! - `GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes/:timeframe` - One NAV window
//!
//! ## Vaults
//! - `GET /api/v1/chains/:chain_id/vaults/:address/history` - Hourly vault history
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use risedle::api::{serve, AppState};
//! use risedle::config::ApiConfig;
//! use risedle::snapshot::{SnapshotClient, SnapshotClientConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(SnapshotClient::new(SnapshotClientConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(client, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Market routes
        .route("/chains/:chain_id/markets", get(routes::markets::list_markets))
        .route(
            "/chains/:chain_id/markets/:address",
            get(routes::markets::get_market),
        )
        // Leveraged token routes
        .route(
            "/chains/:chain_id/leveraged-tokens/:address/timeframes",
            get(routes::leveraged_tokens::get_timeframes),
        )
        .route(
            "/chains/:chain_id/leveraged-tokens/:address/timeframes/:timeframe",
            get(routes::leveraged_tokens::get_timeframe),
        )
        // Vault routes
        .route(
            "/chains/:chain_id/vaults/:address/history",
            get(routes::vaults::get_vault_history),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins, or any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Risedle API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Risedle API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::StubSource;
    use crate::history::LeveragedTokenHistoricalData;
    use crate::snapshot::fixtures::{ETHRISE, RV_ETH_USDC};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app(source: StubSource) -> Router {
        let state = AppState::new(Arc::new(source), ApiConfig::default());
        build_router(state)
    }

    fn ethrise_series() -> Vec<LeveragedTokenHistoricalData> {
        vec![
            LeveragedTokenHistoricalData::new("2022-03-01T10:00:00Z", 100.0),
            LeveragedTokenHistoricalData::new("2022-03-01T11:00:00Z", 100.0),
            LeveragedTokenHistoricalData::new("2022-03-01T12:00:00Z", 110.0),
        ]
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(StubSource::default()), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(StubSource::default()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["chains"], serde_json::json!([42]));
    }

    #[tokio::test]
    async fn test_timeframes() {
        let app = create_test_app(StubSource::with_series(ETHRISE, ethrise_series()));
        let uri = format!("/api/v1/chains/42/leveraged-tokens/{}/timeframes", ETHRISE);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["isLoading"], false);
        assert!(body["error"].is_null());
        assert_eq!(body["daily"]["oldestNAV"], 100.0);
        assert_eq!(body["daily"]["latestNAV"], 110.0);
        assert_eq!(body["daily"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["daily"]["data"][0]["timestamp"], "2022-03-01T11:00:00Z");
        assert_eq!(body["threeMonthly"]["latestNAV"], 110.0);
    }

    #[tokio::test]
    async fn test_timeframes_upstream_error_in_body() {
        let app = create_test_app(StubSource::failing(500));
        let uri = format!("/api/v1/chains/42/leveraged-tokens/{}/timeframes", ETHRISE);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["isLoading"], false);
        assert_eq!(body["error"], "API error 500: stub failure");
        assert!(body["daily"].is_null());
        assert!(body["threeMonthly"].is_null());
    }

    #[tokio::test]
    async fn test_single_timeframe() {
        let app = create_test_app(StubSource::with_series(ETHRISE, ethrise_series()));
        let uri = format!(
            "/api/v1/chains/42/leveraged-tokens/{}/timeframes/two-weekly",
            ETHRISE
        );

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["oldestNAV"], 100.0);
        assert_eq!(body["latestNAV"], 110.0);
    }

    #[tokio::test]
    async fn test_single_timeframe_empty_series() {
        let app = create_test_app(StubSource::with_series(ETHRISE, vec![]));
        let uri = format!("/api/v1/chains/42/leveraged-tokens/{}/timeframes/daily", ETHRISE);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INSUFFICIENT_DATA");
    }

    #[tokio::test]
    async fn test_unknown_timeframe() {
        let app = create_test_app(StubSource::with_series(ETHRISE, ethrise_series()));
        let uri = format!("/api/v1/chains/42/leveraged-tokens/{}/timeframes/yearly", ETHRISE);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsupported_chain() {
        let app = create_test_app(StubSource::default());
        let uri = format!("/api/v1/chains/1/leveraged-tokens/{}/timeframes", ETHRISE);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_CHAIN");
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let app = create_test_app(StubSource::default());

        let response = get(app, "/api/v1/chains/42/markets/0x1234").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_ADDRESS");
    }

    #[tokio::test]
    async fn test_list_markets() {
        let response = get(create_test_app(StubSource::default()), "/api/v1/chains/42/markets").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["tvl"], 650_000.0);
        assert_eq!(body["markets"][0]["leveraged_token_address"], ETHRISE);
    }

    #[tokio::test]
    async fn test_get_market_not_found() {
        let app = create_test_app(StubSource::default());
        let uri = format!("/api/v1/chains/42/markets/{}", RV_ETH_USDC);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_vault_history() {
        let app = create_test_app(StubSource::default());
        let uri = format!("/api/v1/chains/42/vaults/{}/history", RV_ETH_USDC);

        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body[0]["utilization_rate"], 62.5);
    }
}
