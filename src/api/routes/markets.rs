//! Market Routes
//!
//! - GET /api/v1/chains/:chain_id/markets - Protocol totals and every market
//! - GET /api/v1/chains/:chain_id/markets/:address - One market

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::snapshot::{Market, MarketData, SnapshotError};

/// GET /api/v1/chains/:chain_id/markets
pub async fn list_markets(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> ApiResult<Json<MarketData>> {
    if !state.source.chain_ids().contains(&chain_id) {
        return Err(ApiError::Snapshot(SnapshotError::UnsupportedChain(chain_id)));
    }

    let markets = state.source.markets(chain_id).await?;
    Ok(Json(markets))
}

/// GET /api/v1/chains/:chain_id/markets/:address
pub async fn get_market(
    State(state): State<Arc<AppState>>,
    Path((chain_id, address)): Path<(u64, String)>,
) -> ApiResult<Json<Market>> {
    state.check_target(chain_id, &address)?;

    let market = state.source.market(chain_id, &address).await?;
    Ok(Json(market))
}
