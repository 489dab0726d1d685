//! Leveraged Token Routes
//!
//! - GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes
//! - GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes/:timeframe

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::TimeframesResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::history::{
    aggregate_timeframe, fetch_historical_data, filter_out_same_nav, Timeframe, TimeframeData,
};

/// GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes
///
/// All five windows. Transport failures are reported in the `error` field
/// with a 200, matching the record the dashboard renders from.
pub async fn get_timeframes(
    State(state): State<Arc<AppState>>,
    Path((chain_id, address)): Path<(u64, String)>,
) -> ApiResult<Json<TimeframesResponse>> {
    state.check_target(chain_id, &address)?;

    let data = fetch_historical_data(state.source.as_ref(), chain_id, &address).await;

    Ok(Json(TimeframesResponse::from(data)))
}

/// GET /api/v1/chains/:chain_id/leveraged-tokens/:address/timeframes/:timeframe
///
/// A single window; transport failures and empty series are HTTP errors.
pub async fn get_timeframe(
    State(state): State<Arc<AppState>>,
    Path((chain_id, address, timeframe)): Path<(u64, String, String)>,
) -> ApiResult<Json<TimeframeData>> {
    let timeframe: Timeframe = timeframe.parse().map_err(ApiError::Validation)?;
    state.check_target(chain_id, &address)?;

    let series = state
        .source
        .leveraged_token_history(chain_id, &address)
        .await?;
    let cleaned = filter_out_same_nav(Some(&series)).unwrap_or_default();
    let window = aggregate_timeframe(&cleaned, timeframe)?;

    tracing::debug!(
        chain_id,
        leveraged_token = %address,
        timeframe = %timeframe,
        samples = window.len(),
        "Served timeframe window"
    );

    Ok(Json(window))
}
