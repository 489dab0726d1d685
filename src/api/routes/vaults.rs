//! Vault Routes
//!
//! - GET /api/v1/chains/:chain_id/vaults/:address/history - Hourly vault history

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::snapshot::VaultHistoricalData;

/// GET /api/v1/chains/:chain_id/vaults/:address/history
///
/// Three months of hourly borrow/supply APY and utilization, oldest first.
pub async fn get_vault_history(
    State(state): State<Arc<AppState>>,
    Path((chain_id, address)): Path<(u64, String)>,
) -> ApiResult<Json<Vec<VaultHistoricalData>>> {
    state.check_target(chain_id, &address)?;

    let history = state.source.vault_history(chain_id, &address).await?;

    tracing::debug!(chain_id, vault = %address, samples = history.len(), "Served vault history");

    Ok(Json(history))
}
