//! api handlers for marketModule
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use subswap_core::modules::market;

use crate::api::{run_query, submit_call};
use crate::model::{
    ApiResponse,
    AssetParams,
    BurnLiquidityRequest,
    MintLiquidityRequest,
    PairParams,
    QueryResponse,
    SubmissionResponse,
    SwapRequest,
};
use crate::state::GatewayState;
use crate::utils::ApiError;

/// Deposits both assets of a pair into its pool, creating the pair on first use.
///
/// # Example Usage
/// ```sh
/// curl -X POST "http://127.0.0.1:3000/api/market/mint_liquidity" \
///      -H "Content-Type: application/json" \
///      -d '{"token0": 1, "amount0": 100, "token1": 2, "amount1": 100}'
/// ```
#[utoipa::path(
    post,
    path = "/api/market/mint_liquidity",
    tag = "market",
    request_body = MintLiquidityRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn mint_liquidity(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<MintLiquidityRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = market::MintLiquidity {
        token0: payload.token0,
        amount0: payload.amount0,
        token1: payload.token1,
        amount1: payload.amount1,
    };
    submit_call(&state, call.into()).await
}

/// Returns liquidity tokens for the underlying assets.
#[utoipa::path(
    post,
    path = "/api/market/burn_liquidity",
    tag = "market",
    request_body = BurnLiquidityRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn burn_liquidity(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<BurnLiquidityRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = market::BurnLiquidity {
        lpt: payload.lpt,
        amount: payload.amount,
    };
    submit_call(&state, call.into()).await
}

/// Swaps an amount of one asset for another through their pool.
#[utoipa::path(
    post,
    path = "/api/market/swap",
    tag = "market",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn swap(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<SwapRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = market::Swap {
        from: payload.from,
        amount_in: payload.amount_in,
        to: payload.to,
    };
    submit_call(&state, call.into()).await
}

/// Liquidity token of an asset pair, `None` if the pair does not exist.
#[utoipa::path(
    get,
    path = "/api/market/pairs",
    tag = "market",
    params(PairParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn pairs(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<PairParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, market::pairs(params.token0, params.token1)).await
}

/// Pool reserves behind a liquidity token.
#[utoipa::path(
    get,
    path = "/api/market/reserves",
    tag = "market",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn reserves(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, market::reserves(params.id)).await
}

/// Underlying pair of a liquidity token.
#[utoipa::path(
    get,
    path = "/api/market/rewards",
    tag = "market",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn rewards(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, market::rewards(params.id)).await
}

/// Last accumulated prices of the pool behind a liquidity token.
#[utoipa::path(
    get,
    path = "/api/market/last_accumulative_price",
    tag = "market",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn last_accumulative_price(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, market::last_accumulative_price(params.id)).await
}
