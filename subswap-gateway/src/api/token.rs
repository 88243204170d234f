//! api handlers for tokenModule
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use subswap_core::modules::token;

use crate::api::{run_query, submit_call};
use crate::model::{
    ApiResponse,
    AssetParams,
    BalanceParams,
    DestroyRequest,
    IssueRequest,
    QueryResponse,
    SubmissionResponse,
    TargetedAmountRequest,
};
use crate::state::GatewayState;
use crate::utils::{account_param, ApiError};

/// Issues a new asset with the given total supply, owned by the selected account.
///
/// # Example Usage
/// ```sh
/// curl -X POST "http://127.0.0.1:3000/api/token/issue" \
///      -H "Content-Type: application/json" \
///      -d '{"total": 1000}'
/// ```
#[utoipa::path(
    post,
    path = "/api/token/issue",
    tag = "token",
    request_body = IssueRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn issue(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<IssueRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    submit_call(&state, token::Issue { total: payload.total }.into()).await
}

/// Mints an amount of an asset to the target account. Only the asset creator may mint.
#[utoipa::path(
    post,
    path = "/api/token/mint",
    tag = "token",
    request_body = TargetedAmountRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 400, description = "Invalid target address", body = ApiResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn mint(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<TargetedAmountRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = token::Mint {
        asset_id: payload.asset_id,
        target: account_param(&payload.target)?,
        amount: payload.amount,
    };
    submit_call(&state, call.into()).await
}

/// Burns an amount of an asset held by the target account. Only the asset creator may burn.
#[utoipa::path(
    post,
    path = "/api/token/burn",
    tag = "token",
    request_body = TargetedAmountRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 400, description = "Invalid target address", body = ApiResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn burn(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<TargetedAmountRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = token::Burn {
        asset_id: payload.asset_id,
        target: account_param(&payload.target)?,
        amount: payload.amount,
    };
    submit_call(&state, call.into()).await
}

/// Transfers an amount of an asset from the selected account to the target.
///
/// # Example Usage
/// ```sh
/// curl -X POST "http://127.0.0.1:3000/api/token/transfer" \
///      -H "Content-Type: application/json" \
///      -d '{"assetId": 1, "target": "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty", "amount": 25}'
/// ```
#[utoipa::path(
    post,
    path = "/api/token/transfer",
    tag = "token",
    request_body = TargetedAmountRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 400, description = "Invalid target address", body = ApiResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn transfer(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<TargetedAmountRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = token::Transfer {
        asset_id: payload.asset_id,
        target: account_param(&payload.target)?,
        amount: payload.amount,
    };
    submit_call(&state, call.into()).await
}

/// Destroys the selected account's whole balance of an asset.
#[utoipa::path(
    post,
    path = "/api/token/destroy",
    tag = "token",
    request_body = DestroyRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn destroy(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<DestroyRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = token::Destroy {
        asset_id: payload.asset_id,
    };
    submit_call(&state, call.into()).await
}

/// Total supply of an asset.
#[utoipa::path(
    get,
    path = "/api/token/total_supply",
    tag = "token",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn total_supply(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, token::total_supply(params.id)).await
}

/// Identifier the next issued asset will get.
#[utoipa::path(
    get,
    path = "/api/token/next_asset_id",
    tag = "token",
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn next_asset_id(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, token::next_asset_id()).await
}

/// Balance of an account in an asset.
#[utoipa::path(
    get,
    path = "/api/token/balances",
    tag = "token",
    params(BalanceParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 400, description = "Invalid account address", body = ApiResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn balances(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<BalanceParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    let account = account_param(&params.account)?;
    run_query(&state, token::balances(params.id, account)).await
}

/// Creator of an asset, `None` for assets issued by the system.
#[utoipa::path(
    get,
    path = "/api/token/creator",
    tag = "token",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn creator(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, token::creator(params.id)).await
}
