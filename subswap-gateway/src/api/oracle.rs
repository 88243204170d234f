//! api handlers for oracleModule
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use subswap_core::modules::oracle;

use crate::api::{run_query, submit_call};
use crate::model::{
    AccountParams,
    ApiResponse,
    AssetParams,
    QueryResponse,
    ReportRequest,
    SubmissionResponse,
};
use crate::state::GatewayState;
use crate::utils::{account_param, ApiError};

/// Registers the selected account as a price operator.
#[utoipa::path(
    post,
    path = "/api/oracle/register_operator",
    tag = "oracle",
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn register_operator(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    submit_call(&state, oracle::RegisterOperator.into()).await
}

/// Removes the selected account from the price operators.
#[utoipa::path(
    post,
    path = "/api/oracle/unregister_operator",
    tag = "oracle",
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn unregister_operator(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    submit_call(&state, oracle::UnregisterOperator.into()).await
}

/// Reports a price for an asset. The selected account must be an operator.
///
/// # Example Usage
/// ```sh
/// curl -X POST "http://127.0.0.1:3000/api/oracle/report" \
///      -H "Content-Type: application/json" \
///      -d '{"assetId": 1, "price": 1200}'
/// ```
#[utoipa::path(
    post,
    path = "/api/oracle/report",
    tag = "oracle",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Extrinsic resolved", body = SubmissionResponse),
        (status = 503, description = "Node not connected or no account selected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn report(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let call = oracle::Report {
        asset_id: payload.asset_id,
        price: payload.price,
    };
    submit_call(&state, call.into()).await
}

/// Whether an account is a registered operator.
#[utoipa::path(
    get,
    path = "/api/oracle/operators",
    tag = "oracle",
    params(AccountParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 400, description = "Invalid account address", body = ApiResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn operators(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AccountParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    let account = account_param(&params.account)?;
    run_query(&state, oracle::operators(account)).await
}

/// Last reported price of an asset, `None` if never reported.
#[utoipa::path(
    get,
    path = "/api/oracle/prices",
    tag = "oracle",
    params(AssetParams),
    responses(
        (status = 200, description = "Query resolved", body = QueryResponse),
        (status = 503, description = "Node not connected", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn prices(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<AssetParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    run_query(&state, oracle::prices(params.id)).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use subswap_core::outcome::{ChainEvent, DispatchError};
    use subxt::dynamic::Value;

    use super::*;
    use crate::testing::{pending_state, ready_state, StubChain};

    #[tokio::test]
    async fn we_can_register_as_an_operator() {
        let chain = StubChain::emitting(vec![ChainEvent::new("oracleModule", "OperatorRegistered")]);
        let state = ready_state(chain.clone(), &["//Alice"]);

        let Json(response) = register_operator(State(state)).await.unwrap();

        assert_eq!(response.outcome, "Success:oracleModule.OperatorRegistered");
        assert_eq!(
            chain.submissions(),
            vec!["oracleModule.registerOperator".to_string()]
        );
    }

    #[tokio::test]
    async fn we_can_surface_opaque_failures_verbatim() {
        let chain = StubChain::failing(DispatchError::opaque("BadOrigin"));
        let state = ready_state(chain, &["//Alice"]);

        let Json(response) = report(
            State(state),
            Json(ReportRequest {
                asset_id: 1,
                price: 1200,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.outcome, "BadOrigin");
        assert!(!response.success);
    }

    #[tokio::test]
    async fn we_cannot_report_before_the_node_is_connected() {
        let state = pending_state(&["//Alice"]);

        let (status, Json(body)) = report(
            State(state),
            Json(ReportRequest {
                asset_id: 1,
                price: 1200,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.err_msg.as_deref(), Some("Chain client is not ready"));
    }

    #[tokio::test]
    async fn we_can_query_operator_flags() {
        let alice = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
        let chain = StubChain::emitting(vec![]);
        chain.set_storage(
            &oracle::operators(alice.parse().unwrap()),
            Value::bool(true),
        );
        let state = ready_state(chain, &[]);

        let Json(response) = operators(
            State(state),
            Query(AccountParams {
                account: alice.into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.value, "true");
    }
}
