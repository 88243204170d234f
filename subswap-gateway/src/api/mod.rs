//! gateway api handlers

use std::sync::Arc;

use axum::Json;
use log::{error, info};
use subswap_core::accounts::AccountProvider;
use subswap_core::call::ModuleCall;
use subswap_core::query::StorageQuery;

use crate::model::{QueryResponse, SubmissionRecord, SubmissionResponse};
use crate::state::GatewayState;
use crate::utils::{error_response, internal_server_error, ApiError};

/// Handlers for account listing and selection
pub mod accounts;

/// Handlers for marketModule extrinsics and queries
pub mod market;

/// Handlers for oracleModule extrinsics and queries
pub mod oracle;

/// Handlers for the submission log
pub mod submissions;

/// Handlers for tokenModule extrinsics and queries
pub mod token;

/// Submits `call` as the selected account, waits for its outcome and logs it.
///
/// Module failures and opaque failures are successful HTTP responses with
/// `success: false`; only precondition failures become error responses.
/// Waiting and logging run on their own task, so a submission is logged even
/// if the client disconnects before it resolves.
pub(crate) async fn submit_call(
    state: &Arc<GatewayState>,
    call: ModuleCall,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let label = call.to_string();
    let account = state.keyring.selected_account();

    let handle = state
        .submitter
        .submit_as(call, account.clone())
        .await
        .map_err(|e| error_response(&e))?;
    let tx_hash = handle.extrinsic_hash().map(|hash| format!("{hash:#x}"));

    let state = state.clone();
    let resolution = tokio::spawn(async move {
        let outcome = handle.outcome().await;
        info!("📨 {label} -> {outcome}");

        let response = SubmissionResponse {
            outcome: outcome.to_string(),
            success: outcome.is_success(),
            tx_hash,
        };
        state
            .submissions
            .record(SubmissionRecord {
                call: label,
                account: account.map(|a| a.to_string()),
                tx_hash: response.tx_hash.clone(),
                outcome: response.outcome.clone(),
                success: response.success,
            })
            .await;
        response
    });

    match resolution.await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("❌ Submission task failed: {e}");
            Err(internal_server_error(&e.to_string()))
        }
    }
}

/// Runs `query` and renders its value.
pub(crate) async fn run_query(
    state: &GatewayState,
    query: StorageQuery,
) -> Result<Json<QueryResponse>, ApiError> {
    let result = state
        .queries
        .query(query)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(QueryResponse {
        query: result.query.to_string(),
        value: result.value.to_string(),
    }))
}
