//! api handlers for accounts
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use subswap_core::accounts::AccountProvider;

use crate::model::{AccountsResponse, ApiResponse, SelectAccountRequest};
use crate::state::GatewayState;
use crate::utils::{account_param, error_response, ApiError};

/// Builds the account listing from the keyring.
fn listing(state: &GatewayState) -> AccountsResponse {
    AccountsResponse {
        accounts: state
            .keyring
            .accounts()
            .iter()
            .map(ToString::to_string)
            .collect(),
        selected: state.keyring.selected_account().map(|a| a.to_string()),
    }
}

/// Lists the accounts available for signing and the current selection.
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Accounts listed", body = AccountsResponse)
    )
)]
pub async fn list_accounts(State(state): State<Arc<GatewayState>>) -> Json<AccountsResponse> {
    Json(listing(&state))
}

/// Selects the account later submissions are signed with.
///
/// # Example Usage
/// ```sh
/// curl -X POST "http://127.0.0.1:3000/api/accounts/select" \
///      -H "Content-Type: application/json" \
///      -d '{"account": "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty"}'
/// ```
#[utoipa::path(
    post,
    path = "/api/accounts/select",
    tag = "accounts",
    request_body = SelectAccountRequest,
    responses(
        (status = 200, description = "Account selected", body = AccountsResponse),
        (status = 400, description = "Malformed or unknown account", body = ApiResponse)
    )
)]
pub async fn select_account(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<SelectAccountRequest>,
) -> Result<Json<AccountsResponse>, ApiError> {
    let account = account_param(&payload.account)?;
    state
        .keyring
        .select(&account)
        .map_err(|e| error_response(&e))?;
    Ok(Json(listing(&state)))
}
