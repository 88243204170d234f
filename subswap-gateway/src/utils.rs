use axum::http::StatusCode;
use axum::Json;
use subswap_core::accounts::parse_account;
use subswap_core::error::Error;
use subxt::utils::AccountId32;

use crate::model::ApiResponse;

/// Error half of every handler's result.
pub type ApiError = (StatusCode, Json<ApiResponse>);

/// Builds an error response with `status` and `message`.
fn error_with_status(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ApiResponse {
            success: false,
            err_msg: Some(message.to_string()),
            tx_hash: None,
        }),
    )
}

/// Constructs a `400 Bad Request` API response.
pub fn bad_request(message: &str) -> ApiError {
    error_with_status(StatusCode::BAD_REQUEST, message)
}

/// Constructs a `500 Internal Server Error` API response.
pub fn internal_server_error(message: &str) -> ApiError {
    error_with_status(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Constructs a `503 Service Unavailable` API response.
///
/// Used while the node connection is pending or no account is selected.
pub fn service_unavailable(message: &str) -> ApiError {
    error_with_status(StatusCode::SERVICE_UNAVAILABLE, message)
}

/// Maps a core error to its HTTP response.
pub fn error_response(err: &Error) -> ApiError {
    match err {
        Error::InvalidAccount { .. } | Error::SignerUnavailable { .. } => {
            bad_request(&err.to_string())
        }
        Error::NotReady | Error::NoAccountSelected => service_unavailable(&err.to_string()),
        _ => internal_server_error(&err.to_string()),
    }
}

/// Parses an SS58 address from request input.
pub fn account_param(input: &str) -> Result<AccountId32, ApiError> {
    parse_account(input).map_err(|e| error_response(&e))
}
