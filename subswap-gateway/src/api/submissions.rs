//! api handlers for the submission log
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use crate::model::{SubmissionsParams, SubmissionsResponse};
use crate::state::GatewayState;

/// Lists the submissions resolved in this session, oldest first.
///
/// With `tx_hash`, only the entries for that extrinsic are returned.
///
/// # Example Usage
/// ```sh
/// curl -X GET "http://127.0.0.1:3000/api/submissions?tx_hash=0x123..."
/// ```
#[utoipa::path(
    get,
    path = "/api/submissions",
    tag = "submissions",
    params(SubmissionsParams),
    responses(
        (status = 200, description = "Submission log", body = SubmissionsResponse)
    )
)]
pub async fn list_submissions(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<SubmissionsParams>,
) -> Json<SubmissionsResponse> {
    let submissions = match params.tx_hash {
        Some(tx_hash) => state.submissions.get(&tx_hash).await,
        None => state.submissions.history().await,
    };
    Json(SubmissionsResponse { submissions })
}
