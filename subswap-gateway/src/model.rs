use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Generic API response structure.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Indicates whether the request was successful.
    pub success: bool,
    /// An optional error message in case of failure.
    pub err_msg: Option<String>,
    /// The transaction hash if applicable.
    pub tx_hash: Option<String>,
}

/// Result of a submitted extrinsic.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// Outcome string: `Success:<module>.<method>`, `Error:<module>.<errorName>`
    /// or the opaque failure description.
    pub outcome: String,
    /// Whether the outcome is a success.
    pub success: bool,
    /// Hash of the extrinsic, absent when it never reached the node.
    pub tx_hash: Option<String>,
}

/// Result of a storage query.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Queried item, `<module>.<entry>`.
    pub query: String,
    /// Display rendering of the value.
    pub value: String,
}

/// Known accounts and the selection.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountsResponse {
    /// SS58 addresses with a signer in the keyring.
    pub accounts: Vec<String>,
    /// The account submissions are signed with.
    pub selected: Option<String>,
}

/// Request to change the selected account.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectAccountRequest {
    /// SS58 address of a known account.
    pub account: String,
}

/// One entry of the in-session submission log.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// `<module>.<operation>` of the call.
    pub call: String,
    /// Signing account.
    pub account: Option<String>,
    /// Extrinsic hash, if submitted.
    pub tx_hash: Option<String>,
    /// Outcome string.
    pub outcome: String,
    /// Whether the outcome is a success.
    pub success: bool,
}

/// In-session submission log, oldest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsResponse {
    /// Logged submissions.
    pub submissions: Vec<SubmissionRecord>,
}

/// Filter for the submission log.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionsParams {
    /// Only entries with this extrinsic hash.
    pub tx_hash: Option<String>,
}

/// `tokenModule.issue` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    /// Total supply of the new asset.
    pub total: u128,
}

/// Input shared by `tokenModule.mint`, `burn` and `transfer`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetedAmountRequest {
    /// Asset identifier.
    pub asset_id: u32,
    /// SS58 address of the target account.
    pub target: String,
    /// Amount.
    pub amount: u128,
}

/// `tokenModule.destroy` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DestroyRequest {
    /// Asset identifier.
    pub asset_id: u32,
}

/// `marketModule.mintLiquidity` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintLiquidityRequest {
    /// First asset of the pair.
    pub token0: u32,
    /// Amount of the first asset.
    pub amount0: u128,
    /// Second asset of the pair.
    pub token1: u32,
    /// Amount of the second asset.
    pub amount1: u128,
}

/// `marketModule.burnLiquidity` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BurnLiquidityRequest {
    /// Liquidity token.
    pub lpt: u32,
    /// Amount of liquidity tokens to burn.
    pub amount: u128,
}

/// `marketModule.swap` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    /// Asset sold.
    pub from: u32,
    /// Amount sold.
    pub amount_in: u128,
    /// Asset bought.
    pub to: u32,
}

/// `oracleModule.report` input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Priced asset.
    pub asset_id: u32,
    /// Reported price.
    pub price: u128,
}

/// Query keyed by one asset or liquidity token.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetParams {
    /// Asset or liquidity token identifier.
    pub id: u32,
}

/// Query keyed by asset and account.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BalanceParams {
    /// Asset identifier.
    pub id: u32,
    /// SS58 address.
    pub account: String,
}

/// Query keyed by an asset pair.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PairParams {
    /// First asset of the pair.
    pub token0: u32,
    /// Second asset of the pair.
    pub token1: u32,
}

/// Query keyed by one account.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountParams {
    /// SS58 address.
    pub account: String,
}
