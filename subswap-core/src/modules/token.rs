use subxt::utils::AccountId32;

use crate::call::{CallArg, Module, ModuleCall};
use crate::query::StorageQuery;

/// Issue a new asset class with `total` units owned by the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Initial and total supply.
    pub total: u128,
}

impl From<Issue> for ModuleCall {
    fn from(input: Issue) -> Self {
        ModuleCall::new(Module::Token, "issue", vec![CallArg::Balance(input.total)])
    }
}

/// Mint `amount` of `asset_id` to `target`. Only the asset creator may mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mint {
    /// Asset to mint.
    pub asset_id: u32,
    /// Receiving account.
    pub target: AccountId32,
    /// Amount to mint.
    pub amount: u128,
}

impl From<Mint> for ModuleCall {
    fn from(input: Mint) -> Self {
        ModuleCall::new(
            Module::Token,
            "mint",
            vec![
                CallArg::AssetId(input.asset_id),
                CallArg::Target(input.target),
                CallArg::Balance(input.amount),
            ],
        )
    }
}

/// Burn `amount` of `asset_id` held by `target`. Only the asset creator may burn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burn {
    /// Asset to burn.
    pub asset_id: u32,
    /// Account to burn from.
    pub target: AccountId32,
    /// Amount to burn.
    pub amount: u128,
}

impl From<Burn> for ModuleCall {
    fn from(input: Burn) -> Self {
        ModuleCall::new(
            Module::Token,
            "burn",
            vec![
                CallArg::AssetId(input.asset_id),
                CallArg::Target(input.target),
                CallArg::Balance(input.amount),
            ],
        )
    }
}

/// Transfer `amount` of `asset_id` from the signer to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Asset to transfer.
    pub asset_id: u32,
    /// Receiving account.
    pub target: AccountId32,
    /// Amount to transfer.
    pub amount: u128,
}

impl From<Transfer> for ModuleCall {
    fn from(input: Transfer) -> Self {
        ModuleCall::new(
            Module::Token,
            "transfer",
            vec![
                CallArg::AssetId(input.asset_id),
                CallArg::Target(input.target),
                CallArg::Balance(input.amount),
            ],
        )
    }
}

/// Destroy the signer's whole balance of `asset_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destroy {
    /// Asset to destroy.
    pub asset_id: u32,
}

impl From<Destroy> for ModuleCall {
    fn from(input: Destroy) -> Self {
        ModuleCall::new(Module::Token, "destroy", vec![CallArg::AssetId(input.asset_id)])
    }
}

/// Total supply of `asset_id`.
pub fn total_supply(asset_id: u32) -> StorageQuery {
    StorageQuery::value(Module::Token, "totalSupply", vec![CallArg::AssetId(asset_id)])
}

/// Identifier the next issued asset will get.
pub fn next_asset_id() -> StorageQuery {
    StorageQuery::value(Module::Token, "nextAssetId", vec![])
}

/// Balance of `account` in `asset_id`.
pub fn balances(asset_id: u32, account: AccountId32) -> StorageQuery {
    StorageQuery::value(
        Module::Token,
        "balances",
        vec![CallArg::Tuple(vec![
            CallArg::AssetId(asset_id),
            CallArg::Account(account),
        ])],
    )
}

/// Creator of `asset_id`, absent for system-issued assets.
pub fn creator(asset_id: u32) -> StorageQuery {
    StorageQuery::optional(Module::Token, "creator", vec![CallArg::AssetId(asset_id)])
}
