use subxt::utils::AccountId32;

use crate::call::{CallArg, Module, ModuleCall};
use crate::query::StorageQuery;

/// Register the signer as a price reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOperator;

impl From<RegisterOperator> for ModuleCall {
    fn from(_: RegisterOperator) -> Self {
        ModuleCall::new(Module::Oracle, "registerOperator", vec![])
    }
}

/// Remove the signer from the price reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnregisterOperator;

impl From<UnregisterOperator> for ModuleCall {
    fn from(_: UnregisterOperator) -> Self {
        ModuleCall::new(Module::Oracle, "unregisterOperator", vec![])
    }
}

/// Report `price` for `asset_id`. The signer must be a registered operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Priced asset.
    pub asset_id: u32,
    /// Reported price.
    pub price: u128,
}

impl From<Report> for ModuleCall {
    fn from(input: Report) -> Self {
        ModuleCall::new(
            Module::Oracle,
            "report",
            vec![CallArg::AssetId(input.asset_id), CallArg::Balance(input.price)],
        )
    }
}

/// Whether `account` is a registered operator.
pub fn operators(account: AccountId32) -> StorageQuery {
    StorageQuery::value(Module::Oracle, "operators", vec![CallArg::Account(account)])
}

/// Last reported price of `asset_id`, if any.
pub fn prices(asset_id: u32) -> StorageQuery {
    StorageQuery::optional(Module::Oracle, "prices", vec![CallArg::AssetId(asset_id)])
}
