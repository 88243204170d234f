use crate::call::{CallArg, Module, ModuleCall};
use crate::query::StorageQuery;

/// Deposit a pair of assets into their pool, creating the pair if needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintLiquidity {
    /// First asset of the pair.
    pub token0: u32,
    /// Amount of `token0` deposited.
    pub amount0: u128,
    /// Second asset of the pair.
    pub token1: u32,
    /// Amount of `token1` deposited.
    pub amount1: u128,
}

impl From<MintLiquidity> for ModuleCall {
    fn from(input: MintLiquidity) -> Self {
        ModuleCall::new(
            Module::Market,
            "mintLiquidity",
            vec![
                CallArg::AssetId(input.token0),
                CallArg::Balance(input.amount0),
                CallArg::AssetId(input.token1),
                CallArg::Balance(input.amount1),
            ],
        )
    }
}

/// Return `amount` liquidity tokens of `lpt` for the underlying assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnLiquidity {
    /// Liquidity token.
    pub lpt: u32,
    /// Amount of liquidity tokens burned.
    pub amount: u128,
}

impl From<BurnLiquidity> for ModuleCall {
    fn from(input: BurnLiquidity) -> Self {
        ModuleCall::new(
            Module::Market,
            "burnLiquidity",
            vec![CallArg::AssetId(input.lpt), CallArg::Balance(input.amount)],
        )
    }
}

/// Swap `amount_in` of `from` for `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    /// Asset sold.
    pub from: u32,
    /// Amount sold.
    pub amount_in: u128,
    /// Asset bought.
    pub to: u32,
}

impl From<Swap> for ModuleCall {
    fn from(input: Swap) -> Self {
        ModuleCall::new(
            Module::Market,
            "swap",
            vec![
                CallArg::AssetId(input.from),
                CallArg::Balance(input.amount_in),
                CallArg::AssetId(input.to),
            ],
        )
    }
}

/// Liquidity token of the pair `(token0, token1)`, if the pair exists.
pub fn pairs(token0: u32, token1: u32) -> StorageQuery {
    StorageQuery::optional(
        Module::Market,
        "pairs",
        vec![CallArg::Tuple(vec![
            CallArg::AssetId(token0),
            CallArg::AssetId(token1),
        ])],
    )
}

/// Pool reserves behind liquidity token `lpt`.
pub fn reserves(lpt: u32) -> StorageQuery {
    StorageQuery::value(Module::Market, "reserves", vec![CallArg::AssetId(lpt)])
}

/// Underlying pair of liquidity token `lpt`.
pub fn rewards(lpt: u32) -> StorageQuery {
    StorageQuery::value(Module::Market, "rewards", vec![CallArg::AssetId(lpt)])
}

/// Last accumulated prices of the pool behind `lpt`.
pub fn last_accumulative_price(lpt: u32) -> StorageQuery {
    StorageQuery::value(
        Module::Market,
        "lastAccumulativePrice",
        vec![CallArg::AssetId(lpt)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn we_can_build_mint_liquidity_in_argument_order() {
        let call: ModuleCall = MintLiquidity {
            token0: 1,
            amount0: 100,
            token1: 2,
            amount1: 100,
        }
        .into();

        assert_eq!(call.call_name(), "mint_liquidity");
        assert_eq!(
            call.args(),
            &[
                CallArg::AssetId(1),
                CallArg::Balance(100),
                CallArg::AssetId(2),
                CallArg::Balance(100)
            ]
        );
    }

    #[test]
    fn we_can_build_swaps() {
        let call: ModuleCall = Swap {
            from: 1,
            amount_in: 50,
            to: 2,
        }
        .into();

        assert_eq!(call.to_string(), "marketModule.swap");
        assert_eq!(
            call.args(),
            &[CallArg::AssetId(1), CallArg::Balance(50), CallArg::AssetId(2)]
        );
    }
}
