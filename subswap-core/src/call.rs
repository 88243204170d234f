//! Module calls: the target module, operation name and positional arguments
//! of a single extrinsic.

use std::fmt;

use subxt::utils::AccountId32;

/// Runtime modules the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Fungible asset registry (`tokenModule`).
    Token,
    /// Constant-product market (`marketModule`).
    Market,
    /// Price oracle (`oracleModule`).
    Oracle,
}

impl Module {
    /// Section name as it appears in events and outcome strings.
    pub fn section(&self) -> &'static str {
        match self {
            Module::Token => "tokenModule",
            Module::Market => "marketModule",
            Module::Oracle => "oracleModule",
        }
    }

    /// Pallet name as it appears in the runtime metadata.
    pub fn pallet_name(&self) -> &'static str {
        match self {
            Module::Token => "TokenModule",
            Module::Market => "MarketModule",
            Module::Oracle => "OracleModule",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// A single chain-encodable argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Asset identifier.
    AssetId(u32),
    /// Balance amount.
    Balance(u128),
    /// Raw account id, as used in storage keys.
    Account(AccountId32),
    /// Account passed through the runtime's lookup (`MultiAddress::Id`).
    Target(AccountId32),
    /// Tuple of arguments, as used by tuple-keyed storage maps.
    Tuple(Vec<CallArg>),
}

/// A state-changing request targeting a named module and operation.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCall {
    /// Target module.
    module: Module,
    /// camelCase operation name.
    operation: String,
    /// Positional arguments.
    args: Vec<CallArg>,
}

impl ModuleCall {
    /// Creates a call of `operation` (camelCase, e.g. `mintLiquidity`) on `module`.
    pub fn new(module: Module, operation: impl Into<String>, args: Vec<CallArg>) -> Self {
        Self {
            module,
            operation: operation.into(),
            args,
        }
    }

    /// The module under call.
    pub fn module(&self) -> Module {
        self.module
    }

    /// The camelCase operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Positional arguments, in call order.
    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    /// The operation name as written in the runtime metadata (`mint_liquidity`).
    pub fn call_name(&self) -> String {
        to_snake_case(&self.operation)
    }
}

impl fmt::Display for ModuleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module.section(), self.operation)
    }
}

/// `mintLiquidity` -> `mint_liquidity`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `totalSupply` -> `TotalSupply`.
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Metadata pallet name to event section name: `MarketModule` -> `marketModule`.
pub fn section_name(pallet_name: &str) -> String {
    let mut chars = pallet_name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
