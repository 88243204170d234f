//! Terminal outcomes of a submission and the chain signals they are derived from.

use std::fmt;

use subxt::dynamic::Value;

/// An event emitted by the runtime while executing an extrinsic.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainEvent {
    /// Section name of the emitting module (`marketModule`).
    pub module: String,
    /// Event variant name (`MintedLiquidity`).
    pub method: String,
    /// Decoded event fields.
    pub payload: Value,
}

impl ChainEvent {
    /// Creates an event with an empty payload.
    pub fn new(module: impl Into<String>, method: impl Into<String>) -> Self {
        Self::with_payload(module, method, Value::unnamed_composite(Vec::<Value>::new()))
    }

    /// Creates an event carrying `payload`.
    pub fn with_payload(
        module: impl Into<String>,
        method: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            module: module.into(),
            method: method.into(),
            payload,
        }
    }
}

/// Module error details resolved from the runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleErrorMeta {
    /// Section name of the module that raised the error.
    pub module: String,
    /// Error variant name.
    pub error_name: String,
    /// Documentation attached to the error variant.
    pub docs: String,
}

/// An error returned by the chain's execution layer, or by the transport
/// carrying the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A named business-rule rejection raised by a module.
    Module {
        /// Section name of the module.
        module: String,
        /// Error variant name.
        error_name: String,
    },
    /// Anything else: bad origin, lookup failure, invalid or dropped transaction.
    Opaque {
        /// Raw description of the error.
        description: String,
    },
}

impl DispatchError {
    /// Shorthand for an opaque error.
    pub fn opaque(description: impl Into<String>) -> Self {
        DispatchError::Opaque {
            description: description.into(),
        }
    }
}

impl From<ModuleErrorMeta> for DispatchError {
    fn from(meta: ModuleErrorMeta) -> Self {
        DispatchError::Module {
            module: meta.module,
            error_name: meta.error_name,
        }
    }
}

/// The single terminal value every submission produces.
///
/// The `Display` impl is the string handed to the presentation layer:
/// `Success:<module>.<method>`, `Error:<module>.<errorName>`, or the raw
/// description of an opaque failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The module under call emitted `method`.
    Success {
        /// Section name of the module.
        module: String,
        /// Name of the event that resolved the submission.
        method: String,
    },
    /// The module under call rejected the extrinsic.
    ModuleFailure {
        /// Section name of the module.
        module: String,
        /// Error variant name.
        error_name: String,
    },
    /// Transport-level or otherwise undecodable failure.
    OpaqueFailure {
        /// Raw description of the failure.
        description: String,
    },
}

impl Outcome {
    /// Shorthand for an opaque failure.
    pub fn opaque(description: impl Into<String>) -> Self {
        Outcome::OpaqueFailure {
            description: description.into(),
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl From<DispatchError> for Outcome {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Module { module, error_name } => {
                Outcome::ModuleFailure { module, error_name }
            }
            DispatchError::Opaque { description } => Outcome::OpaqueFailure { description },
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { module, method } => write!(f, "Success:{module}.{method}"),
            Outcome::ModuleFailure { module, error_name } => {
                write!(f, "Error:{module}.{error_name}")
            }
            Outcome::OpaqueFailure { description } => f.write_str(description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn we_can_render_outcomes_for_presentation() {
        let success = Outcome::Success {
            module: "marketModule".into(),
            method: "MintedLiquidity".into(),
        };
        assert_eq!(success.to_string(), "Success:marketModule.MintedLiquidity");
        assert!(success.is_success());

        let failure: Outcome = DispatchError::Module {
            module: "tokenModule".into(),
            error_name: "BalanceLow".into(),
        }
        .into();
        assert_eq!(failure.to_string(), "Error:tokenModule.BalanceLow");
        assert!(!failure.is_success());

        let opaque: Outcome = DispatchError::opaque("BadOrigin").into();
        assert_eq!(opaque.to_string(), "BadOrigin");
    }

    #[test]
    fn we_can_convert_resolved_module_errors() {
        let meta = ModuleErrorMeta {
            module: "oracleModule".into(),
            error_name: "WrongOperator".into(),
            docs: "Not the expected operator".into(),
        };
        assert_eq!(
            DispatchError::from(meta),
            DispatchError::Module {
                module: "oracleModule".into(),
                error_name: "WrongOperator".into(),
            }
        );
    }
}
