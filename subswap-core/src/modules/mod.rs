//! Typed inputs for every operation of the Subswap runtime modules.
//!
//! Each extrinsic has one input record converting into a [`ModuleCall`](crate::call::ModuleCall);
//! each query is a constructor returning a [`StorageQuery`](crate::query::StorageQuery).

/// `marketModule` extrinsics and queries.
pub mod market;

/// `oracleModule` extrinsics and queries.
pub mod oracle;

/// `tokenModule` extrinsics and queries.
pub mod token;
