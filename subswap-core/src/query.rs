//! Read-only queries and their mapping to display values.

use std::fmt;

use log::debug;
use subxt::dynamic::Value;
use subxt::ext::scale_value::{Composite, Primitive, ValueDef};
use subxt::utils::AccountId32;

use crate::call::{CallArg, Module};
use crate::chain::ChainHandle;
use crate::error::{Error, Result};

/// How the runtime treats an absent storage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Absent items read as the type's default.
    ValueQuery,
    /// Absent items read as `None`.
    OptionQuery,
}

/// A read-only storage lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageQuery {
    /// Module owning the storage item.
    pub module: Module,
    /// camelCase entry name (`totalSupply`).
    pub entry: String,
    /// Map keys; empty for plain values.
    pub keys: Vec<CallArg>,
    /// Defaulting behaviour of the item.
    pub kind: StorageKind,
}

impl StorageQuery {
    /// Creates a query for a default-valued item.
    pub fn value(module: Module, entry: impl Into<String>, keys: Vec<CallArg>) -> Self {
        Self {
            module,
            entry: entry.into(),
            keys,
            kind: StorageKind::ValueQuery,
        }
    }

    /// Creates a query for an optional item.
    pub fn optional(module: Module, entry: impl Into<String>, keys: Vec<CallArg>) -> Self {
        Self {
            module,
            entry: entry.into(),
            keys,
            kind: StorageKind::OptionQuery,
        }
    }
}

impl fmt::Display for StorageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module.section(), self.entry)
    }
}

/// Human-readable rendering of a decoded storage value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// Unsigned amount or identifier.
    Number(u128),
    /// Signed number.
    Signed(i128),
    /// Boolean flag.
    Flag(bool),
    /// Text or a field-less enum variant.
    Text(String),
    /// Account, rendered as SS58.
    Account(AccountId32),
    /// Tuple or struct fields, in order.
    Tuple(Vec<DisplayValue>),
    /// Absent optional item.
    None,
}

impl DisplayValue {
    /// Maps a decoded chain value. Fails on shapes that have no faithful
    /// rendering instead of falling back to a default.
    pub fn from_value<T>(value: &subxt::ext::scale_value::Value<T>) -> Result<Self, String> {
        match &value.value {
            ValueDef::Primitive(primitive) => match primitive {
                Primitive::Bool(b) => Ok(DisplayValue::Flag(*b)),
                Primitive::Char(c) => Ok(DisplayValue::Text(c.to_string())),
                Primitive::String(s) => Ok(DisplayValue::Text(s.clone())),
                Primitive::U128(n) => Ok(DisplayValue::Number(*n)),
                Primitive::I128(n) => Ok(DisplayValue::Signed(*n)),
                Primitive::U256(_) | Primitive::I256(_) => {
                    Err("256-bit integers are not supported".to_string())
                }
            },
            ValueDef::Composite(composite) => Self::from_composite(composite),
            ValueDef::Variant(variant) => match variant.name.as_str() {
                "None" if variant.values.is_empty() => Ok(DisplayValue::None),
                "Some" if variant.values.len() == 1 => {
                    Self::from_composite(&variant.values)
                }
                name if variant.values.is_empty() => Ok(DisplayValue::Text(name.to_string())),
                name => {
                    let mut fields = vec![DisplayValue::Text(name.to_string())];
                    fields.extend(Self::fields(&variant.values)?);
                    Ok(DisplayValue::Tuple(fields))
                }
            },
            ValueDef::BitSequence(_) => Err("bit sequences are not supported".to_string()),
        }
    }

    /// Composite values: accounts, newtype wrappers and tuples.
    fn from_composite<T>(composite: &Composite<T>) -> Result<Self, String> {
        if let Some(bytes) = as_account_bytes(composite) {
            return Ok(DisplayValue::Account(AccountId32(bytes)));
        }

        let mut fields = Self::fields(composite)?;
        if fields.len() == 1 {
            return Ok(fields.remove(0));
        }
        Ok(DisplayValue::Tuple(fields))
    }

    /// Maps every field of a composite, dropping field names.
    fn fields<T>(composite: &Composite<T>) -> Result<Vec<Self>, String> {
        composite.values().map(Self::from_value).collect()
    }
}

/// Returns the bytes of an `AccountId32`: a single-field wrapper around a
/// 32-byte array. A bare 32-byte array is not an account.
fn as_account_bytes<T>(composite: &Composite<T>) -> Option<[u8; 32]> {
    let mut fields = composite.values();
    let (Some(inner), None) = (fields.next(), fields.next()) else {
        return None;
    };
    let ValueDef::Composite(array) = &inner.value else {
        return None;
    };
    if array.len() != 32 {
        return None;
    }

    let mut bytes = [0u8; 32];
    for (byte, value) in bytes.iter_mut().zip(array.values()) {
        match value.value {
            ValueDef::Primitive(Primitive::U128(n)) if n <= u8::MAX as u128 => *byte = n as u8,
            _ => return None,
        }
    }
    Some(bytes)
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(n) => write!(f, "{n}"),
            DisplayValue::Signed(n) => write!(f, "{n}"),
            DisplayValue::Flag(b) => write!(f, "{b}"),
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Account(account) => write!(f, "{account}"),
            DisplayValue::Tuple(fields) => {
                f.write_str("[")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str("]")
            }
            DisplayValue::None => f.write_str("None"),
        }
    }
}

/// A decoded query result ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// The query that produced this result.
    pub query: StorageQuery,
    /// The decoded value.
    pub value: DisplayValue,
}

/// Issues read-only storage queries against the chain handle.
#[derive(Clone)]
pub struct QueryInvoker {
    /// Process-wide chain handle.
    chain: ChainHandle,
}

impl QueryInvoker {
    /// Creates an invoker over `chain`.
    pub fn new(chain: ChainHandle) -> Self {
        Self { chain }
    }

    /// Runs `query` and decodes its result.
    ///
    /// Fails with [`Error::NotReady`] if the handle is not initialized yet.
    pub async fn query(&self, query: StorageQuery) -> Result<QueryResult> {
        let client = self.chain.get()?;

        let value = match client.fetch_storage(&query).await? {
            Some(raw) => decode(&query, &raw)?,
            None => DisplayValue::None,
        };
        debug!("🔎 {query} -> {value}");

        Ok(QueryResult { query, value })
    }
}

/// Maps the raw storage value of `query`.
fn decode(query: &StorageQuery, raw: &Value) -> Result<DisplayValue> {
    DisplayValue::from_value(raw).map_err(|reason| Error::QueryDecode {
        module: query.module.section().to_string(),
        entry: query.entry.clone(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use subxt_signer::sr25519::dev;

    use super::*;
    use crate::testing::MockChain;

    fn account_value(account: &AccountId32) -> Value {
        Value::unnamed_composite(vec![Value::from_bytes(account.0)])
    }

    #[tokio::test]
    async fn we_cannot_query_before_the_handle_is_ready() {
        let invoker = QueryInvoker::new(ChainHandle::new());
        let query = StorageQuery::value(Module::Token, "nextAssetId", vec![]);

        assert!(matches!(invoker.query(query).await, Err(Error::NotReady)));
    }

    #[tokio::test]
    async fn we_can_query_the_total_supply_of_an_asset() {
        let chain = MockChain::new();
        let query = StorageQuery::value(Module::Token, "totalSupply", vec![CallArg::AssetId(3)]);
        chain.set_storage(&query, Value::u128(1_000_000));
        let invoker = QueryInvoker::new(ChainHandle::ready(Arc::new(chain)));

        let result = invoker.query(query).await.unwrap();
        assert_eq!(result.value, DisplayValue::Number(1_000_000));
        assert_eq!(result.value.to_string(), "1000000");
    }

    #[tokio::test]
    async fn we_can_query_absent_optional_items() {
        let chain = MockChain::new();
        let invoker = QueryInvoker::new(ChainHandle::ready(Arc::new(chain)));

        let query = StorageQuery::optional(Module::Token, "creator", vec![CallArg::AssetId(9)]);
        let result = invoker.query(query).await.unwrap();
        assert_eq!(result.value, DisplayValue::None);
    }

    #[tokio::test]
    async fn we_can_query_absent_value_items_as_their_default() {
        let chain = MockChain::new();
        let invoker = QueryInvoker::new(ChainHandle::ready(Arc::new(chain)));

        let query = StorageQuery::value(Module::Token, "totalSupply", vec![CallArg::AssetId(9)]);
        let result = invoker.query(query).await.unwrap();
        assert_eq!(result.value, DisplayValue::Number(0));
        assert_eq!(result.value.to_string(), "0");
    }

    #[tokio::test]
    async fn we_cannot_display_values_without_a_faithful_rendering() {
        let chain = MockChain::new();
        let query = StorageQuery::value(Module::Oracle, "result", vec![]);
        chain.set_storage(&query, Value::primitive(Primitive::U256([0u8; 32])));
        let invoker = QueryInvoker::new(ChainHandle::ready(Arc::new(chain)));

        assert!(matches!(
            invoker.query(query).await,
            Err(Error::QueryDecode { .. })
        ));
    }

    #[test]
    fn we_can_display_accounts_as_ss58() {
        let alice = dev::alice().public_key().to_account_id();
        let value = DisplayValue::from_value(&account_value(&alice)).unwrap();

        assert_eq!(value, DisplayValue::Account(alice.clone()));
        assert_eq!(value.to_string(), alice.to_string());
    }

    #[test]
    fn we_cannot_display_bare_byte_arrays_as_accounts() {
        let alice = dev::alice().public_key().to_account_id();
        let hash = DisplayValue::from_value(&Value::from_bytes(alice.0)).unwrap();

        match hash {
            DisplayValue::Tuple(fields) => {
                assert_eq!(fields.len(), 32);
                assert_eq!(fields[0], DisplayValue::Number(alice.0[0] as u128));
            }
            other => panic!("expected a tuple of bytes, got {other:?}"),
        }
    }

    #[test]
    fn we_can_display_optional_accounts() {
        let alice = dev::alice().public_key().to_account_id();
        let creator = Value::unnamed_variant("Some", vec![account_value(&alice)]);

        assert_eq!(
            DisplayValue::from_value(&creator).unwrap(),
            DisplayValue::Account(alice)
        );
    }

    #[test]
    fn we_can_display_tuples_and_options() {
        let reserves = Value::unnamed_composite(vec![Value::u128(500), Value::u128(250)]);
        assert_eq!(
            DisplayValue::from_value(&reserves).unwrap().to_string(),
            "[500, 250]"
        );

        let some = Value::unnamed_variant("Some", vec![Value::u128(7)]);
        assert_eq!(
            DisplayValue::from_value(&some).unwrap(),
            DisplayValue::Number(7)
        );

        let none = Value::unnamed_variant("None", Vec::<Value>::new());
        assert_eq!(DisplayValue::from_value(&none).unwrap(), DisplayValue::None);

        assert_eq!(
            DisplayValue::from_value(&Value::bool(true)).unwrap().to_string(),
            "true"
        );
        assert_eq!(
            DisplayValue::from_value(&Value::i128(-4)).unwrap(),
            DisplayValue::Signed(-4)
        );
    }

    #[test]
    fn we_can_unwrap_newtype_wrappers() {
        let fixed = Value::unnamed_composite(vec![Value::u128(1_000_000_000_000_000_000)]);
        let price = Value::unnamed_composite(vec![fixed.clone(), fixed]);

        assert_eq!(
            DisplayValue::from_value(&price).unwrap(),
            DisplayValue::Tuple(vec![
                DisplayValue::Number(1_000_000_000_000_000_000),
                DisplayValue::Number(1_000_000_000_000_000_000),
            ])
        );
    }
}
