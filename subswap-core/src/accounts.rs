//! Accounts and signer capabilities.
//!
//! The [`AccountProvider`] trait is the seam to whatever holds the user's keys.
//! [`Keyring`] is the in-process implementation: sr25519 keypairs loaded from
//! secret files or secret URIs, plus the currently selected account.

use std::str::FromStr;
use std::sync::RwLock;

use async_trait::async_trait;
use hex::FromHex;
use log::info;
use snafu::ResultExt;
use subxt::utils::AccountId32;
use subxt_signer::sr25519::Keypair;
use subxt_signer::SecretUri;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::*;

/// Parses an SS58 address.
pub fn parse_account(input: &str) -> Result<AccountId32> {
    AccountId32::from_str(input.trim()).map_err(|_| Error::InvalidAccount {
        input: input.to_string(),
    })
}

/// Signer capability bound to one account.
#[derive(Clone)]
pub struct AccountSigner {
    /// The account this signer signs for.
    account: AccountId32,
    /// The sr25519 keypair.
    keypair: Keypair,
}

impl AccountSigner {
    /// Wraps a keypair.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            account: keypair.public_key().to_account_id(),
            keypair,
        }
    }

    /// The account this signer is bound to.
    pub fn account(&self) -> &AccountId32 {
        &self.account
    }

    /// The underlying keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

/// Supplies the active account and signer capabilities.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Currently known accounts.
    fn accounts(&self) -> Vec<AccountId32>;

    /// The account operations are performed as, read at invocation time.
    fn selected_account(&self) -> Option<AccountId32>;

    /// Requests a signer capability for `address`.
    async fn signer_for(&self, address: &AccountId32) -> Result<AccountSigner>;
}

/// In-process key store.
#[derive(Default)]
pub struct Keyring {
    /// Signers in insertion order.
    signers: RwLock<Vec<AccountSigner>>,
    /// Selected account. The first inserted signer is selected by default.
    selected: RwLock<Option<AccountId32>>,
}

impl Keyring {
    /// Creates an empty keyring with no selected account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a keyring from secret URIs such as `//Alice`.
    pub fn from_uris<S: AsRef<str>>(uris: impl IntoIterator<Item = S>) -> Result<Self> {
        let keyring = Self::new();
        for uri in uris {
            let uri = SecretUri::from_str(uri.as_ref()).map_err(|_| Error::InvalidSecretUri)?;
            let keypair = Keypair::from_uri(&uri).map_err(|_| Error::KeypairCreationError)?;
            keyring.insert(keypair);
        }
        Ok(keyring)
    }

    /// Adds a keypair and returns its account.
    pub fn insert(&self, keypair: Keypair) -> AccountId32 {
        let signer = AccountSigner::new(keypair);
        let account = signer.account().clone();

        let mut signers = self.signers.write().unwrap_or_else(|e| e.into_inner());
        if !signers.iter().any(|s| s.account() == &account) {
            signers.push(signer);
        }

        let mut selected = self.selected.write().unwrap_or_else(|e| e.into_inner());
        if selected.is_none() {
            info!("👤 Selected account {account}");
            *selected = Some(account.clone());
        }
        account
    }

    /// Selects one of the known accounts.
    pub fn select(&self, account: &AccountId32) -> Result<()> {
        let known = self
            .signers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|s| s.account() == account);
        if !known {
            return Err(Error::SignerUnavailable {
                address: account.to_string(),
            });
        }

        info!("👤 Selected account {account}");
        *self.selected.write().unwrap_or_else(|e| e.into_inner()) = Some(account.clone());
        Ok(())
    }
}

#[async_trait]
impl AccountProvider for Keyring {
    fn accounts(&self) -> Vec<AccountId32> {
        self.signers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|s| s.account().clone())
            .collect()
    }

    fn selected_account(&self) -> Option<AccountId32> {
        self.selected
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn signer_for(&self, address: &AccountId32) -> Result<AccountSigner> {
        self.signers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|s| s.account() == address)
            .cloned()
            .ok_or_else(|| Error::SignerUnavailable {
                address: address.to_string(),
            })
    }
}

/// load a hex encoded sr25519 secret seed from a file
pub async fn load_substrate_key(file_path: &str) -> Result<Keypair> {
    let mut file = File::open(file_path).await.context(KeyFileReadSnafu {
        path: file_path.to_string(),
    })?;

    let mut hex_string = String::new();
    file.read_to_string(&mut hex_string)
        .await
        .context(KeyFileReadSnafu {
            path: file_path.to_string(),
        })?;

    parse_substrate_key(&hex_string)
}

/// Parses a hex encoded sr25519 secret seed, with or without `0x`.
pub fn parse_substrate_key(hex_string: &str) -> Result<Keypair> {
    let key_bytes =
        Vec::from_hex(hex_string.trim().trim_start_matches("0x")).context(KeyParseSnafu)?;

    let length = key_bytes.len();
    let key_bytes: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| Error::InvalidKeyLength { length })?;

    Keypair::from_secret_key(key_bytes).map_err(|_| Error::KeypairCreationError)
}

#[cfg(test)]
mod tests {
    use subxt_signer::sr25519::dev;

    use super::*;

    #[test]
    fn we_can_select_the_first_inserted_account_by_default() {
        let keyring = Keyring::from_uris(["//Alice", "//Bob"]).unwrap();

        let alice = dev::alice().public_key().to_account_id();
        let bob = dev::bob().public_key().to_account_id();
        assert_eq!(keyring.accounts(), vec![alice.clone(), bob.clone()]);
        assert_eq!(keyring.selected_account(), Some(alice));

        keyring.select(&bob).unwrap();
        assert_eq!(keyring.selected_account(), Some(bob));
    }

    #[test]
    fn we_cannot_select_an_unknown_account() {
        let keyring = Keyring::from_uris(["//Alice"]).unwrap();
        let charlie = dev::charlie().public_key().to_account_id();

        assert!(matches!(
            keyring.select(&charlie),
            Err(Error::SignerUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn we_cannot_get_a_signer_for_an_unknown_account() {
        let keyring = Keyring::new();
        let alice = dev::alice().public_key().to_account_id();

        assert_eq!(keyring.selected_account(), None);
        assert!(matches!(
            keyring.signer_for(&alice).await,
            Err(Error::SignerUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn we_can_get_a_signer_bound_to_the_requested_account() {
        let keyring = Keyring::from_uris(["//Alice", "//Bob"]).unwrap();
        let bob = dev::bob().public_key().to_account_id();

        let signer = keyring.signer_for(&bob).await.unwrap();
        assert_eq!(signer.account(), &bob);
    }

    #[test]
    fn we_can_parse_hex_secret_seeds() {
        let seed = "0x".to_string() + &"11".repeat(32);
        assert!(parse_substrate_key(&seed).is_ok());
        assert!(parse_substrate_key(&"22".repeat(32)).is_ok());

        assert!(matches!(
            parse_substrate_key("abcd"),
            Err(Error::InvalidKeyLength { length: 2 })
        ));
        assert!(matches!(
            parse_substrate_key("not hex"),
            Err(Error::KeyParse { .. })
        ));
    }

    #[test]
    fn we_can_parse_ss58_addresses() {
        let alice = dev::alice().public_key().to_account_id();
        assert_eq!(parse_account(&alice.to_string()).unwrap(), alice);
        assert!(matches!(
            parse_account("5NotAnAddress"),
            Err(Error::InvalidAccount { .. })
        ));
    }
}
