use snafu::Snafu;

/// Represents errors that can occur while preparing submissions, loading keys,
/// talking to the chain and decoding query results.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// No account is selected in the account provider.
    ///
    /// Submissions fail fast on this instead of signing with an undefined signer.
    #[snafu(display("No account selected"))]
    NoAccountSelected,

    /// The chain client handle has not been initialized yet.
    #[snafu(display("Chain client is not ready"))]
    NotReady,

    /// The chain client handle was initialized twice.
    #[snafu(display("Chain client is already initialized"))]
    AlreadyInitialized,

    /// The account provider has no signer for the requested address.
    #[snafu(display("No signer available for account {address}"))]
    SignerUnavailable {
        /// The SS58 address a signer was requested for.
        address: String,
    },

    /// An account identifier could not be parsed.
    #[snafu(display("Invalid account identifier '{input}'"))]
    InvalidAccount {
        /// The rejected input.
        input: String,
    },

    /// Error when reading a sr25519 key from a file.
    #[snafu(display("Failed to read key from file '{}': {}", path, source))]
    KeyFileRead {
        /// The path of the key file that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Error when parsing a key from a hexadecimal string.
    #[snafu(display("Failed to parse key as hex: {}", source))]
    KeyParse {
        /// The underlying hex parsing error.
        source: hex::FromHexError,
    },

    /// Error when the parsed key length is invalid.
    ///
    /// sr25519 secret seeds must be exactly 32 bytes long.
    #[snafu(display("Invalid key length: expected 32 bytes, got {}", length))]
    InvalidKeyLength {
        /// The actual length of the provided key.
        length: usize,
    },

    /// Error when failing to create a keypair from a secret key or URI.
    #[snafu(display("Failed to create keypair from secret"))]
    KeypairCreationError,

    /// Error when a secret URI such as `//Alice` cannot be parsed.
    #[snafu(display("Invalid secret URI"))]
    InvalidSecretUri,

    /// Error when attempting to connect to a blockchain network.
    #[snafu(display("Error connecting to chain: {source}"))]
    ChainConnectionError {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// Error when submitting a transaction.
    #[snafu(display("Error submitting tx: {source}"))]
    TransactionError {
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// Error when reading chain storage.
    #[snafu(display("Error querying {module}.{entry}: {source}"))]
    StorageError {
        /// Section name of the queried module.
        module: String,
        /// Storage entry name.
        entry: String,
        /// The underlying error from the `subxt` library.
        source: subxt::Error,
    },

    /// A storage value could not be mapped to a display value.
    #[snafu(display("Failed to decode {module}.{entry}: {reason}"))]
    QueryDecode {
        /// Section name of the queried module.
        module: String,
        /// Storage entry name.
        entry: String,
        /// What could not be decoded.
        reason: String,
    },
}

/// Type alias for results that return a `Result<T, Error>`, simplifying error handling.
pub type Result<T, E = Error> = std::result::Result<T, E>;
