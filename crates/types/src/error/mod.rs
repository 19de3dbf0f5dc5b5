// Path: crates/types/src/error/mod.rs
//! Core error types for the MNO registry.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised by a ledger backend.
#[derive(Error, Debug)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Errors returned by the MNO record store.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A record with this id is already stored on the ledger.
    #[error("Mno {0} already exists")]
    AlreadyExists(String),
    /// No record with this id is stored on the ledger.
    #[error("Mno {0} does not exist")]
    NotFound(String),
    /// The stored bytes do not decode into a valid record.
    #[error("Failed to decode stored Mno: {0}")]
    Decode(String),
    /// A record could not be encoded. Only reachable through a programming error.
    #[error("Failed to encode Mno: {0}")]
    Encode(String),
    /// The record fields violate a construction invariant (e.g. an empty id).
    #[error("Invalid Mno record: {0}")]
    InvalidRecord(String),
    /// An error originating from the ledger backend.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "MNO_ALREADY_EXIST",
            Self::NotFound(_) => "MNO_NOT_FOUND",
            Self::Decode(_) => "MNO_DECODE_ERROR",
            Self::Encode(_) => "MNO_ENCODE_ERROR",
            Self::InvalidRecord(_) => "MNO_INVALID_RECORD",
            Self::State(_) => "MNO_STATE_ERROR",
        }
    }
}

/// Errors raised while assembling a service's method table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ServiceError {
    /// A method name does not follow the `<name>@v<version>` convention.
    #[error("Invalid method name '{0}': expected '<name>@v<version>'")]
    InvalidMethodName(String),
    /// The same method name was registered twice.
    #[error("Method '{0}' is registered more than once")]
    DuplicateMethod(String),
    /// The service registered no methods at all.
    #[error("Service '{0}' exposes no methods")]
    EmptyTable(String),
    /// Two services were registered under the same id.
    #[error("Service '{0}' is registered more than once")]
    DuplicateService(String),
}

impl ErrorCode for ServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidMethodName(_) => "SERVICE_INVALID_METHOD_NAME",
            Self::DuplicateMethod(_) => "SERVICE_DUPLICATE_METHOD",
            Self::EmptyTable(_) => "SERVICE_EMPTY_METHOD_TABLE",
            Self::DuplicateService(_) => "SERVICE_DUPLICATE_SERVICE",
        }
    }
}

/// Errors related to transaction processing and operation dispatch.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// An error occurred during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred during deserialization.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// An error originating from the ledger backend.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// An error originating from the MNO record store.
    #[error("{0}")]
    Registry(#[from] RegistryError),
    /// The requested service or method is not available.
    #[error("Unsupported transaction type: {0}")]
    Unsupported(String),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::State(_) => "TX_STATE_ERROR",
            // The record store's kind is what callers branch on, so it is surfaced as-is.
            Self::Registry(e) => e.code(),
            Self::Unsupported(_) => "TX_UNSUPPORTED",
        }
    }
}

impl From<serde_json::Error> for TransactionError {
    fn from(e: serde_json::Error) -> Self {
        TransactionError::Deserialization(e.to_string())
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration parsed but violates an invariant.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}
