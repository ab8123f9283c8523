//! The unified error of a build call, and its coarse classification.

use std::time::Duration;

use camino_core::{nets::Chain, EncodingError, SerError};
use camino_keys::KeyError;
use camino_provider::ProviderError;
use camino_txs::TxError;
use thiserror::Error;

/// Errors raised while building, signing or submitting a transaction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The node could not be reached or answered with an error
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Assembly, signing or fee calculation failed
    #[error(transparent)]
    Tx(#[from] TxError),

    /// A payload could not be decoded or encoded
    #[error(transparent)]
    Ser(#[from] SerError),

    /// Text encoding failed
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Key lookup or signing failed
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A caller-supplied address could not be parsed
    #[error("Invalid address {address:?}: {source}")]
    InvalidAddress {
        /// The text as supplied
        address: String,
        /// The parse failure
        source: EncodingError,
    },

    /// The node cannot cover the requested amounts. Carries the node's message.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The node does not report a chain with this alias
    #[error("Node does not report chain {0}")]
    UnknownChain(Chain),

    /// The caller cancelled the build
    #[error("Cancelled")]
    Cancelled,

    /// A node call outlived the request timeout
    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}

/// Coarse classes of `BuildError`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Remote query failed
    Provider,
    /// A payload could not be parsed
    Decode,
    /// A transaction could not be serialized
    Encode,
    /// The funding address cannot cover the amounts
    InsufficientFunds,
    /// A caller-supplied parameter was rejected
    InvalidParameter,
    /// A key failed to sign
    Signing,
    /// The fee does not fit in a u64
    FeeOverflow,
    /// The C-chain did not report a base fee
    NilBaseFee,
    /// The build was cancelled or timed out
    Cancelled,
}

impl BuildError {
    /// The class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Provider(ProviderError::SerError(_))
            | BuildError::Provider(ProviderError::EncodingError(_)) => ErrorKind::Decode,
            BuildError::Provider(e) if e.from_parsing() => ErrorKind::Decode,
            BuildError::Provider(_) => ErrorKind::Provider,
            BuildError::Tx(e) => match e {
                TxError::SerError(_) => ErrorKind::Encode,
                TxError::InvalidThreshold { .. }
                | TxError::SignerCountMismatch { .. }
                | TxError::EmptySignerSet { .. }
                | TxError::AmountOverflow => ErrorKind::InvalidParameter,
                TxError::KeyError(_) => ErrorKind::Signing,
                TxError::NilBaseFee => ErrorKind::NilBaseFee,
                TxError::FeeOverflow => ErrorKind::FeeOverflow,
            },
            BuildError::Ser(_) => ErrorKind::Decode,
            BuildError::Encoding(_) => ErrorKind::Encode,
            BuildError::Key(KeyError::UnknownAddress(_)) => ErrorKind::InvalidParameter,
            BuildError::Key(_) => ErrorKind::Signing,
            BuildError::InvalidAddress { .. } | BuildError::UnknownChain(_) => {
                ErrorKind::InvalidParameter
            }
            BuildError::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            BuildError::Cancelled | BuildError::TimedOut(_) => ErrorKind::Cancelled,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_classifies_errors() {
        let cases = vec![
            (BuildError::Tx(TxError::NilBaseFee), ErrorKind::NilBaseFee),
            (BuildError::Tx(TxError::FeeOverflow), ErrorKind::FeeOverflow),
            (
                BuildError::Tx(TxError::InvalidThreshold {
                    threshold: 0,
                    owners: 2,
                }),
                ErrorKind::InvalidParameter,
            ),
            (
                BuildError::Tx(TxError::EmptySignerSet { index: 0 }),
                ErrorKind::InvalidParameter,
            ),
            (
                BuildError::Ser(SerError::TrailingBytes(1)),
                ErrorKind::Decode,
            ),
            (
                BuildError::Provider(ProviderError::Unsupported("x".to_owned())),
                ErrorKind::Provider,
            ),
            (
                BuildError::Provider(EncodingError::BadChecksum.into()),
                ErrorKind::Decode,
            ),
            (
                BuildError::Provider(ProviderError::SerdeJSONError(
                    serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                )),
                ErrorKind::Decode,
            ),
            (
                BuildError::Provider(ProviderError::custom(true, "bad body".into())),
                ErrorKind::Decode,
            ),
            (
                BuildError::Provider(ProviderError::custom(false, "connection refused".into())),
                ErrorKind::Provider,
            ),
            (
                BuildError::InsufficientFunds("insufficient balance".to_owned()),
                ErrorKind::InsufficientFunds,
            ),
            (BuildError::UnknownChain(Chain::X), ErrorKind::InvalidParameter),
            (
                BuildError::TimedOut(Duration::from_secs(1)),
                ErrorKind::Cancelled,
            ),
            (BuildError::Cancelled, ErrorKind::Cancelled),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{}", err);
        }
    }
}
