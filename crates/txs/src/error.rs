//! Transaction construction errors.

use camino_core::SerError;
use camino_keys::KeyError;
use thiserror::Error;

/// Errors raised while assembling, ordering, signing or pricing a transaction.
#[derive(Debug, Error)]
pub enum TxError {
    /// Serialization error bubbled up from the codec
    #[error(transparent)]
    SerError(#[from] SerError),

    /// A multisig threshold must be at least 1 and at most the number of distinct owners.
    #[error("Invalid threshold {threshold} for {owners} distinct owners")]
    InvalidThreshold {
        /// The requested threshold
        threshold: u32,
        /// Number of distinct owners
        owners: usize,
    },

    /// The number of signer sets did not match the number of authorizations.
    #[error("Expected {expected} signer sets, got {got}")]
    SignerCountMismatch {
        /// Authorizations the transaction requires
        expected: usize,
        /// Signer sets supplied
        got: usize,
    },

    /// A signer set for an authorization held no keys.
    #[error("Signer set {index} is empty")]
    EmptySignerSet {
        /// Position of the empty set
        index: usize,
    },

    /// A key failed to sign, or a signature failed to recover.
    #[error(transparent)]
    KeyError(#[from] KeyError),

    /// A dynamic fee needs a base fee.
    #[error("cannot calculate dynamic fee with nil baseFee")]
    NilBaseFee,

    /// The fee does not fit in a u64.
    #[error("overflow occurred while calculating the fee")]
    FeeOverflow,

    /// Summing amounts or gas overflowed a u64.
    #[error("overflow occurred while summing amounts")]
    AmountOverflow,
}

/// Type alias for transaction errors
pub type TxResult<T> = Result<T, TxError>;
