//! Keys for Camino: secp256k1 private and public keys on `k256`, 65-byte recoverable
//! signatures, address derivation for the platform chain and the C-chain, and the
//! `PrivateKey-<cb58>` text format.
//!
//! Signing is always over a 32-byte digest. Transaction signing hashes are produced by
//! `camino-txs`; `sign_message` hashes arbitrary bytes with sha256 first.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Address to key lookup for signing
pub mod keychain;
/// Private keys, public keys and recoverable signatures
pub mod keys;

pub use keychain::Keychain;
pub use keys::{PrivateKey, PublicKey, RecoverableSignature, SIGNATURE_LEN};

use camino_core::{Address, EncodingError};
use thiserror::Error;

/// Errors for key parsing, signing and recovery.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Error bubbled up from the secp256k1 backend. Covers invalid scalars, invalid points and
    /// signing failures.
    #[error(transparent)]
    EcdsaError(#[from] k256::ecdsa::Error),

    /// Key or address text could not be decoded
    #[error(transparent)]
    EncodingError(#[from] EncodingError),

    /// The last byte of a recoverable signature must be a valid recovery ID
    #[error("Invalid recovery ID {0}")]
    InvalidRecoveryId(u8),

    /// The keychain holds no key for this address
    #[error("No key for address {0}")]
    UnknownAddress(Address),

    /// IOError while reading a key file
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
