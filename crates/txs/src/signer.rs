//! Attach credentials to an unsigned transaction.

use camino_keys::PrivateKey;

use crate::{
    error::{TxError, TxResult},
    types::{Credential, Tx, UnsignedTransaction},
};

/// The keys signing each authorization, in authorization order.
pub type SignerSet<'a> = Vec<Vec<&'a PrivateKey>>;

/// Sign `unsigned` with one key list per authorization.
///
/// Each key signs the transaction's signing hash, and its signature is placed in the
/// authorization's credential in key-list order. Signing is deterministic.
pub fn sign<U>(unsigned: U, signers: &[Vec<&PrivateKey>]) -> TxResult<Tx<U>>
where
    U: UnsignedTransaction,
{
    let expected = unsigned.authorization_count();
    if signers.len() != expected {
        return Err(TxError::SignerCountMismatch {
            expected,
            got: signers.len(),
        });
    }
    if let Some(index) = signers.iter().position(|keys| keys.is_empty()) {
        return Err(TxError::EmptySignerSet { index });
    }

    let hash = unsigned.signing_hash()?;
    let credentials = signers
        .iter()
        .map(|keys| -> TxResult<Credential> {
            let sigs = keys
                .iter()
                .map(|key| key.sign_hash(&hash))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Credential { sigs })
        })
        .collect::<TxResult<Vec<_>>>()?;

    Ok(Tx {
        unsigned,
        credentials,
    })
}
