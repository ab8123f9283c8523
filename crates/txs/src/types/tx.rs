//! Signed transactions: an unsigned body followed by one credential per authorization.

use std::{
    fmt::Debug,
    io::{Read, Write},
};

use camino_core::{
    hashes::Sha256Writer, impl_hex_serde, ser::ByteFormat, Address, SerError, SerResult, TxId,
};

use crate::{
    error::TxResult,
    types::{atomic::UnsignedAtomicTx, credential::Credential, platform::UnsignedTx},
};

/// An unsigned transaction that can be signed.
pub trait UnsignedTransaction: ByteFormat<Error = SerError> + Clone + Debug + PartialEq {
    /// Number of credentials a signed transaction carries: one per input, plus one for a
    /// trailing authorization that carries signatures.
    fn authorization_count(&self) -> usize;

    /// The digest every signer signs: sha256 of the unsigned bytes.
    fn signing_hash(&self) -> SerResult<[u8; 32]> {
        let mut w = Sha256Writer::default();
        self.write_to(&mut w)?;
        Ok(w.finish())
    }
}

impl UnsignedTransaction for UnsignedTx {
    fn authorization_count(&self) -> usize {
        let trailing = self
            .trailing_auth()
            .map(|auth| auth.needs_credential() as usize)
            .unwrap_or(0);
        self.base().ins.len() + trailing
    }
}

impl UnsignedTransaction for UnsignedAtomicTx {
    fn authorization_count(&self) -> usize {
        match self {
            UnsignedAtomicTx::Export(tx) => tx.ins.len(),
        }
    }
}

/// A signed transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tx<U> {
    /// The signed body
    pub unsigned: U,
    /// One credential per authorization, in order
    pub credentials: Vec<Credential>,
}

/// A signed platform chain transaction
pub type SignedTx = Tx<UnsignedTx>;

/// A signed C-chain atomic transaction
pub type AtomicTx = Tx<UnsignedAtomicTx>;

impl<U: UnsignedTransaction> Tx<U> {
    /// The transaction ID: sha256 of the signed bytes.
    pub fn id(&self) -> SerResult<TxId> {
        let mut w = Sha256Writer::default();
        self.write_to(&mut w)?;
        Ok(w.finish_marked())
    }

    /// The unsigned body's bytes
    pub fn unsigned_bytes(&self) -> SerResult<Vec<u8>> {
        self.unsigned.serialize_bytes()
    }

    /// The full signed bytes, as submitted to a node
    pub fn signed_bytes(&self) -> SerResult<Vec<u8>> {
        self.serialize_bytes()
    }

    /// Recover the signing addresses of every credential, in credential order.
    pub fn verify_signatures(&self) -> TxResult<Vec<Vec<Address>>> {
        let hash = self.unsigned.signing_hash()?;
        self.credentials
            .iter()
            .map(|cred| -> TxResult<Vec<Address>> {
                let addrs = cred
                    .sigs
                    .iter()
                    .map(|sig| sig.recover(&hash).map(|key| key.address()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(addrs)
            })
            .collect()
    }
}

impl<U: UnsignedTransaction> ByteFormat for Tx<U> {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        self.unsigned.serialized_length()
            + 4
            + self
                .credentials
                .iter()
                .map(|c| c.serialized_length())
                .sum::<usize>()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            unsigned: U::read_from(reader)?,
            credentials: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.unsigned.write_to(writer)?;
        len += Self::write_prefix_vec(writer, &self.credentials)?;
        Ok(len)
    }
}

impl_hex_serde!(SignedTx);
impl_hex_serde!(AtomicTx);
