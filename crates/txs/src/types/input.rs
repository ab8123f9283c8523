//! Transaction inputs: a UTXO reference, its asset, and the spend authorization.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, AssetId, SerError};
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    types::utxo::{LockIds, UtxoId},
};

/// Spend `amount` from an output, authorized by the owners at `sig_indices`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransferInput {
    /// Amount consumed
    pub amount: u64,
    /// Indices of the signing owners, ascending
    pub sig_indices: Vec<u32>,
}

impl ByteFormat for TransferInput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8 + 4 + 4 * self.sig_indices.len()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            amount: Self::read_u64_be(reader)?,
            sig_indices: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u64_be(writer, self.amount)?;
        len += Self::write_prefix_vec(writer, &self.sig_indices)?;
        Ok(len)
    }
}

/// A transfer input spending a deposited or bonded UTXO.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LockedIn {
    /// The locks on the spent UTXO
    pub lock_ids: LockIds,
    /// The wrapped transfer input
    pub transfer_input: TransferInput,
}

impl ByteFormat for LockedIn {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        64 + 4 + self.transfer_input.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        let lock_ids = LockIds::read_from(reader)?;
        codec::check_type_id(Self::read_u32_be(reader)?, codec::TRANSFER_INPUT, "locked input")?;
        Ok(Self {
            lock_ids,
            transfer_input: TransferInput::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.lock_ids.write_to(writer)?;
        len += Self::write_u32_be(writer, codec::TRANSFER_INPUT)?;
        len += self.transfer_input.write_to(writer)?;
        Ok(len)
    }
}

/// The interface-typed input body.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    /// Unlocked transfer
    Transfer(TransferInput),
    /// Locked transfer
    Locked(LockedIn),
}

impl InputKind {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            InputKind::Transfer(_) => codec::TRANSFER_INPUT,
            InputKind::Locked(_) => codec::LOCKED_IN,
        }
    }

    /// The underlying transfer input
    pub fn transfer_input(&self) -> &TransferInput {
        match self {
            InputKind::Transfer(t) => t,
            InputKind::Locked(l) => &l.transfer_input,
        }
    }

    /// Amount consumed
    pub fn amount(&self) -> u64 {
        self.transfer_input().amount
    }
}

impl ByteFormat for InputKind {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + match self {
            InputKind::Transfer(t) => t.serialized_length(),
            InputKind::Locked(l) => l.serialized_length(),
        }
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        match Self::read_u32_be(reader)? {
            codec::TRANSFER_INPUT => Ok(InputKind::Transfer(TransferInput::read_from(reader)?)),
            codec::LOCKED_IN => Ok(InputKind::Locked(LockedIn::read_from(reader)?)),
            type_id => Err(SerError::UnknownTypeId {
                type_id,
                context: "input",
            }),
        }
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let len = Self::write_u32_be(writer, self.type_id())?;
        Ok(len
            + match self {
                InputKind::Transfer(t) => t.write_to(writer)?,
                InputKind::Locked(l) => l.write_to(writer)?,
            })
    }
}

/// An input of a platform or atomic transaction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransferableInput {
    /// The spent UTXO
    pub utxo_id: UtxoId,
    /// The asset of the spent UTXO
    pub asset_id: AssetId,
    /// The spend authorization
    pub input: InputKind,
}

impl TransferableInput {
    /// An unlocked transfer input
    pub fn transfer(utxo_id: UtxoId, asset_id: AssetId, amount: u64, sig_indices: Vec<u32>) -> Self {
        Self {
            utxo_id,
            asset_id,
            input: InputKind::Transfer(TransferInput {
                amount,
                sig_indices,
            }),
        }
    }

    /// Amount consumed
    pub fn amount(&self) -> u64 {
        self.input.amount()
    }
}

impl ByteFormat for TransferableInput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        self.utxo_id.serialized_length() + 32 + self.input.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            utxo_id: UtxoId::read_from(reader)?,
            asset_id: AssetId::read_from(reader)?,
            input: InputKind::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.utxo_id.write_to(writer)?;
        len += self.asset_id.write_to(writer)?;
        len += self.input.write_to(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use camino_core::TxId;

    #[test]
    fn it_serializes_transfer_inputs() {
        let input = TransferableInput::transfer(
            UtxoId::new(TxId::new([0x11; 32]), 3),
            AssetId::new([0x22; 32]),
            1000,
            vec![0],
        );
        let bytes = input.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), input.serialized_length());
        assert_eq!(hex::encode(&bytes[32..36]), "00000003");
        assert_eq!(hex::encode(&bytes[36..68]), "22".repeat(32));
        assert_eq!(
            hex::encode(&bytes[68..]),
            "0000000500000000000003e80000000100000000"
        );
        assert_eq!(TransferableInput::deserialize_bytes(&bytes).unwrap(), input);
    }

    #[test]
    fn it_serializes_locked_inputs() {
        let input = TransferableInput {
            utxo_id: UtxoId::new(TxId::new([0x11; 32]), 0),
            asset_id: AssetId::new([0x22; 32]),
            input: InputKind::Locked(LockedIn {
                lock_ids: LockIds {
                    deposit_tx_id: TxId::new([0x33; 32]),
                    bond_tx_id: TxId::default(),
                },
                transfer_input: TransferInput {
                    amount: 5,
                    sig_indices: vec![0, 1],
                },
            }),
        };
        let bytes = input.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), input.serialized_length());
        assert_eq!(hex::encode(&bytes[68..72]), "0000200a");
        assert_eq!(hex::encode(&bytes[136..140]), "00000005");
        assert_eq!(input.amount(), 5);
        assert_eq!(TransferableInput::deserialize_bytes(&bytes).unwrap(), input);
    }
}
