//! Transaction outputs: an asset and an interface-typed output body.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, Address, AssetId, SerError};
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    types::{owners::OutputOwners, utxo::LockIds},
};

/// Pay `amount` to `owners`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransferOutput {
    /// Amount paid
    pub amount: u64,
    /// Who may spend it
    pub owners: OutputOwners,
}

impl ByteFormat for TransferOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8 + self.owners.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            amount: Self::read_u64_be(reader)?,
            owners: OutputOwners::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u64_be(writer, self.amount)?;
        len += self.owners.write_to(writer)?;
        Ok(len)
    }
}

/// A transfer output that stays deposited or bonded.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LockedOut {
    /// The locks on the created UTXO
    pub lock_ids: LockIds,
    /// The wrapped transfer output
    pub transfer_output: TransferOutput,
}

impl ByteFormat for LockedOut {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        64 + 4 + self.transfer_output.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        let lock_ids = LockIds::read_from(reader)?;
        codec::check_type_id(Self::read_u32_be(reader)?, codec::TRANSFER_OUTPUT, "locked output")?;
        Ok(Self {
            lock_ids,
            transfer_output: TransferOutput::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.lock_ids.write_to(writer)?;
        len += Self::write_u32_be(writer, codec::TRANSFER_OUTPUT)?;
        len += self.transfer_output.write_to(writer)?;
        Ok(len)
    }
}

/// The interface-typed output body.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// Unlocked transfer
    Transfer(TransferOutput),
    /// Locked transfer
    Locked(LockedOut),
}

impl OutputKind {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            OutputKind::Transfer(_) => codec::TRANSFER_OUTPUT,
            OutputKind::Locked(_) => codec::LOCKED_OUT,
        }
    }

    /// The underlying transfer output
    pub fn transfer_output(&self) -> &TransferOutput {
        match self {
            OutputKind::Transfer(t) => t,
            OutputKind::Locked(l) => &l.transfer_output,
        }
    }

    /// Amount paid
    pub fn amount(&self) -> u64 {
        self.transfer_output().amount
    }
}

impl ByteFormat for OutputKind {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + match self {
            OutputKind::Transfer(t) => t.serialized_length(),
            OutputKind::Locked(l) => l.serialized_length(),
        }
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        match Self::read_u32_be(reader)? {
            codec::TRANSFER_OUTPUT => Ok(OutputKind::Transfer(TransferOutput::read_from(reader)?)),
            codec::LOCKED_OUT => Ok(OutputKind::Locked(LockedOut::read_from(reader)?)),
            type_id => Err(SerError::UnknownTypeId {
                type_id,
                context: "output",
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
                OutputKind::Transfer(t) => t.write_to(writer)?,
                OutputKind::Locked(l) => l.write_to(writer)?,
            })
    }
}

/// An output of a platform or atomic transaction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransferableOutput {
    /// The asset paid
    pub asset_id: AssetId,
    /// The output body
    pub output: OutputKind,
}

impl TransferableOutput {
    /// An unlocked output paying `amount` to a single address.
    pub fn pay(asset_id: AssetId, amount: u64, recipient: Address) -> Self {
        Self {
            asset_id,
            output: OutputKind::Transfer(TransferOutput {
                amount,
                owners: OutputOwners::single(recipient),
            }),
        }
    }

    /// Amount paid
    pub fn amount(&self) -> u64 {
        self.output.amount()
    }
}

impl ByteFormat for TransferableOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        32 + self.output.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            asset_id: AssetId::read_from(reader)?,
            output: OutputKind::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.asset_id.write_to(writer)?;
        len += self.output.write_to(writer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_serializes_transfer_outputs() {
        let recipient: Address = "7Sdex3LTEjsnswW38Eb48hQ9insctGrsN".parse().unwrap();
        let asset = AssetId::new([0x59; 32]);
        let output = TransferableOutput::pay(asset, 3_999_990_000_000, recipient);
        let bytes = output.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), output.serialized_length());
        assert_eq!(
            hex::encode(&bytes[32..]),
            "00000007000003a351fba9800000000000000000000000010000000146a9c04f4bf783aa69daabd519dcf36978168b66"
        );
        assert_eq!(TransferableOutput::deserialize_bytes(&bytes).unwrap(), output);
    }

    #[test]
    fn it_serializes_locked_outputs() {
        let output = TransferableOutput {
            asset_id: AssetId::new([1; 32]),
            output: OutputKind::Locked(LockedOut {
                lock_ids: LockIds::default(),
                transfer_output: TransferOutput {
                    amount: 9,
                    owners: OutputOwners::single(Address::new([2; 20])),
                },
            }),
        };
        let bytes = output.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), output.serialized_length());
        assert_eq!(hex::encode(&bytes[32..36]), "0000200b");
        assert_eq!(output.amount(), 9);
        assert_eq!(TransferableOutput::deserialize_bytes(&bytes).unwrap(), output);
    }
}
