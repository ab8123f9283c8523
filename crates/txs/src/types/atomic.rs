//! C-chain atomic transactions.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, AssetId, ChainId, EthAddress, SerError};
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    error::{TxError, TxResult},
    fee::{ATOMIC_TX_BASE_COST, COST_PER_SIGNATURE, TX_BYTES_GAS},
    types::output::TransferableOutput,
};

/// Funds taken from a C-chain account.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EvmInput {
    /// The funding account
    pub address: EthAddress,
    /// Amount taken, in the platform's denomination
    pub amount: u64,
    /// The asset taken
    pub asset_id: AssetId,
    /// The account's nonce
    pub nonce: u64,
}

impl ByteFormat for EvmInput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        20 + 8 + 32 + 8
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            address: EthAddress::read_from(reader)?,
            amount: Self::read_u64_be(reader)?,
            asset_id: AssetId::read_from(reader)?,
            nonce: Self::read_u64_be(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.address.write_to(writer)?;
        len += Self::write_u64_be(writer, self.amount)?;
        len += self.asset_id.write_to(writer)?;
        len += Self::write_u64_be(writer, self.nonce)?;
        Ok(len)
    }
}

/// Move funds from the C-chain into the shared memory of `destination_chain`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnsignedExportTx {
    /// The network ID
    pub network_id: u32,
    /// The C-chain ID
    pub blockchain_id: ChainId,
    /// The chain receiving the funds
    pub destination_chain: ChainId,
    /// Funding accounts, sorted by address then asset
    pub ins: Vec<EvmInput>,
    /// Outputs placed in shared memory, in canonical order
    pub exported_outputs: Vec<TransferableOutput>,
}

impl UnsignedExportTx {
    /// Gas consumed: one per unsigned byte plus one signature per input, plus the fixed atomic
    /// cost when `fixed_fee` is set.
    pub fn gas_used(&self, fixed_fee: bool) -> TxResult<u64> {
        let unsigned_len = (2 + 4 + self.serialized_length()) as u64;
        let mut gas = unsigned_len
            .checked_mul(TX_BYTES_GAS)
            .ok_or(TxError::AmountOverflow)?;
        let sig_gas = (self.ins.len() as u64)
            .checked_mul(COST_PER_SIGNATURE)
            .ok_or(TxError::AmountOverflow)?;
        gas = gas.checked_add(sig_gas).ok_or(TxError::AmountOverflow)?;
        if fixed_fee {
            gas = gas
                .checked_add(ATOMIC_TX_BASE_COST)
                .ok_or(TxError::AmountOverflow)?;
        }
        Ok(gas)
    }
}

impl ByteFormat for UnsignedExportTx {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + 32
            + 32
            + 4
            + 68 * self.ins.len()
            + 4
            + self
                .exported_outputs
                .iter()
                .map(|o| o.serialized_length())
                .sum::<usize>()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            network_id: Self::read_u32_be(reader)?,
            blockchain_id: ChainId::read_from(reader)?,
            destination_chain: ChainId::read_from(reader)?,
            ins: Self::read_prefix_vec(reader)?,
            exported_outputs: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, self.network_id)?;
        len += self.blockchain_id.write_to(writer)?;
        len += self.destination_chain.write_to(writer)?;
        len += Self::write_prefix_vec(writer, &self.ins)?;
        len += Self::write_prefix_vec(writer, &self.exported_outputs)?;
        Ok(len)
    }
}

/// An unsigned C-chain atomic transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UnsignedAtomicTx {
    /// Export from the C-chain
    Export(UnsignedExportTx),
}

impl UnsignedAtomicTx {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            UnsignedAtomicTx::Export(_) => codec::UNSIGNED_EXPORT_TX,
        }
    }
}

impl ByteFormat for UnsignedAtomicTx {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        2 + 4 + match self {
            UnsignedAtomicTx::Export(tx) => tx.serialized_length(),
        }
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Self::read_codec_version(reader)?;
        match Self::read_u32_be(reader)? {
            codec::UNSIGNED_EXPORT_TX => Ok(UnsignedAtomicTx::Export(UnsignedExportTx::read_from(reader)?)),
            type_id => Err(SerError::UnknownTypeId {
                type_id,
                context: "atomic tx",
            }),
        }
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u16_be(writer, camino_core::ser::CODEC_VERSION)?;
        len += Self::write_u32_be(writer, self.type_id())?;
        len += match self {
            UnsignedAtomicTx::Export(tx) => tx.write_to(writer)?,
        };
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use camino_core::Address;

    fn export() -> UnsignedExportTx {
        UnsignedExportTx {
            network_id: 1002,
            blockchain_id: ChainId::new([1; 32]),
            destination_chain: ChainId::default(),
            ins: vec![EvmInput {
                address: EthAddress::new([2; 20]),
                amount: 1_000_000,
                asset_id: AssetId::new([3; 32]),
                nonce: 7,
            }],
            exported_outputs: vec![TransferableOutput::pay(
                AssetId::new([3; 32]),
                900_000,
                Address::new([4; 20]),
            )],
        }
    }

    #[test]
    fn it_round_trips_exports() {
        let tx = UnsignedAtomicTx::Export(export());
        let bytes = tx.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), tx.serialized_length());
        assert_eq!(hex::encode(&bytes[..6]), "000000000001");
        assert_eq!(UnsignedAtomicTx::deserialize_bytes(&bytes).unwrap(), tx);
    }

    #[test]
    fn it_measures_gas() {
        let tx = export();
        let unsigned_len = UnsignedAtomicTx::Export(tx.clone())
            .serialized_length() as u64;
        assert_eq!(tx.gas_used(false).unwrap(), unsigned_len + 1000);
        assert_eq!(tx.gas_used(true).unwrap(), unsigned_len + 1000 + 10_000);

        let mut empty = tx;
        empty.ins.clear();
        assert_eq!(empty.gas_used(true).unwrap(), unsigned_len - 68 + 10_000);
    }
}
