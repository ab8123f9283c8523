//! UTXO references and the lock model shared by locked inputs and outputs.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, SerError, TxId};
use serde::{Deserialize, Serialize};

/// A reference to a transaction output: the creating transaction and the output's index.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtxoId {
    /// The ID of the transaction that created the output
    pub tx_id: TxId,
    /// The index of the output in that transaction
    pub output_index: u32,
}

impl UtxoId {
    /// Instantiate a new UtxoId
    pub fn new(tx_id: TxId, output_index: u32) -> Self {
        Self { tx_id, output_index }
    }
}

impl ByteFormat for UtxoId {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        36
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            tx_id: TxId::read_from(reader)?,
            output_index: Self::read_u32_be(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.tx_id.write_to(writer)?;
        len += Self::write_u32_be(writer, self.output_index)?;
        Ok(len)
    }
}

/// The deposit and bond that lock a UTXO. An empty ID means "not locked that way".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LockIds {
    /// The deposit transaction, if deposited
    pub deposit_tx_id: TxId,
    /// The bonding transaction, if bonded
    pub bond_tx_id: TxId,
}

impl LockIds {
    /// The lock state these IDs describe
    pub fn state(&self) -> LockState {
        match (self.deposit_tx_id.is_empty(), self.bond_tx_id.is_empty()) {
            (true, true) => LockState::Unlocked,
            (false, true) => LockState::Deposited,
            (true, false) => LockState::Bonded,
            (false, false) => LockState::DepositedBonded,
        }
    }
}

impl ByteFormat for LockIds {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        64
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            deposit_tx_id: TxId::read_from(reader)?,
            bond_tx_id: TxId::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.deposit_tx_id.write_to(writer)?;
        len += self.bond_tx_id.write_to(writer)?;
        Ok(len)
    }
}

/// Lock states of a UTXO. Also the lock mode requested when asking the node to spend.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LockState {
    /// Freely spendable
    Unlocked = 0,
    /// Locked by a deposit
    Deposited = 1,
    /// Locked by a bond
    Bonded = 2,
    /// Locked by both
    DepositedBonded = 3,
}

impl From<LockState> for u8 {
    fn from(state: LockState) -> Self {
        state as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_serializes_utxo_ids() {
        let id = UtxoId::new(TxId::new([1; 32]), 2);
        let bytes = id.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), id.serialized_length());
        assert_eq!(hex::encode(&bytes[32..]), "00000002");
        assert_eq!(UtxoId::deserialize_bytes(&bytes).unwrap(), id);
    }

    #[test]
    fn it_derives_lock_states() {
        let mut ids = LockIds::default();
        assert_eq!(ids.state(), LockState::Unlocked);
        ids.bond_tx_id = TxId::new([1; 32]);
        assert_eq!(ids.state(), LockState::Bonded);
        ids.deposit_tx_id = TxId::new([2; 32]);
        assert_eq!(ids.state(), LockState::DepositedBonded);
        ids.bond_tx_id = TxId::default();
        assert_eq!(ids.state(), LockState::Deposited);
        assert_eq!(u8::from(LockState::DepositedBonded), 3);
    }
}
