//! Platform chain transactions. Every variant embeds a `BaseTx`, written first.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, Address, ChainId, SerError, TxId};
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    dac::AddressStateBit,
    types::{
        input::TransferableInput,
        output::TransferableOutput,
        owners::{Auth, Owner},
    },
};

/// Network, chain, inputs, outputs and memo shared by all platform transactions.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseTx {
    /// The network ID
    pub network_id: u32,
    /// The chain the transaction executes on
    pub blockchain_id: ChainId,
    /// Outputs, in canonical order
    pub outs: Vec<TransferableOutput>,
    /// Inputs, in canonical order
    pub ins: Vec<TransferableInput>,
    /// Free-form memo
    pub memo: Vec<u8>,
}

impl ByteFormat for BaseTx {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        let mut len = 4 + 32;
        len += 4 + self.outs.iter().map(|o| o.serialized_length()).sum::<usize>();
        len += 4 + self.ins.iter().map(|i| i.serialized_length()).sum::<usize>();
        len += 4 + self.memo.len();
        len
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            network_id: Self::read_u32_be(reader)?,
            blockchain_id: ChainId::read_from(reader)?,
            outs: Self::read_prefix_vec(reader)?,
            ins: Self::read_prefix_vec(reader)?,
            memo: Self::read_bytes(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, self.network_id)?;
        len += self.blockchain_id.write_to(writer)?;
        len += Self::write_prefix_vec(writer, &self.outs)?;
        len += Self::write_prefix_vec(writer, &self.ins)?;
        len += Self::write_bytes(writer, &self.memo)?;
        Ok(len)
    }
}

/// A multisig alias definition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultisigAlias {
    /// The alias address. Empty when creating a new alias.
    pub id: Address,
    /// Free-form memo
    pub memo: Vec<u8>,
    /// Who controls the alias
    pub owners: Owner,
}

impl ByteFormat for MultisigAlias {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        20 + 4 + self.memo.len() + self.owners.serialized_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            id: Address::read_from(reader)?,
            memo: Self::read_bytes(reader)?,
            owners: Owner::read_from(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = self.id.write_to(writer)?;
        len += Self::write_bytes(writer, &self.memo)?;
        len += self.owners.write_to(writer)?;
        Ok(len)
    }
}

/// Create or update a multisig alias.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultisigAliasTx {
    /// Inputs, outputs and memo
    pub base: BaseTx,
    /// The alias definition
    pub alias: MultisigAlias,
    /// Authorization by the current alias owners. Empty when creating.
    pub auth: Auth,
}

/// Set or clear a state bit of an address.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressStateTx {
    /// Inputs, outputs and memo
    pub base: BaseTx,
    /// The address whose state changes
    pub address: Address,
    /// The bit to change
    pub state: AddressStateBit,
    /// Clear the bit instead of setting it
    pub remove: bool,
    /// The address executing the change
    pub executor: Address,
    /// The executor's authorization
    pub executor_auth: Auth,
}

/// Submit a governance proposal.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddProposalTx {
    /// Inputs, outputs and memo. The outputs hold the proposal bond.
    pub base: BaseTx,
    /// Encoded proposal
    pub proposal_payload: Vec<u8>,
    /// The proposer
    pub proposer_address: Address,
    /// The proposer's authorization
    pub proposer_auth: Auth,
}

/// Vote on a governance proposal.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddVoteTx {
    /// Inputs, outputs and memo
    pub base: BaseTx,
    /// The proposal voted on
    pub proposal_id: TxId,
    /// Encoded vote
    pub vote_payload: Vec<u8>,
    /// The voter
    pub voter_address: Address,
    /// The voter's authorization
    pub voter_auth: Auth,
}

/// An unsigned platform chain transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UnsignedTx {
    /// Plain transfer
    Base(BaseTx),
    /// Multisig alias creation or update
    MultisigAlias(MultisigAliasTx),
    /// Address state change
    AddressState(AddressStateTx),
    /// Proposal submission
    AddProposal(AddProposalTx),
    /// Vote
    AddVote(AddVoteTx),
}

impl UnsignedTx {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            UnsignedTx::Base(_) => codec::BASE_TX,
            UnsignedTx::MultisigAlias(_) => codec::MULTISIG_ALIAS_TX,
            UnsignedTx::AddressState(_) => codec::ADDRESS_STATE_TX,
            UnsignedTx::AddProposal(_) => codec::ADD_PROPOSAL_TX,
            UnsignedTx::AddVote(_) => codec::ADD_VOTE_TX,
        }
    }

    /// The embedded `BaseTx`
    pub fn base(&self) -> &BaseTx {
        match self {
            UnsignedTx::Base(tx) => tx,
            UnsignedTx::MultisigAlias(tx) => &tx.base,
            UnsignedTx::AddressState(tx) => &tx.base,
            UnsignedTx::AddProposal(tx) => &tx.base,
            UnsignedTx::AddVote(tx) => &tx.base,
        }
    }

    /// The trailing authorization after the inputs, if the variant has one
    pub fn trailing_auth(&self) -> Option<&Auth> {
        match self {
            UnsignedTx::Base(_) => None,
            UnsignedTx::MultisigAlias(tx) => Some(&tx.auth),
            UnsignedTx::AddressState(tx) => Some(&tx.executor_auth),
            UnsignedTx::AddProposal(tx) => Some(&tx.proposer_auth),
            UnsignedTx::AddVote(tx) => Some(&tx.voter_auth),
        }
    }

    fn body_length(&self) -> usize {
        let base = self.base().serialized_length();
        match self {
            UnsignedTx::Base(_) => base,
            UnsignedTx::MultisigAlias(tx) => {
                base + tx.alias.serialized_length() + tx.auth.serialized_length()
            }
            UnsignedTx::AddressState(tx) => {
                base + 20 + 1 + 1 + 20 + tx.executor_auth.serialized_length()
            }
            UnsignedTx::AddProposal(tx) => {
                base + 4 + tx.proposal_payload.len() + 20 + tx.proposer_auth.serialized_length()
            }
            UnsignedTx::AddVote(tx) => {
                base + 32 + 4 + tx.vote_payload.len() + 20 + tx.voter_auth.serialized_length()
            }
        }
    }
}

impl ByteFormat for UnsignedTx {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        2 + 4 + self.body_length()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Self::read_codec_version(reader)?;
        let tx = match Self::read_u32_be(reader)? {
            codec::BASE_TX => UnsignedTx::Base(BaseTx::read_from(reader)?),
            codec::MULTISIG_ALIAS_TX => UnsignedTx::MultisigAlias(MultisigAliasTx {
                base: BaseTx::read_from(reader)?,
                alias: MultisigAlias::read_from(reader)?,
                auth: Auth::read_from(reader)?,
            }),
            codec::ADDRESS_STATE_TX => UnsignedTx::AddressState(AddressStateTx {
                base: BaseTx::read_from(reader)?,
                address: Address::read_from(reader)?,
                state: AddressStateBit(Self::read_u8(reader)?),
                remove: Self::read_bool(reader)?,
                executor: Address::read_from(reader)?,
                executor_auth: Auth::read_from(reader)?,
            }),
            codec::ADD_PROPOSAL_TX => UnsignedTx::AddProposal(AddProposalTx {
                base: BaseTx::read_from(reader)?,
                proposal_payload: Self::read_bytes(reader)?,
                proposer_address: Address::read_from(reader)?,
                proposer_auth: Auth::read_from(reader)?,
            }),
            codec::ADD_VOTE_TX => UnsignedTx::AddVote(AddVoteTx {
                base: BaseTx::read_from(reader)?,
                proposal_id: TxId::read_from(reader)?,
                vote_payload: Self::read_bytes(reader)?,
                voter_address: Address::read_from(reader)?,
                voter_auth: Auth::read_from(reader)?,
            }),
            type_id => {
                return Err(SerError::UnknownTypeId {
                    type_id,
                    context: "platform tx",
                })
            }
        };
        Ok(tx)
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u16_be(writer, camino_core::ser::CODEC_VERSION)?;
        len += Self::write_u32_be(writer, self.type_id())?;
        len += self.base().write_to(writer)?;
        match self {
            UnsignedTx::Base(_) => {}
            UnsignedTx::MultisigAlias(tx) => {
                len += tx.alias.write_to(writer)?;
                len += tx.auth.write_to(writer)?;
            }
            UnsignedTx::AddressState(tx) => {
                len += tx.address.write_to(writer)?;
                len += Self::write_u8(writer, tx.state.into())?;
                len += Self::write_bool(writer, tx.remove)?;
                len += tx.executor.write_to(writer)?;
                len += tx.executor_auth.write_to(writer)?;
            }
            UnsignedTx::AddProposal(tx) => {
                len += Self::write_bytes(writer, &tx.proposal_payload)?;
                len += tx.proposer_address.write_to(writer)?;
                len += tx.proposer_auth.write_to(writer)?;
            }
            UnsignedTx::AddVote(tx) => {
                len += tx.proposal_id.write_to(writer)?;
                len += Self::write_bytes(writer, &tx.vote_payload)?;
                len += tx.voter_address.write_to(writer)?;
                len += tx.voter_auth.write_to(writer)?;
            }
        }
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{owners::OutputOwners, utxo::UtxoId};
    use camino_core::AssetId;
    use pretty_assertions::assert_eq;

    fn base() -> BaseTx {
        BaseTx {
            network_id: 1002,
            blockchain_id: ChainId::default(),
            outs: vec![TransferableOutput::pay(
                AssetId::new([1; 32]),
                10,
                Address::new([2; 20]),
            )],
            ins: vec![TransferableInput::transfer(
                UtxoId::new(TxId::new([3; 32]), 0),
                AssetId::new([1; 32]),
                20,
                vec![0],
            )],
            memo: b"memo".to_vec(),
        }
    }

    fn round_trip(tx: UnsignedTx) {
        let bytes = tx.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), tx.serialized_length());
        assert_eq!(&bytes[..2], &[0, 0]);
        assert_eq!(u32::deserialize_bytes(&bytes[2..6]).unwrap(), tx.type_id());
        assert_eq!(UnsignedTx::deserialize_bytes(&bytes).unwrap(), tx);
    }

    #[test]
    fn it_round_trips_every_variant() {
        round_trip(UnsignedTx::Base(base()));
        round_trip(UnsignedTx::MultisigAlias(MultisigAliasTx {
            base: base(),
            alias: MultisigAlias {
                id: Address::default(),
                memo: vec![],
                owners: Owner::Threshold(OutputOwners::new(
                    0,
                    2,
                    vec![Address::new([4; 20]), Address::new([5; 20])],
                )),
            },
            auth: Auth::default(),
        }));
        round_trip(UnsignedTx::AddressState(AddressStateTx {
            base: base(),
            address: Address::new([6; 20]),
            state: AddressStateBit::KYC_VERIFIED,
            remove: true,
            executor: Address::new([7; 20]),
            executor_auth: Auth::single(),
        }));
        round_trip(UnsignedTx::AddProposal(AddProposalTx {
            base: base(),
            proposal_payload: vec![0, 0, 0x20, 0x12],
            proposer_address: Address::new([8; 20]),
            proposer_auth: Auth::single(),
        }));
        round_trip(UnsignedTx::AddVote(AddVoteTx {
            base: base(),
            proposal_id: TxId::new([9; 32]),
            vote_payload: vec![0, 0, 0, 0, 0x20, 0x13, 0, 0, 0, 1],
            voter_address: Address::new([10; 20]),
            voter_auth: Auth::single(),
        }));
    }

    #[test]
    fn it_writes_address_state_fields_without_a_version_prefix() {
        let tx = UnsignedTx::AddressState(AddressStateTx {
            base: BaseTx::default(),
            address: Address::new([0xaa; 20]),
            state: AddressStateBit::CONSORTIUM,
            remove: false,
            executor: Address::new([0xbb; 20]),
            executor_auth: Auth::single(),
        });
        let bytes = tx.serialize_bytes().unwrap();
        let body = &bytes[6 + BaseTx::default().serialized_length()..];
        assert_eq!(&body[..20], &[0xaa; 20]);
        assert_eq!(body[20], 38);
        assert_eq!(body[21], 0);
        assert_eq!(&body[22..42], &[0xbb; 20]);
        assert_eq!(hex::encode(&body[42..]), "0000000a0000000100000000");
    }

    #[test]
    fn it_rejects_unknown_tx_types() {
        let mut bytes = UnsignedTx::Base(BaseTx::default()).serialize_bytes().unwrap();
        bytes[5] = 0x99;
        match UnsignedTx::deserialize_bytes(&bytes) {
            Err(SerError::UnknownTypeId { type_id, .. }) => assert_eq!(type_id, 0x2099),
            e => panic!("expected UnknownTypeId, got {:?}", e),
        }
    }
}
