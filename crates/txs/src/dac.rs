//! Governance payloads: address state bits, typed proposals and votes.
//!
//! Proposal and vote payloads travel inside `AddProposalTx` and `AddVoteTx` as opaque byte
//! strings. Each is its own codec envelope: the codec version, the payload's type ID, then its
//! fields.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, Address, SerError, SerResult};
use serde::{Deserialize, Serialize};

use crate::codec;

/// A bit of an address's on-chain state. Written as a single byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AddressStateBit(pub u8);

impl AddressStateBit {
    /// May change any address's roles
    pub const ROLE_ADMIN: Self = Self(0);
    /// May set KYC states
    pub const ROLE_KYC: Self = Self(1);
    /// May grant the offers creator state
    pub const ROLE_OFFERS_ADMIN: Self = Self(2);
    /// KYC verified
    pub const KYC_VERIFIED: Self = Self(32);
    /// KYC expired
    pub const KYC_EXPIRED: Self = Self(33);
    /// Consortium member
    pub const CONSORTIUM: Self = Self(38);
    /// The member's node is deferred
    pub const NODE_DEFERRED: Self = Self(39);
    /// May create deposit offers
    pub const OFFERS_CREATOR: Self = Self(50);
    /// May submit governance proposals
    pub const CAMINO_PROPOSER: Self = Self(51);

    /// The bit as a state mask
    pub fn mask(&self) -> u64 {
        1u64 << self.0
    }
}

impl From<AddressStateBit> for u8 {
    fn from(bit: AddressStateBit) -> Self {
        bit.0
    }
}

/// Change the base fee. Voters pick one of `options`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseFeeProposal {
    /// Voting start, unix seconds
    pub start: u64,
    /// Voting end, unix seconds
    pub end: u64,
    /// Candidate fees
    pub options: Vec<u64>,
}

/// Admit `applicant` to the consortium.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddMemberProposal {
    /// The applicant
    pub applicant: Address,
    /// Voting start, unix seconds
    pub start: u64,
    /// Voting end, unix seconds
    pub end: u64,
}

/// Exclude `member` from the consortium.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExcludeMemberProposal {
    /// The member to exclude
    pub member: Address,
    /// Voting start, unix seconds
    pub start: u64,
    /// Voting end, unix seconds
    pub end: u64,
}

/// A proposal an admin executes directly, choosing `option_index` of the inner proposal.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdminProposal {
    /// The chosen option of the inner proposal
    pub option_index: u32,
    /// The wrapped proposal
    pub proposal: Box<Proposal>,
}

/// A governance proposal.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Proposal {
    /// Base fee change
    BaseFee(BaseFeeProposal),
    /// Member admission
    AddMember(AddMemberProposal),
    /// Member exclusion
    ExcludeMember(ExcludeMemberProposal),
    /// Admin execution
    Admin(AdminProposal),
}

impl Proposal {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            Proposal::BaseFee(_) => codec::BASE_FEE_PROPOSAL,
            Proposal::AddMember(_) => codec::ADD_MEMBER_PROPOSAL,
            Proposal::ExcludeMember(_) => codec::EXCLUDE_MEMBER_PROPOSAL,
            Proposal::Admin(_) => codec::ADMIN_PROPOSAL,
        }
    }

    /// Encode as a proposal payload: codec version, type ID, fields.
    pub fn to_payload(&self) -> SerResult<Vec<u8>> {
        let mut payload = Vec::with_capacity(2 + self.serialized_length());
        Self::write_u16_be(&mut payload, camino_core::ser::CODEC_VERSION)?;
        self.write_to(&mut payload)?;
        Ok(payload)
    }

    /// Decode a proposal payload.
    pub fn from_payload(payload: &[u8]) -> SerResult<Self> {
        let mut reader = payload;
        Self::read_codec_version(&mut reader)?;
        let proposal = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(SerError::TrailingBytes(reader.len()));
        }
        Ok(proposal)
    }

    fn read_inner<R: Read>(reader: &mut R, type_id: u32) -> SerResult<Self> {
        match type_id {
            codec::BASE_FEE_PROPOSAL => {
                let start = Self::read_u64_be(reader)?;
                let end = Self::read_u64_be(reader)?;
                let len = Self::read_len_prefix(reader)?;
                let options = (0..len)
                    .map(|_| Self::read_u64_be(reader))
                    .collect::<SerResult<_>>()?;
                Ok(Proposal::BaseFee(BaseFeeProposal {
                    start,
                    end,
                    options,
                }))
            }
            codec::ADD_MEMBER_PROPOSAL => Ok(Proposal::AddMember(AddMemberProposal {
                applicant: Address::read_from(reader)?,
                start: Self::read_u64_be(reader)?,
                end: Self::read_u64_be(reader)?,
            })),
            codec::EXCLUDE_MEMBER_PROPOSAL => Ok(Proposal::ExcludeMember(ExcludeMemberProposal {
                member: Address::read_from(reader)?,
                start: Self::read_u64_be(reader)?,
                end: Self::read_u64_be(reader)?,
            })),
            type_id => Err(SerError::UnknownTypeId {
                type_id,
                context: "proposal",
            }),
        }
    }
}

impl ByteFormat for Proposal {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + match self {
            Proposal::BaseFee(p) => 16 + 4 + 8 * p.options.len(),
            Proposal::AddMember(_) | Proposal::ExcludeMember(_) => 20 + 16,
            Proposal::Admin(p) => 4 + p.proposal.serialized_length(),
        }
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        match Self::read_u32_be(reader)? {
            codec::ADMIN_PROPOSAL => {
                let option_index = Self::read_u32_be(reader)?;
                // Admin proposals wrap exactly one level.
                let proposal = match Self::read_u32_be(reader)? {
                    codec::ADMIN_PROPOSAL => {
                        return Err(SerError::UnknownTypeId {
                            type_id: codec::ADMIN_PROPOSAL,
                            context: "admin proposal",
                        })
                    }
                    type_id => Proposal::read_inner(reader, type_id)?,
                };
                Ok(Proposal::Admin(AdminProposal {
                    option_index,
                    proposal: Box::new(proposal),
                }))
            }
            type_id => Proposal::read_inner(reader, type_id),
        }
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, self.type_id())?;
        match self {
            Proposal::BaseFee(p) => {
                len += Self::write_u64_be(writer, p.start)?;
                len += Self::write_u64_be(writer, p.end)?;
                len += Self::write_len_prefix(writer, p.options.len())?;
                for option in p.options.iter() {
                    len += Self::write_u64_be(writer, *option)?;
                }
            }
            Proposal::AddMember(p) => {
                len += p.applicant.write_to(writer)?;
                len += Self::write_u64_be(writer, p.start)?;
                len += Self::write_u64_be(writer, p.end)?;
            }
            Proposal::ExcludeMember(p) => {
                len += p.member.write_to(writer)?;
                len += Self::write_u64_be(writer, p.start)?;
                len += Self::write_u64_be(writer, p.end)?;
            }
            Proposal::Admin(p) => {
                len += Self::write_u32_be(writer, p.option_index)?;
                len += p.proposal.write_to(writer)?;
            }
        }
        Ok(len)
    }
}

/// A vote for one option of a proposal.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimpleVote {
    /// The chosen option
    pub option_index: u32,
}

impl SimpleVote {
    /// Encode as a vote payload: codec version, type ID, option index.
    pub fn to_payload(&self) -> SerResult<Vec<u8>> {
        let mut payload = Vec::with_capacity(10);
        Self::write_u16_be(&mut payload, camino_core::ser::CODEC_VERSION)?;
        self.write_to(&mut payload)?;
        Ok(payload)
    }

    /// Decode a vote payload.
    pub fn from_payload(payload: &[u8]) -> SerResult<Self> {
        let mut reader = payload;
        Self::read_codec_version(&mut reader)?;
        let vote = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(SerError::TrailingBytes(reader.len()));
        }
        Ok(vote)
    }
}

impl ByteFormat for SimpleVote {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        codec::check_type_id(Self::read_u32_be(reader)?, codec::SIMPLE_VOTE, "vote")?;
        Ok(Self {
            option_index: Self::read_u32_be(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, codec::SIMPLE_VOTE)?;
        len += Self::write_u32_be(writer, self.option_index)?;
        Ok(len)
    }
}
