//! Ownership conditions and standalone authorizations.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, Address, SerError};
use serde::{Deserialize, Serialize};

use crate::codec;

/// A threshold of addresses that must sign to spend, after `locktime`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct OutputOwners {
    /// Unix time before which the output cannot be spent
    pub locktime: u64,
    /// Number of signatures required
    pub threshold: u32,
    /// Owners, sorted and unique
    pub addrs: Vec<Address>,
}

impl OutputOwners {
    /// Instantiate new owners. `addrs` is stored as given; callers sort it.
    pub fn new(locktime: u64, threshold: u32, addrs: Vec<Address>) -> Self {
        Self {
            locktime,
            threshold,
            addrs,
        }
    }

    /// A single owner with threshold 1 and no locktime.
    pub fn single(addr: Address) -> Self {
        Self::new(0, 1, vec![addr])
    }
}

impl ByteFormat for OutputOwners {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8 + 4 + 4 + 20 * self.addrs.len()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self {
            locktime: Self::read_u64_be(reader)?,
            threshold: Self::read_u32_be(reader)?,
            addrs: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u64_be(writer, self.locktime)?;
        len += Self::write_u32_be(writer, self.threshold)?;
        len += Self::write_prefix_vec(writer, &self.addrs)?;
        Ok(len)
    }
}

/// An interface-typed ownership condition. Matched, never cast.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// A threshold of addresses
    Threshold(OutputOwners),
}

impl Owner {
    /// The codec type ID of the variant
    pub fn type_id(&self) -> u32 {
        match self {
            Owner::Threshold(_) => codec::OUTPUT_OWNERS,
        }
    }
}

impl ByteFormat for Owner {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + match self {
            Owner::Threshold(o) => o.serialized_length(),
        }
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        match Self::read_u32_be(reader)? {
            codec::OUTPUT_OWNERS => Ok(Owner::Threshold(OutputOwners::read_from(reader)?)),
            type_id => Err(SerError::UnknownTypeId {
                type_id,
                context: "owner",
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
                Owner::Threshold(o) => o.write_to(writer)?,
            })
    }
}

/// A standalone authorization: indices into an owner set whose signatures follow in the
/// transaction's credentials. Always written with its type ID.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Auth {
    /// Indices of the signing owners
    pub sig_indices: Vec<u32>,
}

impl Auth {
    /// An authorization by the first (only) owner
    pub fn single() -> Self {
        Self {
            sig_indices: vec![0],
        }
    }

    /// True if this authorization carries signatures, and so consumes a credential
    pub fn needs_credential(&self) -> bool {
        !self.sig_indices.is_empty()
    }
}

impl ByteFormat for Auth {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + 4 + 4 * self.sig_indices.len()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        codec::check_type_id(Self::read_u32_be(reader)?, codec::INPUT, "auth")?;
        Ok(Self {
            sig_indices: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, codec::INPUT)?;
        len += Self::write_prefix_vec(writer, &self.sig_indices)?;
        Ok(len)
    }
}
