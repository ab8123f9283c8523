//! Credentials: the signatures satisfying an authorization.

use std::io::{Read, Write};

use camino_core::{ser::ByteFormat, SerError};
use camino_keys::RecoverableSignature;
use serde::{Deserialize, Serialize};

use crate::codec;

/// The signatures satisfying one authorization, in the order of its signature indices.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Recoverable signatures over the signing hash
    pub sigs: Vec<RecoverableSignature>,
}

impl ByteFormat for Credential {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + 4 + 65 * self.sigs.len()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        codec::check_type_id(Self::read_u32_be(reader)?, codec::CREDENTIAL, "credential")?;
        Ok(Self {
            sigs: Self::read_prefix_vec(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u32_be(writer, codec::CREDENTIAL)?;
        len += Self::write_prefix_vec(writer, &self.sigs)?;
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_rejects_multisig_credentials() {
        let bytes = hex::decode("0000200c00000000").unwrap();
        match Credential::deserialize_bytes(&bytes) {
            Err(SerError::UnknownTypeId { type_id, .. }) => assert_eq!(type_id, 0x200c),
            e => panic!("expected UnknownTypeId, got {:?}", e),
        }
    }

    #[test]
    fn it_serializes_credentials() {
        let cred = Credential {
            sigs: vec![RecoverableSignature::new([7; 65])],
        };
        let bytes = cred.serialize_bytes().unwrap();
        assert_eq!(bytes.len(), 73);
        assert_eq!(hex::encode(&bytes[..8]), "0000000900000001");
        assert_eq!(Credential::deserialize_bytes(&bytes).unwrap(), cred);
    }
}
