//! A simple trait for binary (de)Serialization using std `Read` and `Write` traits.
//!
//! Camino nodes speak a linear codec: every integer is big-endian, slices and byte strings
//! carry a `u32` length prefix, and interface-typed fields are preceded by a `u32` type ID.
//! Top-level objects are additionally prefixed by a `u16` codec version.

use std::io::{Cursor, Error as IOError, Read, Write};

use hex::FromHexError;
use thiserror::Error;

/// The only codec version the node accepts.
pub const CODEC_VERSION: u16 = 0;

/// Upper bound on the number of elements in a length-prefixed slice. Guards allocations when
/// reading untrusted payloads.
pub const MAX_SLICE_LEN: usize = 256 * 1024;

/// Errors related to serialization of types.
#[derive(Debug, Error)]
pub enum SerError {
    /// Payload was produced by a codec version we do not speak.
    #[error("Unknown codec version {0}. Expected {}.", CODEC_VERSION)]
    UnknownCodecVersion(u16),

    /// An interface-typed field carried a type ID we cannot decode in that position.
    #[error("Unknown type ID {type_id:#x} while reading {context}")]
    UnknownTypeId {
        /// The type ID found in the stream
        type_id: u32,
        /// What we were trying to read
        context: &'static str,
    },

    /// A length prefix exceeded `MAX_SLICE_LEN`, or a slice was too long to be prefixed.
    #[error("Slice of length {0} exceeds the maximum of {}", MAX_SLICE_LEN)]
    SliceTooLong(usize),

    /// Booleans are encoded as a single `0` or `1` byte.
    #[error("Invalid boolean byte {0:#x}")]
    InvalidBool(u8),

    /// Bytes remained after the top-level object was read.
    #[error("{0} trailing bytes after deserialization")]
    TrailingBytes(usize),

    /// IOError bubbled up from a `Write` passed to a `ByteFormat::write_to` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// `deserialize_hex` encountered an error on its input.
    #[error("Error deserializing hex string: {0}")]
    FromHexError(#[from] FromHexError),

    /// Any other error.
    #[error("{0}")]
    ComponentError(String),
}

/// Type alias for serialization errors
pub type SerResult<T> = Result<T, SerError>;

/// Read a fixed-size array.
pub fn read_array<R, const N: usize>(reader: &mut R) -> SerResult<[u8; N]>
where
    R: Read,
{
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn check_len(len: usize) -> SerResult<()> {
    if len > MAX_SLICE_LEN {
        return Err(SerError::SliceTooLong(len));
    }
    Ok(())
}

/// A simple trait for deserializing from `std::io::Read` and serializing to `std::io::Write`.
///
/// `ByteFormat` is used for transaction IDs, signing hashes, and transaction
/// serialization and deserialization.
pub trait ByteFormat {
    /// An associated error type
    type Error: From<SerError> + From<IOError> + std::error::Error;

    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Deserializes an instance of `Self` from a `std::io::Read`.
    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: std::marker::Sized;

    /// Serializes `self` to a `std::io::Write`. Following `Write` trait conventions, its `Ok`
    /// type is a `usize` denoting the number of bytes written.
    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write;

    /// Convenience function for reading a single byte
    fn read_u8<R>(reader: &mut R) -> SerResult<u8>
    where
        R: Read,
    {
        Ok(read_array::<R, 1>(reader)?[0])
    }

    /// Convenience function for reading a `0` or `1` byte as a bool
    fn read_bool<R>(reader: &mut R) -> SerResult<bool>
    where
        R: Read,
    {
        match Self::read_u8(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(SerError::InvalidBool(b)),
        }
    }

    /// Convenience function for reading a BE u16
    fn read_u16_be<R>(reader: &mut R) -> SerResult<u16>
    where
        R: Read,
    {
        Ok(u16::from_be_bytes(read_array(reader)?))
    }

    /// Convenience function for reading a BE u32
    fn read_u32_be<R>(reader: &mut R) -> SerResult<u32>
    where
        R: Read,
    {
        Ok(u32::from_be_bytes(read_array(reader)?))
    }

    /// Convenience function for reading a BE u64
    fn read_u64_be<R>(reader: &mut R) -> SerResult<u64>
    where
        R: Read,
    {
        Ok(u64::from_be_bytes(read_array(reader)?))
    }

    /// Read the `u16` codec version and reject anything but `CODEC_VERSION`.
    fn read_codec_version<R>(reader: &mut R) -> SerResult<()>
    where
        R: Read,
    {
        match Self::read_u16_be(reader)? {
            CODEC_VERSION => Ok(()),
            v => Err(SerError::UnknownCodecVersion(v)),
        }
    }

    /// Convenience function for writing a single byte
    fn write_u8<W>(writer: &mut W, number: u8) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&[number])?;
        Ok(1)
    }

    /// Convenience function for writing a bool as a single byte
    fn write_bool<W>(writer: &mut W, b: bool) -> SerResult<usize>
    where
        W: Write,
    {
        Self::write_u8(writer, b as u8)
    }

    /// Convenience function for writing a BE u16
    fn write_u16_be<W>(writer: &mut W, number: u16) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&number.to_be_bytes())?;
        Ok(2)
    }

    /// Convenience function for writing a BE u32
    fn write_u32_be<W>(writer: &mut W, number: u32) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&number.to_be_bytes())?;
        Ok(4)
    }

    /// Convenience function for writing a BE u64
    fn write_u64_be<W>(writer: &mut W, number: u64) -> SerResult<usize>
    where
        W: Write,
    {
        writer.write_all(&number.to_be_bytes())?;
        Ok(8)
    }

    /// Write a slice length as a `u32` prefix.
    fn write_len_prefix<W>(writer: &mut W, len: usize) -> SerResult<usize>
    where
        W: Write,
    {
        check_len(len)?;
        Self::write_u32_be(writer, len as u32)
    }

    /// Read a `u32` length prefix, bounded by `MAX_SLICE_LEN`.
    fn read_len_prefix<R>(reader: &mut R) -> SerResult<usize>
    where
        R: Read,
    {
        let len = Self::read_u32_be(reader)? as usize;
        check_len(len)?;
        Ok(len)
    }

    /// Read a `u32`-prefixed byte string
    fn read_bytes<R>(reader: &mut R) -> SerResult<Vec<u8>>
    where
        R: Read,
    {
        let len = Self::read_len_prefix(reader)?;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Write a `u32`-prefixed byte string
    fn write_bytes<W>(writer: &mut W, bytes: &[u8]) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_len_prefix(writer, bytes.len())?;
        writer.write_all(bytes)?;
        len += bytes.len();
        Ok(len)
    }

    /// Read a `u32`-prefixed vector of `ByteFormat` items
    fn read_prefix_vec<R, E, I>(reader: &mut R) -> Result<Vec<I>, E>
    where
        R: Read,
        E: From<SerError> + From<IOError> + std::error::Error,
        I: ByteFormat<Error = E>,
    {
        let len = Self::read_len_prefix(reader)?;
        let mut items = Vec::with_capacity(len.min(64));
        for _ in 0..len {
            items.push(I::read_from(reader)?);
        }
        Ok(items)
    }

    /// Write a `u32`-prefixed vector of `ByteFormat` items
    fn write_prefix_vec<W, E, I>(writer: &mut W, items: &[I]) -> Result<usize, E>
    where
        W: Write,
        E: From<SerError> + From<IOError> + std::error::Error,
        I: ByteFormat<Error = E>,
    {
        let mut len = Self::write_len_prefix(writer, items.len())?;
        for i in items.iter() {
            len += i.write_to(writer)?;
        }
        Ok(len)
    }

    /// Serializes `self` to a new vector.
    fn serialize_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        let mut v: Vec<u8> = Vec::with_capacity(self.serialized_length());
        self.write_to(&mut v)?;
        Ok(v)
    }

    /// Deserializes an instance of `Self` from a byte slice. Fails if any bytes remain.
    fn deserialize_bytes(bytes: &[u8]) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let mut cursor = Cursor::new(bytes);
        let t = Self::read_from(&mut cursor)?;
        let remaining = bytes.len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(SerError::TrailingBytes(remaining).into());
        }
        Ok(t)
    }

    /// Decodes a hex string (optionally `0x`-prefixed) to a `Vec<u8>`, deserializes an
    /// instance of `Self` from that vector.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let v: Vec<u8> = hex::decode(s).map_err(SerError::from)?;
        Self::deserialize_bytes(&v)
    }

    /// Serializes `self` to a vector, returns the hex-encoded vector
    fn serialize_hex(&self) -> Result<String, Self::Error> {
        Ok(hex::encode(self.serialize_bytes()?))
    }
}

impl ByteFormat for u32 {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4
    }

    fn read_from<R>(reader: &mut R) -> SerResult<Self>
    where
        R: Read,
    {
        Self::read_u32_be(reader)
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        Self::write_u32_be(writer, *self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_writes_big_endian_integers() {
        let mut buf = vec![];
        let mut len = u32::write_u16_be(&mut buf, 0x0102).unwrap();
        len += u32::write_u32_be(&mut buf, 0x0304_0506).unwrap();
        len += u32::write_u64_be(&mut buf, 7).unwrap();
        assert_eq!(len, 14);
        assert_eq!(
            hex::encode(&buf),
            "0102030405060000000000000007".to_owned()
        );
    }

    #[test]
    fn it_round_trips_prefixed_slices() {
        let items: Vec<u32> = vec![0, 3, 0xffff_ffff];
        let mut buf = vec![];
        let written = u32::write_prefix_vec(&mut buf, &items).unwrap();
        assert_eq!(written, 16);
        assert_eq!(hex::encode(&buf), "000000030000000000000003ffffffff");

        let read: Vec<u32> = u32::read_prefix_vec(&mut buf.as_slice()).unwrap();
        assert_eq!(read, items);
    }

    #[test]
    fn it_prefixes_byte_strings() {
        let mut buf = vec![];
        u32::write_bytes(&mut buf, b"memo").unwrap();
        assert_eq!(hex::encode(&buf), "000000046d656d6f");
        assert_eq!(u32::read_bytes(&mut buf.as_slice()).unwrap(), b"memo".to_vec());
    }

    #[test]
    fn it_rejects_oversized_prefixes() {
        let buf = hex::decode("ffffffff").unwrap();
        match u32::read_bytes(&mut buf.as_slice()) {
            Err(SerError::SliceTooLong(len)) => assert_eq!(len, 0xffff_ffff),
            e => panic!("expected SliceTooLong, got {:?}", e),
        }
    }

    #[test]
    fn it_rejects_bad_bools_and_versions() {
        assert!(matches!(
            u32::read_bool(&mut &[2u8][..]),
            Err(SerError::InvalidBool(2))
        ));
        assert!(matches!(
            u32::read_codec_version(&mut &[0u8, 1][..]),
            Err(SerError::UnknownCodecVersion(1))
        ));
        assert!(u32::read_codec_version(&mut &[0u8, 0][..]).is_ok());
    }

    #[test]
    fn it_rejects_trailing_bytes() {
        assert_eq!(u32::deserialize_hex("0x00000005").unwrap(), 5);
        assert!(matches!(
            u32::deserialize_hex("0000000500"),
            Err(SerError::TrailingBytes(1))
        ));
    }
}
