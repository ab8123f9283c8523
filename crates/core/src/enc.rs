//! Text encodings used by Camino nodes and wallets: cb58 for IDs and keys, bech32 for
//! addresses, and checksummed hex for transaction payloads exchanged over RPC.

use bech32::{decode as b32_decode, encode as b32_encode, Error as BechError, FromBase32, ToBase32, Variant};
use thiserror::Error;

use crate::hashes::sha256;

/// Number of sha256 bytes appended as a checksum by cb58 and checksummed hex.
pub const CHECKSUM_LEN: usize = 4;

/// Errors that can be returned when parsing or producing text encodings.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Bech32 HRP does not match the current network.
    #[error("Bech32 HRP does not match. \nGot {:?} expected {:?} Hint: Is this address for another network?", got, expected)]
    WrongHRP {
        /// The actual HRP.
        got: String,
        /// The expected HRP.
        expected: String,
    },

    /// Bubbled up error from bech32 library
    #[error("BechError: {:?}", .0)]
    BechError(#[from] BechError),

    /// Bubbled up error from bs58 library
    #[error("Base58Error: {:?}", .0)]
    Base58Error(#[from] bs58::decode::Error),

    /// Bubbled up error from the hex decoder
    #[error("HexError: {:?}", .0)]
    HexError(#[from] hex::FromHexError),

    /// The 4-byte sha256 checksum did not match the payload.
    #[error("Checksum mismatch")]
    BadChecksum,

    /// Incorrect payload size
    #[error("Invalid size. Expected {expected} bytes, got {got}")]
    InvalidSize {
        /// The size the target type requires
        expected: usize,
        /// The size found
        got: usize,
    },

    /// Address text lacked the `<chain>-` prefix.
    #[error("Address {0:?} has no chain alias")]
    MissingChainAlias(String),

    /// Text lacked a required prefix such as `0x` or `PrivateKey-`.
    #[error("Expected prefix {0:?}")]
    MissingPrefix(&'static str),
}

/// A simple result type alias
pub type EncodingResult<T> = Result<T, EncodingError>;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(payload);
    let mut c = [0u8; CHECKSUM_LEN];
    c.copy_from_slice(&digest[32 - CHECKSUM_LEN..]);
    c
}

fn split_checksummed(v: &[u8]) -> EncodingResult<&[u8]> {
    if v.len() < CHECKSUM_LEN {
        return Err(EncodingError::InvalidSize {
            expected: CHECKSUM_LEN,
            got: v.len(),
        });
    }
    let (payload, check) = v.split_at(v.len() - CHECKSUM_LEN);
    if checksum(payload) != check {
        return Err(EncodingError::BadChecksum);
    }
    Ok(payload)
}

fn with_checksum(payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    v.extend_from_slice(payload);
    v.extend_from_slice(&checksum(payload));
    v
}

/// Encode bytes as cb58: base58 over the payload followed by the last 4 bytes of its sha256.
pub fn encode_cb58(payload: &[u8]) -> String {
    bs58::encode(with_checksum(payload)).into_string()
}

/// Decode a cb58 string, verifying the checksum.
pub fn decode_cb58(s: &str) -> EncodingResult<Vec<u8>> {
    let v = bs58::decode(s).into_vec()?;
    split_checksummed(&v).map(|p| p.to_vec())
}

/// Encode bytes as `0x`-prefixed hex with a 4-byte sha256 checksum suffix, the format the
/// node uses for transaction and UTXO payloads.
pub fn encode_hex_checksummed(payload: &[u8]) -> String {
    format!("0x{}", hex::encode(with_checksum(payload)))
}

/// Decode a `0x`-prefixed checksummed hex string, verifying the checksum.
pub fn decode_hex_checksummed(s: &str) -> EncodingResult<Vec<u8>> {
    let s = s.strip_prefix("0x").ok_or(EncodingError::MissingPrefix("0x"))?;
    let v = hex::decode(s)?;
    split_checksummed(&v).map(|p| p.to_vec())
}

/// Encode a byte vector to bech32.
pub fn encode_bech32(hrp: &str, v: &[u8]) -> EncodingResult<String> {
    b32_encode(hrp, v.to_base32(), Variant::Bech32).map_err(Into::into)
}

/// Decode a bech32 string, returning the HRP and the payload.
pub fn decode_bech32(s: &str) -> EncodingResult<(String, Vec<u8>)> {
    let (hrp, data, _variant) = b32_decode(s)?;
    let payload = Vec::from_base32(&data)?;
    Ok((hrp, payload))
}

/// Decode a bech32 string. Caller specifies an expected HRP. If a different HRP is found,
/// returns `WrongHRP`.
pub fn decode_bech32_with_hrp(expected_hrp: &str, s: &str) -> EncodingResult<Vec<u8>> {
    let (hrp, payload) = decode_bech32(s)?;
    if hrp != expected_hrp {
        return Err(EncodingError::WrongHRP {
            got: hrp,
            expected: expected_hrp.to_owned(),
        });
    }
    Ok(payload)
}

/// Format address bytes as `<chain alias>-<bech32>`, e.g. `P-kopernikus1...`.
pub fn format_address(chain_alias: &str, hrp: &str, v: &[u8]) -> EncodingResult<String> {
    Ok(format!("{}-{}", chain_alias, encode_bech32(hrp, v)?))
}

/// The parts of a `<chain alias>-<bech32>` address string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedAddress {
    /// The chain alias, e.g. `P`
    pub chain_alias: String,
    /// The bech32 HRP, e.g. `kopernikus`
    pub hrp: String,
    /// The raw payload
    pub payload: Vec<u8>,
}

/// Parse a `<chain alias>-<bech32>` address string.
pub fn parse_address(s: &str) -> EncodingResult<ParsedAddress> {
    let (chain_alias, rest) = s
        .split_once('-')
        .ok_or_else(|| EncodingError::MissingChainAlias(s.to_owned()))?;
    let (hrp, payload) = decode_bech32(rest)?;
    Ok(ParsedAddress {
        chain_alias: chain_alias.to_owned(),
        hrp,
        payload,
    })
}
