use std::{fmt, io::{Read, Write}, str::FromStr};

use camino_core::{
    enc::{decode_cb58, encode_cb58, EncodingError},
    hashes::sha256,
    impl_hex_serde,
    ser::{read_array, ByteFormat, SerError},
    Address, EthAddress,
};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::KeyError;

/// Text prefix of a serialized private key.
pub const PRIVATE_KEY_PREFIX: &str = "PrivateKey-";

/// Length of a recoverable signature: `r || s || v`.
pub const SIGNATURE_LEN: usize = 65;

/// A 65-byte recoverable secp256k1 signature, laid out `r || s || v` with a low `s`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RecoverableSignature([u8; SIGNATURE_LEN]);

impl RecoverableSignature {
    /// Wrap raw bytes
    pub const fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Return a reference to the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    fn split(&self) -> Result<(Signature, RecoveryId), KeyError> {
        let sig = Signature::from_slice(&self.0[..64])?;
        let recid =
            RecoveryId::from_byte(self.0[64]).ok_or(KeyError::InvalidRecoveryId(self.0[64]))?;
        Ok((sig, recid))
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, KeyError> {
        let (sig, recid) = self.split()?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recid)?;
        Ok(PublicKey { key })
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for RecoverableSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl ByteFormat for RecoverableSignature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        SIGNATURE_LEN
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Ok(Self(read_array(reader)?))
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        writer.write_all(&self.0)?;
        Ok(SIGNATURE_LEN)
    }
}

impl_hex_serde!(RecoverableSignature);

/// A secp256k1 public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// Parse a compressed or uncompressed SEC1 encoding.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self {
            key: VerifyingKey::from_sec1_bytes(bytes)?,
        })
    }

    /// The 33-byte compressed SEC1 encoding
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut buf = [0u8; 33];
        buf.copy_from_slice(self.key.to_encoded_point(true).as_bytes());
        buf
    }

    /// The 65-byte uncompressed SEC1 encoding
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut buf = [0u8; 65];
        buf.copy_from_slice(self.key.to_encoded_point(false).as_bytes());
        buf
    }

    /// `ripemd160(sha256(compressed))`
    pub fn address(&self) -> Address {
        Address::from_pubkey_bytes(&self.to_compressed())
    }

    /// The C-chain address of this key
    pub fn eth_address(&self) -> EthAddress {
        EthAddress::from_uncompressed_pubkey(&self.to_uncompressed())
    }
}

/// A secp256k1 private key. Text form is `PrivateKey-<cb58>`.
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("address", &self.address())
            .finish()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PrivateKey {}

impl PrivateKey {
    /// Instantiate from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self {
            key: SigningKey::from_slice(bytes)?,
        })
    }

    /// Generate a fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// The 32-byte big-endian scalar
    pub fn to_bytes(&self) -> [u8; 32] {
        self.key.to_bytes().into()
    }

    /// The corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            key: self.key.verifying_key().clone(),
        }
    }

    /// The address of the corresponding public key
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// The C-chain address of the corresponding public key
    pub fn eth_address(&self) -> EthAddress {
        self.public_key().eth_address()
    }

    /// Sign a 32-byte digest. Signatures are deterministic (RFC6979) and low-S.
    pub fn sign_hash(&self, digest: &[u8; 32]) -> Result<RecoverableSignature, KeyError> {
        let (sig, recid) = self.key.sign_prehash_recoverable(digest)?;
        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced()),
            ),
            None => (sig, recid),
        };

        let mut buf = [0u8; SIGNATURE_LEN];
        buf[..64].copy_from_slice(&sig.to_bytes());
        buf[64] = recid.to_byte();
        Ok(RecoverableSignature(buf))
    }

    /// Sign `sha256(msg)`.
    pub fn sign_message(&self, msg: &[u8]) -> Result<RecoverableSignature, KeyError> {
        self.sign_hash(&sha256(msg))
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PRIVATE_KEY_PREFIX, encode_cb58(&self.to_bytes()))
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(PRIVATE_KEY_PREFIX)
            .ok_or(EncodingError::MissingPrefix(PRIVATE_KEY_PREFIX))?;
        Self::from_bytes(&decode_cb58(body)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EWOQ: &str = "PrivateKey-ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNN";
    const KOPERNIKUS_KEY: &str = "PrivateKey-vmRQiZeXEXYMyJhEiqdC2z5JhuDbxL8ix9UVvjgMu2Er1NepE";

    #[test]
    fn it_parses_and_formats_key_text() {
        let key: PrivateKey = EWOQ.parse().unwrap();
        assert_eq!(
            hex::encode(key.to_bytes()),
            "56289e99c94b6912bfc12adc093c9b51124f0dc54ac7a766b2bc5ccf558d8027"
        );
        assert_eq!(key.to_string(), EWOQ);
    }

    #[test]
    fn it_rejects_malformed_key_text() {
        match "ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNN".parse::<PrivateKey>() {
            Err(KeyError::EncodingError(EncodingError::MissingPrefix(_))) => {}
            e => panic!("expected MissingPrefix, got {:?}", e),
        }
        match "PrivateKey-ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNM".parse::<PrivateKey>()
        {
            Err(KeyError::EncodingError(EncodingError::BadChecksum)) => {}
            e => panic!("expected BadChecksum, got {:?}", e),
        }
    }

    #[test]
    fn it_derives_addresses() {
        let key: PrivateKey = EWOQ.parse().unwrap();
        assert_eq!(
            hex::encode(key.public_key().to_compressed()),
            "0327448e78ffa8cdb24cf19be0204ad954b1bdb4db8c51183534c1eecf2ebd094e"
        );
        assert_eq!(key.address().to_string(), "6Y3kysjF9jnHnYkdS9yGAuoHyae2eNmeV");
        assert_eq!(
            key.address().format("P", "local").unwrap(),
            "P-local18jma8ppw3nhx5r4ap8clazz0dps7rv5u00z96u"
        );
        assert_eq!(
            key.eth_address().to_string(),
            "0x8db97c7cece249c2b98bdc0226cc4c2a57bf52fc"
        );

        let key: PrivateKey = KOPERNIKUS_KEY.parse().unwrap();
        assert_eq!(key.address().to_string(), "7Sdex3LTEjsnswW38Eb48hQ9insctGrsN");
    }

    #[test]
    fn it_derives_addresses_from_uncompressed_pubkeys() {
        let key: PrivateKey = EWOQ.parse().unwrap();
        let uncompressed = key.public_key().to_uncompressed();
        assert_eq!(uncompressed[0], 4);
        let pubkey = PublicKey::from_sec1_bytes(&uncompressed).unwrap();
        assert_eq!(pubkey.address(), key.address());
    }

    #[test]
    fn it_signs_deterministically_and_recovers() {
        let key: PrivateKey = EWOQ.parse().unwrap();
        let digest = sha256(b"camino");
        let first = key.sign_hash(&digest).unwrap();
        let second = key.sign_hash(&digest).unwrap();
        assert_eq!(first, second);
        assert!(first.as_bytes()[64] < 2);
        assert_eq!(first.recover(&digest).unwrap().address(), key.address());

        // high bit of s is never set
        assert!(first.as_bytes()[32] < 0x80);
    }

    #[test]
    fn it_signs_messages_over_their_sha256() {
        let key = PrivateKey::generate();
        let sig = key.sign_message(b"hello").unwrap();
        assert_eq!(sig, key.sign_hash(&sha256(b"hello")).unwrap());
        assert_eq!(sig.recover(&sha256(b"hello")).unwrap(), key.public_key());
    }

    #[test]
    fn it_rejects_bad_recovery_ids() {
        let key = PrivateKey::generate();
        let mut bytes = *key.sign_message(b"hello").unwrap().as_bytes();
        bytes[64] = 9;
        assert!(matches!(
            RecoverableSignature::new(bytes).recover(&sha256(b"hello")),
            Err(KeyError::InvalidRecoveryId(9))
        ));
    }

    #[test]
    fn it_redacts_debug_output() {
        let key: PrivateKey = EWOQ.parse().unwrap();
        let s = format!("{:?}", key);
        assert!(!s.contains("ewoq"));
        assert!(s.contains("6Y3kysjF9jnHnYkdS9yGAuoHyae2eNmeV"));
    }
}
