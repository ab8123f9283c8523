//! Hash functions used by Camino: sha256 for signing hashes and transaction IDs,
//! `ripemd160(sha256(x))` for addresses, and keccak256 for C-chain addresses.

use std::io::{Result as IOResult, Write};

pub use digest::Digest;
pub use ripemd::Ripemd160;
pub use sha2::Sha256;
pub use sha3::Keccak256;

/// sha256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// ripemd160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// `ripemd160(sha256(data))`. Applied to a compressed public key this is its address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// keccak256 of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// A struct that exposes a sha256 `Write` interface by wrapping an internal SHA2 instance.
/// Codec types can be hashed by writing them straight into it.
///
/// ```
/// # use std::io::{Result};
/// use std::io::Write;
/// use camino_core::hashes::Sha256Writer;
///
/// # fn main() -> Result<()> {
/// let mut w = Sha256Writer::default();
/// # let data = [0u8; 32];
///
/// // Writing more than once will update the hasher.
/// w.write_all(&data)?;
///
/// // Call finish to consume the hasher and produce the digest.
/// let digest = w.finish();
/// # Ok(())
/// }
/// ```
#[derive(Default)]
pub struct Sha256Writer {
    internal: Sha256,
}

impl Write for Sha256Writer {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        self.internal.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl Sha256Writer {
    /// Consume the writer and produce the digest.
    pub fn finish(self) -> [u8; 32] {
        self.internal.finalize().into()
    }

    /// Consume the writer and produce the digest as a marked ID type.
    pub fn finish_marked<M: From<[u8; 32]>>(self) -> M {
        self.finish().into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_ignores_flush() {
        let mut w = Sha256Writer::default();
        w.write_all(&[0]).unwrap();
        w.flush().unwrap();
        assert_eq!(
            hex::encode(w.finish()),
            "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d"
        );
    }

    #[test]
    fn it_matches_known_digests() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(sha256(&[0]), {
            let mut w = Sha256Writer::default();
            w.write_all(&[0]).unwrap();
            w.finish()
        });
    }

    #[test]
    fn it_hashes_pubkeys_to_addresses() {
        let pubkey =
            hex::decode("0327448e78ffa8cdb24cf19be0204ad954b1bdb4db8c51183534c1eecf2ebd094e")
                .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "3cb7d3842e8cee6a0ebd09f1fe884f6861e1b29c"
        );
    }
}
