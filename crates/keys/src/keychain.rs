//! A caller-owned set of private keys, indexed by address.

use std::{collections::BTreeMap, path::Path};

use camino_core::Address;

use crate::{keys::PrivateKey, KeyError};

/// A set of private keys. Keys are never global: build calls take references into a keychain
/// the caller owns.
#[derive(Clone, Debug, Default)]
pub struct Keychain {
    keys: BTreeMap<Address, PrivateKey>,
}

impl Keychain {
    /// Instantiate an empty keychain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning its address.
    pub fn insert(&mut self, key: PrivateKey) -> Address {
        let addr = key.address();
        self.keys.insert(addr, key);
        addr
    }

    /// Look up the key for `addr`.
    pub fn get(&self, addr: &Address) -> Option<&PrivateKey> {
        self.keys.get(addr)
    }

    /// Look up the key for `addr`, failing with `UnknownAddress`.
    pub fn require(&self, addr: &Address) -> Result<&PrivateKey, KeyError> {
        self.get(addr).ok_or(KeyError::UnknownAddress(*addr))
    }

    /// All addresses, in canonical order
    pub fn addresses(&self) -> Vec<Address> {
        self.keys.keys().copied().collect()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no keys are held
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse key-file contents: one `PrivateKey-...` per line. Blank lines, surrounding
    /// whitespace and quotes are ignored, as are lines starting with `#`.
    pub fn parse(contents: &str) -> Result<Self, KeyError> {
        let mut chain = Self::new();
        for line in contents.lines() {
            let line = line.trim().trim_matches(|c| c == '"' || c == '\'').trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            chain.insert(line.parse()?);
        }
        Ok(chain)
    }

    /// Read and parse a key file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KeyError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }
}

impl FromIterator<PrivateKey> for Keychain {
    fn from_iter<I: IntoIterator<Item = PrivateKey>>(iter: I) -> Self {
        let mut chain = Self::new();
        for key in iter {
            chain.insert(key);
        }
        chain
    }
}
