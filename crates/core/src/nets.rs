//! Network IDs, their bech32 HRPs, and chain aliases.

use std::{fmt, str::FromStr};

use crate::ids::ChainId;

/// Camino mainnet
pub const CAMINO_ID: u32 = 1000;
/// Columbus testnet
pub const COLUMBUS_ID: u32 = 1001;
/// Kopernikus devnet
pub const KOPERNIKUS_ID: u32 = 1002;
/// Local test network
pub const LOCAL_ID: u32 = 12345;

/// The platform chain ID is the empty ID on every network.
pub const PLATFORM_CHAIN_ID: ChainId = ChainId::new([0u8; 32]);

/// The bech32 HRP used for addresses on `network_id`.
pub fn hrp(network_id: u32) -> &'static str {
    match network_id {
        CAMINO_ID => "camino",
        COLUMBUS_ID => "columbus",
        KOPERNIKUS_ID => "kopernikus",
        LOCAL_ID => "local",
        _ => "custom",
    }
}

/// The chains of a Camino network, named by their aliases.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Chain {
    /// Platform chain: staking, aliases, governance
    P,
    /// Exchange chain
    X,
    /// Contract (EVM) chain
    C,
}

impl Chain {
    /// The alias used in address text and blockchain tables
    pub fn alias(&self) -> &'static str {
        match self {
            Chain::P => "P",
            Chain::X => "X",
            Chain::C => "C",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// Chain alias text was not `P`, `X` or `C`.
#[derive(Debug, thiserror::Error)]
#[error("Unknown chain alias {0:?}")]
pub struct UnknownChain(pub String);

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Chain::P),
            "X" => Ok(Chain::X),
            "C" => Ok(Chain::C),
            _ => Err(UnknownChain(s.to_owned())),
        }
    }
}
