//! Per-network fee parameters.

use camino_core::nets::{CAMINO_ID, COLUMBUS_ID, KOPERNIKUS_ID};
use serde::{Deserialize, Serialize};

/// Fees charged on the platform chain, in the smallest unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FeeParameters {
    /// Burned by every platform transaction
    pub tx_fee: u64,
    /// Bonded by a proposal until it concludes
    pub proposal_bond_amount: u64,
}

/// Parameters for Kopernikus, also used for unknown networks
pub const KOPERNIKUS_FEES: FeeParameters = FeeParameters {
    tx_fee: 1_000_000,
    proposal_bond_amount: 100_000_000_000,
};

impl FeeParameters {
    /// The parameters for `network_id`. Unknown networks get Kopernikus's.
    pub fn for_network(network_id: u32) -> Self {
        match network_id {
            CAMINO_ID | COLUMBUS_ID | KOPERNIKUS_ID => KOPERNIKUS_FEES,
            _ => {
                tracing::debug!(network_id, "unknown network, using kopernikus fee parameters");
                KOPERNIKUS_FEES
            }
        }
    }
}
