//! Type IDs registered with the node's codecs. Interface-typed fields are written as a `u32`
//! type ID followed by the concrete type's fields.

use camino_core::{SerError, SerResult};

/// `secp256k1fx.TransferInput`
pub const TRANSFER_INPUT: u32 = 5;
/// `secp256k1fx.TransferOutput`
pub const TRANSFER_OUTPUT: u32 = 7;
/// `secp256k1fx.Credential`
pub const CREDENTIAL: u32 = 9;
/// `secp256k1fx.Input`, used as a standalone authorization
pub const INPUT: u32 = 10;
/// `secp256k1fx.OutputOwners`
pub const OUTPUT_OWNERS: u32 = 11;

/// Platform chain address state change
pub const ADDRESS_STATE_TX: u32 = 0x2000;
/// Platform chain base transfer
pub const BASE_TX: u32 = 0x2006;
/// Platform chain multisig alias creation or update
pub const MULTISIG_ALIAS_TX: u32 = 0x2007;
/// Locked transfer input
pub const LOCKED_IN: u32 = 0x200a;
/// Locked transfer output
pub const LOCKED_OUT: u32 = 0x200b;
/// Governance proposal submission
pub const ADD_PROPOSAL_TX: u32 = 0x2010;
/// Governance vote
pub const ADD_VOTE_TX: u32 = 0x2011;
/// Proposal to change the base fee
pub const BASE_FEE_PROPOSAL: u32 = 0x2012;
/// Vote for a single option
pub const SIMPLE_VOTE: u32 = 0x2013;
/// Proposal to admit a consortium member
pub const ADD_MEMBER_PROPOSAL: u32 = 0x2016;
/// Proposal to exclude a consortium member
pub const EXCLUDE_MEMBER_PROPOSAL: u32 = 0x2017;
/// Proposal executed directly by an admin
pub const ADMIN_PROPOSAL: u32 = 0x2018;

/// C-chain atomic export
pub const UNSIGNED_EXPORT_TX: u32 = 1;

/// Fail with `UnknownTypeId` unless `found == expected`.
pub fn check_type_id(found: u32, expected: u32, context: &'static str) -> SerResult<()> {
    if found != expected {
        return Err(SerError::UnknownTypeId {
            type_id: found,
            context,
        });
    }
    Ok(())
}
