//! Fixed-length identifiers: 32-byte transaction, asset and chain IDs, 20-byte addresses, and
//! 20-byte C-chain (EVM) addresses.

use std::{fmt, str::FromStr};

use crate::{
    enc::{self, EncodingError, EncodingResult},
    hashes,
};

mark_bytes!(
    /// A 32-byte transaction ID: sha256 of the signed transaction bytes.
    TxId,
    32
);
impl_cb58_text!(TxId);

mark_bytes!(
    /// A 32-byte asset ID naming a fungible unit of value.
    AssetId,
    32
);
impl_cb58_text!(AssetId);

mark_bytes!(
    /// A 32-byte blockchain ID. The platform chain's ID is all zeroes.
    ChainId,
    32
);
impl_cb58_text!(ChainId);

mark_bytes!(
    /// A 20-byte short ID. Addresses are `ripemd160(sha256(compressed pubkey))`; multisig alias
    /// IDs are `ripemd160(creating tx ID)`. Canonical order is byte order.
    Address,
    20
);
impl_cb58_text!(Address);

mark_bytes!(
    /// A 20-byte C-chain address, `keccak256(uncompressed pubkey)[12..]`.
    EthAddress,
    20
);

impl Address {
    /// The address of a compressed SEC1 public key.
    pub fn from_pubkey_bytes(compressed: &[u8]) -> Self {
        Self(hashes::hash160(compressed))
    }

    /// The ID of the multisig alias created by `tx_id`.
    pub fn alias_of(tx_id: &TxId) -> Self {
        Self(hashes::ripemd160(tx_id.as_ref()))
    }

    /// Format as `<chain alias>-<bech32(hrp)>`.
    pub fn format(&self, chain_alias: &str, hrp: &str) -> EncodingResult<String> {
        enc::format_address(chain_alias, hrp, &self.0)
    }

    /// Parse `<chain alias>-<bech32>` text, ignoring the chain alias and HRP.
    pub fn parse(s: &str) -> EncodingResult<Self> {
        Self::from_slice(&enc::parse_address(s)?.payload)
    }

    /// Parse `<chain alias>-<bech32>` text, requiring `hrp`.
    pub fn parse_with_hrp(s: &str, hrp: &str) -> EncodingResult<Self> {
        let parsed = enc::parse_address(s)?;
        if parsed.hrp != hrp {
            return Err(EncodingError::WrongHRP {
                got: parsed.hrp,
                expected: hrp.to_owned(),
            });
        }
        Self::from_slice(&parsed.payload)
    }
}

impl EthAddress {
    /// The C-chain address of an uncompressed SEC1 public key (`0x04 || x || y`).
    pub fn from_uncompressed_pubkey(uncompressed: &[u8; 65]) -> Self {
        let digest = hashes::keccak256(&uncompressed[1..]);
        let mut buf = [0u8; 20];
        buf.copy_from_slice(&digest[12..]);
        Self(buf)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthAddress({})", self)
    }
}

impl FromStr for EthAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").ok_or(EncodingError::MissingPrefix("0x"))?;
        Self::from_slice(&hex::decode(s)?)
    }
}

impl_string_serde!(EthAddress);

#[cfg(test)]
mod test {
    use super::*;
    use crate::ser::ByteFormat;

    #[test]
    fn it_formats_ids_as_cb58() {
        let id = ChainId::default();
        assert_eq!(id.to_string(), "11111111111111111111111111111111LpoYY");
        assert_eq!(
            "11111111111111111111111111111111LpoYY".parse::<ChainId>().unwrap(),
            id
        );
        assert!(id.is_empty());

        let addr: Address = "6Y3kysjF9jnHnYkdS9yGAuoHyae2eNmeV".parse().unwrap();
        assert_eq!(
            hex::encode(addr.as_bytes()),
            "3cb7d3842e8cee6a0ebd09f1fe884f6861e1b29c"
        );
        assert_eq!(format!("{:?}", addr), "Address(6Y3kysjF9jnHnYkdS9yGAuoHyae2eNmeV)");
    }

    #[test]
    fn it_rejects_wrong_length_ids() {
        match "6Y3kysjF9jnHnYkdS9yGAuoHyae2eNmeV".parse::<TxId>() {
            Err(EncodingError::InvalidSize { expected, got }) => {
                assert_eq!(expected, 32);
                assert_eq!(got, 20);
            }
            e => panic!("expected InvalidSize, got {:?}", e),
        }
    }

    #[test]
    fn it_converts_between_cb58_and_bech32() {
        let addr: Address = "7Sdex3LTEjsnswW38Eb48hQ9insctGrsN".parse().unwrap();
        assert_eq!(
            addr.format("P", "kopernikus").unwrap(),
            "P-kopernikus1g65uqn6t77p656w64023nh8nd9updzmxh8ttv3"
        );
        assert_eq!(
            Address::parse("P-kopernikus1g65uqn6t77p656w64023nh8nd9updzmxh8ttv3").unwrap(),
            addr
        );
        assert!(matches!(
            Address::parse_with_hrp("P-kopernikus1g65uqn6t77p656w64023nh8nd9updzmxh8ttv3", "camino"),
            Err(EncodingError::WrongHRP { .. })
        ));
    }

    #[test]
    fn it_derives_alias_ids_from_tx_ids() {
        assert_eq!(
            hex::encode(Address::alias_of(&TxId::default()).as_bytes()),
            "d1a70126ff7a149ca6f9b638db084480440ff842"
        );
    }

    #[test]
    fn it_orders_addresses_by_bytes() {
        let mut addrs = vec![
            Address::new([3; 20]),
            Address::new([1; 20]),
            Address::new([2; 20]),
        ];
        addrs.sort();
        assert_eq!(
            addrs,
            vec![Address::new([1; 20]), Address::new([2; 20]), Address::new([3; 20])]
        );
    }

    #[test]
    fn it_serializes_ids_raw() {
        let id = AssetId::new([7; 32]);
        assert_eq!(id.serialized_length(), 32);
        assert_eq!(id.serialize_bytes().unwrap(), vec![7; 32]);
        assert_eq!(AssetId::deserialize_bytes(&[7; 32]).unwrap(), id);
    }

    #[test]
    fn it_serdes_ids_as_strings() {
        let addr = Address::new([1; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), addr);

        let eth: EthAddress = "0x8db97c7cece249c2b98bdc0226cc4c2a57bf52fc".parse().unwrap();
        assert_eq!(eth.to_string(), "0x8db97c7cece249c2b98bdc0226cc4c2a57bf52fc");
    }
}
