//! Request and response bodies of the node APIs used to build and submit transactions.
//!
//! The node encodes 32- and 64-bit integers as JSON strings, IDs as cb58 strings and binary
//! payloads as checksummed hex.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use camino_core::{nets::Chain, Address, AssetId, ChainId, TxId};

pub(crate) mod quoted {
    //! Integers the node writes as JSON strings. Plain numbers are accepted too.

    use super::*;
    use std::{fmt::Display, str::FromStr};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber<T> {
        String(String),
        Number(T),
    }

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match StringOrNumber::<T>::deserialize(deserializer)? {
            StringOrNumber::String(s) => s.parse().map_err(de::Error::custom),
            StringOrNumber::Number(n) => Ok(n),
        }
    }
}

/// A blockchain the node validates.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blockchain {
    /// The chain ID
    pub id: ChainId,
    /// The chain's alias, e.g. `C`
    pub name: String,
}

/// The reply of `platform.getConfiguration`, reduced to what transaction building needs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfiguration {
    /// The network ID
    #[serde(rename = "networkID", with = "quoted")]
    pub network_id: u32,
    /// The primary asset
    #[serde(rename = "assetID")]
    pub asset_id: AssetId,
    /// The network's address HRP
    #[serde(default)]
    pub hrp: String,
    /// The chains of the primary network
    pub blockchains: Vec<Blockchain>,
}

impl NodeConfiguration {
    /// The ID of `chain`, if the node reported it
    pub fn chain_id(&self, chain: Chain) -> Option<ChainId> {
        self.blockchains
            .iter()
            .find(|bc| bc.name == chain.alias())
            .map(|bc| bc.id)
    }

    /// The address HRP, from the reply or the network ID
    pub fn hrp(&self) -> &str {
        if self.hrp.is_empty() {
            camino_core::nets::hrp(self.network_id)
        } else {
            &self.hrp
        }
    }
}

/// Ownership as the platform API spells it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ApiOwner {
    /// Unix time before which the output cannot be spent
    #[serde(with = "quoted")]
    pub locktime: u64,
    /// Number of signatures required
    #[serde(with = "quoted")]
    pub threshold: u32,
    /// Owner addresses, as `P-<bech32>` text
    pub addresses: Vec<String>,
}

impl ApiOwner {
    /// A single owner with threshold 1
    pub fn single(address: String) -> Self {
        Self {
            locktime: 0,
            threshold: 1,
            addresses: vec![address],
        }
    }
}

/// The arguments of `platform.spend`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRequest {
    /// Addresses whose UTXOs may be consumed
    pub from: Vec<String>,
    /// Owner of the locked amount
    pub to: ApiOwner,
    /// Owner of the change
    pub change: ApiOwner,
    /// The lock applied to `amount_to_lock`
    pub lock_mode: u8,
    /// Amount to lock
    #[serde(with = "quoted")]
    pub amount_to_lock: u64,
    /// Amount to burn
    #[serde(with = "quoted")]
    pub amount_to_burn: u64,
    /// Encoding of the reply, always `hex`
    pub encoding: String,
}

/// The reply of `platform.spend`: encoded input and output lists.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpendReply {
    /// Checksummed hex of the codec-encoded inputs
    pub ins: String,
    /// Checksummed hex of the codec-encoded outputs
    pub outs: String,
}

/// Arguments naming a transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetTxRequest {
    /// The transaction
    #[serde(rename = "txID")]
    pub tx_id: TxId,
    /// Encoding of the reply, always `hex`
    pub encoding: String,
}

/// An encoded transaction, as sent and received
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncodedTx {
    /// Checksummed hex of the signed transaction
    pub tx: String,
    /// Always `hex`
    pub encoding: String,
}

/// The reply naming an issued transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssueTxReply {
    /// The transaction ID
    #[serde(rename = "txID")]
    pub tx_id: TxId,
}

/// Format `address` for the platform API.
pub fn platform_address(address: &Address, hrp: &str) -> Result<String, camino_core::EncodingError> {
    address.format(Chain::P.alias(), hrp)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_node_configurations() {
        let cfg: NodeConfiguration = serde_json::from_str(
            r#"{
                "networkID": "1002",
                "assetID": "11111111111111111111111111111111LpoYY",
                "assetSymbol": "CAM",
                "hrp": "kopernikus",
                "blockchains": [
                    {"id": "11111111111111111111111111111111LpoYY", "name": "C", "subnetID": "11111111111111111111111111111111LpoYY", "vmID": "x"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.network_id, 1002);
        assert_eq!(cfg.hrp(), "kopernikus");
        assert_eq!(cfg.chain_id(Chain::C), Some(ChainId::default()));
        assert_eq!(cfg.chain_id(Chain::X), None);
    }

    #[test]
    fn it_falls_back_to_the_network_hrp() {
        let cfg: NodeConfiguration = serde_json::from_str(
            r#"{"networkID": 12345, "assetID": "11111111111111111111111111111111LpoYY", "blockchains": []}"#,
        )
        .unwrap();
        assert_eq!(cfg.hrp(), "local");
    }

    #[test]
    fn it_quotes_spend_amounts() {
        let req = SpendRequest {
            from: vec!["P-a".to_owned()],
            to: ApiOwner::single("P-b".to_owned()),
            change: ApiOwner::single("P-a".to_owned()),
            lock_mode: 2,
            amount_to_lock: 100_000_000_000,
            amount_to_burn: 1_000_000,
            encoding: "hex".to_owned(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["amountToLock"], "100000000000");
        assert_eq!(json["amountToBurn"], "1000000");
        assert_eq!(json["lockMode"], 2);
        assert_eq!(json["to"]["threshold"], "1");
        assert_eq!(json["change"]["addresses"][0], "P-a");
    }
}
