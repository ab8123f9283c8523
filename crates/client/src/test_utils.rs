use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use camino_core::{
    enc::encode_hex_checksummed, hashes::sha256, nets::Chain, ser::ByteFormat, AssetId, ChainId,
    EthAddress, TxId,
};
use camino_keys::PrivateKey;
use camino_provider::{
    rpc::common::ErrorResponse,
    types::{Blockchain, NodeConfiguration, SpendReply, SpendRequest},
    NodeProvider, ProviderError,
};
use camino_txs::types::{TransferableInput, TransferableOutput, UtxoId};

use crate::spend::Fragments;

pub(crate) fn funder() -> PrivateKey {
    "PrivateKey-vmRQiZeXEXYMyJhEiqdC2z5JhuDbxL8ix9UVvjgMu2Er1NepE"
        .parse()
        .unwrap()
}

pub(crate) fn ewoq() -> PrivateKey {
    "PrivateKey-ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNN"
        .parse()
        .unwrap()
}

pub(crate) fn asset_id() -> AssetId {
    AssetId::new([0x59; 32])
}

pub(crate) fn c_chain_id() -> ChainId {
    ChainId::new([0x0c; 32])
}

pub(crate) fn x_chain_id() -> ChainId {
    ChainId::new([0x0a; 32])
}

fn encode<T: ByteFormat<Error = camino_core::SerError> + Clone>(items: &[T]) -> String {
    encode_hex_checksummed(&Fragments(items.to_vec()).serialize_bytes().unwrap())
}

/// An in-memory node. Spends always return the same selection.
#[derive(Debug)]
pub(crate) struct MockProvider {
    pub(crate) config: NodeConfiguration,
    pub(crate) spend_reply: Result<SpendReply, ErrorResponse>,
    pub(crate) base_fee: Option<u128>,
    pub(crate) nonce: u64,
    pub(crate) hang: bool,
    spends: Mutex<Vec<SpendRequest>>,
    txs: Mutex<HashMap<(Chain, TxId), Vec<u8>>>,
    issued: Mutex<Vec<Chain>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            config: NodeConfiguration {
                network_id: 1002,
                asset_id: asset_id(),
                hrp: "kopernikus".to_owned(),
                blockchains: vec![
                    Blockchain {
                        id: c_chain_id(),
                        name: "C".to_owned(),
                    },
                    Blockchain {
                        id: x_chain_id(),
                        name: "X".to_owned(),
                    },
                ],
            },
            spend_reply: Ok(SpendReply {
                ins: encode::<TransferableInput>(&[]),
                outs: encode::<TransferableOutput>(&[]),
            }),
            base_fee: Some(25_000_000_000),
            nonce: 0,
            hang: false,
            spends: Default::default(),
            txs: Default::default(),
            issued: Default::default(),
        }
    }
}

impl MockProvider {
    /// A node holding two UTXOs of `key`, returning change to it
    pub(crate) fn funded(key: &PrivateKey) -> Self {
        let inputs = vec![
            TransferableInput::transfer(
                UtxoId::new(TxId::new([0xee; 32]), 1),
                asset_id(),
                200_000_000_000,
                vec![0],
            ),
            TransferableInput::transfer(
                UtxoId::new(TxId::new([0x11; 32]), 0),
                asset_id(),
                3_000_000,
                vec![0],
            ),
        ];
        let outputs = vec![TransferableOutput::pay(
            asset_id(),
            102_000_000_000,
            key.address(),
        )];
        Self::default().with_spend(Ok(SpendReply {
            ins: encode(&inputs),
            outs: encode(&outputs),
        }))
    }

    pub(crate) fn with_spend(mut self, reply: Result<SpendReply, ErrorResponse>) -> Self {
        self.spend_reply = reply;
        self
    }

    pub(crate) fn with_base_fee(mut self, base_fee: Option<u128>) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub(crate) fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Spend requests never complete
    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub(crate) fn last_spend(&self) -> Option<SpendRequest> {
        self.spends.lock().unwrap().last().cloned()
    }

    pub(crate) fn issued(&self) -> Vec<Chain> {
        self.issued.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeProvider for MockProvider {
    async fn get_configuration(&self) -> Result<NodeConfiguration, ProviderError> {
        Ok(self.config.clone())
    }

    async fn spend(&self, request: &SpendRequest) -> Result<SpendReply, ProviderError> {
        self.spends.lock().unwrap().push(request.clone());
        if self.hang {
            futures_util::future::pending::<()>().await;
        }
        self.spend_reply.clone().map_err(Into::into)
    }

    async fn get_tx(&self, chain: Chain, tx_id: TxId) -> Result<Vec<u8>, ProviderError> {
        self.txs
            .lock()
            .unwrap()
            .get(&(chain, tx_id))
            .cloned()
            .ok_or_else(|| ProviderError::Unsupported(format!("unknown tx {}", tx_id)))
    }

    async fn issue_tx(&self, chain: Chain, tx: &[u8]) -> Result<TxId, ProviderError> {
        let id = TxId::new(sha256(tx));
        self.txs.lock().unwrap().insert((chain, id), tx.to_vec());
        self.issued.lock().unwrap().push(chain);
        Ok(id)
    }

    async fn base_fee(&self) -> Result<Option<u128>, ProviderError> {
        Ok(self.base_fee)
    }

    async fn nonce(&self, _: EthAddress) -> Result<u64, ProviderError> {
        Ok(self.nonce)
    }
}
