use async_trait::async_trait;
use std::num::NonZeroUsize;
use thiserror::Error;

use camino_core::{nets::Chain, EthAddress, TxId};
use futures_util::lock::Mutex;
use lru::LruCache;

use crate::{
    types::{NodeConfiguration, SpendReply, SpendRequest},
    DEFAULT_CACHE_SIZE,
};

/// Errors thrown by providers
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Serde issue
    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),

    /// Bubbled up from core encodings
    #[error(transparent)]
    EncodingError(#[from] camino_core::EncodingError),

    /// Bubbled up from the codec
    #[error(transparent)]
    SerError(#[from] camino_core::SerError),

    /// Unsupported action. Provider should give a string describing the action and reason
    #[error("Unsupported action: {0}")]
    Unsupported(String),

    /// RPC Error Response
    #[error("RPC Error Response: {0}")]
    RPCErrorResponse(crate::rpc::common::ErrorResponse),

    /// Custom provider error. Indicates whether the request failed while parsing the response
    #[error("Provider error {e}")]
    Custom {
        /// Whether the error arose while parsing the response
        from_parsing: bool,
        /// The error
        e: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProviderError {
    /// Shortcut for instantiating a custom error
    pub fn custom(from_parsing: bool, e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Custom { from_parsing, e }
    }

    /// Returns true if the request failed due to a local parsing error.
    pub fn from_parsing(&self) -> bool {
        matches!(
            self,
            ProviderError::Custom {
                from_parsing: true,
                ..
            } | ProviderError::SerdeJSONError(_)
                | ProviderError::SerError(_)
                | ProviderError::EncodingError(_)
        )
    }

    /// The node's error message, if the node answered with an error
    pub fn rpc_message(&self) -> Option<&str> {
        match self {
            ProviderError::RPCErrorResponse(e) => Some(&e.message),
            _ => None,
        }
    }
}

/// A connection to a Camino node
#[async_trait]
pub trait NodeProvider: Sync + Send {
    /// Fetch the network configuration: network ID, primary asset, chain IDs
    async fn get_configuration(&self) -> Result<NodeConfiguration, ProviderError>;

    /// Ask the node to select inputs and outputs that lock and burn the requested amounts
    async fn spend(&self, request: &SpendRequest) -> Result<SpendReply, ProviderError>;

    /// Fetch the signed bytes of a transaction on `chain`
    async fn get_tx(&self, chain: Chain, tx_id: TxId) -> Result<Vec<u8>, ProviderError>;

    /// Submit signed transaction bytes to `chain`
    async fn issue_tx(&self, chain: Chain, tx: &[u8]) -> Result<TxId, ProviderError>;

    /// The C-chain's current base fee, if it reports one
    async fn base_fee(&self) -> Result<Option<u128>, ProviderError>;

    /// The nonce of a C-chain account
    async fn nonce(&self, address: EthAddress) -> Result<u64, ProviderError>;
}

/// A provider that caches the node configuration and fetched transactions, both of which never
/// change.
pub struct CachingProvider<T: NodeProvider> {
    provider: T,
    config_cache: Mutex<Option<NodeConfiguration>>,
    tx_cache: Mutex<LruCache<(Chain, TxId), Vec<u8>>>,
}

impl<T: NodeProvider> From<T> for CachingProvider<T> {
    fn from(provider: T) -> Self {
        Self::with_capacity(provider, DEFAULT_CACHE_SIZE)
    }
}

impl<T: NodeProvider> CachingProvider<T> {
    /// Wrap `provider`, caching up to `capacity` transactions.
    pub fn with_capacity(provider: T, capacity: NonZeroUsize) -> Self {
        Self {
            provider,
            config_cache: Mutex::new(None),
            tx_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return a reference to the wrapped provider
    pub fn inner(&self) -> &T {
        &self.provider
    }

    /// Return true if the cache has the tx in it
    pub async fn has_tx(&self, chain: Chain, tx_id: TxId) -> bool {
        self.tx_cache.lock().await.contains(&(chain, tx_id))
    }
}

#[async_trait]
impl<T> NodeProvider for CachingProvider<T>
where
    T: NodeProvider,
{
    async fn get_configuration(&self) -> Result<NodeConfiguration, ProviderError> {
        if let Some(cfg) = self.config_cache.lock().await.as_ref() {
            return Ok(cfg.clone());
        }
        let cfg = self.provider.get_configuration().await?;
        *self.config_cache.lock().await = Some(cfg.clone());
        Ok(cfg)
    }

    async fn spend(&self, request: &SpendRequest) -> Result<SpendReply, ProviderError> {
        self.provider.spend(request).await
    }

    async fn get_tx(&self, chain: Chain, tx_id: TxId) -> Result<Vec<u8>, ProviderError> {
        if let Some(tx) = self.tx_cache.lock().await.get(&(chain, tx_id)) {
            return Ok(tx.clone());
        }
        let tx = self.provider.get_tx(chain, tx_id).await?;
        self.tx_cache.lock().await.put((chain, tx_id), tx.clone());
        Ok(tx)
    }

    async fn issue_tx(&self, chain: Chain, tx: &[u8]) -> Result<TxId, ProviderError> {
        self.provider.issue_tx(chain, tx).await
    }

    async fn base_fee(&self) -> Result<Option<u128>, ProviderError> {
        self.provider.base_fee().await
    }

    async fn nonce(&self, address: EthAddress) -> Result<u64, ProviderError> {
        self.provider.nonce(address).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Blockchain;
    use camino_core::{AssetId, ChainId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NodeProvider for CountingProvider {
        async fn get_configuration(&self) -> Result<NodeConfiguration, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(NodeConfiguration {
                network_id: 1002,
                asset_id: AssetId::new([1; 32]),
                hrp: "kopernikus".to_owned(),
                blockchains: vec![Blockchain {
                    id: ChainId::new([2; 32]),
                    name: "C".to_owned(),
                }],
            })
        }

        async fn spend(&self, _: &SpendRequest) -> Result<SpendReply, ProviderError> {
            Err(ProviderError::Unsupported("spend".to_owned()))
        }

        async fn get_tx(&self, _: Chain, tx_id: TxId) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(tx_id.as_ref().to_vec())
        }

        async fn issue_tx(&self, _: Chain, _: &[u8]) -> Result<TxId, ProviderError> {
            Ok(TxId::default())
        }

        async fn base_fee(&self) -> Result<Option<u128>, ProviderError> {
            Ok(None)
        }

        async fn nonce(&self, _: EthAddress) -> Result<u64, ProviderError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn it_caches_configuration_and_txs() {
        let provider = CachingProvider::from(CountingProvider::default());
        let first = provider.get_configuration().await.unwrap();
        let second = provider.get_configuration().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 1);

        let id = TxId::new([5; 32]);
        assert!(!provider.has_tx(Chain::P, id).await);
        provider.get_tx(Chain::P, id).await.unwrap();
        provider.get_tx(Chain::P, id).await.unwrap();
        assert!(provider.has_tx(Chain::P, id).await);
        assert!(!provider.has_tx(Chain::C, id).await);
        assert_eq!(provider.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn it_passes_errors_through() {
        let provider = CachingProvider::from(CountingProvider::default());
        let req = SpendRequest {
            from: vec![],
            to: crate::types::ApiOwner::single(String::new()),
            change: crate::types::ApiOwner::single(String::new()),
            lock_mode: 0,
            amount_to_lock: 0,
            amount_to_burn: 0,
            encoding: "hex".to_owned(),
        };
        let err = provider.spend(&req).await.unwrap_err();
        assert!(!err.from_parsing());
        assert_eq!(err.rpc_message(), None);
    }
}
