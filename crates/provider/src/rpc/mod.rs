/// JSON RPC Common
pub mod common;

/// HTTP Transport
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use camino_core::{
    enc::{decode_hex_checksummed, encode_hex_checksummed},
    nets::Chain,
    EthAddress, TxId,
};

use crate::{
    provider::*,
    rpc::{common::*, http::HttpTransport},
    types::*,
};

static PLATFORM_ENDPOINT: &str = "/ext/bc/P";
static EXCHANGE_ENDPOINT: &str = "/ext/bc/X";
static ATOMIC_ENDPOINT: &str = "/ext/bc/C/avax";
static ETH_ENDPOINT: &str = "/ext/bc/C/rpc";

static HEX: &str = "hex";

/// The API endpoint and method prefix serving transactions on `chain`
fn tx_api(chain: Chain) -> (&'static str, &'static str) {
    match chain {
        Chain::P => (PLATFORM_ENDPOINT, "platform"),
        Chain::X => (EXCHANGE_ENDPOINT, "avm"),
        Chain::C => (ATOMIC_ENDPOINT, "avax"),
    }
}

/// Parse an `0x`-prefixed hex quantity
fn parse_quantity(s: &str) -> Result<u128, ProviderError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16).map_err(|e| ProviderError::custom(true, Box::new(e)))
}

#[derive(Serialize)]
struct NoParams {}

/// A Camino node reached over JSON RPC
#[derive(Debug, Default)]
pub struct HttpProvider<T: JsonRpcTransport> {
    transport: T,
}

impl<T: JsonRpcTransport> From<T> for HttpProvider<T> {
    fn from(transport: T) -> Self {
        Self { transport }
    }
}

impl HttpProvider<HttpTransport> {
    /// Instantiate a provider for the node at `url`
    pub fn new(url: &str) -> Self {
        HttpTransport::new(url).into()
    }
}

impl<T: JsonRpcTransport> HttpProvider<T> {
    async fn request<P: Serialize + Send + Sync, R: for<'a> Deserialize<'a>>(
        &self,
        endpoint: &str,
        method: &str,
        params: P,
    ) -> Result<R, ProviderError> {
        self.transport.request(endpoint, method, params).await
    }

    /// Return a reference to the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: JsonRpcTransport> NodeProvider for HttpProvider<T> {
    async fn get_configuration(&self) -> Result<NodeConfiguration, ProviderError> {
        self.request(PLATFORM_ENDPOINT, "platform.getConfiguration", NoParams {})
            .await
    }

    async fn spend(&self, request: &SpendRequest) -> Result<SpendReply, ProviderError> {
        self.request(PLATFORM_ENDPOINT, "platform.spend", request)
            .await
    }

    async fn get_tx(&self, chain: Chain, tx_id: TxId) -> Result<Vec<u8>, ProviderError> {
        let (endpoint, api) = tx_api(chain);
        let method = match chain {
            Chain::C => format!("{}.getAtomicTx", api),
            _ => format!("{}.getTx", api),
        };
        let reply: EncodedTx = self
            .request(
                endpoint,
                &method,
                GetTxRequest {
                    tx_id,
                    encoding: HEX.to_owned(),
                },
            )
            .await?;
        Ok(decode_hex_checksummed(&reply.tx)?)
    }

    async fn issue_tx(&self, chain: Chain, tx: &[u8]) -> Result<TxId, ProviderError> {
        let (endpoint, api) = tx_api(chain);
        let reply: IssueTxReply = self
            .request(
                endpoint,
                &format!("{}.issueTx", api),
                EncodedTx {
                    tx: encode_hex_checksummed(tx),
                    encoding: HEX.to_owned(),
                },
            )
            .await?;
        Ok(reply.tx_id)
    }

    async fn base_fee(&self) -> Result<Option<u128>, ProviderError> {
        let fee: Option<String> = self
            .request(ETH_ENDPOINT, "eth_baseFee", Vec::<String>::new())
            .await?;
        fee.as_deref().map(parse_quantity).transpose()
    }

    async fn nonce(&self, address: EthAddress) -> Result<u64, ProviderError> {
        let count: String = self
            .request(
                ETH_ENDPOINT,
                "eth_getTransactionCount",
                vec![address.to_string(), "latest".to_owned()],
            )
            .await?;
        let count = parse_quantity(&count)?;
        u64::try_from(count).map_err(|e| ProviderError::custom(true, Box::new(e)))
    }
}
