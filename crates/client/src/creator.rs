//! `TxCreator` drives the whole pipeline for one transaction: fetch node parameters, select
//! UTXOs, assemble, order, sign, and optionally submit.
//!
//! Every node call is raced against the creator's `CancelToken` and request timeout. Nothing
//! is retried.

use std::{future::Future, num::NonZeroUsize, time::Duration};

use camino_core::{
    enc::encode_hex_checksummed,
    nets::{Chain, PLATFORM_CHAIN_ID},
    ser::ByteFormat,
    Address, TxId,
};
use camino_keys::PrivateKey;
use camino_provider::{
    types::NodeConfiguration, CachingProvider, HttpProvider, HttpTransport, NodeProvider,
    DEFAULT_CACHE_SIZE,
};
use camino_txs::{
    dac::{AddressStateBit, Proposal},
    sort,
    types::LockState,
    AtomicTx, Authorized, ExportTxBuilder, FeeParameters, PlatformTxBuilder, SignedTx, Tx,
    TxError, UnsignedTransaction,
};

use crate::{
    cancel::{guarded, CancelToken},
    config::ClientConfig,
    error::BuildError,
    spend::{select_spend, Spend},
};

/// A provider for a node over HTTP, caching immutable replies
pub type DefaultProvider = CachingProvider<HttpProvider<HttpTransport>>;

/// A created multisig alias, with its address and owners formatted for the network
#[derive(Clone, Debug)]
pub struct AliasReport {
    /// The signed creation transaction
    pub tx: SignedTx,
    /// The creation transaction's ID
    pub tx_id: TxId,
    /// The alias ID derived from `tx_id`
    pub alias: Address,
    /// The alias as `P-<bech32>`
    pub alias_address: String,
    /// Signatures required to act as the alias
    pub threshold: u32,
    /// Owners as `P-<bech32>`, in canonical order
    pub owners: Vec<String>,
}

/// Builds Camino transactions against a node.
#[derive(Debug)]
pub struct TxCreator<P: NodeProvider> {
    provider: P,
    config: NodeConfiguration,
    fees: FeeParameters,
    cancel: CancelToken,
    timeout: Duration,
}

impl TxCreator<DefaultProvider> {
    /// Connect to the node named in `config`.
    pub async fn connect(config: &ClientConfig, cancel: CancelToken) -> Result<Self, BuildError> {
        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(DEFAULT_CACHE_SIZE);
        let provider =
            CachingProvider::with_capacity(HttpProvider::new(&config.node_uri), capacity);
        Self::new(provider, config.request_timeout(), cancel).await
    }
}

impl<P: NodeProvider> TxCreator<P> {
    /// Fetch the network configuration from `provider` and instantiate a creator.
    #[tracing::instrument(skip_all, err)]
    pub async fn new(provider: P, timeout: Duration, cancel: CancelToken) -> Result<Self, BuildError> {
        let config = guarded(&cancel, timeout, provider.get_configuration()).await?;
        let fees = FeeParameters::for_network(config.network_id);
        tracing::info!(
            network_id = config.network_id,
            asset_id = %config.asset_id,
            hrp = config.hrp(),
            "connected to node"
        );
        Ok(Self {
            provider,
            config,
            fees,
            cancel,
            timeout,
        })
    }

    /// The network ID the node reported
    pub fn network_id(&self) -> u32 {
        self.config.network_id
    }

    /// The network's address HRP
    pub fn hrp(&self) -> &str {
        self.config.hrp()
    }

    /// The node configuration
    pub fn config(&self) -> &NodeConfiguration {
        &self.config
    }

    /// The fee parameters in force
    pub fn fees(&self) -> FeeParameters {
        self.fees
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn guard<T, E, F>(&self, fut: F) -> Result<T, BuildError>
    where
        F: Future<Output = Result<T, E>>,
        BuildError: From<E>,
    {
        guarded(&self.cancel, self.timeout, fut).await
    }

    fn chain_id(&self, chain: Chain) -> Result<camino_core::ChainId, BuildError> {
        if chain == Chain::P {
            return Ok(PLATFORM_CHAIN_ID);
        }
        self.config
            .chain_id(chain)
            .ok_or(BuildError::UnknownChain(chain))
    }

    /// Select UTXOs of `funds` covering the transaction fee and `lock`.
    async fn spend(
        &self,
        funds: &PrivateKey,
        to: Address,
        lock: u64,
        lock_mode: LockState,
    ) -> Result<Spend, BuildError> {
        self.guard(select_spend(
            &self.provider,
            self.hrp(),
            funds.address(),
            to,
            lock,
            self.fees.tx_fee,
            lock_mode,
        ))
        .await
    }

    fn platform_builder<'a>(&self, spend: Spend, funds: &'a PrivateKey) -> PlatformTxBuilder<'a> {
        PlatformTxBuilder::new(self.network_id())
            .spend_all_with(spend.inputs, funds)
            .extend_outputs(spend.outputs)
    }

    fn finish<U: UnsignedTransaction>(
        &self,
        authorized: Authorized<'_, U>,
    ) -> Result<Tx<U>, BuildError> {
        let tx = authorized.sign()?;
        let encoded = encode_hex_checksummed(&tx.signed_bytes().map_err(TxError::from)?);
        tracing::debug!(tx = %encoded, "signed");
        let tx_id = tx.id().map_err(TxError::from)?;
        tracing::info!(%tx_id, "built transaction");
        Ok(tx)
    }

    fn parse_address(&self, address: &str) -> Result<Address, BuildError> {
        Address::parse(address).map_err(|source| BuildError::InvalidAddress {
            address: address.to_owned(),
            source,
        })
    }

    /// Create a multisig alias controlled by `threshold` of `owners`, funded by `funds`.
    ///
    /// Owners are `<chain>-<bech32>` text; any chain alias and HRP is accepted. Duplicates are
    /// dropped.
    #[tracing::instrument(skip(self, funds), err)]
    pub async fn multisig_alias_tx(
        &self,
        owners: &[&str],
        threshold: u32,
        funds: &PrivateKey,
    ) -> Result<AliasReport, BuildError> {
        tracing::info!("creating MultisigAliasTx");
        let mut addrs = owners
            .iter()
            .map(|s| {
                let addr = self.parse_address(s)?;
                let formatted = addr.format(Chain::P.alias(), self.hrp())?;
                tracing::info!(owner = *s, id = %addr, address = %formatted, "alias owner");
                Ok(addr)
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        let spend = self.spend(funds, funds.address(), 0, LockState::Unlocked).await?;
        let tx = self.finish(
            self.platform_builder(spend, funds)
                .build_multisig_alias(addrs.clone(), threshold)?,
        )?;

        sort::sort_addresses(&mut addrs);
        let tx_id = tx.id()?;
        let alias = Address::alias_of(&tx_id);
        let alias_address = alias.format(Chain::P.alias(), self.hrp())?;
        let owners = addrs
            .iter()
            .map(|a| a.format(Chain::P.alias(), self.hrp()))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(alias = %alias_address, threshold, owners = ?owners, "alias definition");

        Ok(AliasReport {
            tx,
            tx_id,
            alias,
            alias_address,
            threshold,
            owners,
        })
    }

    /// Set (or, with `remove`, clear) `state` on `address`, executed by `executor`.
    #[tracing::instrument(skip(self, funds, executor), err)]
    pub async fn address_state_tx(
        &self,
        address: Address,
        state: AddressStateBit,
        remove: bool,
        funds: &PrivateKey,
        executor: &PrivateKey,
    ) -> Result<SignedTx, BuildError> {
        tracing::info!("creating AddressStateTx");
        let spend = self.spend(funds, funds.address(), 0, LockState::Unlocked).await?;
        self.finish(
            self.platform_builder(spend, funds)
                .build_address_state(address, state, remove, executor)?,
        )
    }

    /// Submit `proposal` on behalf of `proposer`. `funds` pays the fee and bonds the proposal
    /// amount.
    #[tracing::instrument(skip(self, funds, proposer), err)]
    pub async fn proposal_tx(
        &self,
        proposal: &Proposal,
        funds: &PrivateKey,
        proposer: &PrivateKey,
    ) -> Result<SignedTx, BuildError> {
        tracing::info!("creating AddProposalTx");
        let payload = proposal.to_payload().map_err(TxError::from)?;
        let spend = self
            .spend(
                funds,
                funds.address(),
                self.fees.proposal_bond_amount,
                LockState::Bonded,
            )
            .await?;
        self.finish(
            self.platform_builder(spend, funds)
                .build_proposal(payload, proposer)?,
        )
    }

    /// Vote for `option_index` of `proposal_id` on behalf of `voter`.
    #[tracing::instrument(skip(self, funds, voter), err)]
    pub async fn vote_tx(
        &self,
        proposal_id: TxId,
        option_index: u32,
        funds: &PrivateKey,
        voter: &PrivateKey,
    ) -> Result<SignedTx, BuildError> {
        tracing::info!("creating AddVoteTx");
        let spend = self.spend(funds, funds.address(), 0, LockState::Unlocked).await?;
        self.finish(
            self.platform_builder(spend, funds)
                .build_vote(proposal_id, option_index, voter)?,
        )
    }

    /// Send `amount` of the primary asset from `funds` to `recipient` on the platform chain.
    #[tracing::instrument(skip(self, funds), err)]
    pub async fn transfer_tx(
        &self,
        amount: u64,
        recipient: Address,
        funds: &PrivateKey,
    ) -> Result<SignedTx, BuildError> {
        tracing::info!("creating BaseTx");
        let spend = self
            .spend(funds, recipient, amount, LockState::Unlocked)
            .await?;
        self.finish(self.platform_builder(spend, funds).build_base()?)
    }

    /// Export `amount` of the primary asset from `funds`'s C-chain account to `recipient` on
    /// `target`. The fee is priced at the node's current base fee.
    #[tracing::instrument(skip(self, funds), err)]
    pub async fn export_tx(
        &self,
        amount: u64,
        recipient: Address,
        funds: &PrivateKey,
        target: Chain,
    ) -> Result<AtomicTx, BuildError> {
        tracing::info!("creating C-chain ExportTx");
        let destination = self.chain_id(target)?;
        let c_chain = self.chain_id(Chain::C)?;

        let nonce = self.guard(self.provider.nonce(funds.eth_address())).await?;
        let builder = ExportTxBuilder::new(self.network_id(), c_chain, self.config.asset_id)
            .destination_chain(destination)
            .export_to(amount, recipient);
        let estimate = builder.estimate()?;

        let base_fee = self.guard(self.provider.base_fee()).await?;
        tracing::debug!(?base_fee, nonce, gas_used = estimate.gas_used, "pricing export");
        self.finish(builder.finalize(estimate, base_fee, funds, nonce)?)
    }

    /// Fetch and decode a platform chain transaction.
    #[tracing::instrument(skip(self), err)]
    pub async fn get_platform_tx(&self, tx_id: TxId) -> Result<SignedTx, BuildError> {
        let bytes = self.guard(self.provider.get_tx(Chain::P, tx_id)).await?;
        Ok(SignedTx::deserialize_bytes(&bytes)?)
    }

    async fn issue<U: UnsignedTransaction>(
        &self,
        chain: Chain,
        tx: &Tx<U>,
    ) -> Result<TxId, BuildError> {
        let local = tx.id().map_err(TxError::from)?;
        let bytes = tx.signed_bytes().map_err(TxError::from)?;
        let remote = self.guard(self.provider.issue_tx(chain, &bytes)).await?;
        if remote != local {
            tracing::warn!(%local, %remote, "node reported a different transaction ID");
        }
        tracing::info!(tx_id = %remote, %chain, "issued transaction");
        Ok(remote)
    }

    /// Submit a signed platform chain transaction.
    #[tracing::instrument(skip_all, err)]
    pub async fn issue_platform_tx(&self, tx: &SignedTx) -> Result<TxId, BuildError> {
        self.issue(Chain::P, tx).await
    }

    /// Submit a signed C-chain atomic transaction.
    #[tracing::instrument(skip_all, err)]
    pub async fn issue_atomic_tx(&self, tx: &AtomicTx) -> Result<TxId, BuildError> {
        self.issue(Chain::C, tx).await
    }
}
