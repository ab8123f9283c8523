//! Builders for platform chain and atomic export transactions.
//!
//! `PlatformTxBuilder` accumulates inputs (each paired with the keys that sign it), outputs and
//! a memo, then finishes with one terminal per transaction variant. Every terminal puts the
//! inputs and outputs in canonical order and returns an `Authorized` transaction: the unsigned
//! body plus the signer sets aligned with its authorizations, ready for `sign`.
//!
//! `ExportTxBuilder` prices a C-chain export in two passes. `estimate` measures the gas of the
//! transaction without its funding input; `finalize` prices that gas at the node's base fee and
//! adds one input covering the exported amount plus the fee.

use camino_core::{nets::PLATFORM_CHAIN_ID, Address, AssetId, ChainId, TxId};
use camino_keys::PrivateKey;

use crate::{
    dac::{AddressStateBit, SimpleVote},
    error::{TxError, TxResult},
    fee::{calculate_dynamic_fee, EVM_INPUT_GAS},
    signer::{self, SignerSet},
    sort,
    types::{
        AddProposalTx, AddVoteTx, AddressStateTx, Auth, BaseTx, EvmInput, MultisigAlias,
        MultisigAliasTx, OutputOwners, Owner, TransferableInput, TransferableOutput, Tx,
        UnsignedAtomicTx, UnsignedExportTx, UnsignedTransaction, UnsignedTx,
    },
};

/// An unsigned transaction and the keys for each of its authorizations.
#[derive(Clone, Debug)]
pub struct Authorized<'a, U> {
    /// The unsigned transaction
    pub unsigned: U,
    /// One key list per authorization
    pub signers: SignerSet<'a>,
}

impl<'a, U> Authorized<'a, U>
where
    U: UnsignedTransaction,
{
    /// Sign with the collected keys.
    pub fn sign(self) -> TxResult<Tx<U>> {
        signer::sign(self.unsigned, &self.signers)
    }
}

/// A builder for platform chain transactions.
#[derive(Clone, Debug)]
pub struct PlatformTxBuilder<'a> {
    network_id: u32,
    blockchain_id: ChainId,
    ins: Vec<TransferableInput>,
    signers: SignerSet<'a>,
    outs: Vec<TransferableOutput>,
    memo: Vec<u8>,
}

impl<'a> PlatformTxBuilder<'a> {
    /// Instantiate a builder for the platform chain of `network_id`.
    pub fn new(network_id: u32) -> Self {
        Self {
            network_id,
            blockchain_id: PLATFORM_CHAIN_ID,
            ins: vec![],
            signers: vec![],
            outs: vec![],
            memo: vec![],
        }
    }

    /// Set the blockchain ID
    pub fn blockchain_id(mut self, blockchain_id: ChainId) -> Self {
        self.blockchain_id = blockchain_id;
        self
    }

    /// Spend `input`, signed by `keys` in the order of its signature indices.
    pub fn spend(mut self, input: TransferableInput, keys: Vec<&'a PrivateKey>) -> Self {
        self.ins.push(input);
        self.signers.push(keys);
        self
    }

    /// Spend several inputs, each with its keys.
    pub fn extend_inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = (TransferableInput, Vec<&'a PrivateKey>)>,
    {
        for (input, keys) in inputs {
            self.ins.push(input);
            self.signers.push(keys);
        }
        self
    }

    /// Spend inputs that are all owned by `key` alone.
    pub fn spend_all_with<I>(self, inputs: I, key: &'a PrivateKey) -> Self
    where
        I: IntoIterator<Item = TransferableInput>,
    {
        self.extend_inputs(inputs.into_iter().map(|input| (input, vec![key])))
    }

    /// Add an unlocked output paying `amount` of `asset_id` to `recipient`.
    pub fn pay(mut self, asset_id: AssetId, amount: u64, recipient: Address) -> Self {
        self.outs
            .push(TransferableOutput::pay(asset_id, amount, recipient));
        self
    }

    /// Add outputs
    pub fn extend_outputs<I>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = TransferableOutput>,
    {
        self.outs.extend(outputs);
        self
    }

    /// Set the memo
    pub fn memo(mut self, memo: Vec<u8>) -> Self {
        self.memo = memo;
        self
    }

    fn finish_base(self) -> TxResult<(BaseTx, SignerSet<'a>)> {
        let Self {
            network_id,
            blockchain_id,
            mut ins,
            mut signers,
            mut outs,
            memo,
        } = self;
        sort::sort_inputs_with_signers(&mut ins, &mut signers)?;
        sort::sort_outputs(&mut outs)?;
        let base = BaseTx {
            network_id,
            blockchain_id,
            outs,
            ins,
            memo,
        };
        Ok((base, signers))
    }

    /// Build a plain transfer.
    pub fn build_base(self) -> TxResult<Authorized<'a, UnsignedTx>> {
        let (base, signers) = self.finish_base()?;
        Ok(Authorized {
            unsigned: UnsignedTx::Base(base),
            signers,
        })
    }

    /// Build a transaction creating a multisig alias controlled by `threshold` of `owners`.
    ///
    /// Owners are sorted and deduplicated. The threshold must be between 1 and the number of
    /// distinct owners. Creation needs no authorization beyond the funding inputs.
    pub fn build_multisig_alias(
        self,
        mut owners: Vec<Address>,
        threshold: u32,
    ) -> TxResult<Authorized<'a, UnsignedTx>> {
        let dropped = sort::sort_addresses(&mut owners);
        if dropped > 0 {
            tracing::warn!(dropped, "dropped duplicate alias owners");
        }
        if threshold == 0 || threshold as usize > owners.len() {
            return Err(TxError::InvalidThreshold {
                threshold,
                owners: owners.len(),
            });
        }

        let (base, signers) = self.finish_base()?;
        let alias = MultisigAlias {
            id: Address::default(),
            memo: vec![],
            owners: Owner::Threshold(OutputOwners::new(0, threshold, owners)),
        };
        Ok(Authorized {
            unsigned: UnsignedTx::MultisigAlias(MultisigAliasTx {
                base,
                alias,
                auth: Auth::default(),
            }),
            signers,
        })
    }

    /// Build a transaction setting (or, with `remove`, clearing) `state` on `address`,
    /// executed and signed by `executor`.
    pub fn build_address_state(
        self,
        address: Address,
        state: AddressStateBit,
        remove: bool,
        executor: &'a PrivateKey,
    ) -> TxResult<Authorized<'a, UnsignedTx>> {
        let (base, mut signers) = self.finish_base()?;
        signers.push(vec![executor]);
        Ok(Authorized {
            unsigned: UnsignedTx::AddressState(AddressStateTx {
                base,
                address,
                state,
                remove,
                executor: executor.address(),
                executor_auth: Auth::single(),
            }),
            signers,
        })
    }

    /// Build a transaction submitting an encoded proposal, signed by `proposer`.
    ///
    /// The inputs and outputs must already bond the proposal amount.
    pub fn build_proposal(
        self,
        payload: Vec<u8>,
        proposer: &'a PrivateKey,
    ) -> TxResult<Authorized<'a, UnsignedTx>> {
        let (base, mut signers) = self.finish_base()?;
        signers.push(vec![proposer]);
        Ok(Authorized {
            unsigned: UnsignedTx::AddProposal(AddProposalTx {
                base,
                proposal_payload: payload,
                proposer_address: proposer.address(),
                proposer_auth: Auth::single(),
            }),
            signers,
        })
    }

    /// Build a transaction voting for `option_index` of `proposal_id`, signed by `voter`.
    pub fn build_vote(
        self,
        proposal_id: TxId,
        option_index: u32,
        voter: &'a PrivateKey,
    ) -> TxResult<Authorized<'a, UnsignedTx>> {
        let vote_payload = SimpleVote { option_index }.to_payload()?;
        let (base, mut signers) = self.finish_base()?;
        signers.push(vec![voter]);
        Ok(Authorized {
            unsigned: UnsignedTx::AddVote(AddVoteTx {
                base,
                proposal_id,
                vote_payload,
                voter_address: voter.address(),
                voter_auth: Auth::single(),
            }),
            signers,
        })
    }
}

/// The measured gas of an export transaction, including its funding input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExportEstimate {
    /// Gas the finished transaction will consume
    pub gas_used: u64,
}

impl ExportEstimate {
    /// The fee for this gas at `base_fee`
    pub fn fee(&self, base_fee: Option<u128>) -> TxResult<u64> {
        calculate_dynamic_fee(self.gas_used, base_fee)
    }
}

/// A builder for C-chain exports.
#[derive(Clone, Debug)]
pub struct ExportTxBuilder {
    network_id: u32,
    blockchain_id: ChainId,
    destination_chain: ChainId,
    asset_id: AssetId,
    outs: Vec<TransferableOutput>,
}

impl ExportTxBuilder {
    /// Instantiate a builder exporting `asset_id` from the C-chain `blockchain_id` to the
    /// platform chain.
    pub fn new(network_id: u32, blockchain_id: ChainId, asset_id: AssetId) -> Self {
        Self {
            network_id,
            blockchain_id,
            destination_chain: PLATFORM_CHAIN_ID,
            asset_id,
            outs: vec![],
        }
    }

    /// Set the destination chain
    pub fn destination_chain(mut self, destination_chain: ChainId) -> Self {
        self.destination_chain = destination_chain;
        self
    }

    /// Export `amount` to `recipient` on the destination chain.
    pub fn export_to(mut self, amount: u64, recipient: Address) -> Self {
        self.outs
            .push(TransferableOutput::pay(self.asset_id, amount, recipient));
        self
    }

    /// The total exported
    pub fn total(&self) -> TxResult<u64> {
        self.outs.iter().try_fold(0u64, |acc, out| {
            acc.checked_add(out.amount()).ok_or(TxError::AmountOverflow)
        })
    }

    fn unsigned(&self, ins: Vec<EvmInput>) -> TxResult<UnsignedExportTx> {
        let mut exported_outputs = self.outs.clone();
        sort::sort_outputs(&mut exported_outputs)?;
        Ok(UnsignedExportTx {
            network_id: self.network_id,
            blockchain_id: self.blockchain_id,
            destination_chain: self.destination_chain,
            ins,
            exported_outputs,
        })
    }

    /// First pass: measure the transaction without inputs, then add the gas of one funding
    /// input.
    pub fn estimate(&self) -> TxResult<ExportEstimate> {
        let placeholder = signer::sign(UnsignedAtomicTx::Export(self.unsigned(vec![])?), &[])?;
        let UnsignedAtomicTx::Export(tx) = &placeholder.unsigned;
        let gas_used = tx
            .gas_used(true)?
            .checked_add(EVM_INPUT_GAS)
            .ok_or(TxError::AmountOverflow)?;
        tracing::debug!(gas_used, "estimated export gas");
        Ok(ExportEstimate { gas_used })
    }

    /// Second pass: fund the export plus its fee from `funder`'s C-chain account.
    pub fn finalize<'a>(
        self,
        estimate: ExportEstimate,
        base_fee: Option<u128>,
        funder: &'a PrivateKey,
        nonce: u64,
    ) -> TxResult<Authorized<'a, UnsignedAtomicTx>> {
        let fee = estimate.fee(base_fee)?;
        let amount = self
            .total()?
            .checked_add(fee)
            .ok_or(TxError::AmountOverflow)?;
        tracing::debug!(fee, amount, "funding export");

        let mut ins = vec![EvmInput {
            address: funder.eth_address(),
            amount,
            asset_id: self.asset_id,
            nonce,
        }];
        sort::sort_evm_inputs(&mut ins);
        Ok(Authorized {
            unsigned: UnsignedAtomicTx::Export(self.unsigned(ins)?),
            signers: vec![vec![funder]],
        })
    }
}
