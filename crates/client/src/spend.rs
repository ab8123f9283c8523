//! UTXO selection, delegated to the node's `platform.spend`.

use std::io::{Read, Write};

use camino_core::{enc::decode_hex_checksummed, ser::ByteFormat, Address, SerError};
use camino_provider::{
    types::{platform_address, ApiOwner, SpendRequest},
    NodeProvider, ProviderError,
};
use camino_txs::types::{LockState, TransferableInput, TransferableOutput};

use crate::error::BuildError;

/// Inputs and outputs chosen by the node.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Spend {
    /// UTXOs to consume
    pub inputs: Vec<TransferableInput>,
    /// Locked amounts and change
    pub outputs: Vec<TransferableOutput>,
}

/// A version-prefixed list, as `platform.spend` encodes its replies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Fragments<T>(pub(crate) Vec<T>);

impl<T> ByteFormat for Fragments<T>
where
    T: ByteFormat<Error = SerError>,
{
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        2 + 4 + self.0.iter().map(ByteFormat::serialized_length).sum::<usize>()
    }

    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
    {
        Self::read_codec_version(reader)?;
        Ok(Self(Self::read_prefix_vec(reader)?))
    }

    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        let mut len = Self::write_u16_be(writer, camino_core::ser::CODEC_VERSION)?;
        len += Self::write_prefix_vec(writer, &self.0)?;
        Ok(len)
    }
}

fn decode_fragments<T>(s: &str) -> Result<Vec<T>, BuildError>
where
    T: ByteFormat<Error = SerError>,
{
    let bytes = decode_hex_checksummed(s).map_err(ProviderError::from)?;
    Ok(Fragments::<T>::deserialize_bytes(&bytes)?.0)
}

/// True if the node refused because the funding address cannot cover the amounts
fn is_insufficient(e: &ProviderError) -> bool {
    e.rpc_message()
        .map(|m| m.to_lowercase().contains("insufficient"))
        .unwrap_or(false)
}

/// Ask the node to consume UTXOs of `from` that lock `amount_to_lock` for `to` under
/// `lock_mode` and burn `amount_to_burn`. Change returns to `from`.
#[tracing::instrument(skip(provider, hrp), err)]
pub async fn select_spend<P>(
    provider: &P,
    hrp: &str,
    from: Address,
    to: Address,
    amount_to_lock: u64,
    amount_to_burn: u64,
    lock_mode: LockState,
) -> Result<Spend, BuildError>
where
    P: NodeProvider + ?Sized,
{
    let from = platform_address(&from, hrp)?;
    let to = platform_address(&to, hrp)?;
    let request = SpendRequest {
        from: vec![from.clone()],
        to: ApiOwner::single(to),
        change: ApiOwner::single(from),
        lock_mode: lock_mode.into(),
        amount_to_lock,
        amount_to_burn,
        encoding: "hex".to_owned(),
    };

    let reply = provider.spend(&request).await.map_err(|e| {
        if is_insufficient(&e) {
            BuildError::InsufficientFunds(e.rpc_message().unwrap_or_default().to_owned())
        } else {
            BuildError::Provider(e)
        }
    })?;

    let spend = Spend {
        inputs: decode_fragments(&reply.ins)?,
        outputs: decode_fragments(&reply.outs)?,
    };
    tracing::debug!(
        inputs = spend.inputs.len(),
        outputs = spend.outputs.len(),
        "node selected utxos"
    );
    Ok(spend)
}
