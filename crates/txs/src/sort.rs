//! Canonical ordering. Semantically identical transactions must serialize identically, so
//! owner sets, inputs and outputs are sorted before signing.
//!
//! Inputs and outputs compare by their encoded bytes. Inputs carry a parallel list of signer
//! sets, which is permuted along with them. All sorts are stable.

use std::cmp::Ordering;

use camino_core::{ser::ByteFormat, Address, SerResult};

use crate::{
    error::{TxError, TxResult},
    types::{EvmInput, TransferableInput, TransferableOutput},
};

/// Sort addresses by byte order and drop duplicates. Returns the number of duplicates dropped.
pub fn sort_addresses(addrs: &mut Vec<Address>) -> usize {
    let before = addrs.len();
    addrs.sort();
    addrs.dedup();
    before - addrs.len()
}

/// True if `addrs` is strictly ascending.
pub fn is_sorted_and_unique(addrs: &[Address]) -> bool {
    addrs.windows(2).all(|w| w[0] < w[1])
}

fn encoded<T>(items: &[T]) -> SerResult<Vec<Vec<u8>>>
where
    T: ByteFormat<Error = camino_core::SerError>,
{
    items.iter().map(|i| i.serialize_bytes()).collect()
}

fn is_sorted_by_encoding<T>(items: &[T]) -> SerResult<bool>
where
    T: ByteFormat<Error = camino_core::SerError>,
{
    Ok(encoded(items)?.windows(2).all(|w| w[0] <= w[1]))
}

/// Sort inputs by their encoding, applying the same permutation to `signers`.
///
/// Fails with `SignerCountMismatch` if the two lists differ in length.
pub fn sort_inputs_with_signers<S>(
    ins: &mut Vec<TransferableInput>,
    signers: &mut Vec<S>,
) -> TxResult<()> {
    if ins.len() != signers.len() {
        return Err(TxError::SignerCountMismatch {
            expected: ins.len(),
            got: signers.len(),
        });
    }
    let keys = encoded(ins)?;
    let mut order: Vec<usize> = (0..ins.len()).collect();
    order.sort_by(|a, b| keys[*a].cmp(&keys[*b]));

    let mut paired: Vec<Option<(TransferableInput, S)>> =
        ins.drain(..).zip(signers.drain(..)).map(Some).collect();
    for i in order {
        if let Some((input, signer)) = paired[i].take() {
            ins.push(input);
            signers.push(signer);
        }
    }
    Ok(())
}

/// True if `ins` are in canonical order
pub fn is_sorted_inputs(ins: &[TransferableInput]) -> SerResult<bool> {
    is_sorted_by_encoding(ins)
}

/// Sort outputs by their encoding.
pub fn sort_outputs(outs: &mut Vec<TransferableOutput>) -> SerResult<()> {
    let mut keyed: Vec<(Vec<u8>, TransferableOutput)> =
        encoded(outs)?.into_iter().zip(outs.drain(..)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    outs.extend(keyed.into_iter().map(|(_, out)| out));
    Ok(())
}

/// True if `outs` are in canonical order
pub fn is_sorted_outputs(outs: &[TransferableOutput]) -> SerResult<bool> {
    is_sorted_by_encoding(outs)
}

fn compare_evm_inputs(a: &EvmInput, b: &EvmInput) -> Ordering {
    a.address
        .cmp(&b.address)
        .then_with(|| a.asset_id.cmp(&b.asset_id))
}

/// Sort C-chain inputs by address, then asset.
pub fn sort_evm_inputs(ins: &mut [EvmInput]) {
    ins.sort_by(compare_evm_inputs);
}

/// True if `ins` are sorted by address, then asset
pub fn is_sorted_evm_inputs(ins: &[EvmInput]) -> bool {
    ins.windows(2)
        .all(|w| compare_evm_inputs(&w[0], &w[1]) != Ordering::Greater)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::UtxoId;
    use camino_core::{AssetId, EthAddress, TxId};
    use pretty_assertions::assert_eq;

    fn input(tx: u8, index: u32) -> TransferableInput {
        TransferableInput::transfer(
            UtxoId::new(TxId::new([tx; 32]), index),
            AssetId::new([1; 32]),
            100,
            vec![0],
        )
    }

    #[test]
    fn it_sorts_and_dedups_addresses() {
        let a = Address::new([1; 20]);
        let b = Address::new([2; 20]);
        let c = Address::new([3; 20]);
        let mut addrs = vec![c, a, b];
        assert_eq!(sort_addresses(&mut addrs), 0);
        assert_eq!(addrs, vec![a, b, c]);
        assert!(is_sorted_and_unique(&addrs));

        let mut dups = vec![b, a, b];
        assert_eq!(sort_addresses(&mut dups), 1);
        assert_eq!(dups, vec![a, b]);
        assert!(!is_sorted_and_unique(&[a, a]));
    }

    #[test]
    fn it_permutes_signers_with_inputs() {
        let mut ins = vec![input(3, 0), input(1, 1), input(1, 0)];
        let mut signers = vec!["three", "one-one", "one-zero"];
        sort_inputs_with_signers(&mut ins, &mut signers).unwrap();
        assert_eq!(ins, vec![input(1, 0), input(1, 1), input(3, 0)]);
        assert_eq!(signers, vec!["one-zero", "one-one", "three"]);
        assert!(is_sorted_inputs(&ins).unwrap());

        // idempotent
        let (before_ins, before_signers) = (ins.clone(), signers.clone());
        sort_inputs_with_signers(&mut ins, &mut signers).unwrap();
        assert_eq!(ins, before_ins);
        assert_eq!(signers, before_signers);
    }

    #[test]
    fn it_keeps_ties_stable() {
        let mut ins = vec![input(1, 0), input(1, 0)];
        let mut signers = vec![1, 2];
        sort_inputs_with_signers(&mut ins, &mut signers).unwrap();
        assert_eq!(signers, vec![1, 2]);
    }

    #[test]
    fn it_rejects_misaligned_signers() {
        let mut ins = vec![input(1, 0)];
        let mut signers: Vec<u8> = vec![];
        assert!(matches!(
            sort_inputs_with_signers(&mut ins, &mut signers),
            Err(TxError::SignerCountMismatch { expected: 1, got: 0 })
        ));
    }

    #[test]
    fn it_sorts_outputs() {
        let asset = AssetId::new([1; 32]);
        let mut outs = vec![
            TransferableOutput::pay(asset, 5, Address::new([1; 20])),
            TransferableOutput::pay(asset, 2, Address::new([9; 20])),
            TransferableOutput::pay(asset, 2, Address::new([3; 20])),
        ];
        sort_outputs(&mut outs).unwrap();
        assert_eq!(
            outs.iter().map(|o| o.amount()).collect::<Vec<_>>(),
            vec![2, 2, 5]
        );
        assert_eq!(
            outs[0].output.transfer_output().owners.addrs,
            vec![Address::new([3; 20])]
        );
        assert!(is_sorted_outputs(&outs).unwrap());
    }

    #[test]
    fn it_sorts_evm_inputs() {
        let evm = |addr: u8, asset: u8| EvmInput {
            address: EthAddress::new([addr; 20]),
            amount: 1,
            asset_id: AssetId::new([asset; 32]),
            nonce: 0,
        };
        let mut ins = vec![evm(2, 1), evm(1, 2), evm(1, 1)];
        sort_evm_inputs(&mut ins);
        assert_eq!(ins, vec![evm(1, 1), evm(1, 2), evm(2, 1)]);
        assert!(is_sorted_evm_inputs(&ins));
    }
}
