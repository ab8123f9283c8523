//! Dynamic fees for atomic transactions on the C-chain.
//!
//! The C-chain base fee is denominated in the chain's 18-decimal unit, while atomic amounts use
//! the platform's 9-decimal unit. The fee for `gas_used` is
//! `ceil(gas_used * base_fee / X2C_RATE)`, computed without wrapping.

use crate::error::{TxError, TxResult};

/// Conversion rate between C-chain and platform denominations
pub const X2C_RATE: u128 = 1_000_000_000;

/// Gas charged per byte of the unsigned transaction
pub const TX_BYTES_GAS: u64 = 1;

/// Gas charged per signature
pub const COST_PER_SIGNATURE: u64 = 1000;

/// Fixed gas charged once per atomic transaction, when charged
pub const ATOMIC_TX_BASE_COST: u64 = 10_000;

/// Gas for one EVM input: its encoded fields plus one signature
pub const EVM_INPUT_GAS: u64 = (20 + 8 + 32 + 8) * TX_BYTES_GAS + COST_PER_SIGNATURE;

/// The fee for `gas_used` at `base_fee`, rounded up.
///
/// Fails with `NilBaseFee` when the node reported no base fee, and with `FeeOverflow` when the
/// fee does not fit in a `u64`.
pub fn calculate_dynamic_fee(gas_used: u64, base_fee: Option<u128>) -> TxResult<u64> {
    let base_fee = base_fee.ok_or(TxError::NilBaseFee)?;
    let total = (gas_used as u128)
        .checked_mul(base_fee)
        .ok_or(TxError::FeeOverflow)?;
    let fee = total / X2C_RATE + u128::from(total % X2C_RATE != 0);
    u64::try_from(fee).map_err(|_| TxError::FeeOverflow)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_calculates_fees() {
        assert_eq!(calculate_dynamic_fee(1000, Some(25_000_000_000)).unwrap(), 25_000);
        assert_eq!(calculate_dynamic_fee(0, Some(25_000_000_000)).unwrap(), 0);
        assert_eq!(calculate_dynamic_fee(1, Some(1)).unwrap(), 1);
        assert_eq!(calculate_dynamic_fee(3, Some(X2C_RATE)).unwrap(), 3);
        assert_eq!(calculate_dynamic_fee(3, Some(X2C_RATE + 1)).unwrap(), 4);
    }

    #[test]
    fn it_is_monotonic_in_gas() {
        let base_fee = Some(25_000_000_001);
        let mut last = 0;
        for gas in (0..20_000).step_by(997) {
            let fee = calculate_dynamic_fee(gas, base_fee).unwrap();
            assert!(fee >= last);
            last = fee;
        }
    }

    #[test]
    fn it_is_monotonic_in_base_fee() {
        let mut last = 0;
        for base_fee in [
            0,
            1,
            X2C_RATE / 3,
            X2C_RATE - 1,
            X2C_RATE,
            X2C_RATE + 1,
            2 * X2C_RATE - 1,
            2 * X2C_RATE,
            2 * X2C_RATE + 1,
            25_000_000_000,
        ] {
            let fee = calculate_dynamic_fee(1_068, Some(base_fee)).unwrap();
            assert!(fee >= last, "{} < {} at base fee {}", fee, last, base_fee);
            last = fee;
        }
    }

    #[test]
    fn it_rejects_nil_base_fees() {
        assert!(matches!(calculate_dynamic_fee(1, None), Err(TxError::NilBaseFee)));
    }

    #[test]
    fn it_never_wraps() {
        assert!(matches!(
            calculate_dynamic_fee(u64::MAX, Some(u128::MAX)),
            Err(TxError::FeeOverflow)
        ));
        assert!(matches!(
            calculate_dynamic_fee(u64::MAX, Some(X2C_RATE * 2)),
            Err(TxError::FeeOverflow)
        ));
        assert_eq!(
            calculate_dynamic_fee(u64::MAX, Some(X2C_RATE)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn it_prices_evm_inputs() {
        assert_eq!(EVM_INPUT_GAS, 1068);
    }
}
