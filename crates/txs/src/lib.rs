//! # Camino Transactions
//!
//! `camino-txs` holds the Camino transaction model and the pipeline that turns selected
//! inputs and outputs into signed, ID-bearing transactions.
//!
//! ## Crate Layout
//!
//! ### Types
//!
//! The `types` module holds inputs, outputs, ownership conditions and credentials, the
//! platform chain variants (`UnsignedTx`) and the C-chain export (`UnsignedAtomicTx`). All
//! of them implement `ByteFormat` and serialize to the exact bytes a node expects.
//! Interface-typed fields are closed enums, matched on their type IDs (`codec`).
//!
//! ### Pipeline
//!
//! - `sort` puts owner sets, inputs (with their signers) and outputs in canonical order.
//! - `builder` assembles each variant and aligns signer sets with authorizations.
//! - `signer` signs the unsigned bytes' sha256 with every key of every signer set.
//! - `fee` prices atomic transactions at the C-chain base fee.
//!
//! ```
//! use camino_keys::PrivateKey;
//! use camino_txs::{builder::PlatformTxBuilder, types::{TransferableInput, UtxoId}};
//! use camino_core::{AssetId, TxId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = PrivateKey::generate();
//! let asset = AssetId::new([1; 32]);
//! let input = TransferableInput::transfer(UtxoId::new(TxId::new([2; 32]), 0), asset, 10, vec![0]);
//!
//! let tx = PlatformTxBuilder::new(camino_core::nets::LOCAL_ID)
//!     .spend(input, vec![&key])
//!     .pay(asset, 9, key.address())
//!     .build_base()?
//!     .sign()?;
//! assert_eq!(tx.verify_signatures()?, vec![vec![key.address()]]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod builder;
pub mod codec;
pub mod dac;
pub mod error;
pub mod fee;
pub mod params;
pub mod signer;
pub mod sort;
pub mod types;

pub use builder::{Authorized, ExportEstimate, ExportTxBuilder, PlatformTxBuilder};
pub use error::{TxError, TxResult};
pub use params::FeeParameters;
pub use signer::{sign, SignerSet};
pub use types::{AtomicTx, SignedTx, Tx, UnsignedAtomicTx, UnsignedTransaction, UnsignedTx};
