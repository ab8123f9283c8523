//! # Camino Client
//!
//! `camino-client` builds Camino transactions against a live node. A `TxCreator` fetches the
//! network configuration once, then for each transaction selects UTXOs through the node's
//! `platform.spend`, assembles the variant with `camino-txs`, orders and signs it, and hands
//! back the signed transaction for inspection or submission.
//!
//! Supported transactions:
//!
//! - multisig alias creation, reported with the derived alias address
//! - address state changes (roles, KYC, consortium membership)
//! - governance proposals and votes
//! - platform chain transfers
//! - C-chain exports, priced at the node's base fee
//!
//! Node calls race the creator's `CancelToken` and request timeout, and are never retried.
//!
//! ```no_run
//! use camino_client::{CancelToken, ClientConfig, TxCreator};
//! use camino_keys::PrivateKey;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! camino_client::logging::init(&config.log_level)?;
//!
//! let funds: PrivateKey = "PrivateKey-ewoqjP7PxY4yr3iLTpLisriqt94hdyDFNgchSxGGztUrTXtNN".parse()?;
//! let creator = TxCreator::connect(&config, CancelToken::new()).await?;
//! let owner = funds.address().format("P", creator.hrp())?;
//! let report = creator.multisig_alias_tx(&[owner.as_str()], 1, &funds).await?;
//! creator.issue_platform_tx(&report.tx).await?;
//! println!("alias: {}", report.alias_address);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod cancel;
pub mod config;
pub mod creator;
pub mod error;
pub mod logging;
pub mod spend;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cancel::CancelToken;
pub use config::{ClientConfig, ConfigError};
pub use creator::{AliasReport, TxCreator};
pub use error::{BuildError, ErrorKind};
pub use spend::{select_spend, Spend};
