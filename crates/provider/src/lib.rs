//! Pluggable Camino node backend: network configuration, UTXO selection through
//! `platform.spend`, transaction lookup and submission, and the C-chain fee market.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Node Provider trait
pub mod provider;

/// JSON RPC Provider
pub mod rpc;

/// Node API request and response bodies
pub mod types;

pub use provider::*;
pub use rpc::{http::HttpTransport, HttpProvider};

use std::num::NonZeroUsize;

/// The default number of fetched transactions a `CachingProvider` keeps
pub const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => panic!("cache size must be non-zero"),
};
