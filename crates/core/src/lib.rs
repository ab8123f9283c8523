//! # Camino Core
//!
//! `camino-core` contains the codec, identifiers and text encodings shared by the
//! `camino-keys`, `camino-txs` and `camino-provider` crates.
//!
//! ## Crate Layout
//!
//! ### ByteFormat trait
//!
//! The `ByteFormat` trait is a simple serialization API using
//! `std::io::{Read, Write}`, specialised to the big-endian linear codec Camino nodes use.
//! Transaction IDs and signing hashes are computed by writing `ByteFormat` types into a
//! `Sha256Writer`.
//!
//! `ByteFormat` has an associated `Error` type. Most basic types can simply use the
//! provided `SerError`. More complex types may implement a custom error type, as long as it
//! can be instantiated from a `SerError` or an `std::io::Error`.
//!
//! ### Identifiers
//!
//! `TxId`, `AssetId`, `ChainId` and `Address` are fixed-length byte newtypes with cb58 text
//! representations. `Address` additionally formats as `<chain>-<bech32>`.
//!
//! ### Encodings
//!
//! cb58, bech32 and checksummed hex, plus the per-network HRP table in `nets`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod enc;
pub mod hashes;
pub mod ids;
pub mod nets;
pub mod ser;

pub use enc::{EncodingError, EncodingResult};
pub use ids::{Address, AssetId, ChainId, EthAddress, TxId};
pub use ser::{ByteFormat, SerError, SerResult};
