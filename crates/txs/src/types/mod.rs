//! Holds the Camino transaction model: UTXO references, inputs, outputs, ownership conditions,
//! credentials, the platform and atomic transaction variants, and signed transactions.

pub mod atomic;
pub mod credential;
pub mod input;
pub mod output;
pub mod owners;
pub mod platform;
pub mod tx;
pub mod utxo;

pub use atomic::*;
pub use credential::*;
pub use input::*;
pub use output::*;
pub use owners::*;
pub use platform::*;
pub use tx::*;
pub use utxo::*;
