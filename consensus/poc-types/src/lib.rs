//! Core data model for the proof-of-capacity consensus engine.
//!
//! This crate defines the header shape, the account-state fields the mining economy depends on,
//! the typed-transaction tags, and the abstract state/chain view traits the consensus and
//! economy crates consume. It does not validate headers or finalize blocks itself — see
//! `poc-consensus` and `poc-economy`.

pub mod account;
mod bytes;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod hash;
pub mod header;
#[cfg(feature = "serde")]
pub mod serde_utils;
pub mod tx;
pub mod view;

pub use account::{pid_address, Account, RedeemEntry, StakingRecord, VestingFund};
pub use bytes::Bytes;
pub use config::PocConfig;
pub use crypto::{Crypto, DefaultCrypto};
pub use error::StateError;
pub use hash::{Address, Bloom, BloomInput, H256, H512, H64, U256};
pub use header::{Header, Pid, SealedHeader, Signature};
pub use tx::TxKind;
pub use view::{ChainView, StateView};
