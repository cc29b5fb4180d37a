//! Reward finalization, staking engine, and typed-transaction dispatch for the proof-of-capacity
//! mining economy.
//!
//! This crate mutates the account-model sub-state `poc-types` defines; it does not validate
//! headers (`poc-consensus`) and does not execute ordinary EVM transactions.

pub mod dispatch;
pub mod pledge;
pub mod reward;
pub mod staking;

pub use dispatch::DispatchContext;
pub use pledge::pledge_amount;
pub use poc_types::StateError;
pub use reward::{finalize_block, FinalizeOutcome, FinalizeParams};
pub use staking::{is_valid_period, record_weight, weighted_rewards};
