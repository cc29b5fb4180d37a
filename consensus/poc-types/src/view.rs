//! Abstract collaborators the consensus core reads and writes through, never directly.
//!
//! Implementations may be backed by a trie + journal, an in-memory replica, or a test double.
//! The core never touches disk, a network client, or any other concrete storage directly.

use crate::{
    account::{Account, StakingRecord},
    hash::{Address, H256, U256},
    header::Header,
};

/// Read/write access to account state and the mining-economy sub-state.
///
/// A per-block journal recording every delta (so a failing transaction reverts exactly to the
/// snapshot at its start) is the responsibility of the implementation, not this trait.
pub trait StateView {
    fn balance(&self, address: Address) -> U256;
    fn add_balance(&mut self, address: Address, amount: U256);
    fn sub_balance(&mut self, address: Address, amount: U256);

    /// The PoC extension fields for `address`; `Account::default()` if never written.
    fn account(&self, address: Address) -> Account;
    fn set_account(&mut self, address: Address, account: Account);

    /// Every currently active staking record, across all accounts, in insertion order.
    fn staking_list(&self) -> Vec<StakingRecord>;
    fn set_staking_list(&mut self, records: Vec<StakingRecord>);

    /// Computes the post-state root. Called once, last, by the reward finalizer.
    fn intermediate_root(&mut self) -> H256;
}

/// Read-only access to ancestor headers.
pub trait ChainView {
    fn header_by_hash(&self, hash: H256) -> Option<Header>;
    fn header_by_number(&self, number: u64) -> Option<Header>;
    fn current_header(&self) -> Header;

    /// The activation height of the EIP-1559 base-fee rule. `None` if the chain has not
    /// activated it.
    fn london_activation_height(&self) -> Option<u64>;
}
