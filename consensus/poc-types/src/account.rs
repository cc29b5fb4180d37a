//! Account-state fields the mining economy reads and mutates.
//!
//! A full account also carries the ordinary EVM fields (`balance`, `nonce`, `code_hash`,
//! `storage_root`); those are defined by the surrounding account-model state and are not
//! duplicated here. This module defines the PoC-specific extension fields and the record types
//! that populate them.

use crate::hash::{Address, H256, U256};

/// A single entry in a `funds` vesting schedule: `amount` unlocks at `block_number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VestingFund {
    pub block_number: u64,
    pub amount: U256,
}

/// A single entry in a `can_redeem` queue: `amount` unlocks at `unlock_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemEntry {
    pub unlock_block: u64,
    pub amount: U256,
}

/// A time-bounded stake contributing a weighted share of the per-block staking reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakingRecord {
    pub account: Address,
    pub start: u64,
    pub stop: u64,
    pub frozen_period: u64,
    pub value: U256,
    /// Insertion index, used as a stable tie-breaker ahead of maturity sweeps.
    pub index: u64,
}

impl StakingRecord {
    /// A record is active at height `h` iff `start <= h < stop`.
    #[must_use]
    pub const fn is_active_at(&self, height: u64) -> bool {
        self.start <= height && height < self.stop
    }
}

/// The PoC extension fields tracked per address, alongside the surrounding account-model state.
///
/// `balance`, `nonce`, `code_hash` and `storage_root` live on the surrounding account-model
/// state and are accessed through [`crate::view::StateView`] rather than duplicated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Amount this pid-address is pledging. Zero if this address is not a pid-account.
    pub pledged_amount: U256,
    /// Back-reference from a pid-account to the owner it is pledged to.
    pub pledged_to: Option<Address>,
    /// Sum of `pledged_amount` across every pid-account owned by this address.
    pub total_pledged: U256,
    /// Capacity, in GB, counted as `BASE_CAPACITY * active pledges owned`.
    pub total_capacity: u64,
    /// Vesting entries, strictly increasing by `block_number`, no duplicate `block_number`.
    pub funds: Vec<VestingFund>,
    /// Sum of `funds[i].amount`; kept consistent with `funds` by the reward finalizer.
    pub total_locked_funds: U256,
    /// Redeem queue populated by delete-pledge, drained by a redeem transaction.
    pub can_redeem: Vec<RedeemEntry>,
}

impl Account {
    /// Inserts `amount` at `block_number`, merging into an existing entry at the same height and
    /// otherwise inserting in sorted order.
    pub fn add_vesting(&mut self, block_number: u64, amount: U256) {
        match self.funds.binary_search_by_key(&block_number, |f| f.block_number) {
            Ok(idx) => self.funds[idx].amount += amount,
            Err(idx) => self.funds.insert(idx, VestingFund { block_number, amount }),
        }
        self.total_locked_funds += amount;
    }

    /// Sums and drains every vesting entry matured at or before `height`, keeping only entries
    /// with `block_number > height`. Used identically by block finalization and the
    /// unlock-reward transaction.
    pub fn drain_vested(&mut self, height: u64) -> U256 {
        let mut unlocked = U256::zero();
        self.funds.retain(|fund| {
            if fund.block_number <= height {
                unlocked += fund.amount;
                false
            } else {
                true
            }
        });
        self.total_locked_funds -= unlocked;
        unlocked
    }

    /// Sums and drains every redeem entry matured at or before `height`. Order of the remaining
    /// entries is preserved.
    pub fn drain_redeemable(&mut self, height: u64) -> U256 {
        let mut redeemed = U256::zero();
        self.can_redeem.retain(|entry| {
            if entry.unlock_block <= height {
                redeemed += entry.amount;
                false
            } else {
                true
            }
        });
        redeemed
    }
}

/// `PIDAddress(owner, pid) = truncate160(KECCAK256(owner ‖ pid))`.
#[must_use]
pub fn pid_address<C: crate::crypto::Crypto>(owner: Address, pid: H256) -> Address {
    let mut buf = [0u8; 52];
    buf[..20].copy_from_slice(owner.as_bytes());
    buf[20..].copy_from_slice(pid.as_bytes());
    let hash = C::keccak256(buf);
    Address::from_slice(&hash.as_bytes()[12..32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DefaultCrypto;

    #[test]
    fn vesting_merges_same_height() {
        let mut account = Account::default();
        account.add_vesting(10, U256::from(5));
        account.add_vesting(20, U256::from(7));
        account.add_vesting(10, U256::from(3));
        assert_eq!(account.funds.len(), 2);
        assert_eq!(account.funds[0], VestingFund { block_number: 10, amount: U256::from(8) });
        assert_eq!(account.total_locked_funds, U256::from(15));
    }

    #[test]
    fn drain_vested_keeps_future_entries() {
        let mut account = Account::default();
        account.add_vesting(10, U256::from(10));
        account.add_vesting(20, U256::from(10));
        account.add_vesting(30, U256::from(10));
        let unlocked = account.drain_vested(25);
        assert_eq!(unlocked, U256::from(20));
        assert_eq!(account.funds, vec![VestingFund { block_number: 30, amount: U256::from(10) }]);
        assert_eq!(account.total_locked_funds, U256::from(10));
    }

    #[test]
    fn pid_address_is_deterministic() {
        let owner = Address::repeat_byte(0x01);
        let pid = H256::repeat_byte(0x02);
        assert_eq!(
            pid_address::<DefaultCrypto>(owner, pid),
            pid_address::<DefaultCrypto>(owner, pid)
        );
    }
}
