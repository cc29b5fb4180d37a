//! Reward finalization: the deterministic per-block state transition that credits the miner,
//! schedules new vesting, sweeps matured stakes and pays the weighted staking reward.

use poc_types::{
    account::{Account, StakingRecord},
    constants::{
        get_reward, DAY_BLOCK, LOCK_DENOM, LOCK_NUM, MINE_PROPORTION, MIN_SECTOR_EXPIRATION,
        STAKING_NUM, STAKING_PROPORTION,
    },
    hash::{Address, U256},
    Crypto, StateView,
};

use crate::staking::{partition_matured, weighted_rewards};

/// Everything [`finalize_block`] needs beyond the state view: the block number and the
/// sealing coinbase.
#[derive(Debug, Clone, Copy)]
pub struct FinalizeParams {
    pub number: u64,
    pub coinbase: Address,
}

/// Credits the sealing miner, schedules new vesting, sweeps matured stakes and pays the
/// weighted staking reward, returning the breakdown for observability. Writing the resulting
/// state root into the header is the caller's responsibility, since it also depends on
/// transaction execution having already run.
pub fn finalize_block<C: Crypto, S: StateView>(
    state: &mut S,
    params: FinalizeParams,
) -> FinalizeOutcome {
    tracing::debug!(number = params.number, coinbase = %params.coinbase, "finalizing block");
    let reward = get_reward(params.number);
    let mine_reward = reward * U256::from(MINE_PROPORTION) / U256::from(100u64);
    let staking_reward = reward * U256::from(STAKING_PROPORTION) / U256::from(100u64);

    let locked = mine_reward * U256::from(LOCK_NUM) / U256::from(LOCK_DENOM);
    let available = mine_reward - locked;

    let mut coinbase_account = state.account(params.coinbase);
    let amount_unlocked = coinbase_account.drain_vested(params.number);
    state.add_balance(params.coinbase, available + amount_unlocked);

    let per_day = locked / U256::from(MIN_SECTOR_EXPIRATION);
    for day in 1..=MIN_SECTOR_EXPIRATION {
        let epoch = params.number + day * DAY_BLOCK;
        coinbase_account.add_vesting(epoch, per_day);
    }
    state.set_account(params.coinbase, coinbase_account);

    let all_staking = state.staking_list();
    let (active, matured) = partition_matured(all_staking, params.number);
    tracing::debug!(number = params.number, matured = matured.len(), active = active.len(), "staking sweep");
    for record in &matured {
        state.add_balance(record.account, record.value);
    }

    let payouts = weighted_rewards::<C>(&active, staking_reward, STAKING_NUM);
    for (account, amount) in &payouts {
        state.add_balance(*account, *amount);
    }
    state.set_staking_list(active.clone());

    FinalizeOutcome {
        reward,
        mine_reward,
        staking_reward,
        locked,
        available,
        amount_unlocked,
        matured_stakes: matured,
        staking_payouts: payouts,
        active_after_sweep: active,
    }
}

/// A record of what [`finalize_block`] did, useful for logging and tests.
#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    pub reward: U256,
    pub mine_reward: U256,
    pub staking_reward: U256,
    pub locked: U256,
    pub available: U256,
    pub amount_unlocked: U256,
    pub matured_stakes: Vec<StakingRecord>,
    pub staking_payouts: Vec<(Address, U256)>,
    pub active_after_sweep: Vec<StakingRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use poc_types::{account::VestingFund, hash::H256, DefaultCrypto};
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryState {
        balances: BTreeMap<Address, U256>,
        accounts: BTreeMap<Address, Account>,
        staking: Vec<StakingRecord>,
    }

    impl StateView for MemoryState {
        fn balance(&self, address: Address) -> U256 {
            self.balances.get(&address).copied().unwrap_or_default()
        }

        fn add_balance(&mut self, address: Address, amount: U256) {
            *self.balances.entry(address).or_default() += amount;
        }

        fn sub_balance(&mut self, address: Address, amount: U256) {
            *self.balances.entry(address).or_default() -= amount;
        }

        fn account(&self, address: Address) -> Account {
            self.accounts.get(&address).cloned().unwrap_or_default()
        }

        fn set_account(&mut self, address: Address, account: Account) {
            self.accounts.insert(address, account);
        }

        fn staking_list(&self) -> Vec<StakingRecord> {
            self.staking.clone()
        }

        fn set_staking_list(&mut self, records: Vec<StakingRecord>) {
            self.staking = records;
        }

        fn intermediate_root(&mut self) -> H256 {
            H256::zero()
        }
    }

    #[test]
    fn credits_available_plus_unlocked_and_schedules_new_vesting() {
        let mut state = MemoryState::default();
        let coinbase = Address::repeat_byte(0xAA);
        let mut account = Account::default();
        account.add_vesting(99, U256::from(500u64));
        state.set_account(coinbase, account);

        let outcome = finalize_block::<DefaultCrypto, _>(&mut state, FinalizeParams { number: 100, coinbase });

        assert_eq!(outcome.amount_unlocked, U256::from(500u64));
        assert_eq!(state.balance(coinbase), outcome.available + outcome.amount_unlocked);

        let account = state.account(coinbase);
        assert_eq!(account.funds.len(), 180);
        assert_eq!(account.funds.first().unwrap().block_number, 110);
        assert_eq!(account.funds.last().unwrap().block_number, 100 + 180 * 10);
    }

    #[test]
    fn matured_stakes_pay_out_principal_and_drop_from_the_active_set() {
        let mut state = MemoryState::default();
        let staker = Address::repeat_byte(0x01);
        state.set_staking_list(vec![StakingRecord {
            account: staker,
            start: 0,
            stop: 50,
            frozen_period: 90,
            value: U256::from(1_000u64),
            index: 0,
        }]);

        let outcome = finalize_block::<DefaultCrypto, _>(
            &mut state,
            FinalizeParams { number: 60, coinbase: Address::repeat_byte(0xFF) },
        );

        assert_eq!(outcome.matured_stakes.len(), 1);
        assert_eq!(state.balance(staker), U256::from(1_000u64));
        assert!(outcome.active_after_sweep.is_empty());
        assert!(state.staking_list().is_empty());
    }

    #[test]
    fn vesting_drain_integration_matches_the_manual_account_path() {
        let mut account = Account::default();
        account.funds = vec![
            VestingFund { block_number: 10, amount: U256::from(10u64) },
            VestingFund { block_number: 20, amount: U256::from(10u64) },
            VestingFund { block_number: 30, amount: U256::from(10u64) },
        ];
        account.total_locked_funds = U256::from(30u64);
        let unlocked = account.drain_vested(25);
        assert_eq!(unlocked, U256::from(20u64));
        assert_eq!(account.funds.len(), 1);
        assert_eq!(account.funds[0].block_number, 30);
    }
}
