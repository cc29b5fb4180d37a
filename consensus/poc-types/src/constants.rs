//! Economy and consensus constants. See the pledge and staking schedules in
//! [`crate::account`] for the tables these constants parametrize.

use crate::hash::U256;

/// Maximum size, in bytes, of a header's `extra_data` field.
pub const MAX_EXTRA_DATA_SIZE: usize = 32;

/// Upper bound on how far into the future (seconds) a non-uncle header's timestamp may sit
/// relative to the validator's local clock before it is rejected as a future block.
pub const FUTURE_BLOCK_TIME: u64 = 18;

/// Minimum spacing (seconds) between a header and its parent's timestamp.
pub const POC_SLOT: u64 = 3;

/// Blocks produced per day at the target slot spacing; also the vesting step duration.
pub const DAY_BLOCK: u64 = 10;

/// Linear-vesting schedule length, in days, for the locked share of a mining reward.
pub const MIN_SECTOR_EXPIRATION: u64 = 180;

/// Maturity delay, in days, for redeem-queue entries created by a delete-pledge.
pub const DAY60: u64 = 1;

/// Capacity credited per successful pledge, in GB.
pub const BASE_CAPACITY: u64 = 102;

/// GB per PB, used to convert `total_capacity` into the network-floor comparison.
pub const BASE_PB: u64 = 1024 * 1024;

/// Network capacity floor, in PB, below which a delete-pledge purges vesting.
pub const TOTAL_CAPACITY: u64 = 100;

/// Maximum number of staking accounts that share in the per-block staking reward.
pub const STAKING_NUM: usize = 50;

/// Minimum value accepted by a staking transaction.
pub const STAKING_LOWER_LIMIT_WEI: u128 = 1_000 * 10u128.pow(18);

/// Numerator/denominator of the share of a miner's reward that is vested rather than paid out
/// immediately.
pub const LOCK_NUM: u64 = 75;
pub const LOCK_DENOM: u64 = 100;

/// Share of the per-block reward paid to the sealing miner (vs. stakers).
pub const MINE_PROPORTION: u64 = 80;
/// Share of the per-block reward paid to stakers (vs. the sealing miner).
pub const STAKING_PROPORTION: u64 = 20;

/// Blocks between reward halvings: two years' worth of blocks at the future-block-time spacing.
pub const SUBSIDY_HALVING_INTERVAL: u64 = 2 * 365 * 24 * 3600 / FUTURE_BLOCK_TIME;

/// Base per-block reward before halving, in whole units (pre-halving, pre-wei-scaling).
pub const POC_REWARD: u64 = 600;

/// `10^18`, the wei scaling factor applied to [`POC_REWARD`] after halving.
pub const WEI_PER_UNIT: u128 = 10u128.pow(18);

/// Base per-block reward before halving, in wei (`600 * 10^18`).
pub const BLOCK_REWARD_WEI: u128 = POC_REWARD as u128 * WEI_PER_UNIT;

/// Difficulty floor: no header may validate below this quality bar.
pub const POC_MIN_LIMIT: u64 = (1 << 20) - 1;

/// Chain identifier used in replay-protected signatures.
pub const CHAIN_ID: u64 = 37_021;

/// Challenge chaining switches from the bootstrap rule to the full formula at this height.
pub const CHALLENGE_INTERVAL: u64 = 10;

#[must_use]
pub fn poc_min_limit() -> U256 {
    U256::from(POC_MIN_LIMIT)
}

#[must_use]
pub fn block_reward_base() -> U256 {
    U256::from(BLOCK_REWARD_WEI)
}

#[must_use]
pub fn staking_lower_limit() -> U256 {
    U256::from(STAKING_LOWER_LIMIT_WEI)
}

/// `GetReward(number)`: the per-block reward after halving.
///
/// Halves the plain `POC_REWARD` unit count first, then scales by `WEI_PER_UNIT`; since
/// `POC_REWARD` has only a handful of significant bits, the reward reaches exactly zero after
/// around ten halvings rather than continuing to shrink for the lifetime of a 256-bit scaled
/// value.
#[must_use]
pub fn get_reward(number: u64) -> U256 {
    let halvings = number / SUBSIDY_HALVING_INTERVAL;
    let units = if halvings >= u64::BITS as u64 { 0 } else { POC_REWARD >> halvings };
    U256::from(units) * U256::from(WEI_PER_UNIT)
}
