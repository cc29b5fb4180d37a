//! Staking engine: maturity sweep and weighted top-N reward distribution.

use poc_types::{account::StakingRecord, hash::Address, U256};

/// Staking-weight rate schedule, as an exact fixed-point fraction (`numerator/1000`) rather than
/// a float: `{90 -> 0.1, 180 -> 0.2, 360 -> 0.3, 1080 -> 0.5}`.
#[must_use]
pub fn weight_rate_per_mille(frozen_period: u64) -> Option<u64> {
    match frozen_period {
        90 => Some(100),
        180 => Some(200),
        360 => Some(300),
        1_080 => Some(500),
        _ => None,
    }
}

/// `frozen_period` is accepted only if it names one of the four staking tiers.
#[must_use]
pub fn is_valid_period(frozen_period: u64) -> bool {
    weight_rate_per_mille(frozen_period).is_some()
}

/// weight(record) = rate(frozen_period) * value / 1000.
#[must_use]
pub fn record_weight(record: &StakingRecord) -> U256 {
    let rate = weight_rate_per_mille(record.frozen_period).unwrap_or(0);
    record.value.saturating_mul(U256::from(rate)) / U256::from(1_000u64)
}

/// Partitions `all_staking` into (active, matured) at `height`: a record is matured once
/// `stop <= height`.
#[must_use]
pub fn partition_matured(
    all_staking: Vec<StakingRecord>,
    height: u64,
) -> (Vec<StakingRecord>, Vec<StakingRecord>) {
    all_staking.into_iter().partition(|record| record.stop > height)
}

/// The weighted reward owed to each staking account this block, grouped by account and capped
/// at the top `cap` accounts by `(weight desc, hash(address) desc)` when the table exceeds it.
///
/// Determinism: the input is **not** iterated as a map. Every account's total weight is computed
/// by folding `active` (already a materialized, ordered vector) into a sorted vector keyed by
/// address, which is itself re-sorted by the tie-break order before any truncation.
#[must_use]
pub fn weighted_rewards<C: poc_types::Crypto>(
    active: &[StakingRecord],
    reward_pool: U256,
    cap: usize,
) -> Vec<(Address, U256)> {
    let mut weights: Vec<(Address, U256)> = Vec::new();
    for record in active {
        let weight = record_weight(record);
        match weights.iter_mut().find(|(addr, _)| *addr == record.account) {
            Some((_, total)) => *total += weight,
            None => weights.push((record.account, weight)),
        }
    }

    weights.sort_by(|(addr_a, weight_a), (addr_b, weight_b)| {
        weight_b.cmp(weight_a).then_with(|| {
            let hash_a = C::keccak256(addr_a.as_bytes());
            let hash_b = C::keccak256(addr_b.as_bytes());
            hash_b.cmp(&hash_a)
        })
    });
    if weights.len() > cap {
        weights.truncate(cap);
    }

    let total_weight: U256 = weights.iter().fold(U256::zero(), |acc, (_, w)| acc + w);
    if total_weight.is_zero() {
        return Vec::new();
    }

    weights
        .into_iter()
        .map(|(addr, weight)| (addr, reward_pool.saturating_mul(weight) / total_weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poc_types::DefaultCrypto;

    fn record(account: Address, value: u64, frozen_period: u64, stop: u64, index: u64) -> StakingRecord {
        StakingRecord { account, start: 0, stop, frozen_period, value: U256::from(value), index }
    }

    #[test]
    fn rejects_invalid_period() {
        assert!(!is_valid_period(91));
        assert!(is_valid_period(90));
        assert!(is_valid_period(1_080));
    }

    #[test]
    fn partitions_by_stop_height() {
        let records = vec![
            record(Address::repeat_byte(1), 100, 90, 50, 0),
            record(Address::repeat_byte(2), 100, 90, 150, 1),
        ];
        let (active, matured) = partition_matured(records, 100);
        assert_eq!(active.len(), 1);
        assert_eq!(matured.len(), 1);
        assert_eq!(active[0].account, Address::repeat_byte(2));
    }

    #[test]
    fn caps_at_top_n_by_weight_then_address_hash() {
        let mut records = Vec::new();
        for i in 0..51u8 {
            records.push(record(Address::repeat_byte(i), 1_000, 90, 1_000, u64::from(i)));
        }
        let rewards = weighted_rewards::<DefaultCrypto>(&records, U256::from(2_000_000u64), 50);
        assert_eq!(rewards.len(), 50);
        let total: U256 = rewards.iter().fold(U256::zero(), |acc, (_, amount)| acc + amount);
        assert!(total <= U256::from(2_000_000u64));
    }

    #[test]
    fn empty_active_set_pays_nothing() {
        assert!(weighted_rewards::<DefaultCrypto>(&[], U256::from(1_000u64), 50).is_empty());
    }
}
