//! Difficulty retargeting.
//!
//! `CalcDifficulty` is a pure function of the parent difficulty and the two block timestamps —
//! no uncle count, no bomb, no Homestead/Byzantium era switch. A block sealed faster than
//! `POC_SLOT` pushes difficulty up; a block sealed slower pulls it down, clamped to at most a
//! 4x move per block and never below `POC_MIN_LIMIT`.

use poc_types::{constants::POC_MIN_LIMIT, U256};

/// Maximum per-block multiplicative adjustment, in either direction.
const MAX_ADJUSTMENT_FACTOR: u64 = 4;

/// Target spacing, in seconds, difficulty retargets toward.
const TARGET_SPACING: u64 = poc_types::constants::POC_SLOT;

/// Computes the difficulty `header` must carry, given `parent`'s difficulty and the two
/// timestamps.
#[must_use]
pub fn calc_difficulty(parent_time: u64, header_time: u64, parent_difficulty: U256) -> U256 {
    let actual_spacing = header_time.saturating_sub(parent_time).max(1);
    let min_spacing = (TARGET_SPACING / MAX_ADJUSTMENT_FACTOR).max(1);
    let max_spacing = TARGET_SPACING * MAX_ADJUSTMENT_FACTOR;
    let clamped_spacing = actual_spacing.clamp(min_spacing, max_spacing);

    let numerator = parent_difficulty.saturating_mul(U256::from(TARGET_SPACING));
    let raw = numerator / U256::from(clamped_spacing);

    raw.max(U256::from(POC_MIN_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faster_block_raises_difficulty() {
        let parent_diff = U256::from(10_000_000u64);
        let next = calc_difficulty(1000, 1001, parent_diff);
        assert!(next > parent_diff);
    }

    #[test]
    fn slower_block_lowers_difficulty() {
        let parent_diff = U256::from(10_000_000u64);
        let next = calc_difficulty(1000, 1010, parent_diff);
        assert!(next < parent_diff);
    }

    #[test]
    fn on_target_spacing_holds_steady() {
        let parent_diff = U256::from(10_000_000u64);
        let next = calc_difficulty(1000, 1000 + TARGET_SPACING, parent_diff);
        assert_eq!(next, parent_diff);
    }

    #[test]
    fn never_drops_below_floor() {
        let parent_diff = U256::from(POC_MIN_LIMIT);
        let next = calc_difficulty(1000, 1000 + TARGET_SPACING * 100, parent_diff);
        assert_eq!(next, U256::from(POC_MIN_LIMIT));
    }
}
