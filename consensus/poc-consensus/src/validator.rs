//! Header validation: the ordered rule chain a candidate header must satisfy to extend the
//! canonical chain. Each rule is fatal — the first violation aborts and is returned; rules
//! after it are never evaluated.

use crate::{
    challenge::calc_next_challenge,
    difficulty::calc_difficulty,
    error::ValidationError,
    proof::ProofVerifier,
};
use poc_types::{
    constants::{FUTURE_BLOCK_TIME, MAX_EXTRA_DATA_SIZE, POC_MIN_LIMIT, POC_SLOT},
    Crypto, Header, U256,
};

/// Fields describing how a header is to be checked, separate from chain/proof collaborators so
/// batch validation can pass them by value across worker threads.
#[derive(Debug, Clone, Copy)]
pub struct ValidationParams {
    pub is_uncle: bool,
    pub check_seal: bool,
    pub unix_now: u64,
    /// `Some(height)` if the London base-fee rule is active at `header.number`.
    pub london_active: bool,
}

/// Runs every PoC validation rule against `header`, given its immediate `parent` and
/// `parent_hash` (the parent's canonical hash, needed for challenge chaining).
///
/// # Errors
/// Returns the first violated rule.
pub fn validate_header<C: Crypto, P: ProofVerifier>(
    header: &Header,
    parent: &Header,
    parent_hash: poc_types::H256,
    proof_verifier: &P,
    params: ValidationParams,
) -> Result<(), ValidationError> {
    let result = validate_header_inner::<C, P>(header, parent, parent_hash, proof_verifier, params);
    match &result {
        Ok(()) => tracing::debug!(number = header.number, "header valid"),
        Err(err) => tracing::debug!(number = header.number, %err, "header rejected"),
    }
    result
}

fn validate_header_inner<C: Crypto, P: ProofVerifier>(
    header: &Header,
    parent: &Header,
    parent_hash: poc_types::H256,
    proof_verifier: &P,
    params: ValidationParams,
) -> Result<(), ValidationError> {
    // 1. extra-data size.
    if header.extra_data.len() > MAX_EXTRA_DATA_SIZE {
        return Err(ValidationError::ExtraDataTooLong {
            got: header.extra_data.len(),
            max: MAX_EXTRA_DATA_SIZE,
        });
    }

    // 2. future-block check (non-uncle only).
    if !params.is_uncle && header.timestamp > params.unix_now + FUTURE_BLOCK_TIME {
        return Err(ValidationError::FutureBlock {
            got: header.timestamp,
            now: params.unix_now,
            limit: FUTURE_BLOCK_TIME,
        });
    }

    // 3. strictly after parent.
    if header.timestamp <= parent.timestamp {
        return Err(ValidationError::NotAfterParent { got: header.timestamp, parent: parent.timestamp });
    }

    // 4. slot floor.
    if header.timestamp < parent.timestamp + POC_SLOT {
        return Err(ValidationError::BelowSlotFloor {
            got: header.timestamp,
            parent: parent.timestamp,
            floor: POC_SLOT,
        });
    }

    // 5. difficulty match.
    let expected_difficulty = calc_difficulty(parent.timestamp, header.timestamp, parent.difficulty);
    if header.difficulty != expected_difficulty {
        return Err(ValidationError::DifficultyMismatch {
            got: header.difficulty,
            want: expected_difficulty,
        });
    }

    // 6. gas bounds.
    if header.gas_limit > i64::MAX as u64 {
        return Err(ValidationError::GasLimitOverflow(header.gas_limit));
    }
    if header.gas_used > header.gas_limit {
        return Err(ValidationError::GasUsedExceedsLimit { used: header.gas_used, limit: header.gas_limit });
    }

    // 7. base-fee rule.
    validate_base_fee_rule(header, parent, params.london_active)?;

    // 8. number continuity.
    if header.number != parent.number + 1 {
        return Err(ValidationError::NumberNotParentPlusOne { got: header.number, parent: parent.number });
    }

    // 9. PoC verification: difficulty floor, then quality vs. difficulty.
    if header.difficulty.is_zero() {
        return Err(ValidationError::NonPositiveDifficulty(header.difficulty));
    }
    let poc_floor = U256::from(POC_MIN_LIMIT);
    if header.difficulty < poc_floor {
        return Err(ValidationError::BelowMinimumDifficulty { got: header.difficulty, min: poc_floor });
    }
    // 10. challenge chaining.
    let expected_challenge = calc_next_challenge::<C>(parent, parent_hash);
    if header.challenge != expected_challenge {
        return Err(ValidationError::ChallengeMismatch);
    }

    // Quality and signature are the expensive checks; skipped when the caller only wants
    // structural/timing validity (e.g. fast header-chain sync ahead of full verification).
    if !params.check_seal {
        return Ok(());
    }

    let slot = header.timestamp / POC_SLOT;
    let quality = proof_verifier
        .verified_quality(&header.proof, header.pid, header.challenge, slot, header.number, header.k)
        .map_err(|_| ValidationError::MalformedProof)?;
    if quality <= header.difficulty {
        return Err(ValidationError::QualityBelowDifficulty { quality, difficulty: header.difficulty });
    }

    // 11. signature binding.
    let message = header.signing_input::<C>();
    let recovered = C::secp256k1_ecdsa_recover(&header.signed.0, poc_types::H256::from(message))
        .map_err(|_| ValidationError::Unrecoverable)?;
    if recovered != header.beneficiary {
        return Err(ValidationError::MismatchedPublicKey);
    }

    Ok(())
}

/// Before London, `base_fee` must be absent and the legacy gas-limit delta bound applies
/// (`|gas_limit - parent.gas_limit| <= parent.gas_limit / 1024`, and `gas_limit >= 5000`). At
/// and after London, `base_fee` must be present and recomputed per EIP-1559.
fn validate_base_fee_rule(
    header: &Header,
    parent: &Header,
    london_active: bool,
) -> Result<(), ValidationError> {
    const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;
    const MIN_GAS_LIMIT: u64 = 5_000;
    const ELASTICITY_MULTIPLIER: u64 = 2;
    const BASE_FEE_CHANGE_DENOMINATOR: u64 = 8;

    if !london_active {
        if header.base_fee_per_gas.is_some() {
            return Err(ValidationError::BaseFeeRuleViolated {
                reason: "base_fee present before London activation",
            });
        }
        let delta = header.gas_limit.abs_diff(parent.gas_limit);
        let bound = parent.gas_limit / GAS_LIMIT_BOUND_DIVISOR;
        if delta > bound || header.gas_limit < MIN_GAS_LIMIT {
            return Err(ValidationError::BaseFeeRuleViolated { reason: "gas limit delta out of bounds" });
        }
        return Ok(());
    }

    let Some(base_fee) = header.base_fee_per_gas else {
        return Err(ValidationError::BaseFeeRuleViolated { reason: "base_fee missing at/after London" });
    };
    let Some(parent_base_fee) = parent.base_fee_per_gas else {
        // First London block: base fee initializes independently of the parent's; only presence
        // is checked here, the surrounding chain spec owns the initial value.
        return Ok(());
    };

    let parent_gas_target = u128::from(parent.gas_limit / ELASTICITY_MULTIPLIER).max(1);
    let parent_base_fee = u128::from(parent_base_fee);
    let gas_used = u128::from(parent.gas_used);
    let expected_base_fee = if gas_used == parent_gas_target {
        parent_base_fee
    } else if gas_used > parent_gas_target {
        let gas_used_delta = gas_used - parent_gas_target;
        let base_fee_delta =
            (parent_base_fee * gas_used_delta / parent_gas_target / u128::from(BASE_FEE_CHANGE_DENOMINATOR)).max(1);
        parent_base_fee + base_fee_delta
    } else {
        let gas_used_delta = parent_gas_target - gas_used;
        let base_fee_delta =
            parent_base_fee * gas_used_delta / parent_gas_target / u128::from(BASE_FEE_CHANGE_DENOMINATOR);
        parent_base_fee.saturating_sub(base_fee_delta)
    };
    let expected_base_fee = u64::try_from(expected_base_fee).unwrap_or(u64::MAX);

    if base_fee != expected_base_fee {
        return Err(ValidationError::BaseFeeRuleViolated { reason: "base_fee does not match EIP-1559 recomputation" });
    }
    Ok(())
}
