//! Header-validation error kinds. Every rule in [`crate::validator`] is fatal: the first
//! violated rule aborts validation and is returned as one of these variants.

use poc_types::U256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("extra-data is {got} bytes, exceeds the {max}-byte limit")]
    ExtraDataTooLong { got: usize, max: usize },
    #[error("gas limit {0} exceeds the i64 range")]
    GasLimitOverflow(u64),
    #[error("gas used {used} exceeds gas limit {limit}")]
    GasUsedExceedsLimit { used: u64, limit: u64 },
    #[error("header number {got} is not parent number {parent} + 1")]
    NumberNotParentPlusOne { got: u64, parent: u64 },
    #[error("base-fee rule violated: {reason}")]
    BaseFeeRuleViolated { reason: &'static str },

    #[error("timestamp {got} is more than {limit}s in the future of {now}")]
    FutureBlock { got: u64, now: u64, limit: u64 },
    #[error("timestamp {got} does not exceed parent timestamp {parent}")]
    NotAfterParent { got: u64, parent: u64 },
    #[error("timestamp {got} is less than {floor}s after parent timestamp {parent}")]
    BelowSlotFloor { got: u64, parent: u64, floor: u64 },

    #[error("difficulty {got} does not match expected {want}")]
    DifficultyMismatch { got: U256, want: U256 },
    #[error("difficulty {0} is not positive")]
    NonPositiveDifficulty(U256),
    #[error("difficulty {got} is below the minimum {min}")]
    BelowMinimumDifficulty { got: U256, min: U256 },

    #[error("challenge does not match CalcNextChallenge(parent)")]
    ChallengeMismatch,

    #[error("proof is malformed")]
    MalformedProof,
    #[error("quality {quality} does not exceed difficulty {difficulty}")]
    QualityBelowDifficulty { quality: U256, difficulty: U256 },

    #[error("signature did not recover a public key")]
    Unrecoverable,
    #[error("recovered public key does not match the coinbase binding")]
    MismatchedPublicKey,

    #[error("too many uncles")]
    TooManyUncles,
    #[error("duplicate uncle")]
    DuplicateUncle,
    #[error("uncle is not a valid ancestor")]
    UncleNotAncestor,
    #[error("uncle is dangling (already included)")]
    DanglingUncle,
    #[error("uncle is its own parent")]
    UncleSelfParent,

    #[error("unknown ancestor")]
    UnknownAncestor,
    #[error("pruned ancestor")]
    PrunedAncestor,
    #[error("header already known")]
    KnownBlock,
}
