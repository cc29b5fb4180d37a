//! Per-deployment network configuration.
//!
//! Parameters that a deployment may legitimately vary without forking the validation rules
//! themselves live here. Parameters that are protocol rules — the pledge schedule, the staking
//! weight table, `STAKING_NUM` — stay as `const` items in [`crate::constants`]; they are not
//! configuration.

use crate::constants::{CHAIN_ID, FUTURE_BLOCK_TIME, POC_SLOT};

/// A deployment's network-wide PoC parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PocConfig {
    /// The network's chain ID, used in replay-protected signatures.
    pub chain_id: u64,

    /// Block number at which the EIP-1559 base-fee rule activates. `None` means it has not yet
    /// activated on this network.
    pub london_activation_height: Option<u64>,

    /// Minimum spacing, in seconds, between a header and its parent's timestamp. Widened on test
    /// networks that want faster block production than the production default.
    pub poc_slot_seconds: u64,

    /// Upper bound, in seconds, on how far into the future a non-uncle header's timestamp may
    /// sit relative to the validator's local clock.
    pub future_block_time_seconds: u64,
}

impl Default for PocConfig {
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID,
            london_activation_height: None,
            poc_slot_seconds: POC_SLOT,
            future_block_time_seconds: FUTURE_BLOCK_TIME,
        }
    }
}

impl PocConfig {
    /// Whether the London base-fee rule is active at `number`.
    #[must_use]
    pub fn london_active_at(&self, number: u64) -> bool {
        self.london_activation_height.is_some_and(|height| number >= height)
    }
}
