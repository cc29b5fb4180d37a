//! Typed-transaction tag parsing.
//!
//! Rather than branching on string prefixes throughout the EVM's transfer hook, the tag is
//! parsed once, up front, into this tagged variant; everything downstream matches on it.

use crate::bytes::Bytes;

const PLEDGE_TAG: &[u8] = b"pledge";
const DEL_PID_TAG: &[u8] = b"delPid";
const REDEEM_TAG: &[u8] = b"redeem";
const UNLOCK_REWARD_TAG: &[u8] = b"unlockReward";
const STAKING_TAG: &[u8] = b"staking";

/// The dispatch tag a transaction's `data` field carries, parsed once up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// An ordinary value transfer or contract call; no mining-economy side effect.
    Plain,
    Pledge,
    DelPid,
    Redeem,
    UnlockReward,
    /// `staking<hex-encoded-ascii-decimal-days>`; `days` is parsed but not yet validated
    /// against the staking-period schedule.
    Staking { days: u64 },
}

/// A `staking` tag's trailing bytes were not valid hex, or did not decode to an ASCII decimal
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("staking tag suffix is not hex-encoded ASCII decimal day count")]
pub struct InvalidStakingTag;

impl TxKind {
    /// Classifies `data` by its ASCII prefix. Unrecognized data (including a `staking` prefix
    /// with an unparseable day count) falls back to [`TxKind::Plain`]: the dispatcher runs no
    /// special-cased effect, and the EVM executes it as an ordinary transfer/call.
    #[must_use]
    pub fn parse(data: &Bytes) -> Self {
        let raw = data.as_ref();
        if raw.starts_with(PLEDGE_TAG) {
            Self::Pledge
        } else if raw.starts_with(DEL_PID_TAG) {
            Self::DelPid
        } else if raw.starts_with(REDEEM_TAG) {
            Self::Redeem
        } else if raw.starts_with(UNLOCK_REWARD_TAG) {
            Self::UnlockReward
        } else if let Some(suffix) = raw.strip_prefix(STAKING_TAG) {
            match parse_decimal_days(suffix) {
                Ok(days) => Self::Staking { days },
                Err(_) => {
                    tracing::debug!("staking tag suffix unparseable, falling back to plain transfer");
                    Self::Plain
                }
            }
        } else {
            Self::Plain
        }
    }
}

/// The suffix is hex-encoded ASCII decimal text, e.g. `hex("90") = "3930"` for 90 days.
fn parse_decimal_days(suffix: &[u8]) -> Result<u64, InvalidStakingTag> {
    if suffix.is_empty() {
        return Err(InvalidStakingTag);
    }
    let decoded = const_hex::decode(suffix).map_err(|_| InvalidStakingTag)?;
    let text = std::str::from_utf8(&decoded).map_err(|_| InvalidStakingTag)?;
    text.parse::<u64>().map_err(|_| InvalidStakingTag)
}
