//! Error kinds shared by the typed-transaction dispatcher. Header-validation errors live in
//! `poc-consensus`; this crate only defines the state-mutation errors typed transactions can
//! raise, since they're part of the data model `poc-economy` and `poc-consensus` both build on.

/// A typed transaction failed one of its preconditions. The enclosing transaction reverts; the
/// block as a whole is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("pledge amount {got} does not match required amount {want}")]
    InvalidPledgedValue { got: crate::hash::U256, want: crate::hash::U256 },
    #[error("recipient is not a pid-account pledged to the sender")]
    NotPledged,
    #[error("pid-address already hosts a pledge")]
    DuplicatePledgedPid,
    #[error("staking value below the minimum staking amount")]
    InsufficientStakingValue,
    #[error("staking period must be one of {{90, 180, 360, 1080}} days")]
    InvalidPeriods,
    #[error("pid-address is pledged to the sender but its pledge has already been deleted")]
    InsufficientPledge,
    #[error("nothing mature to redeem")]
    InsufficientForRedeem,
}
