//! Typed-transaction dispatch: pledge, delete-pledge, redeem, unlock-reward, staking.
//!
//! Each handler runs in lieu of a plain value transfer once [`poc_types::TxKind`] has
//! classified the transaction. Handlers are atomic with respect to the enclosing transaction:
//! on `Err`, the caller's journal must revert every mutation the handler made before returning.

use poc_types::{
    account::{Account, RedeemEntry, StakingRecord},
    constants::{BASE_CAPACITY, BASE_PB, DAY60, DAY_BLOCK, LOCK_NUM, TOTAL_CAPACITY},
    hash::{Address, H256, U256},
    pid_address, Crypto, StateError, StateView,
};

use crate::{pledge::pledge_amount, staking::is_valid_period};

/// Context common to every typed-transaction handler.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext {
    pub sender: Address,
    pub value: U256,
    pub current_block: u64,
    /// Parent block's declared network capacity, consumed by the pledge amount schedule.
    pub parent_net_capacity_mib: u64,
}

/// Binds one pid-address per entry of `pids` to `ctx.sender` in a single transaction. `pids` is
/// the list of plotter identifiers the recipient pid-addresses are derived from; a single-pid
/// pledge is the `pids.len() == 1` case.
///
/// The required value and the capacity credited both scale linearly with `pids.len()`, mirroring
/// a multi-pid pledge transaction binding several pids at once for one combined payment.
///
/// # Errors
/// [`StateError::DuplicatePledgedPid`] if any recipient in `pids` is already pledged to someone
/// (including an earlier entry of the same `pids` list repeated twice);
/// [`StateError::InvalidPledgedValue`] if `ctx.value` doesn't match the schedule scaled by
/// `pids.len()`.
pub fn pledge<C: Crypto, S: StateView>(
    state: &mut S,
    ctx: DispatchContext,
    pids: &[H256],
) -> Result<(), StateError> {
    let required = pledge_amount(ctx.parent_net_capacity_mib) * U256::from(pids.len() as u64);
    if ctx.value != required {
        return Err(StateError::InvalidPledgedValue { got: ctx.value, want: required });
    }

    let per_pid_value = pledge_amount(ctx.parent_net_capacity_mib);
    let recipients: Vec<Address> = pids.iter().map(|&pid| pid_address::<C>(ctx.sender, pid)).collect();
    for (i, &recipient) in recipients.iter().enumerate() {
        if state.account(recipient).pledged_to.is_some() || recipients[..i].contains(&recipient) {
            return Err(StateError::DuplicatePledgedPid);
        }
    }

    for &recipient in &recipients {
        let mut recipient_account = state.account(recipient);
        recipient_account.pledged_to = Some(ctx.sender);
        recipient_account.pledged_amount = per_pid_value;
        state.set_account(recipient, recipient_account);
    }

    state.sub_balance(ctx.sender, ctx.value);
    let mut sender_account = state.account(ctx.sender);
    sender_account.total_pledged += ctx.value;
    sender_account.total_capacity += BASE_CAPACITY * pids.len() as u64;
    state.set_account(ctx.sender, sender_account);

    Ok(())
}

/// Releases a pid-address's pledge back to `ctx.sender`. `pid_address_of_recipient` is the
/// recipient's address, already resolved by the caller (it is the transaction's `to` field).
///
/// # Errors
/// [`StateError::NotPledged`] if the recipient is not a pid-account pledged to `ctx.sender`;
/// [`StateError::InsufficientPledge`] if it is pledged to `ctx.sender` but the pledge has
/// already been drained to zero.
pub fn del_pid<C: Crypto, S: StateView>(
    state: &mut S,
    ctx: DispatchContext,
    pid_address_of_recipient: Address,
) -> Result<(), StateError> {
    let mut recipient_account = state.account(pid_address_of_recipient);
    if recipient_account.pledged_to != Some(ctx.sender) {
        return Err(StateError::NotPledged);
    }
    if recipient_account.pledged_amount.is_zero() {
        return Err(StateError::InsufficientPledge);
    }
    let pledged_amount = recipient_account.pledged_amount;
    recipient_account.pledged_to = None;
    recipient_account.pledged_amount = U256::zero();
    state.set_account(pid_address_of_recipient, recipient_account);

    let mut sender_account = state.account(ctx.sender);
    sender_account.total_pledged = sender_account.total_pledged.saturating_sub(pledged_amount);
    sender_account.total_capacity = sender_account.total_capacity.saturating_sub(BASE_CAPACITY);

    if sender_account.total_capacity / BASE_PB < TOTAL_CAPACITY {
        sender_account.total_locked_funds = U256::zero();
        sender_account.funds.clear();
    }

    let redeemable = pledged_amount * U256::from(LOCK_NUM) / U256::from(100u64);
    let unlock_block = ctx.current_block + DAY60 * DAY_BLOCK;
    sender_account.can_redeem.push(RedeemEntry { unlock_block, amount: redeemable });
    state.set_account(ctx.sender, sender_account);

    Ok(())
}

/// Credits every matured entry in `ctx.sender`'s redeem queue.
///
/// # Errors
/// [`StateError::InsufficientForRedeem`] if no entry has matured.
pub fn redeem<S: StateView>(state: &mut S, ctx: DispatchContext) -> Result<(), StateError> {
    let mut account = state.account(ctx.sender);
    let amount = account.drain_redeemable(ctx.current_block);
    if amount.is_zero() {
        return Err(StateError::InsufficientForRedeem);
    }
    state.set_account(ctx.sender, account);
    state.add_balance(ctx.sender, amount);
    Ok(())
}

/// Drains `ctx.sender`'s vested funds. Always succeeds, crediting zero when nothing has
/// matured (idempotent).
pub fn unlock_reward<S: StateView>(state: &mut S, ctx: DispatchContext) {
    let mut account = state.account(ctx.sender);
    let amount = account.drain_vested(ctx.current_block);
    state.set_account(ctx.sender, account);
    state.add_balance(ctx.sender, amount);
}

/// Locks `ctx.value` into a new staking record for `frozen_period` days.
///
/// # Errors
/// [`StateError::InvalidPeriods`] if `frozen_period` is not one of `{90, 180, 360, 1080}`;
/// [`StateError::InsufficientStakingValue`] if `ctx.value` is below the staking floor.
pub fn staking<S: StateView>(
    state: &mut S,
    ctx: DispatchContext,
    frozen_period: u64,
    staking_lower_limit: U256,
    next_index: u64,
) -> Result<StakingRecord, StateError> {
    if !is_valid_period(frozen_period) {
        return Err(StateError::InvalidPeriods);
    }
    if ctx.value < staking_lower_limit {
        return Err(StateError::InsufficientStakingValue);
    }
    state.sub_balance(ctx.sender, ctx.value);
    let record = StakingRecord {
        account: ctx.sender,
        start: ctx.current_block,
        stop: ctx.current_block + frozen_period * DAY_BLOCK,
        frozen_period,
        value: ctx.value,
        index: next_index,
    };
    let mut all = state.staking_list();
    all.push(record);
    state.set_staking_list(all);
    Ok(record)
}
