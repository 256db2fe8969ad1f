#![no_std]

//! Voting-escrow locking with a single-stake reward pool.
//!
//! Users lock the configured token until a week-aligned unlock time and get a
//! position whose vePUL value decays linearly to zero at expiry. One position
//! per account can be staked into the pool, which streams a fixed per-block
//! reward funded by the provider account.

pub mod admin;
pub mod events;
pub mod fixed_point;
pub mod lock;
pub mod pool;
pub mod schedule;

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

use lock::Lock;
use pool::{AccountStake, StakingInfo, StakingSnapshot};
use schedule::{RewardSchedule, ScheduleConfig};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const SYNC_STAKED: Symbol = symbol_short!("SYNC_STK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle (1-9)
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Authorization (10-19)
    NotOwner = 10,

    // Lookup (20-29)
    PositionNotFound = 20,

    // Validation (30-39)
    InvalidParameter = 30,
    ArithmeticOverflow = 31,

    // State (40-49)
    InvalidState = 40,

    // External ledger (50-59)
    InsufficientFunds = 50,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct VePulContract;

#[contractimpl]
impl VePulContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token`    – SAC address of the locked token, also used for rewards.
    /// * `schedule` – emission parameters; the accumulator starts at zero and
    ///   settlement starts at the current ledger sequence.
    /// * `sync_staked_principal` – whether topping up a staked position also
    ///   raises the principal counted by the pool.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        schedule: ScheduleConfig,
        sync_staked_principal: bool,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let reward_schedule = RewardSchedule::new(&env, schedule, env.ledger().sequence())?;

        admin::set_admin(&env, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        env.storage()
            .instance()
            .set(&SYNC_STAKED, &sync_staked_principal);
        schedule::save(&env, &reward_schedule);

        events::publish_initialized(
            &env,
            admin,
            token,
            reward_schedule.provider,
            reward_schedule.reward_per_block,
            reward_schedule.start_block,
            reward_schedule.end_block,
            sync_staked_principal,
        );

        Ok(())
    }

    // ── Locking ─────────────────────────────────────────────────────────────

    /// Lock `amount` tokens until `end` and return the new position id.
    pub fn create_lock(
        env: Env,
        caller: Address,
        amount: i128,
        end: u64,
    ) -> Result<u64, ContractError> {
        Self::create_lock_for(env, caller.clone(), caller, amount, end)
    }

    /// Same as `create_lock`, but `recipient` receives the position.
    pub fn create_lock_for(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: i128,
        end: u64,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidParameter);
        }
        lock::validate_unlock_time(end, env.ledger().timestamp())?;

        let token = Self::token(&env)?;
        Self::require_balance(&env, &token, &caller, amount)?;

        let position_id = lock::mint(&env, &recipient, &Lock { amount, end });

        token::Client::new(&env, &token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_locked(&env, position_id, caller, recipient, amount, end);

        Ok(position_id)
    }

    /// Add `delta` tokens to a position the caller controls. The unlock time
    /// is unchanged and no pending reward is settled.
    pub fn increase_amount(
        env: Env,
        caller: Address,
        position_id: u64,
        delta: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_control(&env, &caller, position_id)?;

        Self::add_to_position(&env, &caller, position_id, delta)
    }

    /// Top up any live position on behalf of its owner.
    pub fn deposit_for(
        env: Env,
        caller: Address,
        position_id: u64,
        delta: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        Self::add_to_position(&env, &caller, position_id, delta)
    }

    /// Push the unlock time of a live position out to `new_end`.
    pub fn increase_unlock_time(
        env: Env,
        caller: Address,
        position_id: u64,
        new_end: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let mut position = Self::require_control(&env, &caller, position_id)?;

        let now = env.ledger().timestamp();
        if position.amount == 0 || position.is_expired(now) {
            return Err(ContractError::InvalidState);
        }
        if new_end <= position.end {
            return Err(ContractError::InvalidParameter);
        }
        lock::validate_unlock_time(new_end, now)?;

        let old_end = position.end;
        position.end = new_end;
        lock::save_lock(&env, position_id, &position);

        events::publish_unlock_time_increased(&env, position_id, old_end, new_end);

        Ok(())
    }

    /// Return the principal of an expired, unstaked position to its owner.
    /// The position stays alive with a zero amount until it is burned.
    pub fn withdraw(env: Env, caller: Address, position_id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut position = Self::load_position(&env, position_id)?;
        if pool::load_snapshot(&env, position_id).is_staked() {
            return Err(ContractError::InvalidState);
        }
        Self::require_owner(&env, &caller, position_id)?;
        if !position.is_expired(env.ledger().timestamp()) || position.amount == 0 {
            return Err(ContractError::InvalidState);
        }

        let amount = position.amount;
        position.amount = 0;
        lock::save_lock(&env, position_id, &position);

        let token = Self::token(&env)?;
        Self::return_principal(&env, &token, &caller, amount)?;

        events::publish_withdrawn(&env, position_id, caller, amount);

        Ok(amount)
    }

    /// Retire a withdrawn position.
    pub fn burn(env: Env, caller: Address, position_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let position = Self::load_position(&env, position_id)?;
        Self::require_owner(&env, &caller, position_id)?;
        if position.amount != 0 {
            return Err(ContractError::InvalidState);
        }

        lock::burn(&env, &caller, position_id);

        events::publish_burned(&env, position_id, caller);

        Ok(())
    }

    /// Hand an unstaked position to another account.
    pub fn transfer_position(
        env: Env,
        from: Address,
        to: Address,
        position_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        Self::load_position(&env, position_id)?;
        if pool::load_snapshot(&env, position_id).is_staked() {
            return Err(ContractError::InvalidState);
        }
        Self::require_owner(&env, &from, position_id)?;

        lock::move_position(&env, &from, &to, position_id);

        events::publish_transferred(&env, position_id, from, to);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Move a live position into the reward pool and return its staking id.
    ///
    /// The schedule is touched with the old total first, so the new principal
    /// only earns from this block on.
    pub fn stake(env: Env, caller: Address, position_id: u64) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let position = Self::load_position(&env, position_id)?;
        if pool::load_account_stake(&env, &caller).is_active() {
            return Err(ContractError::InvalidState);
        }
        if pool::load_snapshot(&env, position_id).is_staked() {
            return Err(ContractError::InvalidState);
        }
        Self::require_owner(&env, &caller, position_id)?;

        let now = env.ledger().timestamp();
        let block = env.ledger().sequence();
        if position.amount == 0 || position.is_expired(now) {
            return Err(ContractError::InvalidState);
        }

        let total = pool::total_staked(&env);
        let mut reward_schedule = schedule::load(&env)?;
        schedule::touch(&env, &mut reward_schedule, total, block)?;

        let value = position.value_at(now);
        let pool_address = env.current_contract_address();
        lock::move_position(&env, &caller, &pool_address, position_id);
        pool::set_staked_owner(&env, position_id, &caller);

        let staking_id = pool::next_staking_id(&env);
        let snapshot = StakingSnapshot {
            staking_id,
            lock_amount: position.amount,
            last_value: value,
            last_touch_block: block,
            last_touch_accumulator: reward_schedule.accumulator.clone(),
        };
        pool::save_snapshot(&env, position_id, &snapshot);
        pool::save_account_stake(
            &env,
            &caller,
            &AccountStake {
                staking_id,
                position_id,
            },
        );

        let new_total = total
            .checked_add(position.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::set_total_staked(&env, new_total);
        schedule::save(&env, &reward_schedule);

        events::publish_staked(
            &env,
            caller,
            position_id,
            staking_id,
            position.amount,
            value,
            new_total,
        );

        Ok(staking_id)
    }

    /// Pay out everything the caller's stake has earned since its last touch.
    /// A zero reward is a valid outcome.
    pub fn collect(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let stake = pool::load_account_stake(&env, &caller);
        if !stake.is_active() {
            return Err(ContractError::InvalidState);
        }

        let (reward_schedule, snapshot, reward) = Self::settle(&env, stake.position_id)?;
        schedule::save(&env, &reward_schedule);
        pool::save_snapshot(&env, stake.position_id, &snapshot);

        let token = Self::token(&env)?;
        Self::pay_reward(&env, &token, &reward_schedule.provider, &caller, reward)?;

        events::publish_collected(
            &env,
            caller,
            stake.position_id,
            reward,
            reward_schedule.accumulator,
        );

        Ok(reward)
    }

    /// Settle like `collect`, then hand the position back to its pre-stake
    /// owner and remove it from the pool.
    pub fn unstake(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::release_stake(&env, caller, true)
    }

    /// Leave the pool without the payout. The accrued reward is dropped, so
    /// the position comes back even when the provider cannot fund it.
    pub fn unstake_without_reward(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::release_stake(&env, caller, false)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Change the account rewards are pulled from. Does not touch the schedule.
    pub fn modify_provider(
        env: Env,
        caller: Address,
        provider: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut reward_schedule = schedule::load(&env)?;
        reward_schedule.provider = provider.clone();
        schedule::save(&env, &reward_schedule);

        events::publish_provider_set(&env, provider);

        Ok(())
    }

    /// Update the per-block reward.
    ///
    /// Emissions up to the current block are settled at the old rate before
    /// the new one takes effect.
    pub fn modify_reward_per_block(
        env: Env,
        caller: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut reward_schedule = Self::touched_schedule(&env)?;
        reward_schedule.set_reward_per_block(reward_per_block)?;
        schedule::save(&env, &reward_schedule);

        events::publish_reward_per_block_set(
            &env,
            reward_per_block,
            reward_schedule.accumulator,
        );

        Ok(())
    }

    /// Move the end of the emission window. The new end must be in the future
    /// and not before the start.
    pub fn modify_end_block(
        env: Env,
        caller: Address,
        end_block: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut reward_schedule = Self::touched_schedule(&env)?;
        reward_schedule.set_end_block(end_block, env.ledger().sequence())?;
        schedule::save(&env, &reward_schedule);

        events::publish_end_block_set(&env, reward_schedule.start_block, end_block);

        Ok(())
    }

    /// Move the start of the emission window. Only allowed before emissions
    /// have started.
    pub fn modify_start_block(
        env: Env,
        caller: Address,
        start_block: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut reward_schedule = Self::touched_schedule(&env)?;
        reward_schedule.set_start_block(start_block, env.ledger().sequence())?;
        schedule::save(&env, &reward_schedule);

        events::publish_start_block_set(&env, start_block, reward_schedule.end_block);

        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose `new_admin` as the next admin. A later proposal replaces an
    /// open one; proposing the sitting admin is rejected.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();

        let replaced = admin::propose(&env, &current_admin, &new_admin)?;
        events::publish_admin_transfer_proposed(&env, current_admin, new_admin, replaced);

        Ok(())
    }

    /// Called by the proposed admin to take over.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let old_admin = admin::accept(&env, &new_admin)?;
        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();

        let dropped = admin::cancel(&env, &current_admin)?;
        events::publish_admin_transfer_cancelled(&env, current_admin, dropped);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        admin::pending(&env).map(|p| p.candidate)
    }

    /// Open handover proposal with the sequence it was made at.
    pub fn get_admin_proposal(env: Env) -> Option<admin::PendingAdmin> {
        admin::pending(&env)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_lock(env: Env, position_id: u64) -> Result<Lock, ContractError> {
        Self::load_position(&env, position_id)
    }

    /// vePUL value of a position at the current ledger timestamp.
    pub fn ve_value(env: Env, position_id: u64) -> Result<i128, ContractError> {
        let position = Self::load_position(&env, position_id)?;
        Ok(position.value_at(env.ledger().timestamp()))
    }

    pub fn ve_value_at(env: Env, position_id: u64, timestamp: u64) -> Result<i128, ContractError> {
        let position = Self::load_position(&env, position_id)?;
        Ok(position.value_at(timestamp))
    }

    /// Custody holder of a position. This is the contract while staked.
    pub fn owner_of(env: Env, position_id: u64) -> Result<Address, ContractError> {
        lock::owner_of(&env, position_id).ok_or(ContractError::PositionNotFound)
    }

    pub fn balance_of(env: Env, account: Address) -> u32 {
        lock::balance_of(&env, &account)
    }

    /// Pre-stake owner of a staked position.
    pub fn staked_position_owner(env: Env, position_id: u64) -> Option<Address> {
        pool::staked_owner(&env, position_id)
    }

    /// Staking snapshot of a position; all zero when not staked.
    pub fn staking_status(env: Env, position_id: u64) -> StakingSnapshot {
        pool::load_snapshot(&env, position_id)
    }

    /// Stake of `account` with the staked position's current vePUL value.
    /// All zero when the account is not staking.
    pub fn staking_info(env: Env, account: Address) -> Result<StakingInfo, ContractError> {
        let stake = pool::load_account_stake(&env, &account);
        if !stake.is_active() {
            return Ok(StakingInfo::from_stake(stake, 0));
        }
        let position = Self::load_position(&env, stake.position_id)?;
        let value = position.value_at(env.ledger().timestamp());
        Ok(StakingInfo::from_stake(stake, value))
    }

    /// Position currently staked by `account`, or 0.
    pub fn staked_position(env: Env, account: Address) -> u64 {
        pool::load_account_stake(&env, &account).position_id
    }

    pub fn reward_info(env: Env) -> Result<RewardSchedule, ContractError> {
        schedule::load(&env)
    }

    pub fn total_staked(env: Env) -> i128 {
        pool::total_staked(&env)
    }

    pub fn position_count(env: Env) -> u64 {
        lock::position_count(&env)
    }

    /// What `collect` would pay `account` right now, without mutating state.
    pub fn pending_reward(env: Env, account: Address) -> Result<i128, ContractError> {
        let stake = pool::load_account_stake(&env, &account);
        if !stake.is_active() {
            return Ok(0);
        }
        let (_, _, reward) = Self::settle(&env, stake.position_id)?;
        Ok(reward)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin::admin(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn syncs_staked_principal(env: Env) -> bool {
        env.storage().instance().get(&SYNC_STAKED).unwrap_or(false)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        admin::require_admin(env, caller)
    }

    fn token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_position(env: &Env, position_id: u64) -> Result<Lock, ContractError> {
        lock::load_lock(env, position_id).ok_or(ContractError::PositionNotFound)
    }

    /// Guard: `caller` must be the custody holder of the position.
    fn require_owner(env: &Env, caller: &Address, position_id: u64) -> Result<(), ContractError> {
        match lock::owner_of(env, position_id) {
            Some(owner) if owner == *caller => Ok(()),
            Some(_) => Err(ContractError::NotOwner),
            None => Err(ContractError::PositionNotFound),
        }
    }

    /// Guard: `caller` holds the position or staked it.
    fn require_control(
        env: &Env,
        caller: &Address,
        position_id: u64,
    ) -> Result<Lock, ContractError> {
        let position = Self::load_position(env, position_id)?;
        if lock::owner_of(env, position_id).as_ref() == Some(caller) {
            return Ok(position);
        }
        if pool::staked_owner(env, position_id).as_ref() == Some(caller) {
            return Ok(position);
        }
        Err(ContractError::NotOwner)
    }

    /// Shared body of `increase_amount` and `deposit_for`.
    fn add_to_position(
        env: &Env,
        payer: &Address,
        position_id: u64,
        delta: i128,
    ) -> Result<i128, ContractError> {
        if delta <= 0 {
            return Err(ContractError::InvalidParameter);
        }
        let mut position = Self::load_position(env, position_id)?;
        if position.amount == 0 || position.is_expired(env.ledger().timestamp()) {
            return Err(ContractError::InvalidState);
        }

        let token = Self::token(env)?;
        Self::require_balance(env, &token, payer, delta)?;

        let mut snapshot = pool::load_snapshot(env, position_id);
        let staked = snapshot.is_staked();
        let sync: bool = env.storage().instance().get(&SYNC_STAKED).unwrap_or(false);
        if staked && sync {
            let total = pool::total_staked(env);
            let mut reward_schedule = schedule::load(env)?;
            schedule::touch(env, &mut reward_schedule, total, env.ledger().sequence())?;
            schedule::save(env, &reward_schedule);

            let new_total = total
                .checked_add(delta)
                .ok_or(ContractError::ArithmeticOverflow)?;
            pool::set_total_staked(env, new_total);
            snapshot.lock_amount = snapshot
                .lock_amount
                .checked_add(delta)
                .ok_or(ContractError::ArithmeticOverflow)?;
            pool::save_snapshot(env, position_id, &snapshot);
        }

        position.amount = position
            .amount
            .checked_add(delta)
            .ok_or(ContractError::ArithmeticOverflow)?;
        lock::save_lock(env, position_id, &position);

        token::Client::new(env, &token).transfer(payer, &env.current_contract_address(), &delta);

        events::publish_amount_increased(
            env,
            position_id,
            payer.clone(),
            delta,
            position.amount,
            staked,
        );

        Ok(position.amount)
    }

    /// Shared body of the two unstake entry points. With `pay_out` unset the
    /// accrued reward is forfeited instead of pulled from the provider.
    fn release_stake(env: &Env, caller: Address, pay_out: bool) -> Result<i128, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();

        let stake = pool::load_account_stake(env, &caller);
        if !stake.is_active() {
            return Err(ContractError::InvalidState);
        }
        let position_id = stake.position_id;

        let (reward_schedule, snapshot, accrued) = Self::settle(env, position_id)?;
        schedule::save(env, &reward_schedule);

        let owner = pool::staked_owner(env, position_id).unwrap_or_else(|| caller.clone());
        lock::move_position(env, &env.current_contract_address(), &owner, position_id);
        pool::clear_staked_owner(env, position_id);
        pool::clear_account_stake(env, &caller);
        pool::clear_snapshot(env, position_id);

        let new_total = pool::total_staked(env)
            .checked_sub(snapshot.lock_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::set_total_staked(env, new_total);

        let (reward, forfeited) = if pay_out { (accrued, 0) } else { (0, accrued) };
        let token = Self::token(env)?;
        Self::pay_reward(env, &token, &reward_schedule.provider, &caller, reward)?;

        events::publish_unstaked(
            env,
            caller,
            position_id,
            snapshot.staking_id,
            reward,
            forfeited,
            new_total,
        );

        Ok(reward)
    }

    /// Load the schedule and settle it up to the current block.
    fn touched_schedule(env: &Env) -> Result<RewardSchedule, ContractError> {
        let mut reward_schedule = schedule::load(env)?;
        schedule::touch(
            env,
            &mut reward_schedule,
            pool::total_staked(env),
            env.ledger().sequence(),
        )?;
        Ok(reward_schedule)
    }

    /// Touch the schedule and settle one staked position against it. Neither
    /// the schedule nor the refreshed snapshot is saved.
    fn settle(
        env: &Env,
        position_id: u64,
    ) -> Result<(RewardSchedule, StakingSnapshot, i128), ContractError> {
        let reward_schedule = Self::touched_schedule(env)?;

        let position = Self::load_position(env, position_id)?;
        let mut snapshot = pool::load_snapshot(env, position_id);
        let reward = snapshot.settle(
            env,
            &position,
            &reward_schedule.accumulator,
            env.ledger().timestamp(),
            env.ledger().sequence(),
        )?;

        Ok((reward_schedule, snapshot, reward))
    }

    fn require_balance(
        env: &Env,
        token: &Address,
        account: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if token::Client::new(env, token).balance(account) < amount {
            return Err(ContractError::InsufficientFunds);
        }
        Ok(())
    }

    fn return_principal(
        env: &Env,
        token: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let pool_address = env.current_contract_address();
        Self::require_balance(env, token, &pool_address, amount)?;
        token::Client::new(env, token).transfer(&pool_address, to, &amount);
        Ok(())
    }

    /// Pull `reward` from the provider straight to `to`. The provider must
    /// have approved the contract for at least `reward`.
    fn pay_reward(
        env: &Env,
        token: &Address,
        provider: &Address,
        to: &Address,
        reward: i128,
    ) -> Result<(), ContractError> {
        if reward <= 0 {
            return Ok(());
        }
        let client = token::Client::new(env, token);
        let pool_address = env.current_contract_address();
        if client.balance(provider) < reward || client.allowance(provider, &pool_address) < reward
        {
            return Err(ContractError::InsufficientFunds);
        }
        client.transfer_from(&pool_address, provider, to, &reward);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
