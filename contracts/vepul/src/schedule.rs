//! Reward schedule: emission parameters plus the global Q128 accumulator.
//!
//! The accumulator only ever moves through [`touch`], which settles emissions
//! between the last touched block and the current one, clamped to the
//! `[start_block, end_block]` window.

use core::cmp::{max, min};

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::fixed_point;
use crate::ContractError;

const SCHEDULE: Symbol = symbol_short!("SCHEDULE");

/// Largest per-block reward. Keeps `rate * blocks` under 2^128 for any block
/// span, so the Q128 accumulator and payout products stay inside `U256`.
pub const MAX_REWARD_PER_BLOCK: i128 = (u128::MAX / u32::MAX as u128) as i128;

fn validate_rate(reward_per_block: i128) -> Result<(), ContractError> {
    if !(0..=MAX_REWARD_PER_BLOCK).contains(&reward_per_block) {
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

/// Deployment-time emission parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleConfig {
    /// Account the rewards are pulled from.
    pub provider: Address,
    pub reward_per_block: i128,
    pub start_block: u32,
    pub end_block: u32,
}

/// Global reward state, returned as-is by `reward_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSchedule {
    pub provider: Address,
    /// Cumulative reward per unit of staked principal, scaled by 2^128.
    pub accumulator: U256,
    pub reward_per_block: i128,
    pub last_touch_block: u32,
    pub start_block: u32,
    pub end_block: u32,
}

impl RewardSchedule {
    pub fn new(
        env: &Env,
        config: ScheduleConfig,
        current_block: u32,
    ) -> Result<Self, ContractError> {
        validate_rate(config.reward_per_block)?;
        if config.start_block > config.end_block {
            return Err(ContractError::InvalidParameter);
        }
        Ok(Self {
            provider: config.provider,
            accumulator: fixed_point::zero(env),
            reward_per_block: config.reward_per_block,
            last_touch_block: current_block,
            start_block: config.start_block,
            end_block: config.end_block,
        })
    }

    pub fn set_reward_per_block(&mut self, reward_per_block: i128) -> Result<(), ContractError> {
        validate_rate(reward_per_block)?;
        self.reward_per_block = reward_per_block;
        Ok(())
    }

    /// Must be called on a schedule already touched at `current_block`.
    pub fn set_end_block(&mut self, end_block: u32, current_block: u32) -> Result<(), ContractError> {
        if end_block <= current_block || end_block < self.start_block {
            return Err(ContractError::InvalidParameter);
        }
        self.end_block = end_block;
        Ok(())
    }

    /// Move the start of emissions. Only legal before the current start has
    /// been reached; the new start must lie after everything already settled
    /// and before the end of the window.
    pub fn set_start_block(
        &mut self,
        start_block: u32,
        current_block: u32,
    ) -> Result<(), ContractError> {
        if current_block >= self.start_block {
            return Err(ContractError::InvalidState);
        }
        if start_block <= self.last_touch_block || start_block >= self.end_block {
            return Err(ContractError::InvalidParameter);
        }
        // Nothing has accrued yet, so settlement restarts at the new start.
        self.start_block = start_block;
        self.last_touch_block = start_block;
        Ok(())
    }
}

/// Settle emissions up to `current_block` against `total_staked` principal.
///
/// Blocks outside `[start_block, end_block]` and intervals with nothing staked
/// do not advance the accumulator, but `last_touch_block` still moves so they
/// are never counted later.
pub fn touch(
    env: &Env,
    schedule: &mut RewardSchedule,
    total_staked: i128,
    current_block: u32,
) -> Result<(), ContractError> {
    let from = max(schedule.last_touch_block, schedule.start_block);
    let to = min(current_block, schedule.end_block);

    if to > from && total_staked > 0 {
        let elapsed = U256::from_u32(env, to - from);
        let emitted = fixed_point::from_amount(env, schedule.reward_per_block)?.mul(&elapsed);
        let shares = fixed_point::from_amount(env, total_staked)?;
        let delta = fixed_point::per_share_q128(env, &emitted, &shares);
        schedule.accumulator = schedule.accumulator.add(&delta);
    }

    schedule.last_touch_block = max(current_block, schedule.last_touch_block);
    Ok(())
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub fn load(env: &Env) -> Result<RewardSchedule, ContractError> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, schedule: &RewardSchedule) {
    env.storage().instance().set(&SCHEDULE, schedule);
}
