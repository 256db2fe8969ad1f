//! Staking pool bookkeeping: per-position snapshots, the one-stake-per-account
//! index, the pre-stake owner side mapping and the staked principal total.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::fixed_point;
use crate::lock::{self, Lock};
use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const SNAPSHOT: Symbol = symbol_short!("STK_SNAP");
const ACCOUNT_STAKE: Symbol = symbol_short!("ACCT_STK");
const STAKED_OWNER: Symbol = symbol_short!("STK_OWN");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const STAKING_CTR: Symbol = symbol_short!("STK_CTR");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Types ────────────────────────────────────────────────────────────────────

/// Staking state of one position. `staking_id == 0` means not staked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingSnapshot {
    pub staking_id: u64,
    /// Principal counted in the pool total for this position.
    pub lock_amount: i128,
    /// vePUL value recorded at the last touch; weights the next payout.
    pub last_value: i128,
    pub last_touch_block: u32,
    pub last_touch_accumulator: U256,
}

impl StakingSnapshot {
    pub fn empty(env: &Env) -> Self {
        Self {
            staking_id: 0,
            lock_amount: 0,
            last_value: 0,
            last_touch_block: 0,
            last_touch_accumulator: fixed_point::zero(env),
        }
    }

    pub fn is_staked(&self) -> bool {
        self.staking_id != 0
    }

    /// Reward owed for the accumulator growth since the last touch:
    /// `(accumulator - last_touch_accumulator) * last_value / 2^128`.
    pub fn accrued(&self, env: &Env, accumulator: &U256) -> Result<i128, ContractError> {
        if *accumulator <= self.last_touch_accumulator || self.last_value <= 0 {
            return Ok(0);
        }
        let delta = accumulator.sub(&self.last_touch_accumulator);
        let weight = fixed_point::from_amount(env, self.last_value)?;
        fixed_point::to_amount(&fixed_point::settle_q128(env, &delta, &weight))
    }

    /// Pay out what has accrued and restart the snapshot from the current
    /// accumulator with a freshly decayed value. Returns the reward.
    ///
    /// The value is taken from `lock_amount`, the principal the pool divides
    /// emissions by, so principal added without syncing the pool earns nothing.
    pub fn settle(
        &mut self,
        env: &Env,
        lock: &Lock,
        accumulator: &U256,
        timestamp: u64,
        block: u32,
    ) -> Result<i128, ContractError> {
        let reward = self.accrued(env, accumulator)?;
        self.last_value = lock::ve_value(self.lock_amount, lock.end, timestamp);
        self.last_touch_accumulator = accumulator.clone();
        self.last_touch_block = block;
        Ok(reward)
    }
}

/// The single active stake of an account. `position_id == 0` means none.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountStake {
    pub staking_id: u64,
    pub position_id: u64,
}

impl AccountStake {
    pub fn none() -> Self {
        Self {
            staking_id: 0,
            position_id: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.position_id != 0
    }
}

/// Reporting view of an account's stake: the index entry plus the staked
/// position's vePUL value at the time of the query.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingInfo {
    pub staking_id: u64,
    pub position_id: u64,
    pub value: i128,
}

impl StakingInfo {
    pub fn from_stake(stake: AccountStake, value: i128) -> Self {
        Self {
            staking_id: stake.staking_id,
            position_id: stake.position_id,
            value,
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn extend_ttl_id_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_snapshot(env: &Env, position_id: u64) -> StakingSnapshot {
    let key = (SNAPSHOT, position_id);
    match env.storage().persistent().get(&key) {
        Some(snapshot) => {
            extend_ttl_id_key(env, &key);
            snapshot
        }
        None => StakingSnapshot::empty(env),
    }
}

pub fn save_snapshot(env: &Env, position_id: u64, snapshot: &StakingSnapshot) {
    let key = (SNAPSHOT, position_id);
    env.storage().persistent().set(&key, snapshot);
    extend_ttl_id_key(env, &key);
}

pub fn clear_snapshot(env: &Env, position_id: u64) {
    env.storage().persistent().remove(&(SNAPSHOT, position_id));
}

pub fn load_account_stake(env: &Env, account: &Address) -> AccountStake {
    let key = (ACCOUNT_STAKE, account.clone());
    match env.storage().persistent().get(&key) {
        Some(stake) => {
            extend_ttl_address_key(env, &key);
            stake
        }
        None => AccountStake::none(),
    }
}

pub fn save_account_stake(env: &Env, account: &Address, stake: &AccountStake) {
    let key = (ACCOUNT_STAKE, account.clone());
    env.storage().persistent().set(&key, stake);
    extend_ttl_address_key(env, &key);
}

pub fn clear_account_stake(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&(ACCOUNT_STAKE, account.clone()));
}

/// Owner of a staked position before custody moved to the pool.
pub fn staked_owner(env: &Env, position_id: u64) -> Option<Address> {
    let key = (STAKED_OWNER, position_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        extend_ttl_id_key(env, &key);
    }
    owner
}

pub fn set_staked_owner(env: &Env, position_id: u64, owner: &Address) {
    let key = (STAKED_OWNER, position_id);
    env.storage().persistent().set(&key, owner);
    extend_ttl_id_key(env, &key);
}

pub fn clear_staked_owner(env: &Env, position_id: u64) {
    env.storage()
        .persistent()
        .remove(&(STAKED_OWNER, position_id));
}

pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

/// Staking generations are shared by every position and never reused.
pub fn next_staking_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&STAKING_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&STAKING_CTR, &id);
    id
}
