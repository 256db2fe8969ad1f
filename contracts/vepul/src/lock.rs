//! Lock ledger: per-position `{amount, end}` records, the linear decay formula
//! and the ownership relation of positions.
//!
//! "Owner" here is the custody holder. While a position is staked its owner is
//! the contract itself and the beneficial owner lives in the pool's side
//! mapping (see `pool::staked_owner`).

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

/// Unlock times are rounded to this bucket.
pub const WEEK: u64 = 7 * 86_400;

/// Longest allowed lock, and the decay denominator.
pub const MAXTIME: u64 = (4 * 365 + 1) * 86_400;

// ── Storage keys ─────────────────────────────────────────────────────────────

const LOCK: Symbol = symbol_short!("LOCK");
const OWNER: Symbol = symbol_short!("OWNER");
const BALANCE: Symbol = symbol_short!("BALANCE");
const POSITION_CTR: Symbol = symbol_short!("POS_CTR");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Types ────────────────────────────────────────────────────────────────────

/// Locked principal of a single position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    pub amount: i128,
    pub end: u64,
}

impl Lock {
    /// Per-second decay rate of the position's vePUL value.
    pub fn slope(&self) -> i128 {
        slope(self.amount)
    }

    pub fn value_at(&self, timestamp: u64) -> i128 {
        ve_value(self.amount, self.end, timestamp)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.end <= now
    }
}

// ── Decay ────────────────────────────────────────────────────────────────────

/// `amount / MAXTIME`, remainder discarded.
pub fn slope(amount: i128) -> i128 {
    if amount <= 0 {
        return 0;
    }
    amount / MAXTIME as i128
}

/// Instantaneous vePUL value of a lock: `slope * max(end - timestamp, 0)`.
pub fn ve_value(amount: i128, end: u64, timestamp: u64) -> i128 {
    if end <= timestamp {
        return 0;
    }
    let remaining = (end - timestamp) as i128;
    slope(amount).saturating_mul(remaining)
}

pub fn is_week_aligned(timestamp: u64) -> bool {
    timestamp % WEEK == 0
}

/// Checks a requested unlock time against `now`: it must be week aligned,
/// strictly in the future and no further than `MAXTIME` away.
pub fn validate_unlock_time(end: u64, now: u64) -> Result<(), ContractError> {
    if !is_week_aligned(end) || end <= now || end > now.saturating_add(MAXTIME) {
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
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

pub fn load_lock(env: &Env, position_id: u64) -> Option<Lock> {
    let key = (LOCK, position_id);
    let lock: Option<Lock> = env.storage().persistent().get(&key);
    if lock.is_some() {
        extend_ttl_id_key(env, &key);
    }
    lock
}

pub fn save_lock(env: &Env, position_id: u64, lock: &Lock) {
    let key = (LOCK, position_id);
    env.storage().persistent().set(&key, lock);
    extend_ttl_id_key(env, &key);
}

pub fn owner_of(env: &Env, position_id: u64) -> Option<Address> {
    let key = (OWNER, position_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        extend_ttl_id_key(env, &key);
    }
    owner
}

/// Number of positions currently held by `account`.
pub fn balance_of(env: &Env, account: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&(BALANCE, account.clone()))
        .unwrap_or(0)
}

fn set_balance(env: &Env, account: &Address, balance: u32) {
    let key = (BALANCE, account.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_ttl_address_key(env, &key);
    }
}

/// Total number of positions ever created; ids run from 1 to this value.
pub fn position_count(env: &Env) -> u64 {
    env.storage().instance().get(&POSITION_CTR).unwrap_or(0)
}

/// Allocate a fresh id and hand the new position to `to`.
pub fn mint(env: &Env, to: &Address, lock: &Lock) -> u64 {
    let position_id = position_count(env).saturating_add(1);
    env.storage().instance().set(&POSITION_CTR, &position_id);

    save_lock(env, position_id, lock);

    let key = (OWNER, position_id);
    env.storage().persistent().set(&key, to);
    extend_ttl_id_key(env, &key);
    set_balance(env, to, balance_of(env, to).saturating_add(1));

    position_id
}

/// Move custody of `position_id` from `from` to `to`. The caller has already
/// checked that `from` is the current owner.
pub fn move_position(env: &Env, from: &Address, to: &Address, position_id: u64) {
    if from == to {
        return;
    }
    let key = (OWNER, position_id);
    env.storage().persistent().set(&key, to);
    extend_ttl_id_key(env, &key);

    set_balance(env, from, balance_of(env, from).saturating_sub(1));
    set_balance(env, to, balance_of(env, to).saturating_add(1));
}

/// Retire a withdrawn position entirely.
pub fn burn(env: &Env, owner: &Address, position_id: u64) {
    env.storage().persistent().remove(&(OWNER, position_id));
    env.storage().persistent().remove(&(LOCK, position_id));
    set_balance(env, owner, balance_of(env, owner).saturating_sub(1));
}
