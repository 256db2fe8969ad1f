#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, U256};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub provider: Address,
    pub reward_per_block: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub sync_staked_principal: bool,
    pub timestamp: u64,
}

/// Fired when a new position is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedEvent {
    pub position_id: u64,
    pub payer: Address,
    pub owner: Address,
    pub amount: i128,
    pub end: u64,
    pub timestamp: u64,
}

/// Fired when principal is added to an existing position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountIncreasedEvent {
    pub position_id: u64,
    pub payer: Address,
    pub added: i128,
    pub new_amount: i128,
    pub staked: bool,
    pub timestamp: u64,
}

/// Fired when a lock is extended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockTimeIncreasedEvent {
    pub position_id: u64,
    pub old_end: u64,
    pub new_end: u64,
    pub timestamp: u64,
}

/// Fired when expired principal is returned.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub position_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a withdrawn position is retired.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnedEvent {
    pub position_id: u64,
    pub owner: Address,
    pub timestamp: u64,
}

/// Fired on a plain ownership transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionTransferredEvent {
    pub position_id: u64,
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

/// Fired when a position enters the reward pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub staking_id: u64,
    pub lock_amount: i128,
    pub ve_value: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired on every settlement, including zero rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub reward: i128,
    pub accumulator: U256,
    pub timestamp: u64,
}

/// Fired when a position leaves the reward pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub position_id: u64,
    pub staking_id: u64,
    pub reward: i128,
    /// Accrued reward dropped by an unstake that skipped the payout.
    pub forfeited: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the reward provider.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderSetEvent {
    pub provider: Address,
    pub timestamp: u64,
}

/// Fired when the admin changes the per-block reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPerBlockSetEvent {
    pub reward_per_block: i128,
    pub accumulator: U256,
    pub timestamp: u64,
}

/// Fired when the admin moves either end of the emission window.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowSetEvent {
    pub start_block: u32,
    pub end_block: u32,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    /// Candidate of the proposal this one replaced, if any.
    pub replaced: Option<Address>,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    provider: Address,
    reward_per_block: i128,
    start_block: u32,
    end_block: u32,
    sync_staked_principal: bool,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            provider,
            reward_per_block,
            start_block,
            end_block,
            sync_staked_principal,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_locked(
    env: &Env,
    position_id: u64,
    payer: Address,
    owner: Address,
    amount: i128,
    end: u64,
) {
    env.events().publish(
        (symbol_short!("LOCKED"), owner.clone()),
        LockedEvent {
            position_id,
            payer,
            owner,
            amount,
            end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_amount_increased(
    env: &Env,
    position_id: u64,
    payer: Address,
    added: i128,
    new_amount: i128,
    staked: bool,
) {
    env.events().publish(
        (symbol_short!("INC_AMT"), payer.clone()),
        AmountIncreasedEvent {
            position_id,
            payer,
            added,
            new_amount,
            staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unlock_time_increased(env: &Env, position_id: u64, old_end: u64, new_end: u64) {
    env.events().publish(
        (symbol_short!("INC_TIME"),),
        UnlockTimeIncreasedEvent {
            position_id,
            old_end,
            new_end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, position_id: u64, owner: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), owner.clone()),
        WithdrawnEvent {
            position_id,
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_burned(env: &Env, position_id: u64, owner: Address) {
    env.events().publish(
        (symbol_short!("BURNED"), owner.clone()),
        BurnedEvent {
            position_id,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transferred(env: &Env, position_id: u64, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone()),
        PositionTransferredEvent {
            position_id,
            from,
            to,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    position_id: u64,
    staking_id: u64,
    lock_amount: i128,
    ve_value: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            position_id,
            staking_id,
            lock_amount,
            ve_value,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_collected(
    env: &Env,
    staker: Address,
    position_id: u64,
    reward: i128,
    accumulator: U256,
) {
    env.events().publish(
        (symbol_short!("COLLECTED"), staker.clone()),
        CollectedEvent {
            staker,
            position_id,
            reward,
            accumulator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    position_id: u64,
    staking_id: u64,
    reward: i128,
    forfeited: i128,
    total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            position_id,
            staking_id,
            reward,
            forfeited,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_provider_set(env: &Env, provider: Address) {
    env.events().publish(
        (symbol_short!("PROVIDER"),),
        ProviderSetEvent {
            provider,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_per_block_set(env: &Env, reward_per_block: i128, accumulator: U256) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardPerBlockSetEvent {
            reward_per_block,
            accumulator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_end_block_set(env: &Env, start_block: u32, end_block: u32) {
    env.events().publish(
        (symbol_short!("END_BLK"),),
        WindowSetEvent {
            start_block,
            end_block,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_start_block_set(env: &Env, start_block: u32, end_block: u32) {
    env.events().publish(
        (symbol_short!("START_BLK"),),
        WindowSetEvent {
            start_block,
            end_block,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(
    env: &Env,
    current_admin: Address,
    proposed_admin: Address,
    replaced: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("ADM_PROP"),),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            replaced,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"),),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"),),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
