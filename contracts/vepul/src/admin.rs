//! Contract admin and its two-step handover.
//!
//! The admin gates the schedule setters. Handing the role over takes a
//! proposal by the sitting admin and an acceptance by the candidate, so a
//! mistyped address can never take control.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

/// An open handover proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingAdmin {
    pub candidate: Address,
    /// Ledger sequence the proposal was made at.
    pub proposed_at: u32,
}

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != admin(env)? {
        return Err(ContractError::NotOwner);
    }
    Ok(())
}

/// Install `new_admin`. Any open proposal is dropped with the old admin.
pub fn set_admin(env: &Env, new_admin: &Address) {
    env.storage().instance().set(&ADMIN, new_admin);
    env.storage().instance().remove(&PENDING_ADMIN);
}

pub fn pending(env: &Env) -> Option<PendingAdmin> {
    env.storage().instance().get(&PENDING_ADMIN)
}

/// Open a proposal for `candidate`, replacing any earlier one. Returns the
/// candidate that was replaced.
pub fn propose(
    env: &Env,
    current_admin: &Address,
    candidate: &Address,
) -> Result<Option<Address>, ContractError> {
    require_admin(env, current_admin)?;
    if candidate == current_admin {
        return Err(ContractError::InvalidParameter);
    }

    let replaced = pending(env).map(|p| p.candidate);
    let proposal = PendingAdmin {
        candidate: candidate.clone(),
        proposed_at: env.ledger().sequence(),
    };
    env.storage().instance().set(&PENDING_ADMIN, &proposal);
    Ok(replaced)
}

/// Complete the handover to `candidate`. Returns the previous admin.
pub fn accept(env: &Env, candidate: &Address) -> Result<Address, ContractError> {
    let proposal = pending(env).ok_or(ContractError::InvalidState)?;
    if proposal.candidate != *candidate {
        return Err(ContractError::NotOwner);
    }

    let previous = admin(env)?;
    set_admin(env, candidate);
    Ok(previous)
}

/// Withdraw the open proposal. Returns the candidate that was dropped.
pub fn cancel(env: &Env, current_admin: &Address) -> Result<Address, ContractError> {
    require_admin(env, current_admin)?;
    let proposal = pending(env).ok_or(ContractError::InvalidState)?;
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(proposal.candidate)
}
