//! Q128 fixed-point helpers.
//!
//! The reward accumulator is the only scaled quantity in the contract. It is
//! kept as a 256-bit integer so that `reward_per_block * blocks * 2^128` and
//! `accumulator_delta * ve_value` never leave the representable range. That
//! holds as long as the rate stays under `schedule::MAX_REWARD_PER_BLOCK` and
//! payout weights stay under the counted principal. Every division truncates
//! toward zero.

use soroban_sdk::{Env, U256};

use crate::ContractError;

/// Number of fractional bits carried by the accumulator.
pub const Q128_BITS: u32 = 128;

/// `2^128` as a host integer.
pub fn q128(env: &Env) -> U256 {
    U256::from_u32(env, 1).shl(Q128_BITS)
}

pub fn zero(env: &Env) -> U256 {
    U256::from_u32(env, 0)
}

/// Lift a non-negative token amount into 256-bit space.
pub fn from_amount(env: &Env, amount: i128) -> Result<U256, ContractError> {
    u128::try_from(amount)
        .map(|value| U256::from_u128(env, value))
        .map_err(|_| ContractError::ArithmeticOverflow)
}

/// Narrow an unscaled 256-bit value back into a token amount.
pub fn to_amount(value: &U256) -> Result<i128, ContractError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(ContractError::ArithmeticOverflow)
}

/// `floor(a * b / denominator)`. The caller guarantees `denominator != 0`.
pub fn mul_div(a: &U256, b: &U256, denominator: &U256) -> U256 {
    a.mul(b).div(denominator)
}

/// Accumulator increment for `reward` emitted across `shares` units of
/// principal: `floor(reward * 2^128 / shares)`.
pub fn per_share_q128(env: &Env, reward: &U256, shares: &U256) -> U256 {
    mul_div(reward, &q128(env), shares)
}

/// Unscale `per_share_delta * weight` back to token units:
/// `floor(per_share_delta * weight / 2^128)`.
pub fn settle_q128(env: &Env, per_share_delta: &U256, weight: &U256) -> U256 {
    mul_div(per_share_delta, weight, &q128(env))
}
