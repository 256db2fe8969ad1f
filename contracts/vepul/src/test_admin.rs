extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, U256,
};

use crate::fixed_point;
use crate::lock::{MAXTIME, WEEK};
use crate::schedule::{ScheduleConfig, MAX_REWARD_PER_BLOCK};
use crate::{ContractError, VePulContract, VePulContractClient};

const RATE: i128 = 1_200_000_000_000_000;
const PRINCIPAL: i128 = 220_000_000_000_000_000;
const FUNDS: i128 = 100_000_000_000_000_000_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Contract initialized at ledger sequence 0 with the given window.
fn setup(
    start_block: u32,
    end_block: u32,
) -> (Env, VePulContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(10 * WEEK);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VePulContract, ());
    let client = VePulContractClient::new(&env, &contract_id);

    let provider = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&provider, &FUNDS);
    TokenClient::new(&env, &token).approve(&provider, &contract_id, &FUNDS, &1_000);

    let admin = Address::generate(&env);
    let config = ScheduleConfig {
        provider,
        reward_per_block: RATE,
        start_block,
        end_block,
    };
    client.initialize(&admin, &token, &config, &true);

    (env, client, admin, token)
}

macro_rules! assert_contract_err {
    ($result:expr, $expected:expr $(,)?) => {
        match $result {
            Err(Ok(e)) => assert_eq!(e, $expected),
            _ => unreachable!("Expected {:?}", $expected),
        }
    };
}

// ── Start block ───────────────────────────────────────────────────────────────

#[test]
fn test_modify_start_block_rules() {
    let (env, client, admin, _) = setup(200, 10_000);
    let stranger = Address::generate(&env);

    let info = client.reward_info();
    assert_eq!((info.start_block, info.last_touch_block), (200, 0));

    client.modify_start_block(&admin, &199);
    let info = client.reward_info();
    assert_eq!((info.start_block, info.last_touch_block), (199, 199));

    client.modify_start_block(&admin, &201);
    assert_eq!(client.reward_info().start_block, 201);

    // At or before what has been settled.
    assert_contract_err!(
        client.try_modify_start_block(&admin, &50),
        ContractError::InvalidParameter,
    );
    // Past the end of the window.
    assert_contract_err!(
        client.try_modify_start_block(&admin, &20_000),
        ContractError::InvalidParameter,
    );
    assert_contract_err!(
        client.try_modify_start_block(&stranger, &250),
        ContractError::NotOwner,
    );

    let info = client.reward_info();
    assert_eq!((info.start_block, info.last_touch_block), (201, 201));
}

#[test]
fn test_modify_start_block_after_start_fails() {
    let (env, client, admin, _) = setup(200, 10_000);

    env.ledger().set_sequence_number(200);
    assert_contract_err!(
        client.try_modify_start_block(&admin, &300),
        ContractError::InvalidState,
    );
    assert_eq!(client.reward_info().start_block, 200);
}

#[test]
fn test_delayed_start_pays_only_from_new_start() {
    let (env, client, admin, token) = setup(20, 10_000);
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&user, &PRINCIPAL);
    let end = 62 * WEEK;
    let id = client.create_lock(&user, &PRINCIPAL, &end);
    client.stake(&user, &id);

    client.modify_start_block(&admin, &40);

    env.ledger().set_sequence_number(50);
    let emitted = U256::from_u128(&env, RATE as u128 * 10);
    let acc = fixed_point::per_share_q128(&env, &emitted, &U256::from_u128(&env, PRINCIPAL as u128));
    client.collect(&user);
    assert_eq!(client.reward_info().accumulator, acc);
}

// ── End block ─────────────────────────────────────────────────────────────────

#[test]
fn test_modify_end_block_rules() {
    let (env, client, admin, _) = setup(100, 10_000);
    let stranger = Address::generate(&env);
    env.ledger().set_sequence_number(500);

    client.modify_end_block(&admin, &20_000);
    assert_eq!(client.reward_info().end_block, 20_000);
    assert_eq!(client.reward_info().last_touch_block, 500);

    assert_contract_err!(
        client.try_modify_end_block(&admin, &500),
        ContractError::InvalidParameter,
    );
    assert_contract_err!(
        client.try_modify_end_block(&admin, &499),
        ContractError::InvalidParameter,
    );
    assert_contract_err!(
        client.try_modify_end_block(&stranger, &30_000),
        ContractError::NotOwner,
    );
    assert_eq!(client.reward_info().end_block, 20_000);
}

#[test]
fn test_modify_end_block_cannot_precede_start() {
    let (env, client, admin, _) = setup(800, 10_000);
    env.ledger().set_sequence_number(5);

    assert_contract_err!(
        client.try_modify_end_block(&admin, &700),
        ContractError::InvalidParameter,
    );
    client.modify_end_block(&admin, &800);
    assert_eq!(client.reward_info().end_block, 800);
}

// ── Reward rate ───────────────────────────────────────────────────────────────

#[test]
fn test_rate_change_settles_at_old_rate() {
    let (env, client, admin, token) = setup(0, 10_000);
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&user, &PRINCIPAL);
    let end = 62 * WEEK;
    let id = client.create_lock(&user, &PRINCIPAL, &end);
    client.stake(&user, &id);
    let value0 = (PRINCIPAL / MAXTIME as i128) * (end - 10 * WEEK) as i128;

    env.ledger().set_sequence_number(10);
    client.modify_reward_per_block(&admin, &(2 * RATE));
    assert_eq!(client.reward_info().reward_per_block, 2 * RATE);

    env.ledger().set_sequence_number(20);
    let principal = U256::from_u128(&env, PRINCIPAL as u128);
    let old = fixed_point::per_share_q128(&env, &U256::from_u128(&env, RATE as u128 * 10), &principal);
    let new = fixed_point::per_share_q128(
        &env,
        &U256::from_u128(&env, 2 * RATE as u128 * 10),
        &principal,
    );
    let acc = old.add(&new);
    let expected = fixed_point::to_amount(&fixed_point::settle_q128(
        &env,
        &acc,
        &U256::from_u128(&env, value0 as u128),
    ))
    .unwrap();

    assert_eq!(client.collect(&user), expected);
}

#[test]
fn test_modify_reward_per_block_failures() {
    let (env, client, admin, _) = setup(0, 10_000);
    let stranger = Address::generate(&env);

    assert_contract_err!(
        client.try_modify_reward_per_block(&admin, &-1),
        ContractError::InvalidParameter,
    );
    assert_contract_err!(
        client.try_modify_reward_per_block(&stranger, &RATE),
        ContractError::NotOwner,
    );

    client.modify_reward_per_block(&admin, &0);
    assert_eq!(client.reward_info().reward_per_block, 0);
}

#[test]
fn test_reward_per_block_is_capped() {
    let (env, client, admin, token) = setup(0, 10_000);

    assert_contract_err!(
        client.try_modify_reward_per_block(&admin, &(MAX_REWARD_PER_BLOCK + 1)),
        ContractError::InvalidParameter,
    );
    assert_contract_err!(
        client.try_modify_reward_per_block(&admin, &i128::MAX),
        ContractError::InvalidParameter,
    );
    assert_eq!(client.reward_info().reward_per_block, RATE);

    // A staker at the cap still settles without leaving 256-bit range.
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&user, &PRINCIPAL);
    let id = client.create_lock(&user, &PRINCIPAL, &(10 * WEEK + 52 * WEEK));
    client.stake(&user, &id);
    client.modify_reward_per_block(&admin, &MAX_REWARD_PER_BLOCK);
    assert_eq!(client.reward_info().reward_per_block, MAX_REWARD_PER_BLOCK);

    env.ledger().set_sequence_number(5_000);
    assert!(client.pending_reward(&user) > 0);

    // Initialization applies the same bound.
    let fresh = VePulContractClient::new(&env, &env.register(VePulContract, ()));
    let config = ScheduleConfig {
        provider: Address::generate(&env),
        reward_per_block: MAX_REWARD_PER_BLOCK + 1,
        start_block: 0,
        end_block: 100,
    };
    assert_contract_err!(
        fresh.try_initialize(&admin, &token, &config, &true),
        ContractError::InvalidParameter,
    );
}

// ── Provider ──────────────────────────────────────────────────────────────────

#[test]
fn test_modify_provider() {
    let (env, client, admin, token) = setup(0, 10_000);
    let stranger = Address::generate(&env);
    let user = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&user, &PRINCIPAL);
    let id = client.create_lock(&user, &PRINCIPAL, &(62 * WEEK));
    client.stake(&user, &id);

    let provider = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&provider, &FUNDS);
    TokenClient::new(&env, &token).approve(&provider, &client.address, &FUNDS, &1_000);

    assert_contract_err!(
        client.try_modify_provider(&stranger, &provider),
        ContractError::NotOwner,
    );

    env.ledger().set_sequence_number(10);
    client.modify_provider(&admin, &provider);
    let info = client.reward_info();
    assert_eq!(info.provider, provider);
    // Changing the provider does not settle anything.
    assert_eq!(info.last_touch_block, 0);

    let reward = client.collect(&user);
    assert!(reward > 0);
    assert_eq!(TokenClient::new(&env, &token).balance(&provider), FUNDS - reward);
}

// ── Admin transfer (two-step) ─────────────────────────────────────────────────

#[test]
fn test_admin_two_step_transfer() {
    let (env, client, admin, _) = setup(0, 10_000);
    let new_admin = Address::generate(&env);
    let stranger = Address::generate(&env);

    assert_contract_err!(
        client.try_propose_admin(&stranger, &new_admin),
        ContractError::NotOwner,
    );

    client.propose_admin(&admin, &new_admin);
    assert_eq!(client.get_pending_admin(), Some(new_admin.clone()));

    assert_contract_err!(client.try_accept_admin(&stranger), ContractError::NotOwner);

    client.accept_admin(&new_admin);
    assert_eq!(client.get_admin(), new_admin);
    assert_eq!(client.get_pending_admin(), None);

    // The old admin lost its rights.
    assert_contract_err!(
        client.try_modify_reward_per_block(&admin, &RATE),
        ContractError::NotOwner,
    );
    client.modify_reward_per_block(&new_admin, &(RATE / 2));
}

#[test]
fn test_admin_cannot_propose_itself() {
    let (_env, client, admin, _) = setup(0, 10_000);

    assert_contract_err!(
        client.try_propose_admin(&admin, &admin),
        ContractError::InvalidParameter,
    );
    assert_eq!(client.get_admin_proposal(), None);
}

#[test]
fn test_new_proposal_replaces_open_one() {
    let (env, client, admin, _) = setup(0, 10_000);
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    env.ledger().set_sequence_number(7);
    client.propose_admin(&admin, &first);
    env.ledger().set_sequence_number(9);
    client.propose_admin(&admin, &second);

    let proposal = client.get_admin_proposal().unwrap();
    assert_eq!(proposal.candidate, second);
    assert_eq!(proposal.proposed_at, 9);

    assert_contract_err!(client.try_accept_admin(&first), ContractError::NotOwner);
    client.accept_admin(&second);
    assert_eq!(client.get_admin(), second);
    assert_eq!(client.get_admin_proposal(), None);

    // The new admin starts without an inherited proposal and can hand over again.
    assert_contract_err!(client.try_accept_admin(&first), ContractError::InvalidState);
    client.propose_admin(&second, &admin);
    client.accept_admin(&admin);
    assert_eq!(client.get_admin(), admin);
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin, _) = setup(0, 10_000);
    let new_admin = Address::generate(&env);

    assert_contract_err!(
        client.try_cancel_admin_transfer(&admin),
        ContractError::InvalidState,
    );

    client.propose_admin(&admin, &new_admin);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    assert_contract_err!(client.try_accept_admin(&new_admin), ContractError::InvalidState);
    assert_eq!(client.get_admin(), admin);
}
