#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use vepul::lock::WEEK;
use vepul::schedule::ScheduleConfig;
use vepul::{VePulContract, VePulContractClient};

const FUNDS: i128 = 1_000_000_000_000_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    CreateLock { amount: u64, weeks: u8 },
    IncreaseAmount { position: u8, delta: u64 },
    IncreaseUnlockTime { position: u8, weeks: u8 },
    Stake { position: u8 },
    Collect,
    Unstake,
    UnstakeWithoutReward,
    Withdraw { position: u8 },
    Burn { position: u8 },
    ModifyRewardPerBlock { rate: u64 },
    Advance { blocks: u8, hours: u16 },
}

fuzz_target!(|input: (bool, Vec<FuzzAction>)| {
    let (sync, actions) = input;
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(100 * WEEK);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VePulContract, ());
    let client = VePulContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let provider = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&provider, &FUNDS);
    TokenClient::new(&env, &token).approve(&provider, &contract_id, &FUNDS, &100_000);

    let config = ScheduleConfig {
        provider,
        reward_per_block: 1_000_000,
        start_block: 0,
        end_block: 50_000,
    };
    client.initialize(&admin, &token, &config, &sync);

    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }

    let mut last_acc = client.reward_info().accumulator;

    // Rejected calls are fine; panics and broken invariants are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        let now = env.ledger().timestamp();
        match action {
            FuzzAction::CreateLock { amount, weeks } => {
                let amount = amount as i128;
                StellarAssetClient::new(&env, &token).mint(caller, &amount.max(1));
                let end = (now / WEEK + weeks as u64) * WEEK;
                let _ = client.try_create_lock(caller, &amount, &end);
            }
            FuzzAction::IncreaseAmount { position, delta } => {
                let delta = delta as i128;
                StellarAssetClient::new(&env, &token).mint(caller, &delta.max(1));
                let _ = client.try_increase_amount(caller, &(position as u64), &delta);
            }
            FuzzAction::IncreaseUnlockTime { position, weeks } => {
                let end = (now / WEEK + weeks as u64) * WEEK;
                let _ = client.try_increase_unlock_time(caller, &(position as u64), &end);
            }
            FuzzAction::Stake { position } => {
                let _ = client.try_stake(caller, &(position as u64));
            }
            FuzzAction::Collect => {
                let _ = client.try_collect(caller);
            }
            FuzzAction::Unstake => {
                let _ = client.try_unstake(caller);
            }
            FuzzAction::UnstakeWithoutReward => {
                let _ = client.try_unstake_without_reward(caller);
            }
            FuzzAction::Withdraw { position } => {
                let _ = client.try_withdraw(caller, &(position as u64));
            }
            FuzzAction::Burn { position } => {
                let _ = client.try_burn(caller, &(position as u64));
            }
            FuzzAction::ModifyRewardPerBlock { rate } => {
                let _ = client.try_modify_reward_per_block(caller, &(rate as i128));
            }
            FuzzAction::Advance { blocks, hours } => {
                env.ledger().with_mut(|li| {
                    li.sequence_number += blocks as u32;
                    li.timestamp += hours as u64 * 3_600;
                });
            }
        }

        let acc = client.reward_info().accumulator;
        assert!(acc >= last_acc, "accumulator went backwards");
        last_acc = acc;

        for user in &users {
            let stake = client.staking_info(user);
            if stake.position_id != 0 {
                assert_eq!(
                    client.staked_position_owner(&stake.position_id),
                    Some(user.clone())
                );
                assert_eq!(
                    client.staking_status(&stake.position_id).staking_id,
                    stake.staking_id
                );
            }
        }
    }
});
