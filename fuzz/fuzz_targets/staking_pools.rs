#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pools::{StakingPoolsContract, StakingPoolsContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { staker: u8, amount: i64 },
    Exit { staker: u8 },
    Claim { staker: u8, count: u64 },
    AddLevel { id: u8, min: i64, max: i64, reward: i64 },
    SetPeriod { period: u64 },
    SetThreshold { threshold: u32 },
    Advance { seconds: u32 },
}

const STAKERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &reward_token);
    let pool_id = client.create_pool(&admin, &stake_token);
    client.set_period(&admin, &60);

    // The rewarding side is deliberately underfunded so failing pulls are exercised.
    let rewarder = Address::generate(&env);
    StellarAssetClient::new(&env, &reward_token).mint(&rewarder, &1_000_000);
    TokenClient::new(&env, &reward_token).approve(&rewarder, &contract_id, &1_000_000, &1_000);
    client.set_rewarding_address(&admin, &rewarder);

    let mut stakers = Vec::new();
    for _ in 0..STAKERS {
        let staker = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&staker, &(i64::MAX as i128));
        TokenClient::new(&env, &stake_token).approve(
            &staker,
            &contract_id,
            &(i64::MAX as i128),
            &1_000,
        );
        stakers.push(staker);
    }

    let mut now = 0u64;
    for action in actions {
        match action {
            FuzzAction::Deposit { staker, amount } => {
                let staker = &stakers[staker as usize % STAKERS];
                let _ = client.try_deposit(staker, &pool_id, &(amount as i128));
            }
            FuzzAction::Exit { staker } => {
                let _ = client.try_exit(&stakers[staker as usize % STAKERS], &pool_id);
            }
            FuzzAction::Claim { staker, count } => {
                let staker = &stakers[staker as usize % STAKERS];
                let before = client.get_stake_total_deposited(staker, &pool_id);
                if let Ok(Ok(_)) = client.try_claim(staker, &pool_id, &count) {
                    // Checkpoints never run ahead of the clock, whatever the schedule.
                    assert!(client.get_stake_info(staker, &pool_id).last_claim_at <= now);
                }
                assert_eq!(before, client.get_stake_total_deposited(staker, &pool_id));
            }
            FuzzAction::AddLevel { id, min, max, reward } => {
                let _ = client.try_add_level(
                    &admin,
                    &u32::from(id),
                    &(min as i128),
                    &(max as i128),
                    &(reward as i128),
                );
            }
            FuzzAction::SetPeriod { period } => {
                let _ = client.try_set_period(&admin, &period);
            }
            FuzzAction::SetThreshold { threshold } => {
                let _ = client.try_set_period_threshold(&admin, &threshold);
            }
            FuzzAction::Advance { seconds } => {
                now = now.saturating_add(u64::from(seconds));
                env.ledger().set_timestamp(now);
            }
        }

        // Pool total must always equal the sum of stakes and the custody balance.
        let sum: i128 = stakers
            .iter()
            .map(|s| client.get_stake_total_deposited(s, &pool_id))
            .sum();
        let total = client.get_pool_total_deposited(&pool_id);
        assert_eq!(total, sum);
        assert_eq!(TokenClient::new(&env, &stake_token).balance(&contract_id), total);
    }
});
