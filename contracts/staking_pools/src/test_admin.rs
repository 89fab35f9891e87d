#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, StakingPoolsContract, StakingPoolsContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingPoolsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &reward_token);

    (env, client, admin)
}

fn expect_unauthorized<T, E>(result: Result<T, Result<ContractError, E>>) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Owner-gated setters ──────────────────────────────────────────────────────

#[test]
fn test_admin_setters_update_config() {
    let (env, client, admin) = setup();
    let rewarder = Address::generate(&env);

    client.set_period(&admin, &25_000_000_000);
    client.set_period_threshold(&admin, &2);
    client.set_rewarding_address(&admin, &rewarder);

    assert_eq!(client.get_period(), 25_000_000_000);
    assert_eq!(client.get_period_threshold(), 2);
    assert_eq!(client.get_rewarding_address(), Some(rewarder.clone()));

    let config = client.get_config();
    assert_eq!(config.period, 25_000_000_000);
    assert_eq!(config.rewarding_address, Some(rewarder));
}

#[test]
fn test_set_period_rejects_zero() {
    let (_env, client, admin) = setup();
    match client.try_set_period(&admin, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidPeriod),
        _ => unreachable!("Expected InvalidPeriod error"),
    }
    assert_eq!(client.get_period(), 0);
}

#[test]
fn test_non_admin_cannot_configure() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);
    let token = Address::generate(&env);

    expect_unauthorized(client.try_set_period(&intruder, &10));
    expect_unauthorized(client.try_set_period_threshold(&intruder, &1));
    expect_unauthorized(client.try_set_rewarding_address(&intruder, &intruder));
    expect_unauthorized(client.try_add_level(&intruder, &1, &0, &100, &1));
    expect_unauthorized(client.try_create_pool(&intruder, &token));

    assert_eq!(client.get_period(), 0);
    assert_eq!(client.get_period_threshold(), 0);
    assert_eq!(client.get_rewarding_address(), None);
    assert_eq!(client.get_level_count(), 0);
    assert_eq!(client.get_pool_count(), 0);
}

// ── Admin transfer (two-step) ────────────────────────────────────────────────

#[test]
fn test_admin_transfer_completes_after_accept() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));
    // Still the old admin until accepted.
    assert_eq!(client.get_admin(), admin);

    client.accept_admin(&successor);
    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);

    client.set_period(&successor, &60);
    assert_eq!(client.get_period(), 60);
    expect_unauthorized(client.try_set_period(&admin, &30));
}

#[test]
fn test_only_pending_admin_can_accept() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);
    let impostor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    expect_unauthorized(client.try_accept_admin(&impostor));
    assert_eq!(client.get_admin(), admin);
}

#[test]
fn test_non_admin_cannot_propose() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    expect_unauthorized(client.try_propose_admin(&intruder, &intruder));
    assert_eq!(client.get_pending_admin(), None);
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.propose_admin(&admin, &successor);
    client.cancel_admin_transfer(&admin);
    assert_eq!(client.get_pending_admin(), None);

    match client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
    match client.try_cancel_admin_transfer(&admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}
