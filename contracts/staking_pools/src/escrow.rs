//! Token movements between stakers, the contract and the rewarding account.
//!
//! Every call goes through the `try_` client variants so a failing token
//! contract surfaces as `TransferFailed` instead of trapping. Callers commit
//! their own bookkeeping only after these return `Ok`.

use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// Pulls `amount` of `token` from `staker` into contract custody using the
/// allowance the staker granted to this contract.
pub fn pull_deposit(
    env: &Env,
    token: &Address,
    staker: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let contract = env.current_contract_address();
    match token::Client::new(env, token).try_transfer_from(&contract, staker, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Returns escrowed principal to the staker.
pub fn release_principal(
    env: &Env,
    token: &Address,
    staker: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let contract = env.current_contract_address();
    match token::Client::new(env, token).try_transfer(&contract, staker, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pays `amount` of the reward token from the rewarding account's
/// allowance straight to the staker. The contract never holds rewards.
pub fn pay_reward(
    env: &Env,
    reward_token: &Address,
    rewarding_address: &Address,
    staker: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let contract = env.current_contract_address();
    match token::Client::new(env, reward_token).try_transfer_from(
        &contract,
        rewarding_address,
        staker,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
