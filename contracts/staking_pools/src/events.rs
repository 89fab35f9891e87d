#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when a level is inserted or an existing level id is redefined.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelSetEvent {
    pub level_id: u32,
    pub min_amount: i128,
    pub max_amount: i128,
    pub reward_per_period: i128,
    pub replaced: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodSetEvent {
    pub period: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodThresholdSetEvent {
    pub period_threshold: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardingAddressSetEvent {
    pub rewarding_address: Address,
    pub timestamp: u64,
}

/// Fired when a staker escrows tokens into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub stake_amount: i128,
    pub pool_total: i128,
    pub timestamp: u64,
}

/// Fired when a staker claims whole periods.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub periods: u64,
    pub level_id: Option<u32>,
    pub reward: i128,
    pub last_claim_at: u64,
    pub timestamp: u64,
}

/// Fired when a staker withdraws their whole principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub pool_total: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(env: &Env, pool_id: u32, token: Address) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_level_set(
    env: &Env,
    level_id: u32,
    min_amount: i128,
    max_amount: i128,
    reward_per_period: i128,
    replaced: bool,
) {
    env.events().publish(
        (symbol_short!("LVL_SET"), level_id),
        LevelSetEvent {
            level_id,
            min_amount,
            max_amount,
            reward_per_period,
            replaced,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_set(env: &Env, period: u64) {
    env.events().publish(
        (symbol_short!("PERIOD"),),
        PeriodSetEvent {
            period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_threshold_set(env: &Env, period_threshold: u32) {
    env.events().publish(
        (symbol_short!("THRESHOLD"),),
        PeriodThresholdSetEvent {
            period_threshold,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewarding_address_set(env: &Env, rewarding_address: Address) {
    env.events().publish(
        (symbol_short!("RWD_ADDR"),),
        RewardingAddressSetEvent {
            rewarding_address,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    stake_amount: i128,
    pool_total: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, staker.clone()),
        DepositedEvent {
            pool_id,
            staker,
            amount,
            stake_amount,
            pool_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(
    env: &Env,
    pool_id: u32,
    staker: Address,
    periods: u64,
    level_id: Option<u32>,
    reward: i128,
    last_claim_at: u64,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), pool_id, staker.clone()),
        ClaimedEvent {
            pool_id,
            staker,
            periods,
            level_id,
            reward,
            last_claim_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_exited(env: &Env, pool_id: u32, staker: Address, amount: i128, pool_total: i128) {
    env.events().publish(
        (symbol_short!("EXITED"), pool_id, staker.clone()),
        ExitedEvent {
            pool_id,
            staker,
            amount,
            pool_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
