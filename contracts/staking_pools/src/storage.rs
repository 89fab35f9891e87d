use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

pub(crate) const ADMIN: Symbol = symbol_short!("ADMIN");
pub(crate) const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
pub(crate) const INITIALIZED: Symbol = symbol_short!("INIT");
pub(crate) const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
pub(crate) const CONFIG: Symbol = symbol_short!("CONFIG");
pub(crate) const POOL_COUNTER: Symbol = symbol_short!("POOL_CTR");
const SCHEDULE: Symbol = symbol_short!("SCHEDULE");

// Persistent storage uses tuple keys: (prefix, ...)
const POOL: Symbol = symbol_short!("POOL");
const POOL_BY_TOKEN: Symbol = symbol_short!("POOL_TOK");
const STAKE: Symbol = symbol_short!("STK");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Stored types ─────────────────────────────────────────────────────────────

/// A registered binding between a token and the aggregate of its deposits.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub token: Address,
    pub total_deposited: i128,
    pub created_at: u64,
}

/// One staker's position within one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub amount: i128,
    pub deposited_at: u64,
    pub last_deposit_at: u64,
    pub last_claim_at: u64,
}

impl Stake {
    pub fn empty() -> Self {
        Stake {
            amount: 0,
            deposited_at: 0,
            last_deposit_at: 0,
            last_claim_at: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0
    }
}

/// Global period configuration owned by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Length of one reward period in seconds; 0 until configured.
    pub period: u64,
    pub period_threshold: u32,
    pub rewarding_address: Option<Address>,
}

impl Config {
    pub fn empty() -> Self {
        Config {
            period: 0,
            period_threshold: 0,
            rewarding_address: None,
        }
    }
}

/// One entry of the period schedule: `period` is in force from
/// `effective_at` until the next entry takes over.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodTerm {
    pub effective_at: u64,
    pub period: u64,
}

// ── TTL helpers ──────────────────────────────────────────────────────────────

/// Extends the TTL of the instance entry, which holds admin, config and levels.
pub(crate) fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_pool_key(env: &Env, key: &(Symbol, u32)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_token_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_stake_key(env: &Env, key: &(Symbol, u32, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn load_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or_else(Config::empty)
}

pub fn store_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
}

/// Every period length ever set, oldest first. Empty until `set_period`.
pub fn load_schedule(env: &Env) -> Vec<PeriodTerm> {
    env.storage()
        .instance()
        .get(&SCHEDULE)
        .unwrap_or_else(|| Vec::new(env))
}

/// Appends `period` to the schedule from `now` on. A second change within
/// the same ledger timestamp overwrites the first.
pub fn record_period(env: &Env, now: u64, period: u64) {
    let mut schedule = load_schedule(env);
    let term = PeriodTerm {
        effective_at: now,
        period,
    };
    match schedule.last() {
        Some(last) if last.effective_at == now => {
            schedule.set(schedule.len() - 1, term);
        }
        _ => schedule.push_back(term),
    }
    env.storage().instance().set(&SCHEDULE, &schedule);
}

pub fn load_reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNTER).unwrap_or(0)
}

pub fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let key = (POOL, pool_id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    extend_ttl_pool_key(env, &key);
    Ok(pool)
}

pub fn store_pool(env: &Env, pool: &Pool) {
    let key = (POOL, pool.id);
    env.storage().persistent().set(&key, pool);
    extend_ttl_pool_key(env, &key);
}

pub fn pool_id_for_token(env: &Env, token: &Address) -> Option<u32> {
    let key = (POOL_BY_TOKEN, token.clone());
    let id = env.storage().persistent().get(&key);
    if id.is_some() {
        extend_ttl_token_key(env, &key);
    }
    id
}

/// Persists a freshly created pool together with its token index entry and
/// bumps the pool counter.
pub fn register_pool(env: &Env, pool: &Pool) -> Result<(), ContractError> {
    let next = pool
        .id
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;
    store_pool(env, pool);

    let key = (POOL_BY_TOKEN, pool.token.clone());
    env.storage().persistent().set(&key, &pool.id);
    extend_ttl_token_key(env, &key);

    env.storage().instance().set(&POOL_COUNTER, &next);
    Ok(())
}

// ── Stakes ───────────────────────────────────────────────────────────────────

/// Returns the stake record, or an empty one when the staker never deposited.
pub fn load_stake(env: &Env, pool_id: u32, staker: &Address) -> Stake {
    let key = (STAKE, pool_id, staker.clone());
    match env.storage().persistent().get(&key) {
        Some(stake) => {
            extend_ttl_stake_key(env, &key);
            stake
        }
        None => Stake::empty(),
    }
}

pub fn store_stake(env: &Env, pool_id: u32, staker: &Address, stake: &Stake) {
    let key = (STAKE, pool_id, staker.clone());
    env.storage().persistent().set(&key, stake);
    extend_ttl_stake_key(env, &key);
}
