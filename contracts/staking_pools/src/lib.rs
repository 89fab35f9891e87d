#![no_std]

pub mod errors;
pub mod escrow;
pub mod events;
pub mod guard;
pub mod levels;
pub mod periods;
pub mod storage;

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

pub use errors::ContractError;
pub use levels::Level;
pub use storage::{Config, PeriodTerm, Pool, Stake};

use guard::StakeGuard;
use storage::{ADMIN, INITIALIZED, PENDING_ADMIN, REWARD_TOKEN};

// ── Public-facing types ──────────────────────────────────────────────────────

/// Read-only projection of a stake returned by `get_stake_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeInfo {
    pub amount: i128,
    pub deposited_at: u64,
    pub last_deposit_at: u64,
    pub last_claim_at: u64,
    /// Period length and threshold in force now.
    pub period: u64,
    pub period_threshold: u32,
    pub elapsed_periods: u64,
    pub level: Option<Level>,
    pub can_claim: bool,
    /// Reward for every elapsed period at the current level, saturating.
    pub pending_reward: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolsContract;

#[contractimpl]
impl StakingPoolsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`        – owner allowed to create pools and tune the schedule.
    /// * `reward_token` – token paid out on claims, pulled from the rewarding
    ///   address's allowance.
    ///
    /// Period, threshold and rewarding address start unset.
    pub fn initialize(env: Env, admin: Address, reward_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        storage::store_config(&env, &Config::empty());
        // POOL_CTR and LEVELS start empty; loads default when absent.
        storage::extend_ttl_instance(&env);

        events::publish_initialized(&env, admin, reward_token);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a pool escrowing `token`. Ids are sequential from 0.
    pub fn create_pool(env: Env, caller: Address, token: Address) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if token == env.current_contract_address()
            || storage::pool_id_for_token(&env, &token).is_some()
        {
            return Err(ContractError::DuplicateOrInvalidToken);
        }

        let pool = Pool {
            id: storage::pool_count(&env),
            token: token.clone(),
            total_deposited: 0,
            created_at: env.ledger().timestamp(),
        };
        storage::register_pool(&env, &pool)?;
        storage::extend_ttl_instance(&env);

        events::publish_pool_created(&env, pool.id, token);

        Ok(pool.id)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        storage::load_pool(&env, pool_id)
    }

    pub fn get_pool_token(env: Env, pool_id: u32) -> Result<Address, ContractError> {
        Ok(storage::load_pool(&env, pool_id)?.token)
    }

    pub fn get_pool_total_deposited(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        Ok(storage::load_pool(&env, pool_id)?.total_deposited)
    }

    pub fn get_pool_count(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    pub fn get_pool_id_for_token(env: Env, token: Address) -> Option<u32> {
        storage::pool_id_for_token(&env, &token)
    }

    // ── Tier table ──────────────────────────────────────────────────────────

    /// Insert or redefine a reward level.
    ///
    /// Redefining an existing `level_id` keeps its enumeration index. Ranges
    /// may overlap; resolution picks the earliest inserted match.
    pub fn add_level(
        env: Env,
        caller: Address,
        level_id: u32,
        min_amount: i128,
        max_amount: i128,
        reward_per_period: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let level = Level::new(level_id, min_amount, max_amount, reward_per_period)?;
        let mut table = levels::load_levels(&env);
        let replaced = levels::upsert(&mut table, level);
        levels::store_levels(&env, &table);
        storage::extend_ttl_instance(&env);

        events::publish_level_set(
            &env,
            level_id,
            min_amount,
            max_amount,
            reward_per_period,
            replaced,
        );

        Ok(())
    }

    pub fn get_level_count(env: Env) -> u32 {
        levels::load_levels(&env).len()
    }

    /// Level at `index` in insertion order.
    pub fn get_level(env: Env, index: u32) -> Result<Level, ContractError> {
        levels::load_levels(&env)
            .get(index)
            .ok_or(ContractError::LevelNotFound)
    }

    /// The level a stake of `amount` currently earns at, if any.
    pub fn resolve_level(env: Env, amount: i128) -> Option<Level> {
        levels::resolve(&levels::load_levels(&env), amount)
    }

    // ── Stake ledger ────────────────────────────────────────────────────────

    /// Escrow `amount` of the pool's token from `staker`.
    ///
    /// The staker must have approved this contract for at least `amount`.
    /// An opening deposit starts the claim clock; a top-up keeps the
    /// existing checkpoint. Stakes opened before any period is set accrue
    /// nothing until one is.
    pub fn deposit(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        let mut pool = storage::load_pool(&env, pool_id)?;

        let _guard = StakeGuard::acquire(&env, pool_id, &staker)?;

        // 1. Compute the new position with checked arithmetic.
        let mut stake = storage::load_stake(&env, pool_id, &staker);
        let now = env.ledger().timestamp();
        if !stake.is_active() {
            stake.deposited_at = now;
            stake.last_claim_at = now;
        }
        stake.last_deposit_at = now;
        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_deposited = pool
            .total_deposited
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // 2. Pull the tokens; nothing is written if this fails.
        escrow::pull_deposit(&env, &pool.token, &staker, amount)?;

        // 3. Commit.
        storage::store_stake(&env, pool_id, &staker, &stake);
        storage::store_pool(&env, &pool);

        events::publish_deposited(
            &env,
            pool_id,
            staker,
            amount,
            stake.amount,
            pool.total_deposited,
        );

        Ok(())
    }

    /// Return the whole principal to `staker` and close the stake.
    ///
    /// Unclaimed periods are forfeited; claim before exiting.
    pub fn exit(env: Env, staker: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = storage::load_pool(&env, pool_id)?;
        let _guard = StakeGuard::acquire(&env, pool_id, &staker)?;

        let mut stake = storage::load_stake(&env, pool_id, &staker);
        if !stake.is_active() {
            return Err(ContractError::NoActiveStake);
        }

        let amount = stake.amount;
        pool.total_deposited = pool
            .total_deposited
            .checked_sub(amount)
            .filter(|total| *total >= 0)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.amount = 0;
        stake.last_claim_at = 0;

        escrow::release_principal(&env, &pool.token, &staker, amount)?;

        storage::store_stake(&env, pool_id, &staker, &stake);
        storage::store_pool(&env, &pool);

        events::publish_exited(&env, pool_id, staker, amount, pool.total_deposited);

        Ok(amount)
    }

    pub fn get_stake_total_deposited(
        env: Env,
        staker: Address,
        pool_id: u32,
    ) -> Result<i128, ContractError> {
        storage::load_pool(&env, pool_id)?;
        Ok(storage::load_stake(&env, pool_id, &staker).amount)
    }

    // ── Period / eligibility engine ─────────────────────────────────────────

    /// True once the stake has accrued at least its threshold of periods.
    pub fn can_claim(env: Env, staker: Address, pool_id: u32) -> Result<bool, ContractError> {
        storage::load_pool(&env, pool_id)?;
        let stake = storage::load_stake(&env, pool_id, &staker);
        let threshold = storage::load_config(&env).period_threshold;
        Ok(periods::can_claim(
            &stake,
            &storage::load_schedule(&env),
            threshold,
            env.ledger().timestamp(),
        ))
    }

    /// Claim `count` whole periods and receive
    /// `count × reward_per_period` of the level the stake resolves to now.
    ///
    /// The reward is pulled from the rewarding address's allowance; a claim
    /// worth nothing makes no token call. The checkpoint advances past the
    /// `count` oldest accrued periods (`count × period` within one term); it
    /// is the last write of the call and only happens after the payout
    /// succeeded.
    pub fn claim(
        env: Env,
        staker: Address,
        pool_id: u32,
        count: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if count == 0 {
            return Err(ContractError::ZeroAmount);
        }
        storage::load_pool(&env, pool_id)?;
        let config = storage::load_config(&env);
        let schedule = storage::load_schedule(&env);

        let _guard = StakeGuard::acquire(&env, pool_id, &staker)?;

        let mut stake = storage::load_stake(&env, pool_id, &staker);
        if !stake.is_active() {
            return Err(ContractError::NoActiveStake);
        }

        let now = env.ledger().timestamp();
        periods::check_claim(&stake, &schedule, config.period_threshold, now, count)?;

        let level = levels::resolve(&levels::load_levels(&env), stake.amount);
        let reward = match &level {
            Some(level) => periods::reward_for(count, level.reward_per_period)?,
            None => 0,
        };
        let last_claim_at =
            periods::advance_checkpoint(&schedule, stake.last_claim_at, now, count)?;

        if reward > 0 {
            let rewarding_address = config
                .rewarding_address
                .ok_or(ContractError::RewardingAddressNotSet)?;
            let reward_token = storage::load_reward_token(&env)?;
            escrow::pay_reward(&env, &reward_token, &rewarding_address, &staker, reward)?;
        }

        stake.last_claim_at = last_claim_at;
        storage::store_stake(&env, pool_id, &staker, &stake);

        events::publish_claimed(
            &env,
            pool_id,
            staker,
            count,
            level.map(|l| l.id),
            reward,
            last_claim_at,
        );

        Ok(reward)
    }

    pub fn get_stake_info(
        env: Env,
        staker: Address,
        pool_id: u32,
    ) -> Result<StakeInfo, ContractError> {
        storage::load_pool(&env, pool_id)?;
        let stake = storage::load_stake(&env, pool_id, &staker);
        let now = env.ledger().timestamp();
        let config = storage::load_config(&env);
        let schedule = storage::load_schedule(&env);

        let elapsed_periods = periods::stake_elapsed(&stake, &schedule, now);
        let level = if stake.is_active() {
            levels::resolve(&levels::load_levels(&env), stake.amount)
        } else {
            None
        };
        let pending_reward = level
            .as_ref()
            .map(|l| (elapsed_periods as i128).saturating_mul(l.reward_per_period))
            .unwrap_or(0);

        Ok(StakeInfo {
            amount: stake.amount,
            deposited_at: stake.deposited_at,
            last_deposit_at: stake.last_deposit_at,
            last_claim_at: stake.last_claim_at,
            period: config.period,
            period_threshold: config.period_threshold,
            elapsed_periods,
            level,
            can_claim: periods::can_claim(&stake, &schedule, config.period_threshold, now),
            pending_reward,
        })
    }

    // ── Admin configuration ─────────────────────────────────────────────────

    /// Set the period length in seconds from now on. Periods already accrued
    /// keep the length they accrued under.
    pub fn set_period(env: Env, caller: Address, period: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if period == 0 {
            return Err(ContractError::InvalidPeriod);
        }
        let mut config = storage::load_config(&env);
        config.period = period;
        storage::store_config(&env, &config);
        storage::record_period(&env, env.ledger().timestamp(), period);
        storage::extend_ttl_instance(&env);

        events::publish_period_set(&env, period);

        Ok(())
    }

    /// Set the minimum elapsed periods for a claim. Evaluated at claim time,
    /// so it binds open stakes too.
    pub fn set_period_threshold(
        env: Env,
        caller: Address,
        period_threshold: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut config = storage::load_config(&env);
        config.period_threshold = period_threshold;
        storage::store_config(&env, &config);
        storage::extend_ttl_instance(&env);

        events::publish_period_threshold_set(&env, period_threshold);

        Ok(())
    }

    /// Set the account whose reward-token allowance funds claims. The account
    /// must approve this contract separately.
    pub fn set_rewarding_address(
        env: Env,
        caller: Address,
        rewarding_address: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut config = storage::load_config(&env);
        config.rewarding_address = Some(rewarding_address.clone());
        storage::store_config(&env, &config);
        storage::extend_ttl_instance(&env);

        events::publish_rewarding_address_set(&env, rewarding_address);

        Ok(())
    }

    pub fn get_config(env: Env) -> Config {
        storage::load_config(&env)
    }

    pub fn get_period(env: Env) -> u64 {
        storage::load_config(&env).period
    }

    /// Every period length set so far with the timestamp it took effect.
    pub fn get_period_schedule(env: Env) -> Vec<PeriodTerm> {
        storage::load_schedule(&env)
    }

    pub fn get_period_threshold(env: Env) -> u32 {
        storage::load_config(&env).period_threshold
    }

    pub fn get_rewarding_address(env: Env) -> Option<Address> {
        storage::load_config(&env).rewarding_address
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        storage::load_reward_token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
