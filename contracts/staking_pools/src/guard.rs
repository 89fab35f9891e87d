use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const STAKE_LOCK: Symbol = symbol_short!("STK_LOCK");

/// Scoped lock on one `(pool, staker)` stake record.
///
/// Held from validation until the stake is committed, across the external
/// token call. Released when dropped.
pub struct StakeGuard<'a> {
    env: &'a Env,
    key: (Symbol, u32, Address),
}

impl<'a> StakeGuard<'a> {
    pub fn acquire(env: &'a Env, pool_id: u32, staker: &Address) -> Result<Self, ContractError> {
        let key = (STAKE_LOCK, pool_id, staker.clone());
        if env.storage().temporary().has(&key) {
            return Err(ContractError::StakeLocked);
        }
        env.storage().temporary().set(&key, &true);
        Ok(StakeGuard { env, key })
    }
}

impl Drop for StakeGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().temporary().remove(&self.key);
    }
}
