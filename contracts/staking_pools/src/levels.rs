use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::errors::ContractError;

const LEVELS: Symbol = symbol_short!("LEVELS");

/// A reward tier covering every stake amount in `[min_amount, max_amount]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level {
    pub id: u32,
    pub min_amount: i128,
    pub max_amount: i128,
    /// Reward-token units paid for each claimed period.
    pub reward_per_period: i128,
}

impl Level {
    pub fn new(
        id: u32,
        min_amount: i128,
        max_amount: i128,
        reward_per_period: i128,
    ) -> Result<Self, ContractError> {
        if min_amount < 0 || min_amount > max_amount {
            return Err(ContractError::InvalidRange);
        }
        if reward_per_period < 0 {
            return Err(ContractError::InvalidReward);
        }
        Ok(Level {
            id,
            min_amount,
            max_amount,
            reward_per_period,
        })
    }

    pub fn contains(&self, amount: i128) -> bool {
        self.min_amount <= amount && amount <= self.max_amount
    }
}

pub fn load_levels(env: &Env) -> Vec<Level> {
    env.storage()
        .instance()
        .get(&LEVELS)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn store_levels(env: &Env, levels: &Vec<Level>) {
    env.storage().instance().set(&LEVELS, levels);
}

/// Inserts `level`, or replaces the entry with the same id in place so that
/// its enumeration index is preserved. Returns `true` on replacement.
pub fn upsert(levels: &mut Vec<Level>, level: Level) -> bool {
    let existing = levels.iter().position(|l| l.id == level.id);
    match existing {
        Some(index) => {
            levels.set(index as u32, level);
            true
        }
        None => {
            levels.push_back(level);
            false
        }
    }
}

/// First level in insertion order whose range contains `amount`.
///
/// `None` means the amount sits outside every tier and earns nothing.
pub fn resolve(levels: &Vec<Level>, amount: i128) -> Option<Level> {
    levels.iter().find(|level| level.contains(amount))
}
