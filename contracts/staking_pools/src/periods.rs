//! Period arithmetic behind claim eligibility.
//!
//! A stake moves between two states, driven only by the ledger clock:
//!
//! ```text
//! Ineligible ── elapsed >= threshold ──▶ Claimable ── claim ──▶ Ineligible
//! ```
//!
//! The period length is versioned. Each `set_period` appends a term to the
//! schedule, and elapsed periods are counted piecewise: every stretch of time
//! is divided by the length in force during it. A period still running when
//! the length changes is dropped and counting restarts at the change. Time
//! before the first term accrues nothing.
//!
//! The threshold is a gate, not a measure, and is always the current one.

use soroban_sdk::Vec;

use crate::errors::ContractError;
use crate::storage::{PeriodTerm, Stake};

/// Walks the schedule clipped to `[from, now)`, yielding
/// `(start, end, period)` for every stretch with a non-zero period.
struct Segments<'a> {
    schedule: &'a Vec<PeriodTerm>,
    index: u32,
    from: u64,
    now: u64,
}

impl<'a> Segments<'a> {
    fn new(schedule: &'a Vec<PeriodTerm>, from: u64, now: u64) -> Self {
        Segments {
            schedule,
            index: 0,
            from,
            now,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = (u64, u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let term = self.schedule.get(self.index)?;
            self.index = self.index.saturating_add(1);
            let end = match self.schedule.get(self.index) {
                Some(next) => next.effective_at.min(self.now),
                None => self.now,
            };
            let start = term.effective_at.max(self.from);
            if term.period > 0 && start < end {
                return Some((start, end, term.period));
            }
        }
    }
}

/// Whole periods accrued between `from` and `now`.
///
/// Returns 0 before the first term or for a checkpoint in the future.
pub fn elapsed_periods(schedule: &Vec<PeriodTerm>, from: u64, now: u64) -> u64 {
    Segments::new(schedule, from, now).fold(0u64, |total, (start, end, period)| {
        total.saturating_add((end - start) / period)
    })
}

pub fn is_eligible(elapsed: u64, threshold: u32) -> bool {
    elapsed >= u64::from(threshold)
}

pub fn stake_elapsed(stake: &Stake, schedule: &Vec<PeriodTerm>, now: u64) -> u64 {
    if !stake.is_active() {
        return 0;
    }
    elapsed_periods(schedule, stake.last_claim_at, now)
}

pub fn can_claim(stake: &Stake, schedule: &Vec<PeriodTerm>, threshold: u32, now: u64) -> bool {
    stake.is_active() && is_eligible(stake_elapsed(stake, schedule, now), threshold)
}

/// Checks that `count` periods may be claimed right now.
pub fn check_claim(
    stake: &Stake,
    schedule: &Vec<PeriodTerm>,
    threshold: u32,
    now: u64,
    count: u64,
) -> Result<(), ContractError> {
    let elapsed = stake_elapsed(stake, schedule, now);
    if !is_eligible(elapsed, threshold) || count > elapsed {
        return Err(ContractError::NotEligible);
    }
    Ok(())
}

/// Checkpoint after claiming the `count` oldest periods accrued since `from`.
///
/// Within one term this is `from + count × period`. Fails with `NotEligible`
/// when fewer than `count` periods (or none, for `count == 0`) have accrued.
pub fn advance_checkpoint(
    schedule: &Vec<PeriodTerm>,
    from: u64,
    now: u64,
    count: u64,
) -> Result<u64, ContractError> {
    let mut remaining = count;
    for (start, end, period) in Segments::new(schedule, from, now) {
        let available = (end - start) / period;
        if remaining <= available {
            return remaining
                .checked_mul(period)
                .and_then(|span| start.checked_add(span))
                .ok_or(ContractError::ArithmeticOverflow);
        }
        remaining -= available;
    }
    Err(ContractError::NotEligible)
}

pub fn reward_for(count: u64, reward_per_period: i128) -> Result<i128, ContractError> {
    i128::from(count)
        .checked_mul(reward_per_period)
        .ok_or(ContractError::ArithmeticOverflow)
}
