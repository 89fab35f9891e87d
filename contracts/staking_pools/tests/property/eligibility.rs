#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the period/eligibility engine.
//!
//! Invariants tested:
//! - `can_claim` is true exactly when `threshold × period` seconds have passed
//! - `claim(count)` succeeds iff `threshold <= elapsed` and `count <= elapsed`
//! - A successful claim advances the checkpoint by exactly `count × period`
//!   and pays exactly `count × reward_per_period`
//! - The same period range can never be claimed twice
//! - A period change splits accrual: time before it counts in old periods,
//!   time after it in new ones

use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;
use staking_pools::ContractError;

use crate::common::{balance, create_staker, setup_pool};

const REWARD: i128 = 7;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_can_claim_matches_threshold(
        period in 1u64..=10_000,
        threshold in 0u32..=6,
        start in 0u64..=1_000_000,
        wait in 0u64..=80_000,
    ) {
        let ctx = setup_pool(period, threshold);
        let staker = create_staker(&ctx, 1_000);

        ctx.env.ledger().set_timestamp(start);
        ctx.client.deposit(&staker, &ctx.pool_id, &100);

        ctx.env.ledger().set_timestamp(start + wait);
        let expected = wait >= u64::from(threshold) * period;
        prop_assert_eq!(ctx.client.can_claim(&staker, &ctx.pool_id), expected);
        prop_assert_eq!(
            ctx.client.get_stake_info(&staker, &ctx.pool_id).elapsed_periods,
            wait / period
        );
    }

    #[test]
    fn prop_claim_respects_elapsed_and_pays_exactly(
        period in 1u64..=1_000,
        threshold in 0u32..=4,
        wait in 0u64..=8_000,
        count in 1u64..=10,
    ) {
        let ctx = setup_pool(period, threshold);
        ctx.client.add_level(&ctx.admin, &1, &0, &1_000, &REWARD);
        let staker = create_staker(&ctx, 1_000);
        ctx.client.deposit(&staker, &ctx.pool_id, &100);

        ctx.env.ledger().set_timestamp(wait);
        let elapsed = wait / period;
        let result = ctx.client.try_claim(&staker, &ctx.pool_id, &count);

        if elapsed >= u64::from(threshold) && count <= elapsed {
            prop_assert!(matches!(result, Ok(Ok(paid)) if paid == REWARD * count as i128));
            prop_assert_eq!(
                ctx.client.get_stake_info(&staker, &ctx.pool_id).last_claim_at,
                count * period
            );
            prop_assert_eq!(
                balance(&ctx, &ctx.reward_token, &staker),
                REWARD * count as i128
            );

            // The remaining periods are all that is left to claim.
            let again = ctx.client.try_claim(&staker, &ctx.pool_id, &(elapsed - count + 1));
            prop_assert!(matches!(again, Err(Ok(ContractError::NotEligible))));
        } else {
            prop_assert!(matches!(result, Err(Ok(ContractError::NotEligible))));
            prop_assert_eq!(ctx.client.get_stake_info(&staker, &ctx.pool_id).last_claim_at, 0);
            prop_assert_eq!(balance(&ctx, &ctx.reward_token, &staker), 0);
        }
    }

    /// Whatever the rewarding side has approved, a claim either pays in full
    /// and advances, or fails with `TransferFailed` and changes nothing.
    #[test]
    fn prop_reward_pull_is_all_or_nothing(allowance in 0i128..=40, count in 1u64..=5) {
        let ctx = setup_pool(10, 1);
        ctx.client.add_level(&ctx.admin, &1, &0, &1_000, &REWARD);
        soroban_sdk::token::Client::new(&ctx.env, &ctx.reward_token).approve(
            &ctx.rewarder,
            &ctx.contract_id,
            &allowance,
            &crate::common::ALLOWANCE_EXPIRY,
        );
        let staker = create_staker(&ctx, 1_000);
        ctx.client.deposit(&staker, &ctx.pool_id, &100);

        ctx.env.ledger().set_timestamp(50);
        let reward = REWARD * count as i128;
        let result = ctx.client.try_claim(&staker, &ctx.pool_id, &count);
        let info = ctx.client.get_stake_info(&staker, &ctx.pool_id);

        if reward <= allowance {
            prop_assert!(result.is_ok());
            prop_assert_eq!(info.last_claim_at, count * 10);
            prop_assert_eq!(balance(&ctx, &ctx.reward_token, &staker), reward);
        } else {
            prop_assert!(matches!(result, Err(Ok(ContractError::TransferFailed))));
            prop_assert_eq!(info.last_claim_at, 0);
            prop_assert_eq!(balance(&ctx, &ctx.reward_token, &staker), 0);
        }
    }

    #[test]
    fn prop_period_change_splits_accrual(
        old_period in 1u64..=1_000,
        new_period in 1u64..=1_000,
        change_at in 0u64..=5_000,
        wait in 0u64..=5_000,
    ) {
        let ctx = setup_pool(old_period, 0);
        let staker = create_staker(&ctx, 1_000);
        ctx.client.deposit(&staker, &ctx.pool_id, &100);

        ctx.env.ledger().set_timestamp(change_at);
        ctx.client.set_period(&ctx.admin, &new_period);
        let now = change_at + wait;
        ctx.env.ledger().set_timestamp(now);

        let expected = change_at / old_period + wait / new_period;
        let info = ctx.client.get_stake_info(&staker, &ctx.pool_id);
        prop_assert_eq!(info.elapsed_periods, expected);
        prop_assert_eq!(info.period, new_period);

        if expected > 0 {
            ctx.client.claim(&staker, &ctx.pool_id, &expected);
            let info = ctx.client.get_stake_info(&staker, &ctx.pool_id);
            prop_assert_eq!(info.elapsed_periods, 0);
            prop_assert!(info.last_claim_at <= now);
            prop_assert!(matches!(
                ctx.client.try_claim(&staker, &ctx.pool_id, &1),
                Err(Ok(ContractError::NotEligible))
            ));
        }
    }
}
