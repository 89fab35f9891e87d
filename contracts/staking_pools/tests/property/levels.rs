#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for tier resolution.
//!
//! Invariants tested:
//! - An amount inside exactly one registered range resolves to that level
//! - An amount outside every range resolves to no level
//! - With overlapping ranges the earliest inserted level wins
//! - Invalid ranges are always rejected and never stored

use proptest::prelude::*;
use staking_pools::ContractError;

use crate::common::setup_pool;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Contiguous, non-overlapping tiers `[k·width, k·width + width − 1]`.
    #[test]
    fn prop_disjoint_tiers_resolve_uniquely(
        width in 1i128..=1_000,
        tiers in 1u32..=6,
        amount in 0i128..=10_000,
    ) {
        let ctx = setup_pool(100, 1);
        for k in 0..tiers {
            let min = i128::from(k) * width;
            ctx.client.add_level(&ctx.admin, &(100 + k), &min, &(min + width - 1), &i128::from(k));
        }

        let resolved = ctx.client.resolve_level(&amount).map(|l| l.id);
        if amount < i128::from(tiers) * width {
            prop_assert_eq!(resolved, Some(100 + (amount / width) as u32));
        } else {
            prop_assert_eq!(resolved, None);
        }
    }

    #[test]
    fn prop_overlap_resolves_to_first_inserted(
        first_min in 0i128..=500,
        first_len in 0i128..=500,
        offset in 0i128..=500,
    ) {
        let ctx = setup_pool(100, 1);
        let first_max = first_min + first_len;
        ctx.client.add_level(&ctx.admin, &2, &first_min, &first_max, &1);
        ctx.client.add_level(&ctx.admin, &1, &0, &2_000, &1);

        let amount = first_min + offset.min(first_len);
        prop_assert_eq!(ctx.client.resolve_level(&amount).map(|l| l.id), Some(2));
        prop_assert_eq!(ctx.client.get_level(&0).id, 2);
        prop_assert_eq!(ctx.client.get_level(&1).id, 1);
    }

    #[test]
    fn prop_inverted_range_rejected(min in 1i128..=10_000, gap in 1i128..=10_000) {
        let ctx = setup_pool(100, 1);
        let result = ctx.client.try_add_level(&ctx.admin, &1, &min, &(min - gap), &0);

        prop_assert!(matches!(result, Err(Ok(ContractError::InvalidRange))));
        prop_assert_eq!(ctx.client.get_level_count(), 0);
    }
}
