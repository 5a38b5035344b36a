//! Property-based tests for the banding and amortization invariants.

use property_sim_core::mortgage::amortization::amortization_schedule;
use property_sim_core::tax::stamp_duty::{calculate_stamp_duty, InvestorCategory, StampDutyTable};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn category() -> impl Strategy<Value = InvestorCategory> {
    prop_oneof![
        Just(InvestorCategory::SoleTrader),
        Just(InvestorCategory::LimitedCompany),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn stamp_duty_is_monotone(
        cat in category(),
        price in 1u64..=3_000_000u64,
        bump in 0u64..=500_000u64,
    ) {
        let low = calculate_stamp_duty(Decimal::from(price), cat).unwrap();
        let high = calculate_stamp_duty(Decimal::from(price + bump), cat).unwrap();
        prop_assert!(high >= low, "duty fell from {} to {}", low, high);
        prop_assert!(low >= Decimal::ZERO);
    }

    #[test]
    fn stamp_duty_is_continuous_at_thresholds(cat in category(), bracket_idx in 1usize..5) {
        let brackets = StampDutyTable::default().brackets_for(cat).unwrap();
        let idx = bracket_idx.min(brackets.len() - 1);
        let threshold = brackets[idx].threshold;
        let step = dec!(0.01);

        let at = calculate_stamp_duty(threshold, cat).unwrap();
        let below = calculate_stamp_duty(threshold - step, cat).unwrap();
        let above = calculate_stamp_duty(threshold + step, cat).unwrap();

        // No jump: a penny either side moves the tax by at most a penny at the top rate
        prop_assert!(at - below <= step * dec!(0.15));
        prop_assert!(above - at <= step * dec!(0.15));
        prop_assert_eq!(above - at, step * brackets[idx].rate);
    }

    #[test]
    fn amortization_repays_principal(
        principal in 1_000u64..=2_000_000u64,
        term in 1u32..=40,
        rate_bps in 1u32..=1_500,
    ) {
        let principal = Decimal::from(principal);
        let rate = Decimal::from(rate_bps) / dec!(10000);
        let schedule = amortization_schedule(principal, term, rate).unwrap();

        prop_assert_eq!(schedule.len(), term as usize + 1);
        let last = schedule.last().unwrap();
        prop_assert!(last.closing_balance.abs() <= dec!(0.01));
        prop_assert!((last.cumulative_principal - principal).abs() <= dec!(0.01));

        let repaid: Decimal = schedule.iter().map(|y| y.principal_paid).sum();
        prop_assert!((repaid - principal).abs() <= dec!(0.01), "rows repaid {}", repaid);

        let balances: Vec<Decimal> = schedule.iter().map(|y| y.closing_balance).collect();
        prop_assert!(balances.windows(2).all(|w| w[1] <= w[0]));
    }
}
