//! Proptest strategies for rules inputs.

use proptest::prelude::*;

use dh_core::currency::{GoldAmount, GoldParts};
use dh_core::damage::DamageThresholds;
use dh_core::level_up::{LevelUpDecisions, Tier};

/// Generate non-negative coin counts (up to 10 million).
pub fn arb_coins() -> impl Strategy<Value = i64> {
    0i64..10_000_000
}

/// Generate handful values with at most one decimal place of coins.
pub fn arb_handfuls() -> impl Strategy<Value = f64> {
    (0u32..100_000, 0u32..10).prop_map(|(whole, coins)| f64::from(whole) + f64::from(coins) / 10.0)
}

/// Generate arbitrary non-negative floats, not snapped to coins.
pub fn arb_raw_handfuls() -> impl Strategy<Value = f64> {
    0.0f64..100_000.0
}

/// Generate wallets, including non-canonical ones (e.g. 15 handfuls).
pub fn arb_gold_amount() -> impl Strategy<Value = GoldAmount> {
    (0u32..50, 0u32..50, 0u32..50, 0u32..50, any::<bool>()).prop_map(
        |(chests, bags, handfuls, coins, show_coins)| GoldAmount {
            show_coins,
            ..GoldAmount::from_parts(GoldParts {
                chests,
                bags,
                handfuls,
                coins,
            })
        },
    )
}

/// Generate prices in handfuls (tenths allowed).
pub fn arb_price() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|tenths| f64::from(tenths) / 10.0)
}

/// Generate ordered thresholds (major 1-30, severe at least major).
pub fn arb_thresholds() -> impl Strategy<Value = DamageThresholds> {
    (1i32..30, 0i32..30).prop_map(|(major, gap)| DamageThresholds::new(major, major + gap))
}

/// Generate a tier that has spendable options.
pub fn arb_spending_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::TwoToFour),
        Just(Tier::FiveToSeven),
        Just(Tier::EightToTen),
    ]
}

/// Generate decisions using option names from a tier, with counts 0-3.
pub fn arb_decisions(tier: Tier) -> impl Strategy<Value = LevelUpDecisions> {
    let names: Vec<&'static str> = tier.options().iter().map(|o| o.name).collect();
    proptest::collection::vec((proptest::sample::select(names), 0i64..4), 0..4)
        .prop_map(|entries| entries.into_iter().collect())
}
