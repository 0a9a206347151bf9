//! # DH Core
//!
//! Rules calculations for Daggerheart character sheets.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No randomness
//! - No global state
//!
//! Every function is pure: the sheet calls it on each render or user
//! action and gets the same answer for the same input.
//!
//! ## Crate Structure
//!
//! - [`currency`] - Tiered gold math (coins, handfuls, bags, chests)
//! - [`damage`] - Damage thresholds and hit severity
//! - [`level_up`] - Level-up point budgets per tier
//! - [`equipment`] - Equipment stat modifiers and loadout aggregation
//! - [`data`] - RON-loadable equipment catalogs
//! - [`config`] - Tunable rule constants

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod currency;
pub mod damage;
pub mod data;
pub mod equipment;
pub mod error;
pub mod level_up;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::RulesConfig;
    pub use crate::currency::{
        can_afford, coins_to_gold, cost_to_handfuls, format_gold_amount, gold_parts_to_handfuls,
        gold_to_coins, handfuls_to_gold_parts, subtract_gold, Denomination, GoldAmount, GoldCost,
        GoldParts,
    };
    pub use crate::damage::{
        classify_damage, compute_auto_thresholds, get_thresholds, ClassifyOptions,
        DamageSeverity, DamageThresholds,
    };
    pub use crate::data::EquipmentCatalog;
    pub use crate::equipment::{
        aggregate_equipment_stats, normalize_equipment, Armor, EquipmentItem,
        EquipmentStatModifiers, Feature, Loadout, ModifierSource, Trait, Weapon,
    };
    pub use crate::error::{Result, RulesError};
    pub use crate::level_up::{validate_level_up_decisions, LevelUpDecisions, Tier};
}
