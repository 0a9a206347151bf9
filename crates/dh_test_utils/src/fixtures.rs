//! Test fixtures and helpers.
//!
//! SRD-style armor and weapons with the feature text the sheet parses.

use dh_core::currency::{GoldAmount, GoldParts};
use dh_core::damage::DamageThresholds;
use dh_core::data::EquipmentCatalog;
use dh_core::equipment::{Armor, Feature, Weapon};

/// Build a wallet from denominations.
#[must_use]
pub fn gold(chests: u32, bags: u32, handfuls: u32, coins: u32) -> GoldAmount {
    GoldAmount::from_parts(GoldParts {
        chests,
        bags,
        handfuls,
        coins,
    })
}

/// Armor with baseline fields set, the usual SRD shape.
#[must_use]
pub fn armor_with_evasion_modifier(evasion: i32) -> Armor {
    Armor::new("Test Armor", DamageThresholds::new(6, 13), 3).with_baseline(evasion, 0)
}

/// A weapon whose only feature changes Evasion.
#[must_use]
pub fn weapon_with_feature_evasion(evasion: i32) -> Weapon {
    let text = if evasion < 0 {
        format!("−{} to Evasion", evasion.unsigned_abs())
    } else {
        format!("+{evasion} to Evasion")
    };
    Weapon::new("Test Weapon", "d8 phy").with_feature(Feature::new("Test", text))
}

/// Gambeson Armor (tier 1).
#[must_use]
pub fn gambeson() -> Armor {
    Armor::new("Gambeson Armor", DamageThresholds::new(5, 11), 3)
        .with_baseline(1, 0)
        .with_feature(Feature::new("Flexible", "+1 to Evasion"))
}

/// Chainmail Armor (tier 1).
#[must_use]
pub fn chainmail() -> Armor {
    Armor::new("Chainmail Armor", DamageThresholds::new(7, 15), 4)
        .with_baseline(-1, 0)
        .with_feature(Feature::new("Heavy", "−1 to Evasion"))
}

/// Full Plate Armor (tier 1).
#[must_use]
pub fn full_plate() -> Armor {
    Armor::new("Full Plate Armor", DamageThresholds::new(8, 17), 4)
        .with_baseline(-2, -1)
        .with_feature(Feature::new("Very Heavy", "−2 to Evasion; −1 to Agility"))
}

/// Round Shield (tier 1 secondary).
#[must_use]
pub fn round_shield() -> Weapon {
    Weapon::new("Round Shield", "d4 phy")
        .with_feature(Feature::new("Protective", "+1 to Armor Score"))
}

/// Tower Shield (tier 1 secondary).
#[must_use]
pub fn tower_shield() -> Weapon {
    Weapon::new("Tower Shield", "d6 phy")
        .with_feature(Feature::new("Barrier", "+2 to Armor Score; −1 to Evasion"))
}

/// Greatsword (tier 1 primary).
#[must_use]
pub fn greatsword() -> Weapon {
    Weapon::new("Greatsword", "d10+3 phy").with_feature(Feature::new(
        "Massive",
        "−1 to Evasion; on a successful attack, roll an additional damage die and discard the lowest result",
    ))
}

/// Longsword (tier 1 primary), no features.
#[must_use]
pub fn longsword() -> Weapon {
    Weapon::new("Longsword", "d10+3 phy")
}

/// Catalog containing every fixture item.
#[must_use]
pub fn srd_catalog() -> EquipmentCatalog {
    EquipmentCatalog {
        armor: vec![gambeson(), chainmail(), full_plate()],
        weapons: vec![round_shield(), tower_shield(), greatsword(), longsword()],
    }
}
