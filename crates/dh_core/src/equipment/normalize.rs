//! Per-item normalization and loadout aggregation.
//!
//! Every item resolves to one [`EquipmentStatModifiers`] set in priority
//! order:
//! 1. explicit `stat_modifiers`
//! 2. armor baseline fields, which resolve to zero here
//! 3. features parsed from their text
//! 4. nothing
//!
//! Armor's baseline Evasion/Agility is applied once through
//! [`Armor::base_modifiers`](super::Armor::base_modifiers). Aggregation must
//! go through [`aggregate_equipment_stats`] or [`Loadout::aggregate`] so the
//! baseline is never counted a second time.

use serde::{Deserialize, Serialize};

use super::feature_parser::parse_feature;
use super::modifiers::EquipmentStatModifiers;
use super::records::{Armor, Equipment, EquipmentItem, Weapon};

/// Where an item's modifiers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierSource {
    /// Structured `stat_modifiers` on the record.
    Explicit,
    /// Armor baseline fields; contributes zero to aggregation.
    LegacyArmor,
    /// Parsed from feature text.
    Parsed,
    /// Nothing to contribute.
    None,
}

/// An item's modifiers tagged with their source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedModifiers {
    /// The modifiers.
    pub modifiers: EquipmentStatModifiers,
    /// Where they came from.
    pub source: ModifierSource,
}

impl NormalizedModifiers {
    fn zero(source: ModifierSource) -> Self {
        Self {
            modifiers: EquipmentStatModifiers::zero(),
            source,
        }
    }
}

/// Resolve one item's contribution to loadout stats.
#[must_use]
pub fn normalize_equipment<E: Equipment + ?Sized>(item: &E) -> NormalizedModifiers {
    if let Some(explicit) = item.explicit_modifiers() {
        return NormalizedModifiers {
            modifiers: explicit.clone(),
            source: ModifierSource::Explicit,
        };
    }

    if item.has_legacy_armor_fields() {
        return NormalizedModifiers::zero(ModifierSource::LegacyArmor);
    }

    let features = item.features();
    if features.is_empty() {
        return NormalizedModifiers::zero(ModifierSource::None);
    }

    let modifiers: EquipmentStatModifiers = features
        .iter()
        .map(|feature| parse_feature(item.name(), feature).modifiers())
        .sum();
    NormalizedModifiers {
        modifiers,
        source: ModifierSource::Parsed,
    }
}

fn sum_items<'a>(items: impl IntoIterator<Item = &'a dyn Equipment>) -> EquipmentStatModifiers {
    let mut total = EquipmentStatModifiers::zero();
    for item in items {
        let normalized = normalize_equipment(item);
        tracing::debug!(
            item = item.name(),
            source = ?normalized.source,
            "Normalized equipment modifiers"
        );
        total += &normalized.modifiers;
    }
    total
}

/// Sum the modifiers of an armor slot and any number of other slots.
///
/// Empty slots contribute nothing.
#[must_use]
pub fn aggregate_equipment_stats(
    armor: Option<&EquipmentItem>,
    others: &[Option<&EquipmentItem>],
) -> EquipmentStatModifiers {
    let armor = armor.map(|a| a as &dyn Equipment);
    let others = others.iter().flatten().map(|item| *item as &dyn Equipment);
    sum_items(armor.into_iter().chain(others))
}

/// A character's equipped items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loadout {
    /// Worn armor.
    #[serde(default)]
    pub armor: Option<Armor>,
    /// Primary weapon.
    #[serde(default)]
    pub primary: Option<Weapon>,
    /// Secondary weapon or shield.
    #[serde(default)]
    pub secondary: Option<Weapon>,
    /// Combat wheelchair.
    #[serde(default)]
    pub wheelchair: Option<Weapon>,
}

impl Loadout {
    /// Summed modifiers of every equipped item.
    #[must_use]
    pub fn aggregate(&self) -> EquipmentStatModifiers {
        let armor = self.armor.as_ref().map(|a| a as &dyn Equipment);
        let weapons = [&self.primary, &self.secondary, &self.wheelchair]
            .into_iter()
            .flatten()
            .map(|w| w as &dyn Equipment);
        sum_items(armor.into_iter().chain(weapons))
    }

    /// Armor baseline plus aggregated equipment modifiers.
    ///
    /// This is the complete equipment contribution to a character sheet.
    #[must_use]
    pub fn total_modifiers(&self) -> EquipmentStatModifiers {
        let mut total = self
            .armor
            .as_ref()
            .map(Armor::base_modifiers)
            .unwrap_or_default();
        total += self.aggregate();
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageThresholds;
    use crate::equipment::{Feature, Stat, Trait};

    fn chainmail() -> Armor {
        Armor::new("Chainmail Armor", DamageThresholds::new(7, 15), 4)
            .with_baseline(-1, 0)
            .with_feature(Feature::new("Heavy", "−1 to Evasion"))
    }

    #[test]
    fn test_explicit_wins_over_everything() {
        let armor = chainmail()
            .with_stat_modifiers(EquipmentStatModifiers::zero().with(Stat::ArmorScore, 1));
        let normalized = normalize_equipment(&armor);
        assert_eq!(normalized.source, ModifierSource::Explicit);
        assert_eq!(normalized.modifiers.armor_score, 1);
        assert_eq!(normalized.modifiers.evasion, 0);
    }

    #[test]
    fn test_legacy_armor_is_zero() {
        let normalized = normalize_equipment(&chainmail());
        assert_eq!(normalized.source, ModifierSource::LegacyArmor);
        assert!(normalized.modifiers.is_zero());
    }

    #[test]
    fn test_armor_without_baseline_parses_features() {
        let armor = Armor::new("Homebrew Plate", DamageThresholds::new(8, 17), 5)
            .with_feature(Feature::new("Heavy", "−1 to Evasion"));
        let normalized = normalize_equipment(&armor);
        assert_eq!(normalized.source, ModifierSource::Parsed);
        assert_eq!(normalized.modifiers.evasion, -1);
    }

    #[test]
    fn test_weapon_features_parsed() {
        let shield = Weapon::new("Tower Shield", "d6 phy")
            .with_feature(Feature::new("Barrier", "+2 to Armor Score; −1 to Evasion"));
        let normalized = normalize_equipment(&shield);
        assert_eq!(normalized.source, ModifierSource::Parsed);
        assert_eq!(normalized.modifiers.armor_score, 2);
        assert_eq!(normalized.modifiers.evasion, -1);
    }

    #[test]
    fn test_plain_weapon_is_none() {
        let normalized = normalize_equipment(&Weapon::new("Broadsword", "d8 phy"));
        assert_eq!(normalized.source, ModifierSource::None);
        assert!(normalized.modifiers.is_zero());
    }

    #[test]
    fn test_aggregate_excludes_armor_baseline() {
        let armor = EquipmentItem::from(
            Armor::new("Full Plate Armor", DamageThresholds::new(8, 17), 4).with_baseline(-2, -1),
        );
        let weapon = EquipmentItem::from(
            Weapon::new("Greatsword", "d10+3 phy")
                .with_feature(Feature::new("Massive", "−1 to Evasion")),
        );

        let total = aggregate_equipment_stats(Some(&armor), &[Some(&weapon), None]);
        assert_eq!(total.evasion, -1);
        assert_eq!(total.trait_modifier(Trait::Agility), 0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_equipment_stats(None, &[None, None]).is_zero());
    }

    #[test]
    fn test_loadout_total_applies_baseline_once() {
        let loadout = Loadout {
            armor: Some(chainmail()),
            primary: Some(
                Weapon::new("Longsword", "d10+3 phy")
                    .with_feature(Feature::new("Reliable", "+1 to attack rolls")),
            ),
            secondary: Some(
                Weapon::new("Round Shield", "d4 phy")
                    .with_feature(Feature::new("Protective", "+1 to Armor Score")),
            ),
            wheelchair: None,
        };

        let aggregated = loadout.aggregate();
        assert_eq!(aggregated.evasion, 0);
        assert_eq!(aggregated.armor_score, 1);
        assert_eq!(aggregated.attack_rolls, 1);

        let total = loadout.total_modifiers();
        assert_eq!(total.evasion, -1);
        assert_eq!(total.armor_score, 5);
    }

    #[test]
    fn test_aggregate_saturates_across_items() {
        let huge = EquipmentItem::from(
            Weapon::new("Bulwark", "d4 phy")
                .with_feature(Feature::new("Wall", "+2147483647 to Armor Score")),
        );
        let shield = EquipmentItem::from(
            Weapon::new("Round Shield", "d4 phy")
                .with_feature(Feature::new("Protective", "+1 to Armor Score")),
        );
        let total = aggregate_equipment_stats(None, &[Some(&huge), Some(&shield)]);
        assert_eq!(total.armor_score, i32::MAX);
    }
}
