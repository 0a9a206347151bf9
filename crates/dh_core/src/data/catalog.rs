//! Equipment catalog combining armor and weapon definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::equipment::{parse_feature_text, Armor, Feature, Loadout, Weapon};
use crate::error::{Result, RulesError};

/// All armor and weapons available to a campaign.
///
/// Loaded from a RON file; homebrew entries sit alongside SRD ones.
///
/// # Example RON
///
/// ```ron
/// EquipmentCatalog(
///     armor: [...],
///     weapons: [...],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    /// Armor definitions.
    #[serde(default)]
    pub armor: Vec<Armor>,

    /// Weapon, shield and wheelchair definitions.
    #[serde(default)]
    pub weapons: Vec<Weapon>,
}

/// Names of the items in a loadout, resolved against a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutSelection {
    /// Armor name.
    #[serde(default)]
    pub armor: Option<String>,
    /// Primary weapon name.
    #[serde(default)]
    pub primary: Option<String>,
    /// Secondary weapon or shield name.
    #[serde(default)]
    pub secondary: Option<String>,
    /// Wheelchair name.
    #[serde(default)]
    pub wheelchair: Option<String>,
}

impl EquipmentCatalog {
    /// Parse a catalog from RON text. `label` names the source in errors.
    pub fn from_ron_str(text: &str, label: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| RulesError::DataParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }

    /// Find armor by name, ignoring case.
    #[must_use]
    pub fn get_armor(&self, name: &str) -> Option<&Armor> {
        self.armor
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Find a weapon by name, ignoring case.
    #[must_use]
    pub fn get_weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Get all armor at a specific tier.
    pub fn armor_at_tier(&self, tier: u8) -> impl Iterator<Item = &Armor> {
        self.armor.iter().filter(move |a| a.tier == tier)
    }

    /// Get all weapons at a specific tier.
    pub fn weapons_at_tier(&self, tier: u8) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter().filter(move |w| w.tier == tier)
    }

    /// Build a loadout from item names.
    pub fn loadout(&self, selection: &LoadoutSelection) -> Result<Loadout> {
        let weapon = |name: &Option<String>| -> Result<Option<Weapon>> {
            name.as_deref()
                .map(|n| {
                    self.get_weapon(n)
                        .cloned()
                        .ok_or_else(|| RulesError::InvalidData(format!("Unknown weapon '{n}'")))
                })
                .transpose()
        };

        let armor = selection
            .armor
            .as_deref()
            .map(|n| {
                self.get_armor(n)
                    .cloned()
                    .ok_or_else(|| RulesError::InvalidData(format!("Unknown armor '{n}'")))
            })
            .transpose()?;

        Ok(Loadout {
            armor,
            primary: weapon(&selection.primary)?,
            secondary: weapon(&selection.secondary)?,
            wheelchair: weapon(&selection.wheelchair)?,
        })
    }

    /// Validate internal consistency of the catalog.
    ///
    /// Checks for:
    /// - Empty or duplicate names
    /// - Armor whose Severe threshold is below its Major threshold
    /// - Feature text with stat deltas that cannot be recognized
    ///
    /// Returns a list of validation errors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for armor in &self.armor {
            check_name("Armor", &armor.name, &mut seen, &mut errors);
            let t = armor.base_thresholds;
            if t.major < 0 || t.severe < t.major {
                errors.push(format!(
                    "Armor '{}' has invalid thresholds {}/{}",
                    armor.name, t.major, t.severe
                ));
            }
            check_features(&armor.name, &armor.features, &mut errors);
        }

        for weapon in &self.weapons {
            check_name("Weapon", &weapon.name, &mut seen, &mut errors);
            check_features(&weapon.name, &weapon.features, &mut errors);
        }

        errors
    }
}

fn check_name(kind: &str, name: &str, seen: &mut HashSet<String>, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(format!("{kind} with empty name"));
    } else if !seen.insert(name.to_lowercase()) {
        errors.push(format!("{kind} '{name}' is defined more than once"));
    }
}

fn check_features(item: &str, features: &[Feature], errors: &mut Vec<String>) {
    for feature in features {
        for text in parse_feature_text(&feature.description).unparsed {
            errors.push(format!(
                "'{item}' feature '{}' has unrecognized modifier '{text}'",
                feature.name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageThresholds;

    fn catalog() -> EquipmentCatalog {
        EquipmentCatalog {
            armor: vec![
                Armor::new("Leather Armor", DamageThresholds::new(6, 13), 3).with_baseline(0, 0),
            ],
            weapons: vec![
                Weapon::new("Dagger", "d8+1 phy"),
                Weapon::new("Round Shield", "d4 phy")
                    .with_feature(Feature::new("Protective", "+1 to Armor Score")),
            ],
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        let c = catalog();
        assert!(c.get_armor("leather armor").is_some());
        assert!(c.get_weapon("DAGGER").is_some());
        assert!(c.get_weapon("Longbow").is_none());
    }

    #[test]
    fn test_loadout_from_names() {
        let selection = LoadoutSelection {
            armor: Some("Leather Armor".into()),
            primary: Some("Dagger".into()),
            secondary: Some("Round Shield".into()),
            wheelchair: None,
        };
        let loadout = catalog().loadout(&selection).expect("known items");
        assert_eq!(loadout.aggregate().armor_score, 1);
    }

    #[test]
    fn test_loadout_unknown_item() {
        let selection = LoadoutSelection {
            primary: Some("Vorpal Blade".into()),
            ..Default::default()
        };
        assert!(matches!(
            catalog().loadout(&selection),
            Err(RulesError::InvalidData(_))
        ));
    }

    #[test]
    fn test_validate_clean_catalog() {
        assert!(catalog().validate().is_empty());
    }

    #[test]
    fn test_validate_catches_problems() {
        let mut c = catalog();
        c.weapons.push(Weapon::new("dagger", "d6 phy"));
        c.armor
            .push(Armor::new("Backwards Armor", DamageThresholds::new(9, 4), 2));
        c.weapons.push(
            Weapon::new("Odd Charm", "d4 mag").with_feature(Feature::new("Lucky", "+1 to Hope")),
        );

        let errors = c.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
    }

    #[test]
    fn test_parse_ron() {
        let text = r#"EquipmentCatalog(
            armor: [Armor(
                name: "Gambeson Armor",
                base_thresholds: (major: 5, severe: 11),
                base_score: 3,
                evasion_modifier: Some(1),
                features: [(name: "Flexible", description: "+1 to Evasion")],
            )],
        )"#;
        let c = EquipmentCatalog::from_ron_str(text, "inline").expect("valid ron");
        assert_eq!(c.armor[0].tier, 1);
        assert!(c.weapons.is_empty());
    }
}
