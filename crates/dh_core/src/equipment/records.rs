//! Equipment records as they appear in content data and homebrew.

use serde::{Deserialize, Serialize};

use super::modifiers::{EquipmentStatModifiers, Stat, Trait};
use crate::damage::DamageThresholds;

/// A named rules feature on a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name, e.g. "Heavy".
    pub name: String,
    /// Rules text, e.g. "−1 to Evasion".
    #[serde(default)]
    pub description: String,
}

impl Feature {
    /// Create a feature.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Default tier for equipment without explicit tier.
const fn default_tier() -> u8 {
    1
}

/// Armor definition.
///
/// `evasion_modifier` and `agility_modifier` are the armor's own baseline.
/// They are applied once through [`Armor::base_modifiers`] and never appear
/// in loadout aggregation.
///
/// # Example RON
///
/// ```ron
/// Armor(
///     name: "Chainmail Armor",
///     tier: 1,
///     base_thresholds: (major: 7, severe: 15),
///     base_score: 4,
///     evasion_modifier: Some(-1),
///     features: [(name: "Heavy", description: "−1 to Evasion")],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    /// Display name.
    pub name: String,

    /// Equipment tier (1 to 4).
    #[serde(default = "default_tier")]
    pub tier: u8,

    /// Major/Severe thresholds before level is added.
    pub base_thresholds: DamageThresholds,

    /// Base Armor Score.
    pub base_score: i32,

    /// Baseline Evasion change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evasion_modifier: Option<i32>,

    /// Baseline Agility change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agility_modifier: Option<i32>,

    /// Rules features.
    #[serde(default)]
    pub features: Vec<Feature>,

    /// Structured modifiers on homebrew armor; included in aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_modifiers: Option<EquipmentStatModifiers>,
}

impl Armor {
    /// Create armor with no baseline modifiers or features.
    #[must_use]
    pub fn new(name: impl Into<String>, base_thresholds: DamageThresholds, base_score: i32) -> Self {
        Self {
            name: name.into(),
            tier: default_tier(),
            base_thresholds,
            base_score,
            evasion_modifier: None,
            agility_modifier: None,
            features: Vec::new(),
            stat_modifiers: None,
        }
    }

    /// Set the baseline Evasion and Agility changes.
    #[must_use]
    pub fn with_baseline(mut self, evasion: i32, agility: i32) -> Self {
        self.evasion_modifier = Some(evasion);
        self.agility_modifier = Some(agility);
        self
    }

    /// Add a feature.
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Set structured modifiers.
    #[must_use]
    pub fn with_stat_modifiers(mut self, modifiers: EquipmentStatModifiers) -> Self {
        self.stat_modifiers = Some(modifiers);
        self
    }

    /// True if the record carries the baseline Evasion/Agility fields.
    #[must_use]
    pub const fn has_legacy_fields(&self) -> bool {
        self.evasion_modifier.is_some() || self.agility_modifier.is_some()
    }

    /// The armor's own baseline: Armor Score plus Evasion and Agility changes.
    #[must_use]
    pub fn base_modifiers(&self) -> EquipmentStatModifiers {
        EquipmentStatModifiers {
            armor_score: self.base_score,
            evasion: self.evasion_modifier.unwrap_or(0),
            ..EquipmentStatModifiers::zero()
        }
        .with(Stat::Trait(Trait::Agility), self.agility_modifier.unwrap_or(0))
    }
}

/// Weapon reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Range {
    /// Melee.
    #[default]
    Melee,
    /// Very Close.
    VeryClose,
    /// Close.
    Close,
    /// Far.
    Far,
    /// Very Far.
    VeryFar,
}

/// Hands a weapon occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Burden {
    /// One hand.
    #[default]
    OneHanded,
    /// Two hands.
    TwoHanded,
}

/// Weapon, shield or combat wheelchair definition.
///
/// # Example RON
///
/// ```ron
/// Weapon(
///     name: "Round Shield",
///     trait_: Some(Strength),
///     range: Melee,
///     damage: "d4 phy",
///     features: [(name: "Protective", description: "+1 to Armor Score")],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name.
    pub name: String,

    /// Equipment tier (1 to 4).
    #[serde(default = "default_tier")]
    pub tier: u8,

    /// Trait used for attack rolls.
    #[serde(default)]
    pub trait_: Option<Trait>,

    /// Reach.
    #[serde(default)]
    pub range: Range,

    /// Damage expression, e.g. "d8+1 phy".
    #[serde(default)]
    pub damage: String,

    /// Hands occupied.
    #[serde(default)]
    pub burden: Burden,

    /// Rules features.
    #[serde(default)]
    pub features: Vec<Feature>,

    /// Structured modifiers; when present, feature text is not parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_modifiers: Option<EquipmentStatModifiers>,
}

impl Weapon {
    /// Create a weapon with no features.
    #[must_use]
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier: default_tier(),
            trait_: None,
            range: Range::default(),
            damage: damage.into(),
            burden: Burden::default(),
            features: Vec::new(),
            stat_modifiers: None,
        }
    }

    /// Add a feature.
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Set structured modifiers.
    #[must_use]
    pub fn with_stat_modifiers(mut self, modifiers: EquipmentStatModifiers) -> Self {
        self.stat_modifiers = Some(modifiers);
        self
    }
}

/// Any equippable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentItem {
    /// Armor.
    Armor(Armor),
    /// Weapon, shield or wheelchair.
    Weapon(Weapon),
}

impl From<Armor> for EquipmentItem {
    fn from(armor: Armor) -> Self {
        Self::Armor(armor)
    }
}

impl From<Weapon> for EquipmentItem {
    fn from(weapon: Weapon) -> Self {
        Self::Weapon(weapon)
    }
}

/// Read access to the parts of an item that contribute stat modifiers.
pub trait Equipment {
    /// Display name.
    fn name(&self) -> &str;

    /// Structured modifiers, if the record has them.
    fn explicit_modifiers(&self) -> Option<&EquipmentStatModifiers>;

    /// True for armor carrying baseline Evasion/Agility fields.
    fn has_legacy_armor_fields(&self) -> bool {
        false
    }

    /// Rules features.
    fn features(&self) -> &[Feature];
}

impl Equipment for Armor {
    fn name(&self) -> &str {
        &self.name
    }

    fn explicit_modifiers(&self) -> Option<&EquipmentStatModifiers> {
        self.stat_modifiers.as_ref()
    }

    fn has_legacy_armor_fields(&self) -> bool {
        self.has_legacy_fields()
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl Equipment for Weapon {
    fn name(&self) -> &str {
        &self.name
    }

    fn explicit_modifiers(&self) -> Option<&EquipmentStatModifiers> {
        self.stat_modifiers.as_ref()
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl Equipment for EquipmentItem {
    fn name(&self) -> &str {
        match self {
            Self::Armor(a) => a.name(),
            Self::Weapon(w) => w.name(),
        }
    }

    fn explicit_modifiers(&self) -> Option<&EquipmentStatModifiers> {
        match self {
            Self::Armor(a) => a.explicit_modifiers(),
            Self::Weapon(w) => w.explicit_modifiers(),
        }
    }

    fn has_legacy_armor_fields(&self) -> bool {
        match self {
            Self::Armor(a) => a.has_legacy_armor_fields(),
            Self::Weapon(w) => w.has_legacy_armor_fields(),
        }
    }

    fn features(&self) -> &[Feature] {
        match self {
            Self::Armor(a) => Equipment::features(a),
            Self::Weapon(w) => Equipment::features(w),
        }
    }
}
