//! Stat modifier sets contributed by equipment.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The six character traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    /// Sprint, leap, maneuver.
    Agility,
    /// Lift, smash, grapple.
    Strength,
    /// Control, hide, tinker.
    Finesse,
    /// Perceive, sense, navigate.
    Instinct,
    /// Charm, perform, deceive.
    Presence,
    /// Recall, analyze, comprehend.
    Knowledge,
}

impl Trait {
    /// All traits in sheet order.
    pub const ALL: [Trait; 6] = [
        Trait::Agility,
        Trait::Strength,
        Trait::Finesse,
        Trait::Instinct,
        Trait::Presence,
        Trait::Knowledge,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Strength => "Strength",
            Self::Finesse => "Finesse",
            Self::Instinct => "Instinct",
            Self::Presence => "Presence",
            Self::Knowledge => "Knowledge",
        }
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stat that equipment text can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Evasion.
    Evasion,
    /// Proficiency.
    Proficiency,
    /// Armor Score.
    ArmorScore,
    /// Attack rolls.
    AttackRolls,
    /// Spellcast rolls.
    SpellcastRolls,
    /// Major damage threshold.
    MajorThreshold,
    /// Severe damage threshold.
    SevereThreshold,
    /// Both damage thresholds.
    DamageThresholds,
    /// One character trait.
    Trait(Trait),
    /// Every character trait.
    AllTraits,
}

/// Summed stat changes from equipment.
///
/// Trait entries with a zero delta are dropped, so two sets with the same
/// effect compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentStatModifiers {
    /// Evasion delta.
    pub evasion: i32,
    /// Proficiency delta.
    pub proficiency: i32,
    /// Armor Score delta.
    pub armor_score: i32,
    /// Attack roll delta.
    pub attack_rolls: i32,
    /// Spellcast roll delta.
    pub spellcast_rolls: i32,
    /// Major threshold delta.
    pub major_threshold: i32,
    /// Severe threshold delta.
    pub severe_threshold: i32,
    /// Per-trait deltas.
    pub traits: BTreeMap<Trait, i32>,
}

impl EquipmentStatModifiers {
    /// No changes.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// True if this set changes nothing.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.evasion == 0
            && self.proficiency == 0
            && self.armor_score == 0
            && self.attack_rolls == 0
            && self.spellcast_rolls == 0
            && self.major_threshold == 0
            && self.severe_threshold == 0
            && self.traits.values().all(|v| *v == 0)
    }

    /// Delta for one trait.
    #[must_use]
    pub fn trait_modifier(&self, t: Trait) -> i32 {
        self.traits.get(&t).copied().unwrap_or(0)
    }

    /// Add a delta to one stat, saturating at the `i32` bounds.
    pub fn apply(&mut self, stat: Stat, delta: i32) {
        let add = |field: &mut i32| *field = field.saturating_add(delta);
        match stat {
            Stat::Evasion => add(&mut self.evasion),
            Stat::Proficiency => add(&mut self.proficiency),
            Stat::ArmorScore => add(&mut self.armor_score),
            Stat::AttackRolls => add(&mut self.attack_rolls),
            Stat::SpellcastRolls => add(&mut self.spellcast_rolls),
            Stat::MajorThreshold => add(&mut self.major_threshold),
            Stat::SevereThreshold => add(&mut self.severe_threshold),
            Stat::DamageThresholds => {
                add(&mut self.major_threshold);
                add(&mut self.severe_threshold);
            }
            Stat::Trait(t) => self.add_trait(t, delta),
            Stat::AllTraits => {
                for t in Trait::ALL {
                    self.add_trait(t, delta);
                }
            }
        }
    }

    /// Builder form of [`Self::apply`].
    #[must_use]
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        self.apply(stat, delta);
        self
    }

    fn add_trait(&mut self, t: Trait, delta: i32) {
        let entry = self.traits.entry(t).or_insert(0);
        *entry = entry.saturating_add(delta);
        if *entry == 0 {
            self.traits.remove(&t);
        }
    }
}

impl std::ops::AddAssign<&EquipmentStatModifiers> for EquipmentStatModifiers {
    fn add_assign(&mut self, rhs: &EquipmentStatModifiers) {
        self.evasion = self.evasion.saturating_add(rhs.evasion);
        self.proficiency = self.proficiency.saturating_add(rhs.proficiency);
        self.armor_score = self.armor_score.saturating_add(rhs.armor_score);
        self.attack_rolls = self.attack_rolls.saturating_add(rhs.attack_rolls);
        self.spellcast_rolls = self.spellcast_rolls.saturating_add(rhs.spellcast_rolls);
        self.major_threshold = self.major_threshold.saturating_add(rhs.major_threshold);
        self.severe_threshold = self.severe_threshold.saturating_add(rhs.severe_threshold);
        for (t, delta) in &rhs.traits {
            self.add_trait(*t, *delta);
        }
    }
}

impl std::ops::AddAssign for EquipmentStatModifiers {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl std::ops::Add for EquipmentStatModifiers {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl std::iter::Sum for EquipmentStatModifiers {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}
