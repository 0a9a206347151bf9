//! Damage thresholds and hit severity.
//!
//! A hit is compared against a character's Major and Severe thresholds to
//! decide how many Hit Points it marks:
//! - below Major: Minor (1 HP)
//! - Major up to Severe: Major (2 HP)
//! - Severe and above: Severe (3 HP)
//! - critical hits at or above Double Severe: Massive (4 HP)
//!
//! Malformed input never errors. Non-finite hits count as Minor and
//! negative thresholds are treated as zero.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::equipment::Armor;

/// Major and Severe damage thresholds.
///
/// `severe >= major` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DamageThresholds {
    /// Damage at or above this is a Major hit.
    pub major: i32,
    /// Damage at or above this is a Severe hit.
    pub severe: i32,
}

impl DamageThresholds {
    /// Create thresholds.
    #[must_use]
    pub const fn new(major: i32, severe: i32) -> Self {
        Self { major, severe }
    }

    /// Default Double Severe threshold (twice Severe).
    #[must_use]
    pub fn double_severe(&self) -> i32 {
        self.severe.max(0).saturating_mul(2)
    }

    /// Shift both thresholds by the same amount.
    #[must_use]
    pub const fn offset(self, by: i32) -> Self {
        Self {
            major: self.major.saturating_add(by),
            severe: self.severe.saturating_add(by),
        }
    }
}

/// Severity of a single hit.
///
/// The discriminant is the number of Hit Points the hit marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum DamageSeverity {
    /// Below the Major threshold.
    Minor = 1,
    /// At or above Major, below Severe.
    Major = 2,
    /// At or above Severe.
    Severe = 3,
    /// Critical hit at or above Double Severe.
    Massive = 4,
}

impl DamageSeverity {
    /// Hit Points marked by a hit of this severity.
    #[must_use]
    pub const fn hit_points(self) -> u8 {
        self as u8
    }

    /// Hit Points marked after spending armor slots on the hit.
    #[must_use]
    pub const fn hit_points_after_armor(self, armor_slots: u8) -> u8 {
        self.hit_points().saturating_sub(armor_slots)
    }

    /// Severity from a Hit Point count.
    #[must_use]
    pub const fn from_hit_points(hp: u8) -> Option<Self> {
        match hp {
            1 => Some(Self::Minor),
            2 => Some(Self::Major),
            3 => Some(Self::Severe),
            4 => Some(Self::Massive),
            _ => None,
        }
    }

    /// Display label for this severity.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Major => "Major",
            Self::Severe => "Severe",
            Self::Massive => "Massive",
        }
    }
}

/// Options for [`classify_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifyOptions {
    /// The hit was a critical success.
    #[serde(default)]
    pub critical: bool,
    /// Replaces the default Double Severe threshold when finite and non-negative.
    #[serde(default)]
    pub double_severe_override: Option<f64>,
}

impl ClassifyOptions {
    /// Options for a critical hit.
    #[must_use]
    pub const fn critical() -> Self {
        Self {
            critical: true,
            double_severe_override: None,
        }
    }

    /// Set a Double Severe override.
    #[must_use]
    pub fn with_double_severe(mut self, threshold: f64) -> Self {
        self.double_severe_override = Some(threshold);
        self
    }
}

/// Classify a hit against damage thresholds.
///
/// The Massive check runs before the normal tiers, so a critical hit at
/// Double Severe is Massive rather than Severe.
#[must_use]
pub fn classify_damage(
    hit: f64,
    thresholds: &DamageThresholds,
    opts: ClassifyOptions,
) -> DamageSeverity {
    if !hit.is_finite() {
        return DamageSeverity::Minor;
    }

    let major = f64::from(thresholds.major.max(0));
    let severe = f64::from(thresholds.severe.max(0));

    #[cfg(feature = "debug-validation")]
    if severe < major {
        tracing::warn!(major, severe, "Severe threshold is below Major threshold");
    }

    let severity = if opts.critical && hit >= double_severe(severe, opts.double_severe_override) {
        DamageSeverity::Massive
    } else if hit >= severe {
        DamageSeverity::Severe
    } else if hit >= major {
        DamageSeverity::Major
    } else {
        DamageSeverity::Minor
    };

    tracing::debug!(hit, major, severe, critical = opts.critical, ?severity, "Classified damage");
    severity
}

fn double_severe(severe: f64, override_threshold: Option<f64>) -> f64 {
    match override_threshold {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => severe * 2.0,
    }
}

/// Thresholds from a maximum Hit Point total (one quarter and one half).
#[must_use]
pub fn get_thresholds(max_hp: i64) -> DamageThresholds {
    let max_hp = max_hp.max(0);
    DamageThresholds {
        major: i32::try_from(max_hp / 4).unwrap_or(i32::MAX),
        severe: i32::try_from(max_hp / 2).unwrap_or(i32::MAX),
    }
}

/// Armor base thresholds raised by one per character level.
#[must_use]
pub fn effective_damage_thresholds(armor: &Armor, level: u32) -> DamageThresholds {
    armor
        .base_thresholds
        .offset(i32::try_from(level).unwrap_or(i32::MAX))
}

/// Thresholds for a character with or without armor, using default rules.
#[must_use]
pub fn compute_auto_thresholds(armor: Option<&Armor>, level: u32) -> DamageThresholds {
    compute_auto_thresholds_with(armor, level, &RulesConfig::default())
}

/// Thresholds for a character with or without armor.
///
/// Unarmored characters use the configured bases plus their level.
#[must_use]
pub fn compute_auto_thresholds_with(
    armor: Option<&Armor>,
    level: u32,
    config: &RulesConfig,
) -> DamageThresholds {
    match armor {
        Some(armor) => effective_damage_thresholds(armor, level),
        None => DamageThresholds::new(config.unarmored_major_base, config.unarmored_severe_base)
            .offset(i32::try_from(level).unwrap_or(i32::MAX)),
    }
}
