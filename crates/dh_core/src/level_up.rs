//! Level-up point budgets.
//!
//! Each level-up grants a fixed number of points to spend on options from
//! the character's tier. Every option has a point cost and a cap on how many
//! times it may be taken. Tier 1 offers nothing to spend on.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::error::{Result, RulesError};

/// A spendable level-up option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelUpOption {
    /// Key used in [`LevelUpDecisions`].
    pub name: &'static str,
    /// Sheet text for the option.
    pub description: &'static str,
    /// Points per selection.
    pub cost: u32,
    /// Times the option may be taken in one level-up.
    pub max_selections: u32,
}

const fn option(
    name: &'static str,
    description: &'static str,
    cost: u32,
    max_selections: u32,
) -> LevelUpOption {
    LevelUpOption {
        name,
        description,
        cost,
        max_selections,
    }
}

const TIER_2_OPTIONS: &[LevelUpOption] = &[
    option("traits", "Gain a +1 bonus to two unmarked character traits", 1, 3),
    option("hit_point", "Permanently gain one Hit Point slot", 1, 2),
    option("stress", "Permanently gain one Stress slot", 1, 2),
    option("experiences", "Permanently gain a +1 bonus to two Experiences", 1, 1),
    option("domain_card", "Choose an additional domain card of your level or lower", 1, 1),
    option("evasion", "Permanently gain a +1 bonus to your Evasion", 1, 1),
];

const TIER_3_OPTIONS: &[LevelUpOption] = &[
    option("traits", "Gain a +1 bonus to two unmarked character traits", 1, 3),
    option("hit_point", "Permanently gain one Hit Point slot", 1, 2),
    option("stress", "Permanently gain one Stress slot", 1, 2),
    option("experiences", "Permanently gain a +1 bonus to two Experiences", 1, 1),
    option("domain_card", "Choose an additional domain card of your level or lower", 1, 1),
    option("evasion", "Permanently gain a +1 bonus to your Evasion", 1, 1),
    option("subclass", "Take an upgraded subclass card", 1, 1),
    option("proficiency", "Increase your Proficiency by +1", 2, 1),
    option("multiclass", "Choose an additional class for your character", 2, 1),
];

// Tier 4 repeats the tier 3 table.
const TIER_4_OPTIONS: &[LevelUpOption] = TIER_3_OPTIONS;

/// Character tier, a band of levels sharing one option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Level 1.
    #[serde(rename = "1")]
    One,
    /// Levels 2 to 4.
    #[serde(rename = "2-4")]
    TwoToFour,
    /// Levels 5 to 7.
    #[serde(rename = "5-7")]
    FiveToSeven,
    /// Levels 8 to 10.
    #[serde(rename = "8-10")]
    EightToTen,
}

impl Tier {
    /// All tiers in level order.
    pub const ALL: [Tier; 4] = [
        Tier::One,
        Tier::TwoToFour,
        Tier::FiveToSeven,
        Tier::EightToTen,
    ];

    /// Tier containing a character level (1 to 10).
    #[must_use]
    pub const fn for_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(Self::One),
            2..=4 => Some(Self::TwoToFour),
            5..=7 => Some(Self::FiveToSeven),
            8..=10 => Some(Self::EightToTen),
            _ => None,
        }
    }

    /// Options a character in this tier may spend points on.
    #[must_use]
    pub const fn options(self) -> &'static [LevelUpOption] {
        match self {
            Self::One => &[],
            Self::TwoToFour => TIER_2_OPTIONS,
            Self::FiveToSeven => TIER_3_OPTIONS,
            Self::EightToTen => TIER_4_OPTIONS,
        }
    }

    /// Look up an option by name.
    #[must_use]
    pub fn option(self, name: &str) -> Option<&'static LevelUpOption> {
        self.options().iter().find(|o| o.name == name)
    }

    /// Tier label as written on the sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::TwoToFour => "2-4",
            Self::FiveToSeven => "5-7",
            Self::EightToTen => "8-10",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = RulesError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.label() == s.trim())
            .ok_or_else(|| RulesError::InvalidTier(s.to_string()))
    }
}

/// Chosen count per option name for one level-up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelUpDecisions(BTreeMap<String, i64>);

impl LevelUpDecisions {
    /// No selections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, option: impl Into<String>, count: i64) -> Self {
        self.set(option, count);
        self
    }

    /// Set the count for an option.
    pub fn set(&mut self, option: impl Into<String>, count: i64) {
        self.0.insert(option.into(), count);
    }

    /// Count chosen for an option (zero if absent).
    #[must_use]
    pub fn count(&self, option: &str) -> i64 {
        self.0.get(option).copied().unwrap_or(0)
    }

    /// Iterate selections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// True if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for LevelUpDecisions {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Result of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpSummary {
    /// Points spent.
    pub total_cost: u32,
    /// Points left unspent.
    pub points_remaining: u32,
}

/// Validate level-up selections against the tier table and default budget.
pub fn validate_level_up_decisions(
    decisions: &LevelUpDecisions,
    tier: Tier,
) -> Result<LevelUpSummary> {
    validate_level_up_decisions_with(decisions, tier, &RulesConfig::default())
}

/// Validate level-up selections against the tier table and a configured budget.
///
/// Selections with a zero or negative count, or an empty name, are ignored.
/// Spending less than the budget is allowed.
pub fn validate_level_up_decisions_with(
    decisions: &LevelUpDecisions,
    tier: Tier,
    config: &RulesConfig,
) -> Result<LevelUpSummary> {
    let mut total_cost: u32 = 0;

    for (name, count) in decisions.iter() {
        if count <= 0 || name.is_empty() {
            continue;
        }
        let count = u32::try_from(count).unwrap_or(u32::MAX);

        let Some(option) = tier.option(name) else {
            tracing::debug!(%tier, option = name, "Rejected unknown level-up option");
            return Err(RulesError::UnknownLevelUpOption(name.to_string()));
        };

        if count > option.max_selections {
            tracing::debug!(%tier, option = name, count, max = option.max_selections, "Rejected level-up selection");
            return Err(RulesError::ExceedsMaxSelections {
                option: name.to_string(),
                count,
                max: option.max_selections,
            });
        }

        total_cost = total_cost.saturating_add(count.saturating_mul(option.cost));
    }

    let available = config.level_up_points;
    if total_cost > available {
        tracing::debug!(%tier, total_cost, available, "Rejected level-up overspend");
        return Err(RulesError::ExceedsAvailablePoints {
            total: total_cost,
            available,
        });
    }

    Ok(LevelUpSummary {
        total_cost,
        points_remaining: available - total_cost,
    })
}
