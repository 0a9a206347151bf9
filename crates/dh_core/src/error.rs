//! Error types for rules validation and data loading.

use thiserror::Error;

/// Result type alias using [`RulesError`].
pub type Result<T> = std::result::Result<T, RulesError>;

/// Top-level error type for rules violations and malformed data.
///
/// Currency, damage and equipment calculations never fail; they clamp or
/// default instead. Only level-up validation and data parsing produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A level-up decision named an option the tier does not offer.
    #[error("Unknown level-up option: {0}")]
    UnknownLevelUpOption(String),

    /// A level-up option was selected more times than allowed.
    #[error("Level-up option '{option}' exceeds max selections: chose {count}, max {max}")]
    ExceedsMaxSelections {
        /// Option name.
        option: String,
        /// Number of times chosen.
        count: u32,
        /// Maximum selections for the option.
        max: u32,
    },

    /// The summed cost of all selections is over the level budget.
    #[error("Total cost exceeds available points: {total} > {available}")]
    ExceedsAvailablePoints {
        /// Summed cost of all selections.
        total: u32,
        /// Points available for the level.
        available: u32,
    },

    /// A tier label did not match any character tier.
    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or label) of the data that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Data parsed but failed a consistency check.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
