//! Stat deltas from equipment feature text.
//!
//! Grammar, per clause (clauses split on `;`):
//!
//! ```text
//! clause := { delta }
//! delta  := sign digits ["bonus"] "to" ["your"] stat
//! sign   := "+" | "-" | "−" | "–"
//! ```
//!
//! A sign only starts a delta at the start of the clause or after
//! whitespace or punctuation, so damage dice like `d8+1` are left alone.
//! Clauses without any signed number are plain rules text and contribute
//! nothing. A signed number that is not followed by a known stat is kept in
//! [`ParsedFeature::unparsed`] and logged.

use super::modifiers::{EquipmentStatModifiers, Stat, Trait};

/// One recognized `<sign><number> to <stat>` delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDelta {
    /// Stat changed.
    pub stat: Stat,
    /// Signed amount.
    pub delta: i32,
}

/// Result of parsing one description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFeature {
    /// Recognized deltas in text order.
    pub deltas: Vec<StatDelta>,
    /// Text of deltas whose stat could not be recognized.
    pub unparsed: Vec<String>,
}

impl ParsedFeature {
    /// Sum of all recognized deltas.
    #[must_use]
    pub fn modifiers(&self) -> EquipmentStatModifiers {
        self.deltas
            .iter()
            .fold(EquipmentStatModifiers::zero(), |acc, d| acc.with(d.stat, d.delta))
    }

    /// True if every signed number was recognized.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unparsed.is_empty()
    }
}

/// Stat phrases, longest first within each group so prefixes don't shadow.
const STAT_PHRASES: &[(&str, Stat)] = &[
    ("all characters traits", Stat::AllTraits),
    ("all character traits", Stat::AllTraits),
    ("all traits", Stat::AllTraits),
    ("armor score", Stat::ArmorScore),
    ("evasion", Stat::Evasion),
    ("proficiency", Stat::Proficiency),
    ("attack rolls", Stat::AttackRolls),
    ("attack roll", Stat::AttackRolls),
    ("spellcast rolls", Stat::SpellcastRolls),
    ("spellcast roll", Stat::SpellcastRolls),
    ("major damage threshold", Stat::MajorThreshold),
    ("major threshold", Stat::MajorThreshold),
    ("severe damage threshold", Stat::SevereThreshold),
    ("severe threshold", Stat::SevereThreshold),
    ("damage thresholds", Stat::DamageThresholds),
    ("damage threshold", Stat::DamageThresholds),
    ("agility", Stat::Trait(Trait::Agility)),
    ("strength", Stat::Trait(Trait::Strength)),
    ("finesse", Stat::Trait(Trait::Finesse)),
    ("instinct", Stat::Trait(Trait::Instinct)),
    ("presence", Stat::Trait(Trait::Presence)),
    ("knowledge", Stat::Trait(Trait::Knowledge)),
];

/// A signed integer found in a clause, with its byte span.
#[derive(Debug, Clone, Copy)]
struct SignedNumber {
    start: usize,
    end: usize,
    value: i32,
}

fn sign_of(ch: char) -> Option<i32> {
    match ch {
        '+' => Some(1),
        '-' | '−' | '–' => Some(-1),
        _ => None,
    }
}

fn starts_token(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | ':' | ',' | ';'),
    }
}

fn signed_numbers(clause: &str) -> Vec<SignedNumber> {
    let chars: Vec<(usize, char)> = clause.char_indices().collect();
    let mut found = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, ch) = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p].1);

        if let Some(sign) = sign_of(ch).filter(|_| starts_token(prev)) {
            let mut j = i + 1;
            let mut value: i32 = 0;
            while let Some(digit) = chars.get(j).and_then(|(_, c)| c.to_digit(10)) {
                value = value.saturating_mul(10).saturating_add(digit as i32);
                j += 1;
            }
            if j > i + 1 {
                let end = chars.get(j).map_or(clause.len(), |(pos, _)| *pos);
                found.push(SignedNumber {
                    start,
                    end,
                    value: sign * value,
                });
                i = j;
                continue;
            }
        }
        i += 1;
    }

    found
}

fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if !c.is_alphanumeric() => Some(rest.trim_start()),
        Some(_) => None,
    }
}

/// Resolve the text after a signed number to a stat.
fn parse_stat_phrase(phrase: &str) -> Option<Stat> {
    let lower = phrase.trim().to_lowercase();
    let mut rest = lower.as_str();

    if let Some(r) = strip_word(rest, "bonus") {
        rest = r;
    }
    rest = strip_word(rest, "to")?;
    if let Some(r) = strip_word(rest, "your") {
        rest = r;
    }

    STAT_PHRASES
        .iter()
        .find(|(name, _)| strip_word(rest, name).is_some())
        .map(|(_, stat)| *stat)
}

/// Parse one feature description.
#[must_use]
pub fn parse_feature_text(description: &str) -> ParsedFeature {
    let mut parsed = ParsedFeature::default();

    for clause in description.split(';') {
        let numbers = signed_numbers(clause);
        for (k, number) in numbers.iter().enumerate() {
            let phrase_end = numbers.get(k + 1).map_or(clause.len(), |next| next.start);
            let phrase = &clause[number.end..phrase_end];

            match parse_stat_phrase(phrase) {
                Some(stat) => parsed.deltas.push(StatDelta {
                    stat,
                    delta: number.value,
                }),
                None => parsed
                    .unparsed
                    .push(clause[number.start..phrase_end].trim().to_string()),
            }
        }
    }

    parsed
}

/// Parse a named feature, logging any deltas that could not be recognized.
#[must_use]
pub fn parse_feature(item_name: &str, feature: &super::Feature) -> ParsedFeature {
    let parsed = parse_feature_text(&feature.description);
    for text in &parsed.unparsed {
        tracing::warn!(
            item = item_name,
            feature = %feature.name,
            text = %text,
            "Unrecognized stat modifier in feature text"
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(text: &str) -> Vec<(Stat, i32)> {
        parse_feature_text(text)
            .deltas
            .into_iter()
            .map(|d| (d.stat, d.delta))
            .collect()
    }

    #[test]
    fn test_single_delta() {
        assert_eq!(deltas("−1 to Evasion"), vec![(Stat::Evasion, -1)]);
        assert_eq!(deltas("+1 to Armor Score"), vec![(Stat::ArmorScore, 1)]);
        assert_eq!(deltas("-2 to evasion"), vec![(Stat::Evasion, -2)]);
    }

    #[test]
    fn test_semicolon_separated() {
        assert_eq!(
            deltas("−2 to Evasion; −1 to Agility"),
            vec![(Stat::Evasion, -2), (Stat::Trait(Trait::Agility), -1)]
        );
        assert_eq!(
            deltas("+2 to Armor Score; −1 to Evasion"),
            vec![(Stat::ArmorScore, 2), (Stat::Evasion, -1)]
        );
    }

    #[test]
    fn test_thresholds_and_rolls() {
        assert_eq!(
            deltas("−1 to Evasion; +3 to Severe damage threshold"),
            vec![(Stat::Evasion, -1), (Stat::SevereThreshold, 3)]
        );
        assert_eq!(deltas("+1 to Major damage threshold"), vec![(Stat::MajorThreshold, 1)]);
        assert_eq!(deltas("+2 to damage thresholds"), vec![(Stat::DamageThresholds, 2)]);
        assert_eq!(deltas("+1 to Spellcast Rolls"), vec![(Stat::SpellcastRolls, 1)]);
        assert_eq!(deltas("+1 to attack rolls"), vec![(Stat::AttackRolls, 1)]);
        assert_eq!(deltas("+1 to Proficiency"), vec![(Stat::Proficiency, 1)]);
    }

    #[test]
    fn test_bonus_and_your_fillers() {
        assert_eq!(deltas("Gain a +1 bonus to your Evasion"), vec![(Stat::Evasion, 1)]);
        assert_eq!(deltas("+1 to all character traits"), vec![(Stat::AllTraits, 1)]);
        assert_eq!(deltas("+1 to all characters traits"), vec![(Stat::AllTraits, 1)]);
    }

    #[test]
    fn test_descriptive_clause_contributes_nothing() {
        let parsed = parse_feature_text(
            "−1 to Evasion; on a successful attack, roll an additional damage die and discard the lowest result",
        );
        assert_eq!(parsed.deltas, vec![StatDelta { stat: Stat::Evasion, delta: -1 }]);
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_dice_are_not_deltas() {
        let parsed = parse_feature_text("Deal d8+3 damage to a target within Close range");
        assert!(parsed.deltas.is_empty());
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_unknown_stat_is_recorded() {
        let parsed = parse_feature_text("+1 to Hope; −1 to Evasion");
        assert_eq!(parsed.deltas, vec![StatDelta { stat: Stat::Evasion, delta: -1 }]);
        assert_eq!(parsed.unparsed, vec!["+1 to Hope".to_string()]);
    }

    #[test]
    fn test_comma_separated_deltas_in_one_clause() {
        assert_eq!(
            deltas("+1 to Strength, −1 to Finesse"),
            vec![
                (Stat::Trait(Trait::Strength), 1),
                (Stat::Trait(Trait::Finesse), -1)
            ]
        );
    }

    #[test]
    fn test_modifiers_sum() {
        let m = parse_feature_text("−1 to Evasion; −1 to Evasion; +1 to Armor Score").modifiers();
        assert_eq!(m.evasion, -2);
        assert_eq!(m.armor_score, 1);
    }

    #[test]
    fn test_stat_prefix_needs_word_boundary() {
        let parsed = parse_feature_text("+1 to Evasions");
        assert!(parsed.deltas.is_empty());
        assert_eq!(parsed.unparsed.len(), 1);
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        let parsed = parse_feature_text("+99999999999 to Evasion; +1 to Evasion");
        assert_eq!(parsed.modifiers().evasion, i32::MAX);
    }
}
