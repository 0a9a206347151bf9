//! Tiered gold currency.
//!
//! Wallets are stored as coins, handfuls, bags and chests
//! (10 coins = 1 handful, 10 handfuls = 1 bag, 10 bags = 1 chest).
//! All arithmetic goes through a flat count of base coins; the tiered form
//! is rebuilt greedily from the largest denomination down.
//!
//! Prices are quoted in handfuls, not coins. [`cost_to_handfuls`] flattens a
//! price with handful weights (1 / 10 / 100) while [`gold_to_coins`] flattens
//! a wallet with coin weights (1 / 10 / 100 / 1000).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coins in one handful.
pub const COINS_PER_HANDFUL: u64 = 10;
/// Coins in one bag.
pub const COINS_PER_BAG: u64 = 100;
/// Coins in one chest.
pub const COINS_PER_CHEST: u64 = 1000;

/// Handfuls in one bag (price tables).
pub const HANDFULS_PER_BAG: u64 = 10;
/// Handfuls in one chest (price tables).
pub const HANDFULS_PER_CHEST: u64 = 100;

/// Denomination a wallet prefers to be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Denomination {
    /// Individual coins.
    Coins,
    /// Handfuls of coins.
    #[default]
    Handfuls,
    /// Bags of handfuls.
    Bags,
    /// Chests of bags.
    Chests,
}

/// Denominated gold without display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoldParts {
    /// Chests (1000 coins each).
    pub chests: u32,
    /// Bags (100 coins each).
    pub bags: u32,
    /// Handfuls (10 coins each).
    pub handfuls: u32,
    /// Loose coins.
    pub coins: u32,
}

impl GoldParts {
    /// Flatten to base coins.
    #[must_use]
    pub fn total_coins(&self) -> u64 {
        u64::from(self.chests) * COINS_PER_CHEST
            + u64::from(self.bags) * COINS_PER_BAG
            + u64::from(self.handfuls) * COINS_PER_HANDFUL
            + u64::from(self.coins)
    }
}

/// Gold parts where any denomination may be left out.
///
/// Missing fields count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialGoldParts {
    /// Chests.
    #[serde(default)]
    pub chests: Option<u32>,
    /// Bags.
    #[serde(default)]
    pub bags: Option<u32>,
    /// Handfuls.
    #[serde(default)]
    pub handfuls: Option<u32>,
    /// Coins.
    #[serde(default)]
    pub coins: Option<u32>,
}

impl From<PartialGoldParts> for GoldParts {
    fn from(partial: PartialGoldParts) -> Self {
        Self {
            chests: partial.chests.unwrap_or(0),
            bags: partial.bags.unwrap_or(0),
            handfuls: partial.handfuls.unwrap_or(0),
            coins: partial.coins.unwrap_or(0),
        }
    }
}

/// A character's wallet.
///
/// The denominated fields need not be canonical (12 handfuls is fine);
/// the flattened coin count is what arithmetic uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoldAmount {
    /// Handfuls (10 coins each).
    #[serde(default)]
    pub handfuls: u32,
    /// Bags (100 coins each).
    #[serde(default)]
    pub bags: u32,
    /// Chests (1000 coins each).
    #[serde(default)]
    pub chests: u32,
    /// Loose coins.
    #[serde(default)]
    pub coins: u32,
    /// Whether the sheet shows the coin row.
    #[serde(default)]
    pub show_coins: bool,
    /// Preferred display denomination.
    #[serde(default)]
    pub display_denomination: Denomination,
}

impl GoldAmount {
    /// Build a wallet from parts with default display preferences.
    #[must_use]
    pub const fn from_parts(parts: GoldParts) -> Self {
        Self {
            handfuls: parts.handfuls,
            bags: parts.bags,
            chests: parts.chests,
            coins: parts.coins,
            show_coins: false,
            display_denomination: Denomination::Handfuls,
        }
    }

    /// Denominated parts of this wallet, as stored.
    #[must_use]
    pub const fn parts(&self) -> GoldParts {
        GoldParts {
            chests: self.chests,
            bags: self.bags,
            handfuls: self.handfuls,
            coins: self.coins,
        }
    }

    /// Replace the denominated parts, keeping display preferences.
    #[must_use]
    pub const fn with_parts(self, parts: GoldParts) -> Self {
        Self {
            handfuls: parts.handfuls,
            bags: parts.bags,
            chests: parts.chests,
            coins: parts.coins,
            show_coins: self.show_coins,
            display_denomination: self.display_denomination,
        }
    }

    /// Wallet value in (possibly fractional) handfuls.
    #[must_use]
    pub fn as_handfuls(&self) -> f64 {
        gold_to_coins(self) as f64 / COINS_PER_HANDFUL as f64
    }
}

impl fmt::Display for GoldAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_gold_amount(self.as_handfuls()))
    }
}

/// A price from an equipment or shop table, in handful units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoldCost {
    /// Handfuls.
    #[serde(default)]
    pub handfuls: u32,
    /// Bags (10 handfuls each).
    #[serde(default)]
    pub bags: u32,
    /// Chests (100 handfuls each).
    #[serde(default)]
    pub chests: u32,
}

/// Flatten a wallet to base coins.
#[must_use]
pub fn gold_to_coins(amount: &GoldAmount) -> u64 {
    amount.parts().total_coins()
}

/// Decompose a coin count into chests, bags, handfuls and coins.
///
/// Negative input clamps to zero.
#[must_use]
pub fn coins_to_gold(coins: i64) -> GoldParts {
    let total = u64::try_from(coins).unwrap_or(0);

    let chests = total / COINS_PER_CHEST;
    let rest = total % COINS_PER_CHEST;
    let bags = rest / COINS_PER_BAG;
    let rest = rest % COINS_PER_BAG;
    let handfuls = rest / COINS_PER_HANDFUL;
    let coins = rest % COINS_PER_HANDFUL;

    GoldParts {
        chests: u32::try_from(chests).unwrap_or(u32::MAX),
        bags: bags as u32,
        handfuls: handfuls as u32,
        coins: coins as u32,
    }
}

/// Flatten a handful-denominated price.
#[must_use]
pub fn cost_to_handfuls(cost: &GoldCost) -> u64 {
    u64::from(cost.handfuls)
        + u64::from(cost.bags) * HANDFULS_PER_BAG
        + u64::from(cost.chests) * HANDFULS_PER_CHEST
}

/// Price in coins, or zero for free, negative and NaN prices.
fn price_in_coins(price_in_handfuls: f64) -> Option<u64> {
    if price_in_handfuls.is_nan() || price_in_handfuls <= 0.0 {
        return Some(0);
    }
    if !price_in_handfuls.is_finite() {
        return None;
    }
    Some((price_in_handfuls * COINS_PER_HANDFUL as f64).round() as u64)
}

/// Check whether a wallet covers a price given in handfuls.
///
/// A zero price is always affordable.
#[must_use]
pub fn can_afford(amount: &GoldAmount, price_in_handfuls: f64) -> bool {
    if price_in_handfuls.is_nan() || price_in_handfuls <= 0.0 {
        return true;
    }
    amount.as_handfuls() >= price_in_handfuls
}

/// Pay a price given in handfuls.
///
/// Returns `None` when the wallet cannot cover it. Display preferences on
/// the wallet are carried over to the result unchanged.
#[must_use]
pub fn subtract_gold(amount: &GoldAmount, price_in_handfuls: f64) -> Option<GoldAmount> {
    if !can_afford(amount, price_in_handfuls) {
        tracing::debug!(
            available = amount.as_handfuls(),
            price = price_in_handfuls,
            "Insufficient funds"
        );
        return None;
    }

    let price = price_in_coins(price_in_handfuls)?;
    let remaining = gold_to_coins(amount).saturating_sub(price);
    let parts = coins_to_gold(i64::try_from(remaining).unwrap_or(i64::MAX));
    Some(amount.with_parts(parts))
}

/// Add a handful-denominated amount to a wallet.
///
/// Negative or non-finite amounts add nothing.
#[must_use]
pub fn add_gold(amount: &GoldAmount, handfuls: f64) -> GoldAmount {
    let added = if handfuls.is_finite() && handfuls > 0.0 {
        (handfuls * COINS_PER_HANDFUL as f64).round() as u64
    } else {
        0
    };
    let total = gold_to_coins(amount).saturating_add(added);
    amount.with_parts(coins_to_gold(i64::try_from(total).unwrap_or(i64::MAX)))
}

/// Split a handful count into whole handfuls and loose coins.
///
/// The fraction is rounded to the nearest coin; ten coins carry into a
/// handful.
fn split_handfuls(value: f64) -> (u64, u64) {
    let safe = if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    };
    let mut whole = safe.floor() as u64;
    let mut coins = ((safe - safe.floor()) * COINS_PER_HANDFUL as f64).round() as u64;
    if coins >= COINS_PER_HANDFUL {
        whole += 1;
        coins -= COINS_PER_HANDFUL;
    }
    (whole, coins)
}

/// Decompose a (possibly fractional) handful count into parts.
///
/// Negative and non-finite values clamp to zero.
#[must_use]
pub fn handfuls_to_gold_parts(value: f64) -> GoldParts {
    let (whole, coins) = split_handfuls(value);
    GoldParts {
        chests: u32::try_from(whole / HANDFULS_PER_CHEST).unwrap_or(u32::MAX),
        bags: ((whole % HANDFULS_PER_CHEST) / HANDFULS_PER_BAG) as u32,
        handfuls: (whole % HANDFULS_PER_BAG) as u32,
        coins: coins as u32,
    }
}

/// Recombine parts into a (possibly fractional) handful count.
#[must_use]
pub fn gold_parts_to_handfuls(parts: &GoldParts) -> f64 {
    f64::from(parts.chests) * HANDFULS_PER_CHEST as f64
        + f64::from(parts.bags) * HANDFULS_PER_BAG as f64
        + f64::from(parts.handfuls)
        + f64::from(parts.coins) / COINS_PER_HANDFUL as f64
}

fn plural(count: u32, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

/// Render a handful count, e.g. `"1 chest, 2 bags, 3 handfuls"`.
///
/// Zero renders as `"0 handfuls"`.
#[must_use]
pub fn format_gold_amount(handfuls_value: f64) -> String {
    let parts = handfuls_to_gold_parts(handfuls_value);

    let mut out = Vec::with_capacity(4);
    if parts.chests > 0 {
        out.push(plural(parts.chests, "chest"));
    }
    if parts.bags > 0 {
        out.push(plural(parts.bags, "bag"));
    }
    if parts.handfuls > 0 {
        out.push(plural(parts.handfuls, "handful"));
    }
    if parts.coins > 0 {
        out.push(plural(parts.coins, "coin"));
    }

    if out.is_empty() {
        return "0 handfuls".to_string();
    }
    out.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(chests: u32, bags: u32, handfuls: u32, coins: u32) -> GoldAmount {
        GoldAmount::from_parts(GoldParts {
            chests,
            bags,
            handfuls,
            coins,
        })
    }

    #[test]
    fn test_gold_to_coins_weights() {
        assert_eq!(gold_to_coins(&wallet(1, 2, 3, 4)), 1234);
        assert_eq!(gold_to_coins(&wallet(0, 0, 12, 0)), 120);
        assert_eq!(gold_to_coins(&GoldAmount::default()), 0);
    }

    #[test]
    fn test_coins_to_gold_greedy() {
        assert_eq!(
            coins_to_gold(1234),
            GoldParts {
                chests: 1,
                bags: 2,
                handfuls: 3,
                coins: 4
            }
        );
        assert_eq!(coins_to_gold(-50), GoldParts::default());
        assert_eq!(coins_to_gold(9).coins, 9);
    }

    #[test]
    fn test_cost_uses_handful_weights() {
        let cost = GoldCost {
            handfuls: 3,
            bags: 2,
            chests: 1,
        };
        assert_eq!(cost_to_handfuls(&cost), 123);
    }

    #[test]
    fn test_can_afford() {
        let purse = wallet(0, 0, 5, 0);
        assert!(can_afford(&purse, 5.0));
        assert!(!can_afford(&purse, 5.1));
        assert!(can_afford(&purse, 0.0));
        assert!(can_afford(&GoldAmount::default(), 0.0));
        assert!(can_afford(&GoldAmount::default(), f64::NAN));
        assert!(!can_afford(&purse, f64::INFINITY));
    }

    #[test]
    fn test_subtract_gold_insufficient() {
        let purse = wallet(0, 0, 2, 0);
        assert_eq!(subtract_gold(&purse, 5.0), None);
    }

    #[test]
    fn test_subtract_gold_keeps_display_preferences() {
        let purse = GoldAmount {
            show_coins: true,
            display_denomination: Denomination::Bags,
            ..wallet(0, 1, 0, 0)
        };

        let paid = subtract_gold(&purse, 3.5).expect("affordable");
        assert_eq!(gold_to_coins(&paid), 65);
        assert_eq!(paid.handfuls, 6);
        assert_eq!(paid.coins, 5);
        assert!(paid.show_coins);
        assert_eq!(paid.display_denomination, Denomination::Bags);
    }

    #[test]
    fn test_subtract_gold_normalizes_denominations() {
        // 15 handfuls is not canonical; the result is.
        let purse = wallet(0, 0, 15, 0);
        let paid = subtract_gold(&purse, 1.0).expect("affordable");
        assert_eq!(paid.bags, 1);
        assert_eq!(paid.handfuls, 4);
    }

    #[test]
    fn test_add_gold() {
        let purse = wallet(0, 0, 9, 5);
        let richer = add_gold(&purse, 0.5);
        assert_eq!(richer.bags, 1);
        assert_eq!(richer.handfuls, 0);
        assert_eq!(add_gold(&purse, -3.0), purse.with_parts(coins_to_gold(95)));
    }

    #[test]
    fn test_format_gold_amount() {
        assert_eq!(format_gold_amount(123.0), "1 chest, 2 bags, 3 handfuls");
        assert_eq!(format_gold_amount(3.5), "3 handfuls, 5 coins");
        assert_eq!(format_gold_amount(1.0), "1 handful");
        assert_eq!(format_gold_amount(0.1), "1 coin");
        assert_eq!(format_gold_amount(0.0), "0 handfuls");
        assert_eq!(format_gold_amount(-4.0), "0 handfuls");
        assert_eq!(format_gold_amount(f64::NAN), "0 handfuls");
        assert_eq!(format_gold_amount(200.0), "2 chests");
    }

    #[test]
    fn test_fraction_carries_into_handful() {
        assert_eq!(format_gold_amount(2.96), "3 handfuls");
    }

    #[test]
    fn test_handfuls_to_gold_parts() {
        assert_eq!(
            handfuls_to_gold_parts(123.4),
            GoldParts {
                chests: 1,
                bags: 2,
                handfuls: 3,
                coins: 4
            }
        );
        assert_eq!(handfuls_to_gold_parts(-1.0), GoldParts::default());
    }

    #[test]
    fn test_gold_parts_to_handfuls_defaults_missing() {
        let partial = PartialGoldParts {
            bags: Some(2),
            coins: Some(5),
            ..Default::default()
        };
        let value = gold_parts_to_handfuls(&partial.into());
        assert!((value - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(wallet(0, 1, 2, 3).to_string(), "1 bag, 2 handfuls, 3 coins");
    }
}
