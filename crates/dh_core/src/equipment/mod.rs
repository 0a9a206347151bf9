//! Equipment records and stat aggregation.
//!
//! Armor, weapons, shields and wheelchairs each resolve to an
//! [`EquipmentStatModifiers`] set, and a loadout sums them. Armor's own
//! baseline is kept out of that sum.

pub mod feature_parser;
mod modifiers;
mod normalize;
mod records;

pub use feature_parser::{parse_feature_text, ParsedFeature, StatDelta};
pub use modifiers::{EquipmentStatModifiers, Stat, Trait};
pub use normalize::{
    aggregate_equipment_stats, normalize_equipment, Loadout, ModifierSource, NormalizedModifiers,
};
pub use records::{Armor, Burden, Equipment, EquipmentItem, Feature, Range, Weapon};
