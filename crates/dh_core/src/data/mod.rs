//! Content data structures.
//!
//! Pure data definitions for equipment catalogs, designed to be
//! deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `dh_tools`.

mod catalog;

pub use catalog::{EquipmentCatalog, LoadoutSelection};
