//! Data validation utilities.

use std::path::Path;

use dh_core::data::EquipmentCatalog;

use crate::loader::{is_rules_file, load_catalog_file, load_config_file, ron_files, DataLoadError};

/// Outcome of validating a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of RON files examined.
    pub files_checked: usize,
    /// Armor entries across all catalog files.
    pub armor: usize,
    /// Weapon entries across all catalog files.
    pub weapons: usize,
    /// Every problem found, in file order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no problems were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate all RON data files in a directory.
///
/// Unlike [`crate::loader::load_data_directory`] this keeps going after a
/// bad file so every problem is reported at once. Catalog checks run on the
/// merged catalog, so names duplicated across files are caught.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be read.
pub fn validate_data_directory(path: &Path) -> Result<ValidationReport, DataLoadError> {
    let mut report = ValidationReport::default();
    let mut merged = EquipmentCatalog::default();

    for file in ron_files(path)? {
        report.files_checked += 1;
        if is_rules_file(&file) {
            if let Err(e) = load_config_file(&file) {
                report.errors.push(e.to_string());
            }
            continue;
        }

        match load_catalog_file(&file) {
            Ok(fragment) => {
                merged.armor.extend(fragment.armor);
                merged.weapons.extend(fragment.weapons);
            }
            Err(e) => report.errors.push(e.to_string()),
        }
    }

    report.armor = merged.armor.len();
    report.weapons = merged.weapons.len();
    report.errors.extend(merged.validate());

    for error in &report.errors {
        tracing::warn!("{error}");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::loader::tests::repo_data_dir;
    use crate::loader::RULES_FILE;

    #[test]
    fn test_repo_data_is_valid() {
        let report = validate_data_directory(&repo_data_dir()).expect("readable");
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.armor > 0);
        assert!(report.weapons > 0);
    }

    #[test]
    fn test_fixture_catalog_is_valid() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path();
        let catalog = dh_test_utils::fixtures::srd_catalog();
        let text = ron::ser::to_string_pretty(&catalog, ron::ser::PrettyConfig::default())
            .expect("serialize");
        fs::write(dir.join("srd.ron"), text).expect("write");

        let report = validate_data_directory(dir).expect("readable");
        assert!(report.is_ok(), "{:?}", report.errors);
        assert_eq!(report.armor, catalog.armor.len());
        assert_eq!(report.weapons, catalog.weapons.len());
    }

    #[test]
    fn test_collects_every_problem() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path();
        fs::write(dir.join("a.ron"), "EquipmentCatalog(weapons: [").expect("write");
        fs::write(
            dir.join("b.ron"),
            r#"EquipmentCatalog(weapons: [Weapon(name: "Dagger", damage: "d8+1 phy")])"#,
        )
        .expect("write");
        fs::write(
            dir.join("c.ron"),
            r#"EquipmentCatalog(weapons: [Weapon(name: "dagger", damage: "d6 phy")])"#,
        )
        .expect("write");
        fs::write(dir.join(RULES_FILE), "RulesConfig(level_up_points: 0)").expect("write");

        let report = validate_data_directory(dir).expect("readable");
        assert_eq!(report.files_checked, 4);
        assert_eq!(report.weapons, 2);
        // Parse error, duplicate name, bad config.
        assert_eq!(report.errors.len(), 3, "{:?}", report.errors);
        assert!(report.errors.iter().any(|e| e.contains("more than once")));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("missing");
        assert!(validate_data_directory(&dir).is_err());
    }
}
