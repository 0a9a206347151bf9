//! Daggerheart rules core - Development Tools

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dh_core::config::RulesConfig;
use dh_core::currency::{format_gold_amount, handfuls_to_gold_parts, GoldParts};
use dh_core::damage::{
    classify_damage, compute_auto_thresholds_with, get_thresholds, ClassifyOptions,
    DamageSeverity, DamageThresholds,
};
use dh_core::data::LoadoutSelection;
use dh_core::error::RulesError;
use dh_core::equipment::{EquipmentStatModifiers, Trait};
use dh_core::level_up::{validate_level_up_decisions_with, LevelUpDecisions, Tier};
use dh_tools::loader::{self, DataLoadError};

#[derive(Parser)]
#[command(name = "dh-tools")]
#[command(about = "Development tools for the Daggerheart rules core")]
struct Cli {
    /// Rules configuration file (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate data files
    Validate {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: PathBuf,
    },
    /// Break a handful amount into chests, bags, handfuls and coins
    Gold {
        /// Amount in handfuls (fractions are coins)
        handfuls: f64,
    },
    /// Classify a hit against damage thresholds
    Damage {
        /// Damage dealt
        hit: f64,
        /// Major threshold
        #[arg(long)]
        major: i32,
        /// Severe threshold
        #[arg(long)]
        severe: i32,
        /// Check for a Massive hit
        #[arg(long)]
        critical: bool,
        /// Override the double-Severe threshold
        #[arg(long)]
        double_severe: Option<f64>,
    },
    /// Derive thresholds from maximum Hit Points
    Thresholds {
        /// Maximum Hit Points
        max_hp: i64,
    },
    /// Check level-up choices, e.g. `level-up 2-4 traits=1 evasion=1`
    LevelUp {
        /// Tier: 1, 2-4, 5-7 or 8-10
        tier: Tier,
        /// Choices as name=count
        #[arg(value_parser = parse_choice)]
        choices: Vec<(String, i64)>,
    },
    /// Total the stat modifiers and thresholds of a loadout
    Loadout {
        /// Catalog file or data directory
        catalog: PathBuf,
        /// Armor name
        #[arg(long)]
        armor: Option<String>,
        /// Primary weapon name
        #[arg(long)]
        primary: Option<String>,
        /// Secondary weapon or shield name
        #[arg(long)]
        secondary: Option<String>,
        /// Wheelchair name
        #[arg(long)]
        wheelchair: Option<String>,
        /// Character level
        #[arg(long, default_value_t = 1)]
        level: u32,
    },
}

fn parse_choice(s: &str) -> Result<(String, i64), String> {
    let (name, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=count, got '{s}'"))?;
    let count = count
        .trim()
        .parse()
        .map_err(|e| format!("bad count in '{s}': {e}"))?;
    Ok((name.trim().to_string(), count))
}

/// Failures reported by the command line.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Data(#[from] DataLoadError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("{count} validation error(s) in '{path}'")]
    Invalid { path: String, count: usize },

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GoldReport {
    text: String,
    parts: GoldParts,
}

#[derive(Serialize)]
struct DamageReport {
    severity: DamageSeverity,
    hit_points: u8,
}

#[derive(Serialize)]
struct LoadoutReport {
    thresholds: DamageThresholds,
    modifiers: EquipmentStatModifiers,
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), CliError> {
    if json {
        let out = serde_json::to_string_pretty(value)?;
        println!("{out}");
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn describe_modifiers(m: &EquipmentStatModifiers) -> String {
    let fields = [
        ("Evasion", m.evasion),
        ("Proficiency", m.proficiency),
        ("Armor Score", m.armor_score),
        ("Attack Rolls", m.attack_rolls),
        ("Spellcast Rolls", m.spellcast_rolls),
        ("Major Threshold", m.major_threshold),
        ("Severe Threshold", m.severe_threshold),
    ];
    let mut lines: Vec<String> = fields
        .iter()
        .filter(|(_, v)| *v != 0)
        .map(|(name, v)| format!("{name}: {v:+}"))
        .collect();
    lines.extend(Trait::ALL.iter().filter_map(|t| {
        let v = m.trait_modifier(*t);
        (v != 0).then(|| format!("{t}: {v:+}"))
    }));
    if lines.is_empty() {
        return "No modifiers".to_string();
    }
    lines.join("\n")
}

fn load_config(path: Option<&Path>) -> Result<RulesConfig, DataLoadError> {
    match path {
        Some(p) => loader::load_config_file(p),
        None => Ok(RulesConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating data files in: {}", path.display());
            let report = dh_tools::validate::validate_data_directory(&path)?;
            if !report.is_ok() {
                for e in &report.errors {
                    tracing::error!("{e}");
                }
                return Err(CliError::Invalid {
                    path: path.display().to_string(),
                    count: report.errors.len(),
                });
            }
            tracing::info!(
                files = report.files_checked,
                armor = report.armor,
                weapons = report.weapons,
                "Validation passed"
            );
        }
        Commands::Gold { handfuls } => {
            let report = GoldReport {
                text: format_gold_amount(handfuls),
                parts: handfuls_to_gold_parts(handfuls),
            };
            emit(json, &report, || report.text.clone())?;
        }
        Commands::Damage {
            hit,
            major,
            severe,
            critical,
            double_severe,
        } => {
            let mut opts = ClassifyOptions {
                critical,
                ..ClassifyOptions::default()
            };
            if let Some(threshold) = double_severe {
                opts = opts.with_double_severe(threshold);
            }
            let severity = classify_damage(hit, &DamageThresholds::new(major, severe), opts);
            let report = DamageReport {
                severity,
                hit_points: severity.hit_points(),
            };
            emit(json, &report, || {
                format!("{} ({} HP)", severity.label(), report.hit_points)
            })?;
        }
        Commands::Thresholds { max_hp } => {
            let t = get_thresholds(max_hp);
            emit(json, &t, || format!("Major {} / Severe {}", t.major, t.severe))?;
        }
        Commands::LevelUp { tier, choices } => {
            let decisions: LevelUpDecisions = choices.into_iter().collect();
            let summary = validate_level_up_decisions_with(&decisions, tier, &config)?;
            emit(json, &summary, || {
                format!(
                    "Tier {tier}: spent {} point(s), {} remaining",
                    summary.total_cost, summary.points_remaining
                )
            })?;
        }
        Commands::Loadout {
            catalog,
            armor,
            primary,
            secondary,
            wheelchair,
            level,
        } => {
            let catalog = loader::load_catalog(&catalog)?;
            let selection = LoadoutSelection {
                armor,
                primary,
                secondary,
                wheelchair,
            };
            let loadout = catalog.loadout(&selection)?;
            let report = LoadoutReport {
                thresholds: compute_auto_thresholds_with(loadout.armor.as_ref(), level, &config),
                modifiers: loadout.total_modifiers(),
            };
            emit(json, &report, || {
                format!(
                    "Thresholds: Major {} / Severe {}\n{}",
                    report.thresholds.major,
                    report.thresholds.severe,
                    describe_modifiers(&report.modifiers)
                )
            })?;
        }
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dh_core::equipment::Stat;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("traits=1"), Ok(("traits".to_string(), 1)));
        assert_eq!(parse_choice(" evasion = 2 "), Ok(("evasion".to_string(), 2)));
        assert!(parse_choice("traits").is_err());
        assert!(parse_choice("traits=lots").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["dh-tools", "level-up", "5-7", "proficiency=1"])
            .expect("valid args");
        match cli.command {
            Commands::LevelUp { tier, choices } => {
                assert_eq!(tier, Tier::FiveToSeven);
                assert_eq!(choices, vec![("proficiency".to_string(), 1)]);
            }
            _ => panic!("wrong subcommand"),
        }

        assert!(Cli::try_parse_from(["dh-tools", "level-up", "11-12"]).is_err());
    }

    #[test]
    fn test_describe_modifiers() {
        let m = EquipmentStatModifiers::zero()
            .with(Stat::Evasion, -1)
            .with(Stat::Trait(Trait::Agility), -1);
        assert_eq!(describe_modifiers(&m), "Evasion: -1\nAgility: -1");
        assert_eq!(describe_modifiers(&EquipmentStatModifiers::zero()), "No modifiers");
    }

    #[test]
    fn test_run_reports_cli_errors() {
        let cli = Cli::try_parse_from(["dh-tools", "level-up", "2-4", "traits=2", "evasion=1"])
            .expect("valid args");
        assert!(matches!(
            run(cli),
            Err(CliError::Rules(RulesError::ExceedsAvailablePoints { .. }))
        ));

        let tmp = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(
            tmp.path().join("dupes.ron"),
            r#"EquipmentCatalog(weapons: [Weapon(name: "Dagger"), Weapon(name: "dagger")])"#,
        )
        .expect("write");
        let path = tmp.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["dh-tools", "validate", path.as_str()]).expect("valid args");
        match run(cli) {
            Err(e @ CliError::Invalid { count: 1, .. }) => {
                assert!(e.to_string().starts_with("1 validation error(s)"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }

        let missing = tmp.path().join("missing").to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["dh-tools", "validate", missing.as_str()])
            .expect("valid args");
        assert!(matches!(
            run(cli),
            Err(CliError::Data(DataLoadError::DirectoryNotFound(_)))
        ));
    }
}
