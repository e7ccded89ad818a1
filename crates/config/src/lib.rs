//! Transfer case manifests for the Edelbaum transfer calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use edelbaum_core::units::deg_to_rad;
use edelbaum_lowthrust::EdelbaumInputs;
use serde::Deserialize;
use thiserror::Error;

fn default_profile_samples() -> usize {
    200
}

/// One circular-to-circular transfer described in a manifest. Angles are in degrees.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransferCaseConfig {
    pub name: String,
    #[serde(default)]
    pub central_body: Option<String>,
    pub mu_km3_s2: f64,
    pub initial_semimajor_axis_km: f64,
    pub final_semimajor_axis_km: f64,
    pub initial_inclination_deg: f64,
    pub final_inclination_deg: f64,
    pub acceleration_km_s2: f64,
    #[serde(default = "default_profile_samples")]
    pub profile_samples: usize,
}

impl TransferCaseConfig {
    /// Model inputs with inclinations converted to radians.
    pub fn to_inputs(&self) -> EdelbaumInputs {
        EdelbaumInputs {
            mu_km3_s2: self.mu_km3_s2,
            initial_semimajor_axis_km: self.initial_semimajor_axis_km,
            final_semimajor_axis_km: self.final_semimajor_axis_km,
            initial_inclination_rad: deg_to_rad(self.initial_inclination_deg),
            final_inclination_rad: deg_to_rad(self.final_inclination_deg),
            acceleration_km_s2: self.acceleration_km_s2,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("transfer case '{0}' not found")]
    CaseNotFound(String),
}

/// Load transfer cases from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_transfer_cases<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<TransferCaseConfig>, ConfigError> {
    load_records(path)
}

/// Find a case by name (case-insensitive).
pub fn find_case<'a>(
    cases: &'a [TransferCaseConfig],
    name: &str,
) -> Result<&'a TransferCaseConfig, ConfigError> {
    let upper = name.to_uppercase();
    cases
        .iter()
        .find(|case| case.name.to_uppercase() == upper)
        .ok_or_else(|| ConfigError::CaseNotFound(name.to_string()))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
