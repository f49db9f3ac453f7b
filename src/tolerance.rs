use crate::error::QaError;

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info};

/// Expected slice counts per series description plus metric thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    pub slice_counts: BTreeMap<String, u32>,
    pub piu_threshold: f64,
    /// Reserved; no SNR metric is computed yet.
    pub snr_threshold: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            slice_counts: BTreeMap::from([
                ("3-Plane Localizer".to_string(), 3),
                ("SAG T1 SE".to_string(), 11),
            ]),
            piu_threshold: 80.0,
            snr_threshold: 50.0,
        }
    }
}

/// A tolerance document as supplied by the user; every key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ToleranceOverrides {
    #[serde(default)]
    pub slice_counts: BTreeMap<String, u32>,
    pub piu_threshold: Option<f64>,
    pub snr_threshold: Option<f64>,
}

impl ToleranceConfig {
    /// Load a tolerance document and merge it onto the defaults.
    ///
    /// No path, or a path that does not exist, yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, QaError> {
        let Some(path) = path else {
            debug!("No tolerance file given, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            info!("Tolerance file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let overrides: ToleranceOverrides =
            serde_json::from_str(&contents).map_err(|source| QaError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::default().merged_with(overrides))
    }

    /// Supplied slice-count labels override or extend ours; supplied
    /// thresholds replace ours.
    pub fn merged_with(mut self, overrides: ToleranceOverrides) -> Self {
        self.slice_counts.extend(overrides.slice_counts);
        if let Some(piu_threshold) = overrides.piu_threshold {
            self.piu_threshold = piu_threshold;
        }
        if let Some(snr_threshold) = overrides.snr_threshold {
            self.snr_threshold = snr_threshold;
        }
        self
    }
}
