use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub plot: PlotConfig,
    pub sensors: ConfigData,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    pub default_tab: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    pub histogram_bins: usize,
}

/// Sensor settings of the evaluated run, keyed by sensor id.
///
/// Ids are kept as strings since TOML table keys are strings.
/// Handed to every tab builder; tabs pick what they need.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigData {
    pub imu_rates: BTreeMap<String, f64>,
    pub camera_rates: BTreeMap<String, f64>,
}

const EKF_NODE: &str = "/EkfCalNode";
const ROS_PARAMETERS: &str = "ros__parameters";

impl ConfigData {
    /// Read sensor rates from an ekf-cal node parameter file.
    ///
    /// IMUs and cameras share one id counter starting at 1: IMUs take ids in
    /// `imu_list` order, then cameras continue in `camera_list` order. A
    /// null or empty list contributes no sensors.
    pub fn from_ekf_yaml(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        let params = yaml_key(&root, EKF_NODE, path)?;
        let params = yaml_key(params, ROS_PARAMETERS, path)?;

        let mut data = ConfigData::default();
        let mut id_counter: u32 = 1;
        for (list_key, table_key, rates) in [
            ("imu_list", "imu", &mut data.imu_rates),
            ("camera_list", "camera", &mut data.camera_rates),
        ] {
            let names = sensor_names(yaml_key(params, list_key, path)?, list_key, path)?;
            if names.is_empty() {
                continue;
            }

            let table = yaml_key(params, table_key, path)?;
            for name in names {
                let sensor = yaml_key(table, name, path)?;
                let rate = yaml_key(sensor, "rate", path)?
                    .as_f64()
                    .ok_or_else(|| ConfigError::InvalidValue {
                        path: path.to_path_buf(),
                        key: format!("{}.{}.rate", table_key, name),
                    })?;
                rates.insert(id_counter.to_string(), rate);
                id_counter += 1;
            }
        }

        log::debug!(
            "Read {} IMU and {} camera rates from {}",
            data.imu_rates.len(),
            data.camera_rates.len(),
            path.display()
        );
        Ok(data)
    }
}

fn yaml_key<'a>(value: &'a serde_yaml::Value, key: &str, path: &Path) -> Result<&'a serde_yaml::Value, ConfigError> {
    value.get(key).ok_or_else(|| ConfigError::MissingKey {
        path: path.to_path_buf(),
        key: key.to_string(),
    })
}

fn sensor_names<'a>(list: &'a serde_yaml::Value, key: &str, path: &Path) -> Result<Vec<&'a str>, ConfigError> {
    if list.is_null() {
        return Ok(Vec::new());
    }
    let invalid = || ConfigError::InvalidValue {
        path: path.to_path_buf(),
        key: key.to_string(),
    };
    list.as_sequence()
        .ok_or_else(invalid)?
        .iter()
        .map(|name| name.as_str().ok_or_else(invalid))
        .collect()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 250,
            default_tab: 0,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
