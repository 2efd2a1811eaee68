//! Configuration for loading the network.

use std::path::PathBuf;
use std::str::FromStr;

use super::repair::DEFAULT_BRIDGE_WEIGHT;

/// What to do when the loaded network is disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepairPolicy {
    /// Leave the network as loaded and log the disconnection.
    #[default]
    Off,
    /// Add one bridge edge per extra component.
    Bridge,
}

impl FromStr for RepairPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(RepairPolicy::Off),
            "bridge" => Ok(RepairPolicy::Bridge),
            _ => Err(ConfigError::RepairPolicy(s.to_string())),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown repair policy {0:?} (expected \"off\" or \"bridge\")")]
    RepairPolicy(String),

    #[error("invalid bridge weight {0:?}: expected a non-negative number of minutes")]
    BridgeWeight(String),
}

/// Where to read the network from, and how to fix it up.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Path to the station records.
    pub stations_path: PathBuf,

    /// Path to the edge records.
    pub edges_path: PathBuf,

    /// Repair policy for disconnected networks.
    pub repair: RepairPolicy,

    /// Weight of bridge edges added by repair (minutes).
    pub bridge_weight: f64,
}

impl NetworkConfig {
    /// Create a configuration reading from the given files.
    pub fn new(stations_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            stations_path: stations_path.into(),
            edges_path: edges_path.into(),
            repair: RepairPolicy::default(),
            bridge_weight: DEFAULT_BRIDGE_WEIGHT,
        }
    }

    /// Set the repair policy.
    pub fn with_repair(mut self, repair: RepairPolicy) -> Self {
        self.repair = repair;
        self
    }

    /// Set the bridge edge weight.
    pub fn with_bridge_weight(mut self, minutes: f64) -> Self {
        self.bridge_weight = minutes;
        self
    }

    /// Read the configuration from `METRO_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("METRO_STATIONS") {
            config.stations_path = path.into();
        }
        if let Some(path) = lookup("METRO_EDGES") {
            config.edges_path = path.into();
        }
        if let Some(policy) = lookup("METRO_REPAIR") {
            config.repair = policy.parse()?;
        }
        if let Some(weight) = lookup("METRO_BRIDGE_WEIGHT") {
            config.bridge_weight = weight
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or(ConfigError::BridgeWeight(weight))?;
        }

        Ok(config)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new("data/station.txt", "data/liaison.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = NetworkConfig::default();

        assert_eq!(config.stations_path, PathBuf::from("data/station.txt"));
        assert_eq!(config.edges_path, PathBuf::from("data/liaison.txt"));
        assert_eq!(config.repair, RepairPolicy::Off);
        assert_eq!(config.bridge_weight, 20.0);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = NetworkConfig::from_lookup(lookup(&[
            ("METRO_STATIONS", "/srv/metro/stations.txt"),
            ("METRO_REPAIR", "Bridge"),
            ("METRO_BRIDGE_WEIGHT", "2.5"),
        ]))
        .unwrap();

        assert_eq!(config.stations_path, PathBuf::from("/srv/metro/stations.txt"));
        assert_eq!(config.edges_path, PathBuf::from("data/liaison.txt"));
        assert_eq!(config.repair, RepairPolicy::Bridge);
        assert_eq!(config.bridge_weight, 2.5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = NetworkConfig::from_lookup(lookup(&[("METRO_REPAIR", "all-pairs")])).unwrap_err();
        assert_eq!(err, ConfigError::RepairPolicy("all-pairs".into()));

        let err =
            NetworkConfig::from_lookup(lookup(&[("METRO_BRIDGE_WEIGHT", "-1")])).unwrap_err();
        assert_eq!(err, ConfigError::BridgeWeight("-1".into()));
    }

    #[test]
    fn builder_methods() {
        let config = NetworkConfig::new("s.txt", "e.txt")
            .with_repair(RepairPolicy::Bridge)
            .with_bridge_weight(1.0);

        assert_eq!(config.repair, RepairPolicy::Bridge);
        assert_eq!(config.bridge_weight, 1.0);
    }
}
