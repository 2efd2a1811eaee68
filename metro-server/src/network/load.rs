//! Loading a network from the configured data files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::planner::connected_components;

use super::builder::{DataIntegrityError, NetworkBuilder};
use super::config::{NetworkConfig, RepairPolicy};
use super::graph::Network;
use super::records::{parse_edges, parse_stations};
use super::repair::bridge_components;

/// Errors from loading a network.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A data file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The records do not form a valid network
    #[error("invalid network data: {0}")]
    Integrity(#[from] DataIntegrityError),
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, parse and build the network described by `config`.
///
/// Malformed lines are skipped (and logged by the parser). Dangling edge
/// references abort the load. A disconnected result is bridged or merely
/// reported, depending on the repair policy.
pub fn load_network(config: &NetworkConfig) -> Result<Network, LoadError> {
    let stations = parse_stations(&read(&config.stations_path)?);
    let edges = parse_edges(&read(&config.edges_path)?);

    let mut network = NetworkBuilder::new()
        .stations(stations.records)
        .edges(edges.records)
        .build()?;

    let components = connected_components(&network).len();
    if components > 1 {
        match config.repair {
            RepairPolicy::Off => {
                warn!(components, "Network is disconnected; some routes will not exist");
            }
            RepairPolicy::Bridge => {
                bridge_components(&mut network, config.bridge_weight);
            }
        }
    }

    info!(
        stations = network.station_count(),
        edges = network.edge_count(),
        bridges = network.bridge_count(),
        lines = network.termini().len(),
        skipped_stations = stations.skipped,
        skipped_edges = edges.skipped,
        "Loaded network"
    );

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::planner::is_connected;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    const STATIONS: &str = "\
AAA 1 Alpha 1;True 0
BBB 2 Beta 1;False 0
CCC 3 Gamma 1;True 1
DDD 4 Delta 2;True 0
broken record
EEE 5 Epsilon 2;True 1
";

    #[test]
    fn loads_and_skips_bad_lines() {
        let stations = file(STATIONS);
        let edges = file("E 1 2 60\nE 2 3 60\nE 4 5 30\nE 4\n");
        let config = NetworkConfig::new(stations.path(), edges.path());

        let network = load_network(&config).unwrap();

        assert_eq!(network.station_count(), 5);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.bridge_count(), 0);
        assert!(!is_connected(&network));
    }

    #[test]
    fn bridge_policy_connects_network() {
        let stations = file(STATIONS);
        let edges = file("E 1 2 60\nE 2 3 60\nE 4 5 30\n");
        let config =
            NetworkConfig::new(stations.path(), edges.path()).with_repair(RepairPolicy::Bridge);

        let network = load_network(&config).unwrap();

        assert!(is_connected(&network));
        assert_eq!(network.bridge_count(), 1);
        assert_eq!(network.weight(StationId(1), StationId(4)), Some(20.0));
    }

    #[test]
    fn dangling_edge_aborts_load() {
        let stations = file(STATIONS);
        let edges = file("E 1 2 60\nE 2 42 60\n");
        let config = NetworkConfig::new(stations.path(), edges.path());

        let err = load_network(&config).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Integrity(DataIntegrityError::UnknownStation { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let edges = file("");
        let config = NetworkConfig::new("/definitely/not/here.txt", edges.path());

        let err = load_network(&config).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
