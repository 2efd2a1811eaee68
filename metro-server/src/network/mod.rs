//! The transit network graph and how it is built.
//!
//! Records are parsed best-effort, validated and assembled into an
//! immutable [`Network`] together with its [`TerminusTable`].

mod builder;
mod config;
mod graph;
mod load;
mod records;
mod repair;

pub use builder::{DataIntegrityError, EdgeRecord, NetworkBuilder};
pub use config::{ConfigError, NetworkConfig, RepairPolicy};
pub use graph::{Edge, EdgeOrigin, Network, TerminusTable};
pub use load::{LoadError, load_network};
pub use records::{Parsed, RecordError, parse_edge, parse_edges, parse_station, parse_stations};
pub use repair::{DEFAULT_BRIDGE_WEIGHT, RepairReport, bridge_components};
