//! Network construction from station and edge records.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{Station, StationId, TravelTime};

use super::graph::{EdgeOrigin, Network, TerminusTable};

/// Errors that make a set of records unusable as a network.
///
/// Any of these aborts the whole build: the algorithms downstream assume
/// every edge endpoint exists and every weight is a real number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataIntegrityError {
    /// An edge references a station id with no station record
    #[error("edge {a}-{b} references unknown station {missing}")]
    UnknownStation {
        a: StationId,
        b: StationId,
        missing: StationId,
    },

    /// Two station records share an id
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// An edge weight is NaN or infinite
    #[error("edge {a}-{b} has invalid weight {seconds}")]
    InvalidWeight {
        a: StationId,
        b: StationId,
        seconds: f64,
    },
}

/// A raw edge: two station ids and a travel time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub a: StationId,
    pub b: StationId,
    pub seconds: f64,
}

impl EdgeRecord {
    pub fn new(a: u32, b: u32, seconds: f64) -> Self {
        Self {
            a: StationId(a),
            b: StationId(b),
            seconds,
        }
    }
}

/// Builder for a [`Network`].
///
/// Records are collected first and validated together in [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use metro_server::domain::{LineId, Station, StationId};
/// use metro_server::network::NetworkBuilder;
///
/// let l1 = LineId::parse("1").unwrap();
/// let network = NetworkBuilder::new()
///     .station(Station::new(StationId(1), "A", l1.clone()))
///     .station(Station::new(StationId(2), "B", l1))
///     .edge(1, 2, 90.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.weight(StationId(1), StationId(2)), Some(1.5));
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stations: Vec<Station>,
    edges: Vec<EdgeRecord>,
}

impl NetworkBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station.
    pub fn station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    /// Add several stations.
    pub fn stations(mut self, stations: impl IntoIterator<Item = Station>) -> Self {
        self.stations.extend(stations);
        self
    }

    /// Add an edge with a travel time in seconds.
    pub fn edge(mut self, a: u32, b: u32, seconds: f64) -> Self {
        self.edges.push(EdgeRecord::new(a, b, seconds));
        self
    }

    /// Add several edge records.
    pub fn edges(mut self, edges: impl IntoIterator<Item = EdgeRecord>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Validate the records and build the network.
    ///
    /// Edge weights are converted from seconds to minutes. A repeated
    /// station pair keeps its first position but takes the later weight.
    /// Self-loops carry no routing information and are dropped.
    pub fn build(self) -> Result<Network, DataIntegrityError> {
        let mut index = HashMap::with_capacity(self.stations.len());
        let mut termini = TerminusTable::new();

        for (slot, station) in self.stations.iter().enumerate() {
            if index.insert(station.id, slot).is_some() {
                return Err(DataIntegrityError::DuplicateStation(station.id));
            }
            if station.is_terminus {
                termini.add(station.line.clone(), &station.name);
            }
        }

        let mut network = Network::from_parts(self.stations, index, termini);

        for record in self.edges {
            let slot_of = |id: StationId| {
                network
                    .slot(id)
                    .ok_or(DataIntegrityError::UnknownStation {
                        a: record.a,
                        b: record.b,
                        missing: id,
                    })
            };
            let a = slot_of(record.a)?;
            let b = slot_of(record.b)?;

            if !record.seconds.is_finite() {
                return Err(DataIntegrityError::InvalidWeight {
                    a: record.a,
                    b: record.b,
                    seconds: record.seconds,
                });
            }

            if a == b {
                warn!(station = %record.a, "Skipping self-loop edge");
                continue;
            }

            let weight = TravelTime::from_seconds(record.seconds).minutes();
            match network.edge_between(a, b) {
                Some(existing) => {
                    debug!(a = %record.a, b = %record.b, weight, "Replacing repeated edge");
                    network.set_weight(existing, weight);
                }
                None => network.push_edge(a, b, weight, EdgeOrigin::Scheduled),
            }
        }

        debug!(
            stations = network.station_count(),
            edges = network.edge_count(),
            lines = network.termini().len(),
            "Network built"
        );

        Ok(network)
    }
}
