//! The immutable weighted network graph.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{LineId, Station, StationId};

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrigin {
    /// Read from the edge records.
    Scheduled,
    /// Added by the repair step to join disconnected components.
    Bridge,
}

/// An undirected weighted edge between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// First endpoint, as given in the record.
    pub a: StationId,

    /// Second endpoint, as given in the record.
    pub b: StationId,

    /// Travel time in minutes.
    pub weight: f64,

    /// Where this edge came from.
    pub origin: EdgeOrigin,

    /// Station slots of `a` and `b`.
    pub(crate) slots: (usize, usize),
}

impl Edge {
    /// Whether this edge joins `x` and `y`, in either order.
    pub fn joins(&self, x: StationId, y: StationId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Terminus names per line, in record order.
///
/// Index 0 and 1 conventionally hold the two ends of the line; lines with
/// more branches have more entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminusTable {
    lines: BTreeMap<LineId, Vec<String>>,
}

impl TerminusTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as a terminus of `line`.
    ///
    /// A name already listed for the line is not added twice.
    pub fn add(&mut self, line: LineId, name: &str) {
        let termini = self.lines.entry(line).or_default();
        if !termini.iter().any(|t| t == name) {
            termini.push(name.to_string());
        }
    }

    /// Returns the termini of a line, if any were recorded.
    pub fn get(&self, line: &LineId) -> Option<&[String]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    /// Iterate over lines and their termini, ordered by line id.
    pub fn iter(&self) -> impl Iterator<Item = (&LineId, &[String])> {
        self.lines.iter().map(|(line, t)| (line, t.as_slice()))
    }

    /// Returns the number of lines with at least one terminus.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no terminus has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A weighted undirected transit network.
///
/// Stations and edges keep their insertion order, which fixes the iteration
/// order every algorithm sees. A `Network` is never mutated once it has been
/// handed out; refreshing the data means building a new one.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    edges: Vec<Edge>,
    /// Edge indices incident to each station slot.
    adjacency: Vec<Vec<usize>>,
    termini: TerminusTable,
}

impl Network {
    pub(crate) fn from_parts(
        stations: Vec<Station>,
        index: HashMap<StationId, usize>,
        termini: TerminusTable,
    ) -> Self {
        let adjacency = vec![Vec::new(); stations.len()];
        Self {
            stations,
            index,
            edges: Vec::new(),
            adjacency,
            termini,
        }
    }

    /// Append an edge between two known slots.
    pub(crate) fn push_edge(&mut self, a: usize, b: usize, weight: f64, origin: EdgeOrigin) {
        let idx = self.edges.len();
        self.edges.push(Edge {
            a: self.stations[a].id,
            b: self.stations[b].id,
            weight,
            origin,
            slots: (a, b),
        });
        self.adjacency[a].push(idx);
        self.adjacency[b].push(idx);
    }

    /// Index of the edge joining two slots, if there is one.
    pub(crate) fn edge_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a].iter().copied().find(|&e| {
            let (x, y) = self.edges[e].slots;
            (x == a && y == b) || (x == b && y == a)
        })
    }

    pub(crate) fn set_weight(&mut self, edge: usize, weight: f64) {
        self.edges[edge].weight = weight;
    }

    /// Slot of a station id.
    pub(crate) fn slot(&self, id: StationId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Neighbouring slots of a slot, with edge weights, in insertion order.
    pub(crate) fn neighbour_slots(&self, slot: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency[slot].iter().map(move |&e| {
            let edge = &self.edges[e];
            let (x, y) = edge.slots;
            (if x == slot { y } else { x }, edge.weight)
        })
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations, in insertion order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.slot(id).map(|s| &self.stations[s])
    }

    /// Whether two stations are directly connected.
    pub fn has_edge(&self, x: StationId, y: StationId) -> bool {
        match (self.slot(x), self.slot(y)) {
            (Some(a), Some(b)) => self.edge_between(a, b).is_some(),
            _ => false,
        }
    }

    /// The weight of the edge joining two stations, if any.
    pub fn weight(&self, x: StationId, y: StationId) -> Option<f64> {
        let (a, b) = (self.slot(x)?, self.slot(y)?);
        self.edge_between(a, b).map(|e| self.edges[e].weight)
    }

    /// Neighbours of a station with edge weights, in insertion order.
    pub fn neighbours(&self, id: StationId) -> Vec<(StationId, f64)> {
        match self.slot(id) {
            Some(slot) => self
                .neighbour_slots(slot)
                .map(|(n, w)| (self.stations[n].id, w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The terminus table built alongside the graph.
    pub fn termini(&self) -> &TerminusTable {
        &self.termini
    }

    /// Returns the number of edges added by repair.
    pub fn bridge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|e| e.origin == EdgeOrigin::Bridge)
            .count()
    }

    /// Every station id carrying this name, ascending.
    ///
    /// Interchanges have one node per line, so a name can map to several.
    pub fn stations_named(&self, name: &str) -> Vec<StationId> {
        let mut ids: Vec<StationId> = self
            .stations
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Distinct station names, sorted.
    pub fn unique_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stations.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
