//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::network::Network;
use crate::planner::{SpanningForest, SpanningTree, TreeEdge};

/// A station name and every node id that carries it.
#[derive(Debug, Serialize)]
pub struct StationEntry {
    pub name: String,
    pub ids: Vec<u32>,
}

/// Response listing all station names.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationEntry>,
}

impl StationsResponse {
    pub fn from_network(network: &Network) -> Self {
        let stations = network
            .unique_names()
            .into_iter()
            .map(|name| StationEntry {
                name: name.to_string(),
                ids: network.stations_named(name).iter().map(|id| id.0).collect(),
            })
            .collect();
        Self { stations }
    }
}

/// A line and its terminus names.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    pub line: String,
    pub termini: Vec<String>,
}

/// Overview of the loaded network.
#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    pub stations: usize,
    pub edges: usize,
    pub bridges: usize,
    pub connected: bool,
    pub components: usize,
    pub lines: Vec<LineSummary>,
}

/// Request to plan a journey between two station names.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,
}

/// One stop along a planned journey.
#[derive(Debug, Serialize)]
pub struct PathStop {
    pub id: u32,
    pub name: String,
    pub line: String,
}

impl PathStop {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
            line: station.line.to_string(),
        }
    }
}

/// A planned journey.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    /// Total travel time in minutes
    pub duration_minutes: f64,

    /// Travel time as "M min S sec"
    pub duration: String,

    /// Stops from origin to destination
    pub path: Vec<PathStop>,

    /// Travel instructions
    pub instructions: Vec<String>,

    /// Narration warnings (e.g. unnamed directions)
    pub warnings: Vec<String>,
}

/// Which spanning structure to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanningAlgorithm {
    /// Tree grown from the first station (one component)
    #[default]
    Prim,
    /// Forest over every component
    Kruskal,
}

/// Query parameters for the spanning tree endpoint.
#[derive(Debug, Deserialize)]
pub struct SpanningTreeQuery {
    #[serde(default)]
    pub algorithm: SpanningAlgorithm,
}

/// A spanning tree edge.
#[derive(Debug, Serialize)]
pub struct TreeEdgeResult {
    pub from: u32,
    pub to: u32,
    pub weight: f64,
}

impl From<&TreeEdge> for TreeEdgeResult {
    fn from(edge: &TreeEdge) -> Self {
        Self {
            from: edge.from.0,
            to: edge.to.0,
            weight: edge.weight,
        }
    }
}

/// A spanning tree or forest.
#[derive(Debug, Serialize)]
pub struct SpanningTreeResponse {
    pub algorithm: SpanningAlgorithm,
    /// Stations covered
    pub stations: usize,
    /// Sum of edge weights, in minutes
    pub total_weight: f64,
    pub edges: Vec<TreeEdgeResult>,
}

impl SpanningTreeResponse {
    pub fn from_tree(tree: &SpanningTree) -> Self {
        Self {
            algorithm: SpanningAlgorithm::Prim,
            stations: tree.stations.len(),
            total_weight: tree.total_weight,
            edges: tree.edges.iter().map(TreeEdgeResult::from).collect(),
        }
    }

    pub fn from_forest(forest: &SpanningForest, stations: usize) -> Self {
        Self {
            algorithm: SpanningAlgorithm::Kruskal,
            stations,
            total_weight: forest.total_weight,
            edges: forest.edges.iter().map(TreeEdgeResult::from).collect(),
        }
    }
}

/// Result of a reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub stations: usize,
    pub edges: usize,
    pub bridges: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
