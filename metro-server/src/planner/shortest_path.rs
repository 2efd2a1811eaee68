//! Shortest paths by edge relaxation (Bellman-Ford).
//!
//! Every pass relaxes every edge in both directions, in insertion order, so
//! ties between equal-cost routes always resolve the same way. The solver
//! does not assume non-negative weights; a network where relaxation never
//! settles is reported as containing a negative cycle.

use tracing::trace;

use crate::domain::{StationId, TravelTime};
use crate::network::Network;

use super::error::SolverError;

/// A route between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Total travel time in minutes.
    pub distance: f64,

    /// Stations from source to target, inclusive. Never empty, never repeats.
    pub stations: Vec<StationId>,
}

impl Route {
    /// Returns the total travel time.
    pub fn travel_time(&self) -> TravelTime {
        TravelTime::from_minutes(self.distance)
    }

    /// The first station of the route.
    pub fn source(&self) -> StationId {
        self.stations[0]
    }

    /// The last station of the route.
    pub fn target(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of hops (edges) along the route.
    pub fn hops(&self) -> usize {
        self.stations.len() - 1
    }
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// The target is reachable.
    Found(Route),
    /// The target is not reachable from the source.
    NoPathFound,
}

impl PathOutcome {
    /// Consumes the outcome, returning the route if one was found.
    pub fn into_route(self) -> Option<Route> {
        match self {
            PathOutcome::Found(route) => Some(route),
            PathOutcome::NoPathFound => None,
        }
    }
}

/// Find the fastest route from `source` to `target`.
///
/// Unreachable targets give [`PathOutcome::NoPathFound`]; only unknown ids
/// and negative cycles are errors. O(V·E).
///
/// # Examples
///
/// ```
/// use metro_server::domain::{LineId, Station, StationId};
/// use metro_server::network::NetworkBuilder;
/// use metro_server::planner::shortest_path;
///
/// let l = LineId::parse("1").unwrap();
/// let network = NetworkBuilder::new()
///     .stations((1..=3).map(|i| Station::new(StationId(i), format!("S{i}"), l.clone())))
///     .edge(1, 2, 60.0)
///     .edge(2, 3, 60.0)
///     .edge(1, 3, 180.0)
///     .build()
///     .unwrap();
///
/// let route = shortest_path(&network, StationId(1), StationId(3))
///     .unwrap()
///     .into_route()
///     .unwrap();
/// assert_eq!(route.distance, 2.0);
/// assert_eq!(route.stations, vec![StationId(1), StationId(2), StationId(3)]);
/// ```
pub fn shortest_path(
    network: &Network,
    source: StationId,
    target: StationId,
) -> Result<PathOutcome, SolverError> {
    shortest_path_between(network, &[source], &[target])
}

/// Find the fastest route from any of `sources` to any of `targets`.
///
/// Every source starts at distance zero, so the route begins at whichever
/// source is cheapest to leave from. This is how a journey between two
/// interchange names is planned: every node carrying the name is a valid
/// end, and none of the transfer hops between them is charged. Equal
/// distances go to the target listed first. An empty `sources` or `targets`
/// gives [`PathOutcome::NoPathFound`].
pub fn shortest_path_between(
    network: &Network,
    sources: &[StationId],
    targets: &[StationId],
) -> Result<PathOutcome, SolverError> {
    let sources = slots_of(network, sources)?;
    let targets = slots_of(network, targets)?;

    let n = network.station_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    for &src in &sources {
        distance[src] = 0.0;
    }

    for pass in 1..n {
        if !relax_all(network, &mut distance, &mut predecessor) {
            trace!(pass, "Relaxation settled early");
            break;
        }
    }

    for edge in network.edges() {
        let (a, b) = edge.slots;
        if distance[a] + edge.weight < distance[b] || distance[b] + edge.weight < distance[a] {
            return Err(SolverError::NegativeCycleDetected);
        }
    }

    let Some(dst) = targets
        .iter()
        .copied()
        .filter(|&t| distance[t].is_finite())
        .min_by(|&x, &y| distance[x].total_cmp(&distance[y]))
    else {
        return Ok(PathOutcome::NoPathFound);
    };

    let mut path = vec![dst];
    let mut current = dst;
    while let Some(prev) = predecessor[current] {
        // Without negative cycles the predecessor chain is a tree
        if path.len() > n {
            return Err(SolverError::NegativeCycleDetected);
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();

    // A zero-cost hop into the chosen target from another target is a
    // transfer within the destination, not part of the journey
    while path.len() > 1 && targets.contains(&path[path.len() - 2]) {
        path.pop();
    }

    let end = path[path.len() - 1];
    Ok(PathOutcome::Found(Route {
        distance: distance[end],
        stations: path
            .into_iter()
            .map(|slot| network.stations()[slot].id)
            .collect(),
    }))
}

fn slots_of(network: &Network, ids: &[StationId]) -> Result<Vec<usize>, SolverError> {
    ids.iter()
        .map(|&id| network.slot(id).ok_or(SolverError::UnknownStation(id)))
        .collect()
}

/// One relaxation pass over every edge, both directions.
/// Returns whether any distance improved.
fn relax_all(
    network: &Network,
    distance: &mut [f64],
    predecessor: &mut [Option<usize>],
) -> bool {
    let mut changed = false;

    for edge in network.edges() {
        let (a, b) = edge.slots;
        if distance[a] + edge.weight < distance[b] {
            distance[b] = distance[a] + edge.weight;
            predecessor[b] = Some(a);
            changed = true;
        }
        if distance[b] + edge.weight < distance[a] {
            distance[a] = distance[b] + edge.weight;
            predecessor[a] = Some(b);
            changed = true;
        }
    }

    changed
}
