//! Minimum spanning trees.
//!
//! [`minimum_spanning_tree`] grows a tree from one station (Prim), so on a
//! disconnected network it only covers that station's component.
//! [`minimum_spanning_forest`] (Kruskal) covers every component.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::unionfind::UnionFind;
use tracing::debug;

use crate::domain::StationId;
use crate::network::Network;

use super::error::SolverError;

/// An edge of a spanning tree, oriented away from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub from: StationId,
    pub to: StationId,
    pub weight: f64,
}

/// A minimum spanning tree of one connected component.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Station the tree was grown from.
    pub root: StationId,

    /// Stations covered, in the order they joined the tree.
    pub stations: Vec<StationId>,

    /// Tree edges, in the order they were chosen.
    pub edges: Vec<TreeEdge>,

    /// Sum of edge weights, in minutes.
    pub total_weight: f64,
}

/// A minimum spanning forest covering every component.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest {
    /// Forest edges, in ascending weight order.
    pub edges: Vec<TreeEdge>,

    /// Sum of edge weights, in minutes.
    pub total_weight: f64,

    /// Number of trees (connected components).
    pub components: usize,
}

/// A candidate edge on the Prim frontier.
///
/// Ordered so that `BinaryHeap` pops the lightest edge first, and among
/// equal weights the one discovered first.
#[derive(Debug)]
struct Candidate {
    weight: f64,
    seq: usize,
    from: usize,
    to: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Prim's tree grown from the first station. `None` for an empty network.
pub fn minimum_spanning_tree(network: &Network) -> Option<SpanningTree> {
    let root = network.stations().first()?.id;
    minimum_spanning_tree_from(network, root).ok()
}

/// Prim's tree grown from `root`.
///
/// Only the component containing `root` is covered: the returned station
/// count equals that component's size, not the network's.
pub fn minimum_spanning_tree_from(
    network: &Network,
    root: StationId,
) -> Result<SpanningTree, SolverError> {
    let start = network
        .slot(root)
        .ok_or(SolverError::UnknownStation(root))?;

    let mut visited = vec![false; network.station_count()];
    let mut heap = BinaryHeap::new();
    let mut seq = 0;
    let mut tree = SpanningTree {
        root,
        stations: vec![root],
        edges: Vec::new(),
        total_weight: 0.0,
    };

    let mut push_frontier = |heap: &mut BinaryHeap<Candidate>, visited: &[bool], from: usize| {
        for (to, weight) in network.neighbour_slots(from) {
            if !visited[to] {
                heap.push(Candidate {
                    weight,
                    seq,
                    from,
                    to,
                });
                seq += 1;
            }
        }
    };

    visited[start] = true;
    push_frontier(&mut heap, &visited, start);

    while let Some(Candidate {
        weight, from, to, ..
    }) = heap.pop()
    {
        if visited[to] {
            continue;
        }
        visited[to] = true;

        let to_id = network.stations()[to].id;
        tree.stations.push(to_id);
        tree.edges.push(TreeEdge {
            from: network.stations()[from].id,
            to: to_id,
            weight,
        });
        tree.total_weight += weight;

        push_frontier(&mut heap, &visited, to);
    }

    debug!(
        root = %root,
        stations = tree.stations.len(),
        total_weight = tree.total_weight,
        "Spanning tree built"
    );

    Ok(tree)
}

/// Kruskal's minimum spanning forest over the whole network.
///
/// Edges are considered lightest first, with equal weights in insertion
/// order.
pub fn minimum_spanning_forest(network: &Network) -> SpanningForest {
    let mut order: Vec<usize> = (0..network.edge_count()).collect();
    order.sort_by(|&x, &y| {
        network.edges()[x]
            .weight
            .total_cmp(&network.edges()[y].weight)
    });

    let mut sets = UnionFind::new(network.station_count());
    let mut edges = Vec::new();
    let mut total_weight = 0.0;

    for idx in order {
        let edge = &network.edges()[idx];
        let (a, b) = edge.slots;
        if sets.union(a, b) {
            edges.push(TreeEdge {
                from: edge.a,
                to: edge.b,
                weight: edge.weight,
            });
            total_weight += edge.weight;
        }
    }

    SpanningForest {
        components: network.station_count() - edges.len(),
        edges,
        total_weight,
    }
}
