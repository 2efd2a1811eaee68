//! Reachability over the network.

use crate::domain::StationId;
use crate::network::Network;

/// Whether every station can reach every other station.
///
/// An empty network is connected. Runs one depth-first traversal from the
/// first station with an explicit stack, so deep networks cannot overflow
/// the call stack.
pub fn is_connected(network: &Network) -> bool {
    if network.is_empty() {
        return true;
    }
    let visited = traverse(network, 0, &mut vec![false; network.station_count()]);
    visited.len() == network.station_count()
}

/// All connected components, in order of their first station.
///
/// Each component lists its stations in traversal order, so the first entry
/// is always the station with the lowest insertion position.
pub fn connected_components(network: &Network) -> Vec<Vec<StationId>> {
    let mut seen = vec![false; network.station_count()];
    let mut components = Vec::new();

    for start in 0..network.station_count() {
        if seen[start] {
            continue;
        }
        let slots = traverse(network, start, &mut seen);
        components.push(
            slots
                .into_iter()
                .map(|s| network.stations()[s].id)
                .collect(),
        );
    }

    components
}

/// Stations reachable from `start`, marking them in `seen`.
fn traverse(network: &Network, start: usize, seen: &mut [bool]) -> Vec<usize> {
    let mut order = Vec::new();
    let mut stack = vec![start];
    seen[start] = true;

    while let Some(slot) = stack.pop() {
        order.push(slot);
        for (next, _) in network.neighbour_slots(slot) {
            if !seen[next] {
                seen[next] = true;
                stack.push(next);
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, Station};
    use crate::network::NetworkBuilder;

    fn network(n: u32, edges: &[(u32, u32)]) -> Network {
        let line = LineId::parse("1").unwrap();
        let mut builder = NetworkBuilder::new()
            .stations((1..=n).map(|i| Station::new(StationId(i), format!("S{i}"), line.clone())));
        for &(a, b) in edges {
            builder = builder.edge(a, b, 60.0);
        }
        builder.build().unwrap()
    }

    #[test]
    fn empty_network_is_connected() {
        assert!(is_connected(&Network::default()));
        assert!(connected_components(&Network::default()).is_empty());
    }

    #[test]
    fn single_station_is_connected() {
        assert!(is_connected(&network(1, &[])));
    }

    #[test]
    fn two_isolated_stations_are_not_connected() {
        let net = network(2, &[]);
        assert!(!is_connected(&net));
        assert_eq!(
            connected_components(&net),
            vec![vec![StationId(1)], vec![StationId(2)]]
        );
    }

    #[test]
    fn disjoint_components_then_bridged() {
        let split = network(6, &[(1, 2), (2, 3), (4, 5), (5, 6)]);
        assert!(!is_connected(&split));
        assert_eq!(connected_components(&split).len(), 2);

        let joined = network(6, &[(1, 2), (2, 3), (4, 5), (5, 6), (3, 4)]);
        assert!(is_connected(&joined));
        assert_eq!(connected_components(&joined).len(), 1);
    }

    #[test]
    fn components_start_with_first_station() {
        let net = network(5, &[(5, 3), (2, 4)]);
        let components = connected_components(&net);

        let firsts: Vec<_> = components.iter().map(|c| c[0].0).collect();
        assert_eq!(firsts, vec![1, 2, 3]);
        assert_eq!(components[1].len(), 2);
        assert_eq!(components[2].len(), 2);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let edges: Vec<_> = (1..n).map(|i| (i, i + 1)).collect();
        assert!(is_connected(&network(n, &edges)));
    }
}
