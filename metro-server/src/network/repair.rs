//! Joining a disconnected network.
//!
//! When the records describe several disconnected pieces, routes between the
//! pieces are impossible. Repair adds one bridge edge from the first
//! component to each other component, which is the fewest edges that make
//! the network connected.

use tracing::info;

use crate::domain::StationId;
use crate::planner::connected_components;

use super::graph::{EdgeOrigin, Network};

/// Default weight of a bridge edge, in minutes.
pub const DEFAULT_BRIDGE_WEIGHT: f64 = 20.0;

/// What the repair step did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    /// Number of components before repair.
    pub components: usize,

    /// Bridge edges added, as (representative of first component, representative of other).
    pub bridges: Vec<(StationId, StationId)>,
}

/// Connect every component of `network` to its first component.
///
/// Each component is represented by its first station in traversal order.
/// A connected network is left unchanged.
pub fn bridge_components(network: &mut Network, weight: f64) -> RepairReport {
    let components = connected_components(network);
    let mut report = RepairReport {
        components: components.len(),
        bridges: Vec::new(),
    };

    let Some((anchor, others)) = components.split_first() else {
        return report;
    };
    let anchor_id = anchor[0];
    let Some(anchor_slot) = network.slot(anchor_id) else {
        return report;
    };

    for component in others {
        let rep = component[0];
        if let Some(slot) = network.slot(rep) {
            network.push_edge(anchor_slot, slot, weight, EdgeOrigin::Bridge);
            report.bridges.push((anchor_id, rep));
        }
    }

    if !report.bridges.is_empty() {
        info!(
            components = report.components,
            bridges = report.bridges.len(),
            weight,
            "Bridged disconnected network"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, Station};
    use crate::network::NetworkBuilder;
    use crate::planner::is_connected;

    fn islands(n: u32) -> Network {
        let line = LineId::parse("1").unwrap();
        NetworkBuilder::new()
            .stations((0..n).map(|i| Station::new(StationId(i), format!("S{i}"), line.clone())))
            .build()
            .unwrap()
    }

    #[test]
    fn connected_network_is_untouched() {
        let line = LineId::parse("1").unwrap();
        let mut network = NetworkBuilder::new()
            .station(Station::new(StationId(1), "A", line.clone()))
            .station(Station::new(StationId(2), "B", line))
            .edge(1, 2, 60.0)
            .build()
            .unwrap();

        let report = bridge_components(&mut network, DEFAULT_BRIDGE_WEIGHT);

        assert_eq!(report.components, 1);
        assert!(report.bridges.is_empty());
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn empty_network_is_untouched() {
        let mut network = islands(0);
        let report = bridge_components(&mut network, DEFAULT_BRIDGE_WEIGHT);
        assert_eq!(report, RepairReport::default());
    }

    #[test]
    fn adds_one_edge_per_extra_component() {
        // Five isolated stations: all-pairs filling would add 10 edges,
        // bridging adds 4.
        let mut network = islands(5);
        assert!(!is_connected(&network));

        let report = bridge_components(&mut network, DEFAULT_BRIDGE_WEIGHT);

        assert_eq!(report.components, 5);
        assert_eq!(report.bridges.len(), 4);
        assert_eq!(network.edge_count(), 4);
        assert_eq!(network.bridge_count(), 4);
        assert!(network.edge_count() < 5 * 4 / 2);
        assert!(is_connected(&network));
        assert_eq!(
            network.weight(StationId(0), StationId(3)),
            Some(DEFAULT_BRIDGE_WEIGHT)
        );
    }

    #[test]
    fn bridges_leave_existing_edges_alone() {
        let line = LineId::parse("1").unwrap();
        let mut network = NetworkBuilder::new()
            .stations((1..=4).map(|i| Station::new(StationId(i), format!("S{i}"), line.clone())))
            .edge(1, 2, 60.0)
            .edge(3, 4, 60.0)
            .build()
            .unwrap();

        let report = bridge_components(&mut network, 5.0);

        assert_eq!(report.bridges, vec![(StationId(1), StationId(3))]);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.edges()[2].origin, EdgeOrigin::Bridge);
        assert!(is_connected(&network));
    }
}
