use crate::analysis::flow;
use crate::analysis::QueryError;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;

/// Maximum simultaneous flow that can converge on `target` from the rest
/// of the network, reduced to a single max-flow by wiring a synthetic
/// source to every entry point of a deep copy.
///
/// Entry points are the nodes (other than the target) with exactly one
/// outgoing edge. Treating degree-one nodes as the network's entry points
/// is a deliberate simplification; on graphs whose feeders are better
/// connected the answer is a lower bound, not an exhaustive guarantee.
pub fn inbound_capacity(graph: &Graph, target: NodeId) -> Result<f64, QueryError> {
    graph
        .slot_of(target)
        .ok_or(QueryError::UnknownNode(target))?;

    let mut probe = graph.clone();
    let feeder = NodeId(
        probe
            .nodes()
            .iter()
            .map(|n| n.id().value())
            .max()
            .unwrap_or(0)
            + 1,
    );
    probe.add_node(feeder);
    let entries: Vec<NodeId> = probe
        .nodes()
        .iter()
        .filter(|n| n.id() != feeder && n.id() != target && n.outgoing().len() == 1)
        .map(|n| n.id())
        .collect();
    for id in entries {
        probe.add_edge(feeder, id, f64::INFINITY, 0);
    }
    flow::max_flow(&mut probe, feeder, target)?;
    Ok(flow::total_inflow(&probe, target))
}
