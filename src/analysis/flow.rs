use crate::analysis::QueryError;
use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use std::collections::VecDeque;
use tracing::debug;

/// Recomputes a maximum flow from `source` to `target` with the
/// Edmonds-Karp augmenting-path method and leaves the result on the edge
/// flow fields. Every call is a full re-solve; previous flows are
/// discarded. Runs in O(V * E^2).
pub fn max_flow(graph: &mut Graph, source: NodeId, target: NodeId) -> Result<(), QueryError> {
    let s = graph
        .slot_of(source)
        .ok_or(QueryError::UnknownNode(source))?;
    let t = graph
        .slot_of(target)
        .ok_or(QueryError::UnknownNode(target))?;
    if s == t {
        return Err(QueryError::SameEndpoints);
    }
    solve(graph, s, t);
    Ok(())
}

/// Total flow leaving `id` on its outgoing edges after a solve.
pub fn total_outflow(graph: &Graph, id: NodeId) -> f64 {
    graph.find_node(id).map_or(0.0, |n| {
        n.outgoing().iter().map(|e| graph.edge(*e).flow()).sum()
    })
}

/// Total flow arriving at `id` on its incoming edges after a solve.
pub fn total_inflow(graph: &Graph, id: NodeId) -> f64 {
    graph.find_node(id).map_or(0.0, |n| {
        n.incoming().iter().map(|e| graph.edge(*e).flow()).sum()
    })
}

pub(crate) fn solve(graph: &mut Graph, s: usize, t: usize) {
    graph.reset_flows();
    let mut rounds = 0usize;
    while find_augmenting_path(graph, s, t) {
        let bottleneck = min_residual_along_path(graph, s, t);
        augment_along_path(graph, s, t, bottleneck);
        rounds += 1;
    }
    debug!(rounds, "augmenting-path search exhausted");
}

/// Breadth-first search over the residual graph: outgoing edges are
/// traversable while capacity exceeds flow, incoming edges while they
/// carry flow to undo. Leaves the predecessor chain on the nodes.
fn find_augmenting_path(graph: &mut Graph, s: usize, t: usize) -> bool {
    for slot in 0..graph.node_count() {
        graph.node_at_mut(slot).set_visited(false);
    }
    graph.node_at_mut(s).set_visited(true);
    let mut queue = VecDeque::from([s]);
    while let Some(v) = queue.pop_front() {
        if graph.node_at(t).visited() {
            break;
        }
        for at in 0..graph.node_at(v).outgoing().len() {
            let id = graph.node_at(v).outgoing()[at];
            let edge = graph.edge(id);
            let (next, residual) = (edge.dest_slot(), edge.capacity() - edge.flow());
            try_visit(graph, &mut queue, id, next, residual);
        }
        for at in 0..graph.node_at(v).incoming().len() {
            let id = graph.node_at(v).incoming()[at];
            let edge = graph.edge(id);
            let (next, residual) = (edge.origin_slot(), edge.flow());
            try_visit(graph, &mut queue, id, next, residual);
        }
    }
    graph.node_at(t).visited()
}

fn try_visit(graph: &mut Graph, queue: &mut VecDeque<usize>, edge: EdgeId, slot: usize, residual: f64) {
    if !graph.node_at(slot).visited() && residual > 0.0 {
        let node = graph.node_at_mut(slot);
        node.set_visited(true);
        node.set_predecessor(Some(edge));
        queue.push_back(slot);
    }
}

fn min_residual_along_path(graph: &Graph, s: usize, t: usize) -> f64 {
    let mut bottleneck = f64::INFINITY;
    let mut v = t;
    while v != s {
        let Some(id) = graph.node_at(v).predecessor() else {
            break;
        };
        let edge = graph.edge(id);
        if edge.dest_slot() == v {
            bottleneck = bottleneck.min(edge.capacity() - edge.flow());
            v = edge.origin_slot();
        } else {
            bottleneck = bottleneck.min(edge.flow());
            v = edge.dest_slot();
        }
    }
    bottleneck
}

fn augment_along_path(graph: &mut Graph, s: usize, t: usize, amount: f64) {
    let mut v = t;
    while v != s {
        let Some(id) = graph.node_at(v).predecessor() else {
            break;
        };
        let edge = graph.edge_mut(id);
        if edge.dest_slot() == v {
            let raised = edge.flow() + amount;
            edge.set_flow(raised);
            v = edge.origin_slot();
        } else {
            let lowered = edge.flow() - amount;
            edge.set_flow(lowered);
            v = edge.dest_slot();
        }
    }
}
