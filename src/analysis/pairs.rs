use crate::analysis::flow;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use tracing::debug;

/// Node pairs attaining the largest pairwise maximum flow, together with
/// that flow value. Ties are appended in rank order, replacements only on
/// a strict improvement.
///
/// Candidates are ranked by twice the sum of their outgoing capacities and
/// the scan stops as soon as a rank falls below the best flow seen. The
/// bound itself is sound (total incident capacity caps a node's achievable
/// flow) but cutting the scan at the first below-threshold rank is a
/// heuristic: it assumes no later node can recover a better pair. Pass
/// `exhaustive` to check every pair instead.
pub fn busiest_pairs(graph: &mut Graph, exhaustive: bool) -> (Vec<(NodeId, NodeId)>, f64) {
    let mut ranked: Vec<(usize, f64)> = (0..graph.node_count())
        .map(|slot| {
            let total: f64 = graph
                .node_at(slot)
                .outgoing()
                .iter()
                .map(|e| graph.edge(*e).capacity())
                .sum();
            (slot, 2.0 * total)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| graph.node_at(a.0).id().cmp(&graph.node_at(b.0).id()))
    });

    let mut best = f64::NEG_INFINITY;
    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
    for i in 0..ranked.len() {
        if !exhaustive && ranked[i].1 < best {
            break;
        }
        for j in (i + 1)..ranked.len() {
            if !exhaustive && ranked[j].1 < best {
                break;
            }
            let (a, b) = (ranked[i].0, ranked[j].0);
            flow::solve(graph, a, b);
            let achieved: f64 = graph
                .node_at(a)
                .outgoing()
                .iter()
                .map(|e| graph.edge(*e).flow())
                .sum();
            if achieved > best {
                best = achieved;
                pairs.clear();
                pairs.push((graph.node_at(a).id(), graph.node_at(b).id()));
            } else if achieved == best {
                pairs.push((graph.node_at(a).id(), graph.node_at(b).id()));
            }
        }
    }
    if pairs.is_empty() {
        return (pairs, 0.0);
    }
    debug!(best, candidates = pairs.len(), "pairwise max-flow scan finished");
    (pairs, best)
}
