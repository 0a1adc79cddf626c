use crate::analysis::QueryError;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::graph::queue::CostQueue;

/// Computes, for every node reachable from `source`, the minimum
/// price-weighted cost together with the raw distance accumulated along
/// that same path. The queue is keyed on cost; distance rides along and is
/// not independently minimized. Unreachable nodes keep infinite cost and
/// distance and no predecessor, which is a normal terminal state.
///
/// Relaxation assumes non-negative weight-times-price steps; negative
/// prices are accepted by the arithmetic but a settled node is never
/// reopened.
pub fn cheapest_routes(graph: &mut Graph, source: NodeId) -> Result<(), QueryError> {
    let s = graph
        .slot_of(source)
        .ok_or(QueryError::UnknownNode(source))?;
    for slot in 0..graph.node_count() {
        let node = graph.node_at_mut(slot);
        node.set_distance(f64::INFINITY);
        node.set_cost(f64::INFINITY);
        node.set_predecessor(None);
        node.set_visited(false);
    }
    let start = graph.node_at_mut(s);
    start.set_distance(0.0);
    start.set_cost(0.0);

    let mut queue = CostQueue::with_capacity(graph.node_count());
    queue.push(s, 0.0);
    while let Some(u) = queue.pop() {
        graph.node_at_mut(u).set_visited(true);
        let base_cost = graph.node_at(u).cost();
        let base_distance = graph.node_at(u).distance();
        if !base_cost.is_finite() {
            continue;
        }
        for at in 0..graph.node_at(u).outgoing().len() {
            let id = graph.node_at(u).outgoing()[at];
            let edge = graph.edge(id);
            let v = edge.dest_slot();
            let next_cost = base_cost + edge.capacity() * f64::from(edge.price());
            let next_distance = base_distance + edge.capacity();
            if !graph.node_at(v).visited() && graph.node_at(v).cost() > next_cost {
                let node = graph.node_at_mut(v);
                node.set_distance(next_distance);
                node.set_cost(next_cost);
                node.set_predecessor(Some(id));
                if queue.contains(v) {
                    queue.decrease(v, next_cost);
                } else {
                    queue.push(v, next_cost);
                }
            }
        }
    }
    Ok(())
}

/// Walks predecessor edges back from `target` and returns the stop
/// sequence of the route chosen by [`cheapest_routes`], or `None` when the
/// target was never reached.
pub fn route_to(graph: &Graph, source: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    let s = graph.slot_of(source)?;
    let t = graph.slot_of(target)?;
    let mut stops = vec![graph.node_at(t).id()];
    let mut v = t;
    while v != s {
        let id = graph.node_at(v).predecessor()?;
        v = graph.edge(id).origin_slot();
        stops.push(graph.node_at(v).id());
    }
    stops.reverse();
    Some(stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn picks_the_cheaper_two_hop_route() {
        let mut g = Graph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id));
        }
        g.add_edge(NodeId(1), NodeId(2), 2.0, 1);
        g.add_edge(NodeId(2), NodeId(3), 4.0, 1);
        g.add_edge(NodeId(1), NodeId(3), 10.0, 1);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let target = g.find_node(NodeId(3)).unwrap();
        assert_relative_eq!(6.0, target.cost());
        assert_relative_eq!(6.0, target.distance());
        assert_eq!(
            Some(vec![NodeId(1), NodeId(2), NodeId(3)]),
            route_to(&g, NodeId(1), NodeId(3))
        );
    }

    #[test]
    fn equal_cost_keeps_the_first_settled_route() {
        // (2*3 + 4*1) against (10*1): both cost ten; the strict-improvement
        // relaxation keeps whichever path reached the target first, here the
        // direct edge
        let mut g = Graph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id));
        }
        g.add_edge(NodeId(1), NodeId(2), 2.0, 3);
        g.add_edge(NodeId(2), NodeId(3), 4.0, 1);
        g.add_edge(NodeId(1), NodeId(3), 10.0, 1);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let target = g.find_node(NodeId(3)).unwrap();
        assert_relative_eq!(10.0, target.cost());
        assert_relative_eq!(10.0, target.distance());
        assert_eq!(
            Some(vec![NodeId(1), NodeId(3)]),
            route_to(&g, NodeId(1), NodeId(3))
        );
    }

    #[test]
    fn distance_follows_the_cost_optimal_route() {
        // the cheapest route is the longer one in raw distance
        let mut g = Graph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id));
        }
        g.add_edge(NodeId(1), NodeId(3), 4.0, 2);
        g.add_edge(NodeId(1), NodeId(2), 5.0, 1);
        g.add_edge(NodeId(2), NodeId(3), 1.0, 1);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let target = g.find_node(NodeId(3)).unwrap();
        assert_relative_eq!(6.0, target.cost());
        assert_relative_eq!(6.0, target.distance());
        assert_eq!(
            Some(vec![NodeId(1), NodeId(2), NodeId(3)]),
            route_to(&g, NodeId(1), NodeId(3))
        );
    }

    #[test]
    fn queued_nodes_are_rekeyed_when_a_cheaper_route_appears() {
        let mut g = Graph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id));
        }
        g.add_edge(NodeId(1), NodeId(3), 10.0, 1);
        g.add_edge(NodeId(1), NodeId(2), 1.0, 1);
        g.add_edge(NodeId(2), NodeId(3), 2.0, 1);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let target = g.find_node(NodeId(3)).unwrap();
        assert_relative_eq!(3.0, target.cost());
        assert_eq!(
            Some(vec![NodeId(1), NodeId(2), NodeId(3)]),
            route_to(&g, NodeId(1), NodeId(3))
        );
    }

    #[test]
    fn unreachable_nodes_stay_at_infinity() {
        let mut g = Graph::new();
        g.add_node(NodeId(1));
        g.add_node(NodeId(2));
        g.add_node(NodeId(3));
        g.add_edge(NodeId(1), NodeId(2), 1.0, 1);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let stranded = g.find_node(NodeId(3)).unwrap();
        assert!(stranded.cost().is_infinite());
        assert!(stranded.distance().is_infinite());
        assert_eq!(None, stranded.predecessor());
        assert_eq!(None, route_to(&g, NodeId(1), NodeId(3)));
    }

    #[test]
    fn unknown_source_is_fatal() {
        let mut g = Graph::new();
        g.add_node(NodeId(1));
        assert_eq!(
            Err(QueryError::UnknownNode(NodeId(9))),
            cheapest_routes(&mut g, NodeId(9))
        );
    }

    #[test]
    fn negative_prices_are_not_reoptimized_after_settling() {
        // a negative-price detour would lower the cost of an already
        // settled node; the visited-once discipline keeps the first result
        let mut g = Graph::new();
        for id in 1..=3 {
            g.add_node(NodeId(id));
        }
        g.add_edge(NodeId(1), NodeId(3), 2.0, 1);
        g.add_edge(NodeId(1), NodeId(2), 3.0, 1);
        g.add_edge(NodeId(2), NodeId(3), 1.0, -2);
        cheapest_routes(&mut g, NodeId(1)).unwrap();
        let target = g.find_node(NodeId(3)).unwrap();
        // the detour through 2 would cost 3 - 2 = 1, but 3 settles at 2 first
        assert_relative_eq!(2.0, target.cost());
        assert_eq!(
            Some(vec![NodeId(1), NodeId(3)]),
            route_to(&g, NodeId(1), NodeId(3))
        );
    }
}
