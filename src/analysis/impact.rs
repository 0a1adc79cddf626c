use crate::analysis::arrivals::inbound_capacity;
use crate::analysis::QueryError;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;

/// Ranks nodes by how much their attainable inbound flow changes when the
/// given connections are severed. Severing removes both directions of a
/// bidirectional pair. Returns the `k` nodes with the largest absolute
/// change, as (id, after minus before).
pub fn most_affected(
    graph: &Graph,
    severed: &[(NodeId, NodeId)],
    k: usize,
) -> Result<Vec<(NodeId, f64)>, QueryError> {
    let mut reduced = graph.clone();
    for (origin, dest) in severed {
        reduced.remove_edge(*origin, *dest);
        reduced.remove_edge(*dest, *origin);
    }

    let mut deltas: Vec<(NodeId, f64)> = Vec::with_capacity(graph.node_count());
    for node in graph.nodes() {
        let id = node.id();
        let before = inbound_capacity(graph, id)?;
        let after = inbound_capacity(&reduced, id)?;
        deltas.push((id, after - before));
    }
    deltas.sort_by(|a, b| {
        b.1.abs()
            .total_cmp(&a.1.abs())
            .then_with(|| a.0.cmp(&b.0))
    });
    deltas.truncate(k);
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corridor() -> Graph {
        // a 1 - 2 - 3 - 4 line, narrowing toward the far end
        let mut g = Graph::new();
        for id in 1..=4 {
            g.add_node(NodeId(id));
        }
        g.add_bidirectional_edge(NodeId(1), NodeId(2), 6.0, 2);
        g.add_bidirectional_edge(NodeId(2), NodeId(3), 5.0, 2);
        g.add_bidirectional_edge(NodeId(3), NodeId(4), 4.0, 2);
        g
    }

    #[test]
    fn severing_the_spine_ranks_stations_by_arrival_change() {
        let g = corridor();
        let affected = most_affected(&g, &[(NodeId(2), NodeId(3))], 4).unwrap();
        // arrivals before: 4, 10, 9, 4; after the cut: 6, 6, 4, 4. The cut
        // turns station 2 into a terminal, which the entry-point rule then
        // counts as a feeder of station 1, so a delta may be positive.
        assert_eq!(4, affected.len());
        assert_eq!(NodeId(3), affected[0].0);
        assert_relative_eq!(-5.0, affected[0].1);
        assert_eq!(NodeId(2), affected[1].0);
        assert_relative_eq!(-4.0, affected[1].1);
        assert_eq!(NodeId(1), affected[2].0);
        assert_relative_eq!(2.0, affected[2].1);
        assert_eq!(NodeId(4), affected[3].0);
        assert_relative_eq!(0.0, affected[3].1);
    }

    #[test]
    fn ranking_is_truncated_and_deterministic() {
        let g = corridor();
        let top = most_affected(&g, &[(NodeId(2), NodeId(3))], 2).unwrap();
        assert_eq!(2, top.len());
        let full = most_affected(&g, &[(NodeId(2), NodeId(3))], 4).unwrap();
        assert_eq!(top, full[..2].to_vec());
    }

    #[test]
    fn severing_nothing_changes_nothing() {
        let g = corridor();
        let affected = most_affected(&g, &[], 4).unwrap();
        for (_, delta) in affected {
            assert_relative_eq!(0.0, delta);
        }
    }

    #[test]
    fn the_original_graph_is_left_untouched() {
        let g = corridor();
        most_affected(&g, &[(NodeId(2), NodeId(3))], 4).unwrap();
        assert_eq!(6, g.edges().len());
    }
}
