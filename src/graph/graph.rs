use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};

/// Directed capacitated graph over node and edge arenas. Adjacency is kept
/// as edge handles on the nodes, so `Clone` is a complete deep copy.
#[derive(Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Returns false without mutating when a node with `id` already exists.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.slot_of(id).is_some() {
            return false;
        }
        self.nodes.push(Node::new(id));
        true
    }

    /// Returns false when either endpoint is absent.
    pub fn add_edge(&mut self, origin: NodeId, dest: NodeId, capacity: f64, price: i32) -> bool {
        self.link(origin, dest, capacity, price).is_some()
    }

    /// Creates both directions with the same capacity and price and links
    /// them as mutual reverses.
    pub fn add_bidirectional_edge(
        &mut self,
        origin: NodeId,
        dest: NodeId,
        capacity: f64,
        price: i32,
    ) -> bool {
        let Some(forward) = self.link(origin, dest, capacity, price) else {
            return false;
        };
        let Some(backward) = self.link(dest, origin, capacity, price) else {
            return false;
        };
        self.edges[forward.index()].set_reverse(Some(backward));
        self.edges[backward.index()].set_reverse(Some(forward));
        true
    }

    fn link(&mut self, origin: NodeId, dest: NodeId, capacity: f64, price: i32) -> Option<EdgeId> {
        let o = self.slot_of(origin)?;
        let d = self.slot_of(dest)?;
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, origin, dest, o, d, capacity, price));
        self.nodes[o].push_outgoing(id);
        self.nodes[d].push_incoming(id);
        Some(id)
    }

    /// Removes every origin->dest edge together with its incoming
    /// registration at the destination. Returns false when the origin is
    /// absent or no such edge exists.
    pub fn remove_edge(&mut self, origin: NodeId, dest: NodeId) -> bool {
        let Some(o) = self.slot_of(origin) else {
            return false;
        };
        let Some(d) = self.slot_of(dest) else {
            return false;
        };
        let mut removed = false;
        loop {
            let found = self.nodes[o]
                .outgoing()
                .iter()
                .copied()
                .find(|e| self.edges[e.index()].dest_slot() == d);
            match found {
                Some(id) => {
                    self.drop_edge(id);
                    removed = true;
                }
                None => break,
            }
        }
        removed
    }

    /// Drops one edge from the arena: detaches it from its endpoints,
    /// clears its twin's reverse link, then swap-removes the record and
    /// rewires every handle that pointed at the moved last edge.
    fn drop_edge(&mut self, id: EdgeId) {
        let (o, d, twin) = {
            let edge = &self.edges[id.index()];
            (edge.origin_slot(), edge.dest_slot(), edge.reverse())
        };
        self.nodes[o].drop_outgoing(id);
        self.nodes[d].drop_incoming(id);
        if let Some(r) = twin {
            self.edges[r.index()].set_reverse(None);
        }

        let last = EdgeId(self.edges.len() - 1);
        self.edges.swap_remove(id.index());
        if last != id {
            let (mo, md, mr) = {
                let moved = &self.edges[id.index()];
                (moved.origin_slot(), moved.dest_slot(), moved.reverse())
            };
            self.nodes[mo].rewire_outgoing(last, id);
            self.nodes[md].rewire_incoming(last, id);
            if let Some(r) = mr {
                self.edges[r.index()].set_reverse(Some(id));
            }
            self.edges[id.index()].set_id(id);
        }
    }

    /// Linear scan; absence is a normal outcome callers must check.
    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub(crate) fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    pub(crate) fn node_at(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    pub(crate) fn node_at_mut(&mut self, slot: usize) -> &mut Node {
        &mut self.nodes[slot]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub(crate) fn reset_flows(&mut self) {
        for edge in &mut self.edges {
            edge.set_flow(0.0);
        }
    }
}
