use crate::graph::edge::EdgeId;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct Node {
    id: NodeId,
    outgoing: Vec<EdgeId>,
    /// Derived from the edges whose destination is this node, never
    /// authored directly.
    incoming: Vec<EdgeId>,
    visited: bool,
    distance: f64,
    cost: f64,
    predecessor: Option<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            visited: false,
            distance: f64::INFINITY,
            cost: f64::INFINITY,
            predecessor: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn predecessor(&self) -> Option<EdgeId> {
        self.predecessor
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub(crate) fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }

    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    pub(crate) fn set_predecessor(&mut self, predecessor: Option<EdgeId>) {
        self.predecessor = predecessor;
    }

    pub(crate) fn push_outgoing(&mut self, id: EdgeId) {
        self.outgoing.push(id);
    }

    pub(crate) fn push_incoming(&mut self, id: EdgeId) {
        self.incoming.push(id);
    }

    pub(crate) fn drop_outgoing(&mut self, id: EdgeId) {
        self.outgoing.retain(|e| *e != id);
    }

    pub(crate) fn drop_incoming(&mut self, id: EdgeId) {
        self.incoming.retain(|e| *e != id);
    }

    pub(crate) fn rewire_outgoing(&mut self, from: EdgeId, to: EdgeId) {
        for e in &mut self.outgoing {
            if *e == from {
                *e = to;
            }
        }
    }

    pub(crate) fn rewire_incoming(&mut self, from: EdgeId, to: EdgeId) {
        for e in &mut self.incoming {
            if *e == from {
                *e = to;
            }
        }
    }
}
