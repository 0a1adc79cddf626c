use crate::graph::node::NodeId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub struct Edge {
    id: EdgeId,
    origin: NodeId,
    dest: NodeId,
    origin_slot: usize,
    dest_slot: usize,
    /// capacity >= 0.0, doubles as the raw routing weight
    capacity: f64,
    /// per-unit cost multiplier, unvalidated
    price: i32,
    flow: f64,
    selected: bool,
    reverse: Option<EdgeId>,
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        origin: NodeId,
        dest: NodeId,
        origin_slot: usize,
        dest_slot: usize,
        capacity: f64,
        price: i32,
    ) -> Self {
        Self {
            id,
            origin,
            dest,
            origin_slot,
            dest_slot,
            capacity,
            price,
            flow: 0.0,
            selected: false,
            reverse: None,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.dest
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn reverse(&self) -> Option<EdgeId> {
        self.reverse
    }

    pub(crate) fn origin_slot(&self) -> usize {
        self.origin_slot
    }

    pub(crate) fn dest_slot(&self) -> usize {
        self.dest_slot
    }

    pub(crate) fn set_flow(&mut self, flow: f64) {
        self.flow = flow;
    }

    pub(crate) fn set_reverse(&mut self, reverse: Option<EdgeId>) {
        self.reverse = reverse;
    }

    pub(crate) fn set_id(&mut self, id: EdgeId) {
        self.id = id;
    }
}
