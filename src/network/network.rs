use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::network::station::Station;
use std::collections::HashMap;

/// Service tier of a connection; the tier sets the per-unit price the
/// routing engine weighs capacity with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Service {
    Standard,
    AlfaPendular,
}

impl Service {
    pub fn parse(label: &str) -> Self {
        if label == "STANDARD" {
            Service::Standard
        } else {
            Service::AlfaPendular
        }
    }

    pub fn price(self) -> i32 {
        match self {
            Service::Standard => 2,
            Service::AlfaPendular => 4,
        }
    }
}

/// The station registry around the graph: assigns ids in registration
/// order, resolves names, and keeps per-region capacity totals.
pub struct Network {
    graph: Graph,
    stations: Vec<Station>,
    ids_by_name: HashMap<String, NodeId>,
    district_capacity: HashMap<String, f64>,
    municipality_capacity: HashMap<String, f64>,
}

impl Network {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            stations: Vec::new(),
            ids_by_name: HashMap::new(),
            district_capacity: HashMap::new(),
            municipality_capacity: HashMap::new(),
        }
    }

    /// Registers a station under the next id. The first registration of a
    /// name wins the name lookup.
    pub fn add_station(&mut self, station: Station) -> NodeId {
        let id = NodeId(self.stations.len() as u32 + 1);
        self.graph.add_node(id);
        self.ids_by_name
            .entry(station.name().to_string())
            .or_insert(id);
        self.district_capacity
            .entry(station.district().to_string())
            .or_insert(0.0);
        self.municipality_capacity
            .entry(station.municipality().to_string())
            .or_insert(0.0);
        self.stations.push(station);
        id
    }

    /// Adds a bidirectional connection between two stations by name and
    /// books its capacity against both endpoints' regions. Returns false
    /// when either name is unknown.
    pub fn connect(&mut self, a: &str, b: &str, capacity: f64, service: Service) -> bool {
        let (Some(&ia), Some(&ib)) = (self.ids_by_name.get(a), self.ids_by_name.get(b)) else {
            return false;
        };
        if !self
            .graph
            .add_bidirectional_edge(ia, ib, capacity, service.price())
        {
            return false;
        }
        for id in [ia, ib] {
            let (district, municipality) = {
                let station = &self.stations[id.value() as usize - 1];
                (
                    station.district().to_string(),
                    station.municipality().to_string(),
                )
            };
            *self.district_capacity.entry(district).or_insert(0.0) += capacity;
            *self
                .municipality_capacity
                .entry(municipality)
                .or_insert(0.0) += capacity;
        }
        true
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: NodeId) -> Option<&Station> {
        let at = (id.value() as usize).checked_sub(1)?;
        self.stations.get(at)
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.ids_by_name.get(name).copied()
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.station(id).map(|s| s.name())
    }

    /// Every connection once, as (origin name, destination name, capacity):
    /// bidirectional pairs are reported in their lower-id direction.
    pub fn connections(&self) -> Vec<(&str, &str, f64)> {
        self.graph
            .edges()
            .iter()
            .filter(|e| e.reverse().is_none() || e.origin() < e.destination())
            .filter_map(|e| {
                let origin = self.name_of(e.origin())?;
                let dest = self.name_of(e.destination())?;
                Some((origin, dest, e.capacity()))
            })
            .collect()
    }

    pub fn top_districts(&self, k: usize) -> Vec<(String, f64)> {
        top_of(&self.district_capacity, k)
    }

    pub fn top_municipalities(&self, k: usize) -> Vec<(String, f64)> {
        top_of(&self.municipality_capacity, k)
    }
}

fn top_of(totals: &HashMap<String, f64>, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = totals
        .iter()
        .map(|(name, total)| (name.clone(), *total))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn station(name: &str, district: &str, municipality: &str) -> Station {
        Station::new(name, district, municipality, "", "")
    }

    #[test]
    fn ids_are_assigned_in_registration_order() {
        let mut net = Network::new();
        assert_eq!(NodeId(1), net.add_station(station("A", "North", "X")));
        assert_eq!(NodeId(2), net.add_station(station("B", "North", "Y")));
        assert_eq!(Some(NodeId(2)), net.id_of("B"));
        assert_eq!(Some("B"), net.name_of(NodeId(2)));
    }

    #[test]
    fn the_first_registration_of_a_duplicate_name_wins() {
        let mut net = Network::new();
        net.add_station(station("A", "North", "X"));
        net.add_station(station("A", "South", "Y"));
        assert_eq!(Some(NodeId(1)), net.id_of("A"));
        assert_eq!(2, net.graph().node_count());
    }

    #[test]
    fn service_tiers_set_the_edge_price() {
        assert_eq!(2, Service::parse("STANDARD").price());
        assert_eq!(4, Service::parse("ALFA PENDULAR").price());
        assert_eq!(4, Service::parse("anything else").price());

        let mut net = Network::new();
        net.add_station(station("A", "North", "X"));
        net.add_station(station("B", "North", "Y"));
        assert!(net.connect("A", "B", 8.0, Service::Standard));
        assert!(net.graph().edges().iter().all(|e| e.price() == 2));
    }

    #[test]
    fn connect_rejects_unknown_names() {
        let mut net = Network::new();
        net.add_station(station("A", "North", "X"));
        assert!(!net.connect("A", "missing", 8.0, Service::Standard));
        assert!(net.graph().edges().is_empty());
    }

    #[test]
    fn region_totals_accumulate_capacity_at_both_endpoints() {
        let mut net = Network::new();
        net.add_station(station("A", "North", "X"));
        net.add_station(station("B", "North", "Y"));
        net.add_station(station("C", "South", "Z"));
        net.connect("A", "B", 10.0, Service::Standard);
        net.connect("B", "C", 4.0, Service::AlfaPendular);

        let districts = net.top_districts(2);
        assert_eq!("North", districts[0].0);
        assert_relative_eq!(24.0, districts[0].1);
        assert_eq!("South", districts[1].0);
        assert_relative_eq!(4.0, districts[1].1);

        let municipalities = net.top_municipalities(3);
        assert_eq!(
            vec!["Y".to_string(), "X".to_string(), "Z".to_string()],
            municipalities
                .iter()
                .map(|(name, _)| name.clone())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn connections_list_each_pair_once() {
        let mut net = Network::new();
        net.add_station(station("A", "North", "X"));
        net.add_station(station("B", "North", "Y"));
        net.connect("A", "B", 8.0, Service::Standard);
        let listed = net.connections();
        assert_eq!(vec![("A", "B", 8.0)], listed);
    }
}
