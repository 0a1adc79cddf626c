use crate::analysis::arrivals::inbound_capacity;
use crate::analysis::flow::{max_flow, total_outflow};
use crate::analysis::impact::most_affected;
use crate::analysis::pairs::busiest_pairs;
use crate::analysis::routing::{cheapest_routes, route_to};
use crate::graph::node::NodeId;
use crate::network::load::load_network;
use crate::network::network::Network;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod analysis;
mod graph;
mod network;

/// Flow and routing analysis over a capacitated rail network.
#[derive(Parser)]
#[command(name = "railflow", version, about)]
struct Cli {
    /// Stations file (name,district,municipality,township,line)
    #[arg(long, global = true, default_value = "data/stations.csv")]
    stations: PathBuf,

    /// Connections file (station_a,station_b,capacity,service)
    #[arg(long, global = true, default_value = "data/network.csv")]
    network: PathBuf,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Maximum number of trains that can run between two stations at once
    MaxFlow { from: String, to: String },

    /// Station pairs that support the highest simultaneous train count
    Busiest {
        /// Check every pair instead of pruning by capacity rank
        #[arg(long)]
        exhaustive: bool,
    },

    /// Districts or municipalities ranked by connected capacity
    Regions {
        /// Rank municipalities instead of districts
        #[arg(long)]
        municipalities: bool,

        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Maximum number of trains that can arrive at a station at once
    Arrivals { station: String },

    /// Cheapest route between two stations, with its train count and cost
    Route { from: String, to: String },

    /// Max flow between two stations after severing connections
    Reduced {
        from: String,
        to: String,

        /// Connection to sever, as "Station A=Station B" (repeatable)
        #[arg(long, value_parser = parse_cut, required = true)]
        cut: Vec<(String, String)>,
    },

    /// Stations whose attainable arrivals change the most after severing
    /// connections
    Impact {
        /// Connection to sever, as "Station A=Station B" (repeatable)
        #[arg(long, value_parser = parse_cut, required = true)]
        cut: Vec<(String, String)>,

        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// List every station
    Stations,

    /// List every connection
    Connections,
}

fn parse_cut(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(a, b)| (a.trim().to_string(), b.trim().to_string()))
        .ok_or_else(|| format!("expected \"Station A=Station B\", got {raw:?}"))
}

fn resolve(network: &Network, name: &str) -> anyhow::Result<NodeId> {
    network
        .id_of(name)
        .with_context(|| format!("unknown station {name:?}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    let mut network = load_network(&cli.stations, &cli.network)?;

    match cli.command {
        Command::MaxFlow { from, to } => {
            let a = resolve(&network, &from)?;
            let b = resolve(&network, &to)?;
            max_flow(network.graph_mut(), a, b)?;
            println!(
                "{} trains can run between {} and {} simultaneously",
                total_outflow(network.graph(), a),
                from,
                to
            );
        }
        Command::Busiest { exhaustive } => {
            let (pairs, flow) = busiest_pairs(network.graph_mut(), exhaustive);
            for (a, b) in &pairs {
                println!(
                    "{} - {}",
                    network.name_of(*a).unwrap_or("?"),
                    network.name_of(*b).unwrap_or("?")
                );
            }
            println!("maximum flow: {flow} trains");
            if !exhaustive {
                println!("(capacity-rank pruning was active; pass --exhaustive to check every pair)");
            }
        }
        Command::Regions {
            municipalities,
            top,
        } => {
            let ranked = if municipalities {
                network.top_municipalities(top)
            } else {
                network.top_districts(top)
            };
            for (name, capacity) in ranked {
                println!("{name}: {capacity}");
            }
        }
        Command::Arrivals { station } => {
            let id = resolve(&network, &station)?;
            let arrivals = inbound_capacity(network.graph(), id)?;
            println!("{arrivals} trains can arrive at {station} simultaneously");
        }
        Command::Route { from, to } => {
            let a = resolve(&network, &from)?;
            let b = resolve(&network, &to)?;
            cheapest_routes(network.graph_mut(), a)?;
            match route_to(network.graph(), a, b) {
                None => println!("no route between {from} and {to}"),
                Some(stops) => {
                    let names: Vec<&str> = stops
                        .iter()
                        .map(|id| network.name_of(*id).unwrap_or("?"))
                        .collect();
                    println!("{}", names.join(" -> "));
                    if let Some(node) = network.graph().find_node(b) {
                        println!("{} trains, costing {}", node.distance(), node.cost());
                    }
                }
            }
        }
        Command::Reduced { from, to, cut } => {
            let a = resolve(&network, &from)?;
            let b = resolve(&network, &to)?;
            let mut probe = network.graph().clone();
            for (x, y) in &cut {
                let cx = resolve(&network, x)?;
                let cy = resolve(&network, y)?;
                let severed = probe.remove_edge(cx, cy) | probe.remove_edge(cy, cx);
                if !severed {
                    println!("note: no connection between {x} and {y}");
                }
            }
            max_flow(&mut probe, a, b)?;
            println!(
                "{} trains can run between {} and {} on the reduced network",
                total_outflow(&probe, a),
                from,
                to
            );
        }
        Command::Impact { cut, top } => {
            let mut severed = Vec::with_capacity(cut.len());
            for (x, y) in &cut {
                severed.push((resolve(&network, x)?, resolve(&network, y)?));
            }
            let ranking = most_affected(network.graph(), &severed, top)?;
            println!("most affected stations:");
            for (id, delta) in ranking {
                println!("{}: {delta:+} trains", network.name_of(id).unwrap_or("?"));
            }
        }
        Command::Stations => {
            for station in network.stations() {
                println!(
                    "{} ({}, {}, {}) - {} line",
                    station.name(),
                    station.township(),
                    station.municipality(),
                    station.district(),
                    station.line()
                );
            }
        }
        Command::Connections => {
            for (a, b, capacity) in network.connections() {
                println!("{a} <-> {b} ({capacity})");
            }
        }
    }
    Ok(())
}
