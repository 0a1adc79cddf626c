use crate::network::network::{Network, Service};
use crate::network::station::Station;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: malformed record")]
    Malformed { path: PathBuf, line: usize },
    #[error("{path}:{line}: unknown station {name:?}")]
    UnknownStation {
        path: PathBuf,
        line: usize,
        name: String,
    },
}

/// Loads a network from the stations and connections files. Both files
/// carry a header line; records are plain comma-separated fields.
pub fn load_network(stations_path: &Path, network_path: &Path) -> Result<Network, LoadError> {
    let mut network = Network::new();
    let stations = read(stations_path)?;
    parse_stations(&stations, stations_path, &mut network)?;
    let connections = read(network_path)?;
    parse_connections(&connections, network_path, &mut network)?;
    info!(
        stations = network.stations().len(),
        connections = network.connections().len(),
        "network loaded"
    );
    Ok(network)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `name,district,municipality,township,line`
fn parse_stations(text: &str, path: &Path, network: &mut Network) -> Result<(), LoadError> {
    for (at, record) in text.lines().enumerate().skip(1) {
        if record.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split(',').collect();
        let [name, district, municipality, township, line] = fields[..] else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line: at + 1,
            });
        };
        network.add_station(Station::new(name, district, municipality, township, line));
    }
    Ok(())
}

/// `station_a,station_b,capacity,service`
fn parse_connections(text: &str, path: &Path, network: &mut Network) -> Result<(), LoadError> {
    for (at, record) in text.lines().enumerate().skip(1) {
        if record.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split(',').collect();
        let [a, b, capacity, service] = fields[..] else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line: at + 1,
            });
        };
        let capacity: f64 = capacity.trim().parse().map_err(|_| LoadError::Malformed {
            path: path.to_path_buf(),
            line: at + 1,
        })?;
        for name in [a, b] {
            if network.id_of(name).is_none() {
                return Err(LoadError::UnknownStation {
                    path: path.to_path_buf(),
                    line: at + 1,
                    name: name.to_string(),
                });
            }
        }
        network.connect(a, b, capacity, Service::parse(service));
    }
    Ok(())
}
