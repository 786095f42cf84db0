use std::{collections::{BTreeMap, HashMap}, io::Read};

use log::warn;
use once_cell::sync::Lazy;
use serde::Deserialize;

use self::route::{Route, RouteId};
use self::station::{normalize_station_name, Coordinate, Station};
use crate::errors::Result;

pub mod route;
pub mod station;
pub mod zhanjiang;

/// The built-in network, assembled on first use.
pub static ZHANJIANG: Lazy<Registry> = Lazy::new(Registry::zhanjiang);

/// Stations keyed by canonical name and routes keyed by id. Read-only once built.

#[derive(Debug, Default, Clone)]
pub struct Registry {
    stations: Vec<Station>,
    by_name: HashMap<String, usize>,
    routes: BTreeMap<RouteId, Route>,
}

#[derive(Deserialize)]
struct NetworkFile {
    stations: Vec<Station>,
    routes: Vec<Route>,
}

impl Registry {
    pub fn new(stations: Vec<Station>, routes: Vec<Route>) -> Result<Registry> {
        let mut registry = Registry::default();
        for mut station in stations {
            // stored under the same key the lookups normalize to
            station.name = normalize_station_name(&station.name);
            if registry.by_name.contains_key(&station.name) {
                warn!(station = station.name.as_str(); "Duplicate station ignored");
                continue;
            }
            registry.by_name.insert(station.name.clone(), registry.stations.len());
            registry.stations.push(station);
        }
        for route in routes {
            if route.id.0 == 0 {
                return Err(format!("Route '{}' has id 0, ids start at 1", route.name).into());
            }
            if registry.routes.contains_key(&route.id) {
                return Err(format!("Route id {} is declared twice", route.id).into());
            }
            registry.routes.insert(route.id, route);
        }
        Ok(registry)
    }

    pub fn zhanjiang() -> Registry {
        let mut registry = Registry::default();
        for record in zhanjiang::STATIONS {
            registry.by_name.insert(record.name.to_string(), registry.stations.len());
            registry.stations.push(Station {
                name: record.name.to_string(),
                coordinate: Coordinate { lat: record.lat, lon: record.lon },
                address: Some(record.address.to_string()),
                phone: Some(record.phone.to_string()),
            });
        }
        for record in zhanjiang::ROUTES {
            registry.routes.insert(RouteId(record.id), Route {
                id: RouteId(record.id),
                name: record.name.to_string(),
                path: record.path.iter().map(|s| s.to_string()).collect(),
                stations: record.stations.iter().map(|s| s.to_string()).collect(),
            });
        }
        registry
    }

    /// Reads a network description in JSON, see `config/` for the layout.
    pub fn from_reader<R: Read>(reader: R) -> Result<Registry> {
        let network: NetworkFile = serde_json::from_reader(reader)?;
        Registry::new(network.stations, network.routes)
    }

    pub fn lookup_coordinate(&self, name: &str) -> Option<Coordinate> {
        self.lookup_station_details(name).map(|station| station.coordinate)
    }

    pub fn lookup_station_details(&self, name: &str) -> Option<&Station> {
        let key = normalize_station_name(name);
        self.by_name.get(&key).map(|&idx| &self.stations[idx])
    }

    /// Stations in declaration order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Routes ordered by id.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }
}
