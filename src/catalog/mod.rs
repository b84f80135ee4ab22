use crate::entities::route::Route;
use crate::entities::station::Station;

/// Station id of the central terminal, highlighted on the map and used as
/// the default selection.
pub const TERMINAL_ID: &str = "terminal";

/// Default map center and zoom for the Addis Ababa network.
pub const MAP_CENTER: (f64, f64) = (9.032, 38.746);
pub const MAP_ZOOM: u8 = 12;

/// Static station/route reference data for the Addis Ababa bus network.
pub struct Catalog {
    stations: Vec<Station>,
    routes: Vec<Route>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            stations: build_stations(),
            routes: build_routes(),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn route(&self, code: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.code == code)
    }

    /// Routes serving a station, in catalog order. Unknown station ids yield
    /// an empty list.
    pub fn routes_for_station(&self, station_id: &str) -> Vec<&Route> {
        let Some(station) = self.station(station_id) else {
            return Vec::new();
        };
        station
            .routes
            .iter()
            .filter_map(|code| self.route(code))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn station(id: &str, name: &str, pos: (f64, f64), routes: &[&str], address: &str) -> Station {
    Station {
        id: id.to_string(),
        name: name.to_string(),
        pos,
        routes: routes.iter().map(|r| r.to_string()).collect(),
        address: address.to_string(),
    }
}

fn build_stations() -> Vec<Station> {
    vec![
        station("piazza", "Piazza Station", (9.039, 38.748), &["101", "102"], "Piazza, Addis Ababa"),
        station("mercatto", "Mercato Station", (9.025, 38.743), &["101", "102", "103"], "Mercato, Addis Ababa"),
        station("mexico", "Mexico Square Station", (9.021, 38.758), &["102", "104"], "Mexico Square, Addis Ababa"),
        station("bole", "Bole Station", (8.992, 38.789), &["101", "103", "105"], "Bole, Addis Ababa"),
        station("airport", "Bole Airport Station", (8.980, 38.799), &["103", "105"], "Bole Airport, Addis Ababa"),
        station("saris", "Saris Station", (9.035, 38.792), &["103", "104"], "Saris, Addis Ababa"),
        station("terminal", "City Bus Terminal", (9.030, 38.765), &["101", "102", "103", "104", "105"], "City Terminal, Addis Ababa"),
    ]
}

fn route(
    code: &str,
    stops: &[&str],
    duration: &str,
    fare: &str,
    frequency: &str,
    path: &[(f64, f64)],
) -> Route {
    Route {
        code: code.to_string(),
        name: format!("Route {code}"),
        stops: stops.iter().map(|s| s.to_string()).collect(),
        duration: duration.to_string(),
        fare: fare.to_string(),
        frequency: frequency.to_string(),
        path: path.to_vec(),
    }
}

fn build_routes() -> Vec<Route> {
    vec![
        route(
            "101",
            &["Piazza Station", "Mercato Station", "Bole Station"],
            "45 min", "8 ETB", "Every 15 min",
            &[(9.039, 38.748), (9.025, 38.743), (8.992, 38.789)],
        ),
        route(
            "102",
            &["Piazza Station", "Mercato Station", "Mexico Square Station"],
            "30 min", "6 ETB", "Every 10 min",
            &[(9.039, 38.748), (9.025, 38.743), (9.021, 38.758)],
        ),
        route(
            "103",
            &["Mercato Station", "Bole Station", "Bole Airport Station", "Saris Station"],
            "35 min", "7 ETB", "Every 20 min",
            &[(9.025, 38.743), (8.992, 38.789), (8.980, 38.799), (9.035, 38.792)],
        ),
        route(
            "104",
            &["Mexico Square Station", "Saris Station"],
            "25 min", "5 ETB", "Every 15 min",
            &[(9.021, 38.758), (9.035, 38.792)],
        ),
        route(
            "105",
            &["Bole Airport Station", "Bole Station"],
            "15 min", "4 ETB", "Every 30 min",
            &[(8.980, 38.799), (8.992, 38.789)],
        ),
    ]
}
