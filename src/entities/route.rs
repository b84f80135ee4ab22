use serde::{Deserialize, Serialize};

use super::station::LatLng;

/// A bus route. Static reference data, read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub code: String,
    pub name: String,
    pub stops: Vec<String>,
    pub duration: String,
    pub fare: String,
    pub frequency: String,
    pub path: Vec<LatLng>,
}

impl Route {
    pub fn first_stop(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    pub fn last_stop(&self) -> Option<&str> {
        self.stops.last().map(String::as_str)
    }
}
