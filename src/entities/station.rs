use serde::{Deserialize, Serialize};

/// Geographic coordinate as `(lat, lng)`.
pub type LatLng = (f64, f64);

/// A bus station. Static reference data, read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub pos: LatLng,
    pub routes: Vec<String>,
    pub address: String,
}
