use crate::catalog::{Catalog, MAP_CENTER, MAP_ZOOM, TERMINAL_ID};
use crate::entities::route::Route;
use crate::entities::station::LatLng;
use crate::events::{EventBus, UiEvent};
use crate::utils::geo;

/// A station marker handed to whatever renders the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub label: String,
    pub highlighted: bool,
}

/// A highlighted route: its polyline, one marker per stop and the bounds to
/// fit the viewport to.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
    pub code: String,
    pub polyline: Vec<LatLng>,
    pub stops: Vec<Marker>,
    pub bounds: (LatLng, LatLng),
}

/// Station popup content with one card per serving route.
#[derive(Clone, Debug, PartialEq)]
pub struct StationInfo {
    pub name: String,
    pub address: String,
    pub routes: Vec<RouteCard>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteCard {
    pub code: String,
    pub name: String,
    pub stops: String,
    pub duration: String,
    pub fare: String,
    pub frequency: String,
    pub length_km: f64,
}

/// Map adapter context. Owns its viewport and overlay state, so repeated
/// initialization or a second view is safe. Rendering, tiling and panning
/// live outside; this type only produces marker/polyline data and consumes
/// discrete selection events.
pub struct MapView<'a> {
    catalog: &'a Catalog,
    pub center: LatLng,
    pub zoom: u8,
    overlays: Vec<RouteOverlay>,
    selected_station: Option<String>,
}

impl<'a> MapView<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            overlays: Vec::new(),
            selected_station: Some(TERMINAL_ID.to_string()),
        }
    }

    /// One marker per station; the central terminal is highlighted.
    pub fn markers(&self) -> Vec<Marker> {
        self.catalog
            .stations()
            .iter()
            .map(|s| Marker {
                position: s.pos,
                label: s.name.clone(),
                highlighted: s.id == TERMINAL_ID,
            })
            .collect()
    }

    pub fn selected_station(&self) -> Option<&str> {
        self.selected_station.as_deref()
    }

    pub fn overlays(&self) -> &[RouteOverlay] {
        &self.overlays
    }

    /// Select a station and build its popup content. Unknown ids are a
    /// silent no-op.
    pub fn select_station(&mut self, id: &str, bus: &EventBus<UiEvent>) -> Option<StationInfo> {
        let station = self.catalog.station(id)?;
        self.selected_station = Some(station.id.clone());
        bus.emit(&UiEvent::StationSelected(station.id.clone()));

        Some(StationInfo {
            name: station.name.clone(),
            address: station.address.clone(),
            routes: self
                .catalog
                .routes_for_station(id)
                .into_iter()
                .map(route_card)
                .collect(),
        })
    }

    /// Highlight one route: replaces any current overlay and fits the
    /// viewport to the route path. Unknown codes are a silent no-op.
    pub fn show_route(&mut self, code: &str, bus: &EventBus<UiEvent>) -> Option<&RouteOverlay> {
        let route = self.catalog.route(code)?;
        let bounds = geo::bounds(&route.path)?;

        let stops = route
            .path
            .iter()
            .enumerate()
            .map(|(i, &position)| Marker {
                position,
                label: route
                    .stops
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Stop {}", i + 1)),
                highlighted: false,
            })
            .collect();

        self.overlays.clear();
        self.overlays.push(RouteOverlay {
            code: route.code.clone(),
            polyline: route.path.clone(),
            stops,
            bounds,
        });
        self.center = (
            (bounds.0.0 + bounds.1.0) / 2.0,
            (bounds.0.1 + bounds.1.1) / 2.0,
        );
        bus.emit(&UiEvent::RouteSelected(route.code.clone()));

        self.overlays.last()
    }

    pub fn clear_routes(&mut self) {
        self.overlays.clear();
    }

    /// Back to the default viewport with the terminal selected.
    pub fn reset(&mut self, bus: &EventBus<UiEvent>) {
        self.clear_routes();
        self.center = MAP_CENTER;
        self.zoom = MAP_ZOOM;
        self.select_station(TERMINAL_ID, bus);
    }

    /// Cards for every route, the "show all routes" view.
    pub fn all_route_cards(&self) -> Vec<RouteCard> {
        self.catalog.routes().iter().map(|r| route_card(r)).collect()
    }

    /// Query string for "book from here" on a station popup.
    pub fn booking_query_from_station(&self, station_id: &str) -> Option<String> {
        let station = self.catalog.station(station_id)?;
        Some(format!("from={}", station.id))
    }

    /// Query string for booking a route end to end, with simplified
    /// lowercase station names.
    pub fn booking_query_for_route(&self, code: &str) -> Option<String> {
        let route = self.catalog.route(code)?;
        let from = simplify_stop(route.first_stop()?);
        let to = simplify_stop(route.last_stop()?);
        Some(format!("from={from}&to={to}"))
    }
}

fn route_card(route: &Route) -> RouteCard {
    RouteCard {
        code: route.code.clone(),
        name: route.name.clone(),
        stops: route.stops.join(" -> "),
        duration: route.duration.clone(),
        fare: route.fare.clone(),
        frequency: route.frequency.clone(),
        length_km: geo::path_length_km(&route.path),
    }
}

fn simplify_stop(name: &str) -> String {
    name.replace(" Station", "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_markers_highlight_terminal_only() {
        let catalog = Catalog::new();
        let view = MapView::new(&catalog);
        let markers = view.markers();

        assert_eq!(markers.len(), 7);
        let highlighted: Vec<_> = markers.iter().filter(|m| m.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].label, "City Bus Terminal");
    }

    #[test]
    fn test_select_station_emits_event() {
        let catalog = Catalog::new();
        let mut view = MapView::new(&catalog);
        let mut bus = EventBus::new();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(move |e: &UiEvent| sink.borrow_mut().push(e.clone()));

        let info = view.select_station("bole", &bus).unwrap();
        assert_eq!(info.name, "Bole Station");
        assert_eq!(info.routes.len(), 3);
        assert_eq!(view.selected_station(), Some("bole"));
        assert_eq!(
            *seen.borrow(),
            vec![UiEvent::StationSelected("bole".to_string())]
        );
    }

    #[test]
    fn test_select_unknown_station_is_noop() {
        let catalog = Catalog::new();
        let mut view = MapView::new(&catalog);
        let bus = EventBus::new();

        assert!(view.select_station("nowhere", &bus).is_none());
        assert_eq!(view.selected_station(), Some(TERMINAL_ID));
    }

    #[test]
    fn test_show_route_builds_overlay_with_stop_markers() {
        let catalog = Catalog::new();
        let mut view = MapView::new(&catalog);
        let bus = EventBus::new();

        let overlay = view.show_route("103", &bus).unwrap();
        assert_eq!(overlay.polyline.len(), 4);
        assert_eq!(overlay.stops.len(), 4);
        assert_eq!(overlay.stops[0].label, "Mercato Station");

        // A second route replaces the first overlay.
        view.show_route("104", &bus).unwrap();
        assert_eq!(view.overlays().len(), 1);
        assert_eq!(view.overlays()[0].code, "104");
    }

    #[test]
    fn test_reset_restores_default_view() {
        let catalog = Catalog::new();
        let mut view = MapView::new(&catalog);
        let bus = EventBus::new();

        view.show_route("101", &bus);
        view.reset(&bus);

        assert!(view.overlays().is_empty());
        assert_eq!(view.center, MAP_CENTER);
        assert_eq!(view.zoom, MAP_ZOOM);
        assert_eq!(view.selected_station(), Some(TERMINAL_ID));
    }

    #[test]
    fn test_booking_queries() {
        let catalog = Catalog::new();
        let view = MapView::new(&catalog);

        assert_eq!(
            view.booking_query_from_station("saris").as_deref(),
            Some("from=saris")
        );
        assert_eq!(
            view.booking_query_for_route("101").as_deref(),
            Some("from=piazza&to=bole")
        );
        assert!(view.booking_query_for_route("999").is_none());
    }

    #[test]
    fn test_route_cards_carry_length() {
        let catalog = Catalog::new();
        let view = MapView::new(&catalog);

        let cards = view.all_route_cards();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.length_km > 0.0));
    }
}
