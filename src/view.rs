//! The campus map view: markers for every point of interest, a companion
//! list, and a single popup that follows the selection.

use crate::{
    core::{
        config::{MapConfig, PopupConfig},
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, POPUP_OVERLAY_ID},
        control::{Control, MousePosition},
        geo::Point,
        map::Map,
        overlay::Overlay,
        viewport::Viewport,
    },
    input::{InputEvent, MapEvent},
    layers::{
        base::LayerTrait,
        feature::{Feature, Icon, IconAnchorUnits, Style},
        tile::TileLayer,
        vector::VectorLayer,
    },
    poi::{self, PointOfInterest},
    Result,
};

/// Layer holding the OpenStreetMap base tiles
pub const BASE_LAYER_ID: &str = "osm";

/// Layer holding one marker per point of interest
pub const MARKER_LAYER_ID: &str = "points-of-interest";

/// Text shown in the popup. Both fields start empty and keep their last
/// value after the popup closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub title: String,
    pub description: String,
}

/// Builds the marker feature for a point of interest
pub fn marker_feature(poi: &PointOfInterest) -> Feature {
    let icon = Icon::new(poi.icon.asset_path(), MARKER_ICON_SIZE)
        .with_anchor(
            MARKER_ICON_ANCHOR,
            IconAnchorUnits::Fraction,
            IconAnchorUnits::Pixels,
        )
        .with_cross_origin("anonymous");

    Feature::new(poi.id, poi.projected())
        .with_property("name", poi.name)
        .with_property("id", poi.id)
        .with_property("descr", poi.description)
        .with_style(Style::icon(icon))
}

fn popup_overlay(config: &PopupConfig) -> Overlay {
    Overlay::new(POPUP_OVERLAY_ID)
        .with_positioning(config.positioning)
        .with_offset(config.offset)
        .with_stop_event(false)
}

pub struct MapView {
    map: Map,
    popup: PopupState,
    popup_config: PopupConfig,
    /// The popup overlay while it is not attached to the map
    detached_popup: Option<Overlay>,
    registry: &'static [PointOfInterest],
}

impl MapView {
    /// Creates the map for a container of `size` pixels with base tiles,
    /// markers, controls and a detached popup
    pub fn mount(config: &MapConfig, size: Point) -> Result<Self> {
        config.validate()?;

        let mut viewport = Viewport::new(config.view.center_lat_lng(), config.view.zoom, size);
        viewport.set_zoom_limits(config.view.min_zoom, config.view.max_zoom);
        let mut map = Map::with_viewport(viewport);

        if config.tiles.enabled {
            map.add_layer(Box::new(TileLayer::new(
                BASE_LAYER_ID,
                "OpenStreetMap",
                &config.tiles,
            )?))?;
        }

        let registry = poi::registry();
        let mut markers = VectorLayer::new(MARKER_LAYER_ID, "Points of interest");
        markers.set_z_index(1);
        markers.add_features(registry.iter().map(marker_feature))?;
        map.add_layer(Box::new(markers))?;

        for control in Control::defaults(config.tiles.attribution.clone()) {
            map.add_control(control);
        }
        let mouse = &config.mouse_position;
        map.add_control(Control::MousePosition(
            MousePosition::new(mouse.projection, mouse.precision)
                .with_undefined_text(mouse.undefined_text.clone()),
        ));
        map.add_control(Control::ObjectList);

        // Layer registration events are not part of the view's state
        map.process_events();

        log::info!(
            "map view mounted at {:?} zoom {} with {} points of interest",
            config.view.center,
            config.view.zoom,
            registry.len()
        );

        Ok(Self {
            map,
            popup: PopupState::default(),
            popup_config: config.popup.clone(),
            detached_popup: Some(popup_overlay(&config.popup)),
            registry,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    /// The popup overlay while it is attached to the map
    pub fn popup_overlay(&self) -> Option<&Overlay> {
        self.map.overlay(POPUP_OVERLAY_ID)
    }

    /// Projected anchor of the popup; `None` while closed
    pub fn popup_position(&self) -> Option<Point> {
        self.popup_overlay().and_then(Overlay::position)
    }

    pub fn popup_visible(&self) -> bool {
        self.popup_position().is_some()
    }

    /// Entries of the companion list, in registry order
    pub fn list(&self) -> &'static [PointOfInterest] {
        self.registry
    }

    pub fn marker_layer(&self) -> Option<&VectorLayer> {
        self.map
            .get_layer(MARKER_LAYER_ID)?
            .as_any()
            .downcast_ref::<VectorLayer>()
    }

    fn open_popup(&mut self, title: &str, description: &str, position: Point) {
        self.popup.title = title.to_string();
        self.popup.description = description.to_string();

        match self.map.overlay_mut(POPUP_OVERLAY_ID) {
            Some(overlay) => overlay.set_position(Some(position)),
            None => {
                let mut overlay = self
                    .detached_popup
                    .take()
                    .unwrap_or_else(|| popup_overlay(&self.popup_config));
                overlay.set_position(Some(position));
                self.map.add_overlay(overlay);
            }
        }
        log::debug!("popup opened for '{}'", title);
    }

    /// Opens the popup for the topmost marker under `pixel`, or closes it when
    /// nothing is hit. Returns the id of the hit point of interest.
    pub fn on_map_click(&mut self, pixel: Point) -> Option<u32> {
        let hit = self.map.for_each_feature_at_pixel(&pixel, |feature, layer_id| {
            if layer_id != MARKER_LAYER_ID {
                return None;
            }
            Some((
                feature.id(),
                feature.get_str("name").unwrap_or_default().to_string(),
                feature.get_str("descr").unwrap_or_default().to_string(),
                feature.geometry(),
            ))
        });

        match hit {
            Some((id, title, description, position)) => {
                self.open_popup(&title, &description, position);
                Some(id)
            }
            None => {
                log::debug!("click at ({:.1}, {:.1}) hit no marker", pixel.x, pixel.y);
                self.close_popup();
                None
            }
        }
    }

    /// Opens the popup for a list entry and recentres the view on it
    pub fn on_list_item_click(&mut self, poi: &PointOfInterest) {
        let position = poi.projected();
        self.open_popup(poi.name, poi.description, position);
        self.map.set_center_projected(position);
    }

    /// Detaches the popup overlay; the popup text is left as it was
    pub fn close_popup(&mut self) {
        if let Some(mut overlay) = self.map.remove_overlay(POPUP_OVERLAY_ID) {
            overlay.set_position(None);
            self.detached_popup = Some(overlay);
            log::debug!("popup closed");
        }
    }

    /// Reacts to an event reported by the map
    pub fn handle_event(&mut self, event: &MapEvent) {
        match event {
            MapEvent::Click { pixel, .. } => {
                self.on_map_click(*pixel);
            }
            MapEvent::PointerMove { .. } => {
                if let Some(control) = self.map.mouse_position_mut() {
                    control.update(event.lat_lng());
                }
            }
            _ => {}
        }
    }

    /// Drains the map's event queue through `handle_event`
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events = self.map.process_events();
        for event in &events {
            self.handle_event(event);
        }
        events
    }

    /// Feeds pointer input to the map and reacts to the resulting events
    pub fn handle_input(&mut self, input: InputEvent) -> Result<Vec<MapEvent>> {
        self.map.handle_input(input)?;
        Ok(self.process_events())
    }

    /// Lets the layers catch up with the view (tile downloads)
    pub fn update(&mut self) -> Result<()> {
        self.map.update()
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        log::info!("map view unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{constants::CAMPUS_CENTER, control::ControlKind};

    fn mounted() -> MapView {
        MapView::mount(&MapConfig::offline(), Point::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn test_mount_builds_markers_and_controls() {
        let view = mounted();

        assert_eq!(view.marker_layer().unwrap().len(), 5);
        assert!(view.map().get_layer(BASE_LAYER_ID).is_none());
        assert!(!view.popup_visible());
        assert_eq!(view.popup(), &PopupState::default());

        let kinds: Vec<_> = view.map().controls().iter().map(Control::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ControlKind::Zoom,
                ControlKind::Attribution,
                ControlKind::MousePosition,
                ControlKind::ObjectList
            ]
        );

        let center = view.map().viewport().center.to_lon_lat();
        assert!((center[0] - CAMPUS_CENTER[0]).abs() < 1e-9);
        assert!((center[1] - CAMPUS_CENTER[1]).abs() < 1e-9);
    }

    #[test]
    fn test_marker_feature_properties() {
        let feature = marker_feature(poi::find(4).unwrap());
        assert_eq!(feature.get_str("name"), Some("Памятник студентам и сотрудникам РИСХМ"));
        assert_eq!(feature.get_str("descr"), Some("Установлен 08.05.1982"));
        assert_eq!(feature.get_u64("id"), Some(4));

        let icon = &feature.style().unwrap().image;
        assert_eq!(icon.src, "images/icons/memorial.svg");
        assert_eq!(icon.anchor_offset(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_mount_rejects_invalid_config() {
        let mut config = MapConfig::offline();
        config.view.zoom = 30.0;
        assert!(MapView::mount(&config, Point::new(800.0, 600.0)).is_err());
    }

    #[test]
    fn test_close_keeps_popup_text() {
        let mut view = mounted();
        view.on_list_item_click(poi::find(0).unwrap());
        assert!(view.popup_visible());

        view.close_popup();
        assert!(!view.popup_visible());
        assert_eq!(view.popup().title, "Парк ДГТУ");

        // Closing twice is harmless
        view.close_popup();
        assert!(view.popup_overlay().is_none());
    }
}
