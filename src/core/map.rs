use crate::{
    core::{
        control::{Control, MousePosition},
        geo::{LatLng, Point},
        overlay::Overlay,
        viewport::Viewport,
    },
    input::{Action, EventManager, InputEvent, InputHandler, MapEvent},
    layers::{base::LayerTrait, feature::Feature, manager::LayerManager},
    MapError, Result,
};

/// The map: a view onto stacked layers, with overlays and controls on top.
///
/// Everything is owned by the instance; dropping the map releases its layers,
/// overlays, controls and any pending events.
pub struct Map {
    viewport: Viewport,
    layers: LayerManager,
    overlays: Vec<Overlay>,
    controls: Vec<Control>,
    events: EventManager,
    input: InputHandler,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: LayerManager::new(),
            overlays: Vec::new(),
            controls: Vec::new(),
            events: EventManager::new(),
            input: InputHandler::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn input_handler_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    fn emit_view_changed(&mut self) {
        self.events.emit(MapEvent::ViewChanged {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }

    /// Sets the center and zoom of the map
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot center on ({}, {})",
                center.lat, center.lng
            ))
            .into());
        }
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.emit_view_changed();
        Ok(())
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.viewport.set_center(center);
        self.emit_view_changed();
    }

    /// Recentres on an EPSG:3857 coordinate
    pub fn set_center_projected(&mut self, center: Point) {
        self.viewport.set_center_projected(center);
        self.emit_view_changed();
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        self.viewport.zoom_to(zoom, focus_point);
        self.emit_view_changed();
    }

    /// Moves the content by `delta` pixels
    pub fn pan(&mut self, delta: Point) -> Point {
        let moved = self.viewport.pan(delta);
        self.emit_view_changed();
        moved
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
        self.emit_view_changed();
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.layers.add_layer(layer)?;
        log::debug!("layer '{}' added", layer_id);
        self.events.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let removed = self.layers.remove_layer(layer_id)?;
        self.events.emit(MapEvent::LayerRemove {
            layer_id: layer_id.to_string(),
        });
        Some(removed)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.with_layer_mut(layer_id, f)
    }

    /// Layers bottom to top
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layers.layers()
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.list_layers()
    }

    /// Calls `callback` for each feature under `pixel`, topmost first, and
    /// returns the first non-`None` result
    pub fn for_each_feature_at_pixel<R, F>(&self, pixel: &Point, mut callback: F) -> Option<R>
    where
        F: FnMut(&Feature, &str) -> Option<R>,
    {
        self.layers
            .features_at_pixel(pixel, &self.viewport)
            .into_iter()
            .find_map(|(layer_id, feature)| callback(feature, layer_id))
    }

    pub fn features_at_pixel(&self, pixel: &Point) -> Vec<&Feature> {
        self.layers
            .features_at_pixel(pixel, &self.viewport)
            .into_iter()
            .map(|(_, feature)| feature)
            .collect()
    }

    /// Attaches an overlay, replacing an attached overlay with the same id
    pub fn add_overlay(&mut self, overlay: Overlay) {
        let overlay_id = overlay.id().to_string();
        match self.overlays.iter_mut().find(|o| o.id() == overlay.id()) {
            Some(existing) => *existing = overlay,
            None => self.overlays.push(overlay),
        }
        self.events.emit(MapEvent::OverlayAdd { overlay_id });
    }

    /// Detaches an overlay and hands it back to the caller
    pub fn remove_overlay(&mut self, overlay_id: &str) -> Option<Overlay> {
        let position = self.overlays.iter().position(|o| o.id() == overlay_id)?;
        let removed = self.overlays.remove(position);
        self.events.emit(MapEvent::OverlayRemove {
            overlay_id: overlay_id.to_string(),
        });
        Some(removed)
    }

    pub fn overlay(&self, overlay_id: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id() == overlay_id)
    }

    pub fn overlay_mut(&mut self, overlay_id: &str) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|o| o.id() == overlay_id)
    }

    /// Attached overlays in attachment order
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn mouse_position(&self) -> Option<&MousePosition> {
        self.controls.iter().find_map(|c| match c {
            Control::MousePosition(mp) => Some(mp),
            _ => None,
        })
    }

    pub fn mouse_position_mut(&mut self) -> Option<&mut MousePosition> {
        self.controls.iter_mut().find_map(|c| match c {
            Control::MousePosition(mp) => Some(mp),
            _ => None,
        })
    }

    /// Attribution text of the attribution control, if attached
    pub fn attribution(&self) -> Option<&str> {
        self.controls.iter().find_map(|c| match c {
            Control::Attribution { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Hands over queued events, oldest first
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    /// Applies one pointer or resize input to the view and queues whatever
    /// it reports (clicks, pointer moves, view changes).
    pub fn handle_input(&mut self, input: InputEvent) -> Result<()> {
        let Some(action) = self.input.handle_event(input, self.viewport.zoom) else {
            return Ok(());
        };

        match action {
            Action::Pan { delta } => {
                self.pan(delta);
            }
            Action::Zoom { level, focus_point } => self.zoom_to(level, focus_point),
            Action::Click { pixel } => {
                let lat_lng = self.viewport.pixel_to_lat_lng(&pixel);
                self.events.emit(MapEvent::Click { lat_lng, pixel });
            }
            Action::Pointer { pixel } => {
                let lat_lng = pixel.map(|p| self.viewport.pixel_to_lat_lng(&p));
                self.events.emit(MapEvent::PointerMove { lat_lng, pixel });
            }
            Action::Resize { size } if size.x <= 0.0 || size.y <= 0.0 => {
                return Err(MapError::Render(format!(
                    "map container must have a positive size, got {}x{}",
                    size.x, size.y
                ))
                .into());
            }
            Action::Resize { size } => self.set_size(size),
        }
        Ok(())
    }

    /// Lets every visible layer catch up with the current view
    pub fn update(&mut self) -> Result<()> {
        self.layers.update(&self.viewport)
    }
}
