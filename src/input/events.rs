use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Pointer input in container pixel coordinates, as delivered by the UI shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Click {
        position: Point,
        button: MouseButton,
    },
    DoubleClick { position: Point },
    /// Pointer moved over the map
    MouseMove { position: Point },
    /// Pointer left the map container
    MouseLeave,
    DragStart { position: Point },
    /// `delta` is the pointer movement since the previous drag event
    Drag { delta: Point },
    DragEnd,
    /// Wheel scroll in points; positive zooms in
    Scroll { delta: f64, position: Point },
    Resize { size: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// What the map reports back to its owner after handling input
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Center, zoom or container size changed
    ViewChanged { center: LatLng, zoom: f64 },
    /// Primary-button click on the map surface
    Click { lat_lng: LatLng, pixel: Point },
    /// `None` once the pointer leaves the container
    PointerMove {
        lat_lng: Option<LatLng>,
        pixel: Option<Point>,
    },
    LayerAdd { layer_id: String },
    LayerRemove { layer_id: String },
    OverlayAdd { overlay_id: String },
    OverlayRemove { overlay_id: String },
}

impl MapEvent {
    /// DOM-style event name, as web maps use
    pub fn event_type(&self) -> &'static str {
        use MapEvent::*;
        match self {
            ViewChanged { .. } => "viewchanged",
            Click { .. } => "click",
            PointerMove { .. } => "pointermove",
            LayerAdd { .. } => "layeradd",
            LayerRemove { .. } => "layerremove",
            OverlayAdd { .. } => "overlayadd",
            OverlayRemove { .. } => "overlayremove",
        }
    }

    /// Geographic position carried by pointer events
    pub fn lat_lng(&self) -> Option<LatLng> {
        match self {
            MapEvent::Click { lat_lng, .. } => Some(*lat_lng),
            MapEvent::PointerMove { lat_lng, .. } => *lat_lng,
            _ => None,
        }
    }
}
