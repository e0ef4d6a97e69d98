//! Engine-wide magic numbers and the campus map defaults.
//! Keeping them in a single place makes them easy to find and tweak.

use crate::core::geo::LonLat;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level the OpenStreetMap tile servers render.
pub const OSM_MAX_ZOOM: u8 = 19;

/// Centre of the campus map view, `[lon, lat]`.
pub const CAMPUS_CENTER: LonLat = [39.71065, 47.24011];

/// Zoom level the campus map opens at.
pub const CAMPUS_ZOOM: f64 = 17.0;

/// Programmatic +/- zoom step used by the zoom control.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Scroll-wheel points per zoom level.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.005;

/// Side of a marker icon in pixels.
pub const MARKER_ICON_SIZE: (f64, f64) = (20.0, 20.0);

/// Icon hot-spot: horizontal fraction of the width, vertical offset in pixels.
pub const MARKER_ICON_ANCHOR: [f64; 2] = [0.5, 20.0];

/// Popup overlay offset from its anchor, in pixels (x right, y down).
pub const POPUP_OFFSET: [f64; 2] = [0.0, 15.0];

/// Identifier of the popup overlay on the campus map.
pub const POPUP_OVERLAY_ID: &str = "popup";

/// Decimal places shown by the mouse position control.
pub const MOUSE_POSITION_PRECISION: usize = 4;

/// Movement below this many pixels between press and release is a click.
pub const CLICK_TOLERANCE_PX: f64 = 3.0;

pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub const OSM_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// User agent sent with tile requests; public tile servers reject anonymous clients.
pub const DEFAULT_USER_AGENT: &str = concat!("campus-map/", env!("CARGO_PKG_VERSION"));
