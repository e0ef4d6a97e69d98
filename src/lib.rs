//! # campus-map
//!
//! An interactive map of the points of interest on the DSTU campus.
//!
//! The crate bundles a small Leaflet-style map engine (viewport, layers,
//! overlays, controls and tile loading) with the campus-specific parts: the
//! point registry, the map view that ties markers, list and popup together,
//! and a router for the landing and map pages. With the `egui` feature it
//! also provides the widgets and the application shell.

pub mod core;
pub mod input;
pub mod layers;
pub mod poi;
pub mod prelude;
pub mod router;
pub mod spatial;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub mod view;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::MapConfig,
    geo::{LatLng, LatLngBounds, LonLat, Point, TileCoord},
    map::Map,
    overlay::{Overlay, OverlayPositioning},
    viewport::Viewport,
};

pub use input::{InputEvent, MapEvent};
pub use layers::{LayerTrait, TileLayer, VectorLayer};
pub use poi::{IconKind, PointOfInterest};
pub use router::{Route, Router};
pub use view::{MapView, PopupState};

#[cfg(feature = "egui")]
pub use ui::{app::CampusMapApp, widget::MapWidget};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Tile error: {0}")]
    Tile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
