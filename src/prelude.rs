//! Prelude module for common campus-map types
//!
//! Re-exports the most commonly used types for easy importing with
//! `use campus_map::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{MapConfig, MousePositionConfig, PopupConfig, TileLoadingConfig, ViewConfig},
    control::{Control, ControlKind, MousePosition, Projection},
    geo::{LatLng, LatLngBounds, LonLat, Point, TileCoord},
    map::Map,
    overlay::{Overlay, OverlayPositioning},
    viewport::Viewport,
};

pub use crate::layers::{
    Feature, Icon, IconAnchorUnits, LayerManager, LayerTrait, LayerType, Style, TileLayer,
    VectorLayer,
};

pub use crate::input::{Action, EventManager, InputEvent, InputHandler, MapEvent, MouseButton};

pub use crate::spatial::{SpatialIndex, SpatialItem};

pub use crate::tiles::{OpenStreetMapSource, TileCache, TileLoader, TileSource};

pub use crate::poi::{IconKind, PointOfInterest};
pub use crate::router::{Route, Router};
pub use crate::view::{MapView, PopupState};

#[cfg(feature = "egui")]
pub use crate::ui::{
    app::CampusMapApp,
    pages::{LandingPage, MapPage},
    widget::MapWidget,
};

pub use crate::{MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
