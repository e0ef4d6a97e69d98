//! egui front end: the map widget, the pages and the application shell.

pub mod app;
pub mod controls;
pub mod pages;
pub mod popup;
pub mod style;
pub mod widget;

pub use app::CampusMapApp;
pub use pages::{LandingPage, MapPage};
pub use style::{AttributionStyle, ListStyle, MapStyle, MarkerStyle, PopupStyle, ZoomControlStyle};
pub use widget::{MapWidget, TileTextures};
