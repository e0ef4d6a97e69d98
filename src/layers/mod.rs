pub mod base;
pub mod feature;
pub mod macros;
pub mod manager;
pub mod tile;
pub mod vector;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use feature::{Feature, Icon, IconAnchorUnits, Style};
pub use manager::LayerManager;
pub use tile::TileLayer;
pub use vector::VectorLayer;
