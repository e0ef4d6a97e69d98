//! Configuration for the campus map
//!
//! Every section has defaults matching the published map, so `MapConfig::default()`
//! is a working configuration. `MapConfig::offline()` is the same map without
//! any tile downloads, used by tests and headless tooling.

use crate::{
    core::{
        constants::{
            CAMPUS_CENTER, CAMPUS_ZOOM, DEFAULT_USER_AGENT, MOUSE_POSITION_PRECISION, OSM_ATTRIBUTION, OSM_MAX_ZOOM,
            OSM_URL_TEMPLATE, POPUP_OFFSET,
        },
        control::Projection,
        geo::{LatLng, LonLat},
        overlay::OverlayPositioning,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub view: ViewConfig,
    pub tiles: TileLoadingConfig,
    pub popup: PopupConfig,
    pub mouse_position: MousePositionConfig,
}

impl MapConfig {
    /// Default configuration with tile loading switched off
    pub fn offline() -> Self {
        let mut config = Self::default();
        config.tiles.enabled = false;
        config
    }

    /// Parses a JSON document; missing sections fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json).map_err(MapError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(MapError::from)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        self.tiles.validate()?;
        self.mouse_position.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// `[lon, lat]` the view opens at
    pub center: LonLat,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ViewConfig {
    pub fn center_lat_lng(&self) -> LatLng {
        LatLng::from_lon_lat(self.center)
    }

    fn validate(&self) -> Result<()> {
        if !self.center_lat_lng().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "view center {:?} is outside [-180, 180] x [-90, 90]",
                self.center
            ))
            .into());
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} is greater than max_zoom {}",
                self.min_zoom, self.max_zoom
            ))
            .into());
        }
        if self.zoom < self.min_zoom || self.zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "zoom {} is outside [{}, {}]",
                self.zoom, self.min_zoom, self.max_zoom
            ))
            .into());
        }
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: CAMPUS_CENTER,
            zoom: CAMPUS_ZOOM,
            min_zoom: 0.0,
            max_zoom: OSM_MAX_ZOOM as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLoadingConfig {
    /// When false the base layer never issues network requests
    pub enabled: bool,
    /// Template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
    pub max_zoom: u8,
    /// Number of encoded tiles kept in memory
    pub cache_size: usize,
    pub max_concurrent: usize,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl TileLoadingConfig {
    fn validate(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(MapError::Config("tile cache_size must be positive".to_string()).into());
        }
        if self.max_concurrent == 0 {
            return Err(
                MapError::Config("tile max_concurrent must be positive".to_string()).into(),
            );
        }
        if self.url_template.contains("{s}") && self.subdomains.is_empty() {
            return Err(MapError::Config(
                "tile url_template uses {s} but no subdomains are configured".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

impl Default for TileLoadingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: OSM_URL_TEMPLATE.to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: OSM_ATTRIBUTION.to_string(),
            max_zoom: OSM_MAX_ZOOM,
            cache_size: 512,
            max_concurrent: 4,
            max_retries: 2,
            retry_delay_ms: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// `[x, y]` pixels, y pointing down
    pub offset: [f64; 2],
    pub positioning: OverlayPositioning,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            offset: POPUP_OFFSET,
            positioning: OverlayPositioning::TopLeft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MousePositionConfig {
    pub projection: Projection,
    pub precision: usize,
    pub undefined_text: String,
}

impl MousePositionConfig {
    fn validate(&self) -> Result<()> {
        if self.precision > 10 {
            return Err(MapError::Config(format!(
                "mouse position precision {} exceeds 10 decimals",
                self.precision
            ))
            .into());
        }
        Ok(())
    }
}

impl Default for MousePositionConfig {
    fn default() -> Self {
        Self {
            projection: Projection::Epsg4326,
            precision: MOUSE_POSITION_PRECISION,
            undefined_text: "\u{a0}".to_string(),
        }
    }
}
