use crate::core::{config::TileLoadingConfig, geo::TileCoord};

/// Anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Attribution text the map must display while this source is visible
    fn attribution(&self) -> &str;

    fn max_zoom(&self) -> u8;
}

/// XYZ source for OpenStreetMap-style tile servers.
///
/// The `{s}` placeholder rotates through the configured subdomains so that
/// requests spread over the mirror hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenStreetMapSource {
    url_template: String,
    subdomains: Vec<String>,
    attribution: String,
    max_zoom: u8,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self::from_config(&TileLoadingConfig::default())
    }

    pub fn from_config(config: &TileLoadingConfig) -> Self {
        Self {
            url_template: config.url_template.clone(),
            subdomains: config.subdomains.clone(),
            attribution: config.attribution.clone(),
            max_zoom: config.max_zoom,
        }
    }

    fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = (coord.x.wrapping_add(coord.y) % self.subdomains.len() as u32) as usize;
        &self.subdomains[idx]
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        self.url_template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    fn attribution(&self) -> &str {
        &self.attribution
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}
