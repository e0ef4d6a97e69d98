use crate::{
    core::{
        bounds::Bounds,
        config::TileLoadingConfig,
        constants::TILE_SIZE,
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    impl_layer_trait,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    prelude::HashSet,
    tiles::{OpenStreetMapSource, TileBytes, TileCache, TileLoader, TileSource},
    Result,
};

/// Raster base layer fed by an XYZ tile source.
///
/// Without a loader (offline) the layer only ever shows tiles that were put
/// into its cache directly.
pub struct TileLayer {
    properties: LayerProperties,
    source: Box<dyn TileSource>,
    cache: TileCache,
    loader: Option<TileLoader>,
    /// Tiles whose download gave up after its retries. They are not requested
    /// again until the tile zoom changes.
    failed: HashSet<TileCoord>,
    failed_zoom: Option<u8>,
}

impl TileLayer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config: &TileLoadingConfig,
    ) -> Result<Self> {
        let loader = if config.enabled {
            Some(TileLoader::new(config)?)
        } else {
            None
        };

        Ok(Self::with_source(
            id,
            name,
            Box::new(OpenStreetMapSource::from_config(config)),
            TileCache::new(config.cache_size),
            loader,
        ))
    }

    /// OpenStreetMap layer that never touches the network
    pub fn offline(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_source(
            id,
            name,
            Box::new(OpenStreetMapSource::new()),
            TileCache::default(),
            None,
        )
    }

    pub fn with_source(
        id: impl Into<String>,
        name: impl Into<String>,
        source: Box<dyn TileSource>,
        cache: TileCache,
        loader: Option<TileLoader>,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            source,
            cache,
            loader,
            failed: HashSet::default(),
            failed_zoom: None,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.loader.is_none()
    }

    pub fn source(&self) -> &dyn TileSource {
        self.source.as_ref()
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    pub fn attribution(&self) -> &str {
        self.source.attribution()
    }

    /// Integer zoom whose tiles are drawn at the current view
    pub fn tile_zoom(&self, viewport: &Viewport) -> u8 {
        viewport
            .zoom
            .round()
            .clamp(0.0, self.source.max_zoom() as f64) as u8
    }

    /// Tiles covering the viewport with their screen rectangles, nearest to
    /// the centre first
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<(TileCoord, Bounds)> {
        let zoom = self.tile_zoom(viewport);
        let scale = 2_f64.powf(viewport.zoom - zoom as f64);
        let tile_px = TILE_SIZE as f64;

        let center = viewport.project(&viewport.center, Some(zoom as f64));
        let half = Point::new(viewport.size.x / 2.0, viewport.size.y / 2.0).multiply(1.0 / scale);
        let top_left = center.subtract(&half);
        let bottom_right = center.add(&half);

        let max_index = 2_i64.pow(zoom as u32) - 1;
        let range = |min: f64, max: f64| {
            let first = ((min / tile_px).floor() as i64).clamp(0, max_index);
            let last = ((max / tile_px).floor() as i64).clamp(0, max_index);
            first..=last
        };

        let mut tiles = Vec::new();
        for y in range(top_left.y, bottom_right.y) {
            for x in range(top_left.x, bottom_right.x) {
                let origin = Point::new(x as f64 * tile_px, y as f64 * tile_px);
                let min = origin.subtract(&top_left).multiply(scale);
                let rect = Bounds::from_min_size(min, tile_px * scale, tile_px * scale);
                tiles.push((TileCoord::new(x as u32, y as u32, zoom), rect));
            }
        }

        let middle = Point::new(viewport.size.x / 2.0, viewport.size.y / 2.0);
        tiles.sort_by(|a, b| {
            a.1.center()
                .distance_to(&middle)
                .total_cmp(&b.1.center().distance_to(&middle))
        });
        tiles
    }

    /// Cached bytes of a tile, if downloaded
    pub fn tile_data(&self, coord: &TileCoord) -> Option<TileBytes> {
        self.cache.get(coord)
    }

    /// Tiles given up on at the current tile zoom
    pub fn failed_tiles(&self) -> usize {
        self.failed.len()
    }

    /// Stores finished downloads and requests missing visible tiles up to the
    /// loader's concurrency cap. Returns the number of new requests.
    pub fn update_tiles(&mut self, viewport: &Viewport) -> Result<usize> {
        let zoom = self.tile_zoom(viewport);
        if self.failed_zoom != Some(zoom) {
            self.failed.clear();
            self.failed_zoom = Some(zoom);
        }

        let visible = self.visible_tiles(viewport);
        let Some(loader) = self.loader.as_mut() else {
            return Ok(0);
        };

        for result in loader.drain() {
            match result.data {
                Ok(bytes) => self.cache.insert(result.coord, bytes),
                Err(e) => {
                    log::warn!("giving up on tile {:?}: {}", result.coord, e);
                    self.failed.insert(result.coord);
                }
            }
        }

        let mut requested = 0;
        for (coord, _) in visible {
            if !loader.has_capacity() {
                break;
            }
            if self.cache.contains(&coord)
                || self.failed.contains(&coord)
                || loader.is_loading(&coord)
            {
                continue;
            }
            if loader.request(coord, self.source.url(coord)) {
                requested += 1;
            }
        }
        Ok(requested)
    }

    /// Whether downloads are still outstanding
    pub fn is_loading(&self) -> bool {
        self.loader.as_ref().map_or(false, |l| l.in_flight() > 0)
    }
}

impl LayerTrait for TileLayer {
    impl_layer_trait!(properties);

    fn update(&mut self, viewport: &Viewport) -> Result<()> {
        self.update_tiles(viewport).map(|_| ())
    }

    fn options(&self) -> serde_json::Value {
        let mut options = self.properties.to_json();
        options["attribution"] = self.source.attribution().into();
        options["max_zoom"] = self.source.max_zoom().into();
        options["offline"] = self.is_offline().into();
        options["cached_tiles"] = self.cache.len().into();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn campus_viewport() -> Viewport {
        Viewport::new(
            LatLng::from_lon_lat([39.71065, 47.24011]),
            17.0,
            Point::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let layer = TileLayer::offline("osm", "OpenStreetMap");
        let viewport = campus_viewport();
        let tiles = layer.visible_tiles(&viewport);

        let mut covered = tiles[0].1.clone();
        for (_, rect) in &tiles {
            covered.extend_bounds(rect);
            assert!((rect.width() - 256.0).abs() < 1e-9);
        }
        assert!(covered.contains(&Point::new(0.0, 0.0)));
        assert!(covered.contains(&viewport.size));

        // The tile under the centre comes first
        let center_tile = TileCoord::from_lat_lng(&viewport.center, 17);
        assert_eq!(tiles[0].0, center_tile);
        assert!(tiles[0].1.contains(&Point::new(400.0, 300.0)));
    }

    #[test]
    fn test_fractional_zoom_scales_tiles() {
        let layer = TileLayer::offline("osm", "OpenStreetMap");
        let mut viewport = campus_viewport();
        viewport.set_zoom(16.8);

        let tiles = layer.visible_tiles(&viewport);
        assert!(tiles.iter().all(|(coord, _)| coord.z == 17));
        let expected = 256.0 * 2_f64.powf(-0.2);
        assert!((tiles[0].1.width() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_world_view_is_clamped_to_valid_tiles() {
        let layer = TileLayer::offline("osm", "OpenStreetMap");
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0));
        let tiles = layer.visible_tiles(&viewport);

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].0, TileCoord::new(0, 0, 0));
    }

    #[test]
    fn test_offline_layer_issues_no_requests() {
        let mut layer = TileLayer::offline("osm", "OpenStreetMap");
        assert!(layer.is_offline());
        assert_eq!(layer.update_tiles(&campus_viewport()).unwrap(), 0);
        assert!(layer.cache().is_empty());
        assert!(!layer.is_loading());

        let coord = TileCoord::new(1, 1, 1);
        layer.cache().insert(coord, vec![0x89, b'P', b'N', b'G']);
        assert!(layer.tile_data(&coord).is_some());
        assert_eq!(layer.options()["cached_tiles"], 1);
    }

    fn unreachable_layer() -> TileLayer {
        let config = TileLoadingConfig {
            url_template: "http://127.0.0.1:9/{z}/{x}/{y}.png".to_string(),
            subdomains: Vec::new(),
            max_concurrent: 16,
            max_retries: 0,
            retry_delay_ms: 0,
            ..TileLoadingConfig::default()
        };
        TileLayer::new("osm", "OpenStreetMap", &config).unwrap()
    }

    #[test]
    fn test_failed_tiles_are_not_requested_again() {
        let mut layer = unreachable_layer();
        let mut viewport = campus_viewport();
        viewport.set_size(Point::new(200.0, 200.0));
        let visible = layer.visible_tiles(&viewport).len();

        assert_eq!(layer.update_tiles(&viewport).unwrap(), visible);
        for _ in 0..500 {
            if layer.failed_tiles() == visible {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
            layer.update_tiles(&viewport).unwrap();
        }
        assert_eq!(layer.failed_tiles(), visible);
        assert!(!layer.is_loading());

        // nothing left to fetch at this zoom
        assert_eq!(layer.update_tiles(&viewport).unwrap(), 0);
        assert!(!layer.is_loading());
        assert!(layer.cache().is_empty());

        // a new tile zoom gets a fresh chance
        viewport.set_zoom(16.0);
        assert!(layer.update_tiles(&viewport).unwrap() > 0);
        assert_eq!(layer.failed_tiles(), 0);
    }
}
