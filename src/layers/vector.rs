use crate::{
    core::{
        bounds::Bounds,
        constants::{CLICK_TOLERANCE_PX, MARKER_ICON_SIZE},
        geo::{LatLngBounds, Point},
        viewport::Viewport,
    },
    impl_layer_trait,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        feature::Feature,
    },
    spatial::{SpatialIndex, SpatialItem},
    Result,
};

/// Point features indexed in an R-tree for pixel hit-testing
pub struct VectorLayer {
    properties: LayerProperties,
    features: Vec<Feature>,
    /// Feature id -> position in `features`
    index: SpatialIndex<usize>,
}

impl VectorLayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Vector),
            features: Vec::new(),
            index: SpatialIndex::new(),
        }
    }

    /// Adds a feature on top of the existing ones; feature ids must be unique
    pub fn add_feature(&mut self, feature: Feature) -> Result<()> {
        let position = self.features.len();
        self.index.insert(SpatialItem::from_point(
            feature.id(),
            feature.geometry(),
            position,
        ))?;
        self.features.push(feature);
        Ok(())
    }

    pub fn add_features(&mut self, features: impl IntoIterator<Item = Feature>) -> Result<()> {
        for feature in features {
            self.add_feature(feature)?;
        }
        Ok(())
    }

    /// Features in insertion (drawing) order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: u32) -> Option<&Feature> {
        let item = self.index.get(id)?;
        self.features.get(item.data)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn clear(&mut self) {
        self.features.clear();
        self.index.clear();
    }

    /// Largest icon dimension in pixels, used to size the index query
    fn max_icon_extent(&self) -> f64 {
        self.features
            .iter()
            .filter_map(|f| f.style())
            .map(|style| style.image.size.0.max(style.image.size.1))
            .fold(MARKER_ICON_SIZE.0.max(MARKER_ICON_SIZE.1), f64::max)
    }

    /// Features whose icon covers `pixel`, topmost (last added) first.
    /// Unstyled features are hit within a few pixels of their coordinate.
    pub fn hit_test(&self, pixel: &Point, viewport: &Viewport) -> Vec<&Feature> {
        let center = viewport.pixel_to_projected(pixel);
        let reach = (self.max_icon_extent() + CLICK_TOLERANCE_PX) * viewport.resolution();
        let search = Bounds::new(center, center).expanded(reach);

        let mut hits: Vec<usize> = self
            .index
            .query(&search)
            .into_iter()
            .map(|item| item.data)
            .filter(|&position| {
                let feature = &self.features[position];
                let screen = viewport.projected_to_pixel(&feature.geometry());
                match feature.style() {
                    Some(style) => style.image.hit_rect(&screen).contains(pixel),
                    None => screen.distance_to(pixel) <= CLICK_TOLERANCE_PX,
                }
            })
            .collect();

        hits.sort_unstable_by(|a, b| b.cmp(a));
        log::debug!(
            "hit test at ({:.1}, {:.1}) on '{}': {} feature(s)",
            pixel.x,
            pixel.y,
            self.properties.id,
            hits.len()
        );
        hits.into_iter().map(|position| &self.features[position]).collect()
    }
}

impl LayerTrait for VectorLayer {
    impl_layer_trait!(properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        let coords: Vec<_> = self.features.iter().map(Feature::lat_lng).collect();
        LatLngBounds::from_points(coords.iter())
    }

    fn features_at_pixel(&self, pixel: &Point, viewport: &Viewport) -> Vec<&Feature> {
        self.hit_test(pixel, viewport)
    }

    fn options(&self) -> serde_json::Value {
        let mut options = self.properties.to_json();
        options["feature_count"] = self.features.len().into();
        options
    }
}
