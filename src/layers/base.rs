use crate::{
    core::{
        geo::{LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::feature::Feature,
    MapError, Result,
};
use std::any::Any;

/// A drawable slice of the map stack.
///
/// Implementors expose their [`LayerProperties`] (usually through
/// [`impl_layer_trait!`](crate::impl_layer_trait)) and get the common
/// accessors for free; everything else has a do-nothing default.
pub trait LayerTrait: Send + Sync {
    fn properties(&self) -> &LayerProperties;

    fn properties_mut(&mut self) -> &mut LayerProperties;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> &str {
        &self.properties().id
    }

    fn name(&self) -> &str {
        &self.properties().name
    }

    fn layer_type(&self) -> LayerType {
        self.properties().layer_type
    }

    fn is_visible(&self) -> bool {
        self.properties().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.properties_mut().visible = visible;
    }

    /// 0.0 (transparent) to 1.0
    fn opacity(&self) -> f32 {
        self.properties().opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.properties_mut().opacity = opacity.clamp(0.0, 1.0);
    }

    /// Higher z-index layers are drawn (and hit-tested) above lower ones
    fn z_index(&self) -> i32 {
        self.properties().z_index
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.properties_mut().z_index = z_index;
    }

    /// Brings layer state in line with the current view
    fn update(&mut self, _viewport: &Viewport) -> Result<()> {
        Ok(())
    }

    /// Geographic extent of the content, `None` when unbounded or empty
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Features drawn under a container pixel, topmost first
    fn features_at_pixel(&self, _pixel: &Point, _viewport: &Viewport) -> Vec<&Feature> {
        Vec::new()
    }

    /// Layer state as JSON; layers append their own keys
    fn options(&self) -> serde_json::Value {
        self.properties().to_json()
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.properties_mut().apply_json(&options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Vector,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Vector => write!(f, "vector"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "layer_type": self.layer_type.to_string(),
            "z_index": self.z_index,
            "opacity": self.opacity,
            "visible": self.visible,
        })
    }

    /// Applies the `z_index`, `opacity` and `visible` keys of a JSON object;
    /// other keys are left for the layer itself
    pub fn apply_json(&mut self, options: &serde_json::Value) -> Result<()> {
        let object = options.as_object().ok_or_else(|| {
            MapError::Layer(format!("options for layer '{}' must be a JSON object", self.id))
        })?;

        if let Some(z_index) = object.get("z_index").and_then(|v| v.as_i64()) {
            self.z_index = z_index as i32;
        }
        if let Some(opacity) = object.get("opacity").and_then(|v| v.as_f64()) {
            self.opacity = (opacity as f32).clamp(0.0, 1.0);
        }
        if let Some(visible) = object.get("visible").and_then(|v| v.as_bool()) {
            self.visible = visible;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new("markers", "Points of interest", LayerType::Vector);

        assert_eq!(props.id, "markers");
        assert_eq!(props.name, "Points of interest");
        assert_eq!(props.layer_type, LayerType::Vector);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
    }

    struct BareLayer {
        properties: LayerProperties,
    }

    impl LayerTrait for BareLayer {
        crate::impl_layer_trait!(properties);
    }

    #[test]
    fn test_trait_defaults_go_through_properties() {
        let mut bare = BareLayer {
            properties: LayerProperties::new("bare", "Bare", LayerType::Vector),
        };
        bare.set_opacity(-1.0);
        bare.set_z_index(7);
        bare
            .set_options(serde_json::json!({ "visible": false }))
            .unwrap();

        assert_eq!(bare.id(), "bare");
        assert_eq!(bare.opacity(), 0.0);
        assert_eq!(bare.options()["z_index"], 7);
        assert!(!bare.is_visible());
        assert!(bare.bounds().is_none());
        assert!(bare.as_any().downcast_ref::<BareLayer>().is_some());
    }

    #[test]
    fn test_apply_json_options() {
        let mut props = LayerProperties::new("osm", "OpenStreetMap", LayerType::Tile);
        props
            .apply_json(&serde_json::json!({ "opacity": 3.0, "visible": false, "z_index": 4 }))
            .unwrap();

        assert_eq!(props.opacity, 1.0);
        assert!(!props.visible);
        assert_eq!(props.z_index, 4);
        assert_eq!(props.to_json()["layer_type"], "tile");

        assert!(props.apply_json(&serde_json::json!([1, 2])).is_err());
    }
}
