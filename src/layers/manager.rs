use crate::{
    core::{geo::Point, viewport::Viewport},
    layers::{base::LayerTrait, feature::Feature},
    MapError, Result,
};

/// The map's layers as a stack, bottom to top. The stack stays sorted by
/// z-index; layers with equal z-index keep the order they were added in.
#[derive(Default)]
pub struct LayerManager {
    stack: Vec<Box<dyn LayerTrait>>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&self, layer_id: &str) -> Option<usize> {
        self.stack.iter().position(|layer| layer.id() == layer_id)
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        if self.index_of(layer.id()).is_some() {
            return Err(MapError::Layer(format!("layer '{}' already exists", layer.id())).into());
        }
        let z_index = layer.z_index();
        let slot = self.stack.partition_point(|other| other.z_index() <= z_index);
        self.stack.insert(slot, layer);
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let index = self.index_of(layer_id)?;
        Some(self.stack.remove(index))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        let index = self.index_of(layer_id)?;
        Some(self.stack[index].as_ref())
    }

    /// Runs `f` on one layer, then restacks in case `f` changed its z-index
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        let index = self.index_of(layer_id)?;
        let result = f(self.stack[index].as_mut());
        self.stack.sort_by_key(|layer| layer.z_index());
        Some(result)
    }

    /// Layer ids bottom to top
    pub fn list_layers(&self) -> Vec<String> {
        self.stack.iter().map(|layer| layer.id().to_string()).collect()
    }

    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.stack.iter().map(|layer| layer.as_ref()).collect()
    }

    /// Lets every visible layer catch up with `viewport`
    pub fn update(&mut self, viewport: &Viewport) -> Result<()> {
        self.stack
            .iter_mut()
            .filter(|layer| layer.is_visible())
            .try_for_each(|layer| layer.update(viewport))
    }

    /// Visible features under `pixel` with their layer id, topmost layer first
    pub fn features_at_pixel(&self, pixel: &Point, viewport: &Viewport) -> Vec<(&str, &Feature)> {
        let mut hits = Vec::new();
        for layer in self.stack.iter().rev().filter(|layer| layer.is_visible()) {
            let id = layer.id();
            hits.extend(
                layer
                    .features_at_pixel(pixel, viewport)
                    .into_iter()
                    .map(|feature| (id, feature)),
            );
        }
        hits
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
