//! Boilerplate shared by the layer implementations

/// Implements the required plumbing of `LayerTrait` for a layer that keeps
/// its `LayerProperties` in the named field.
///
/// ```ignore
/// impl LayerTrait for MarkerLayer {
///     impl_layer_trait!(properties);
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($field:ident) => {
        fn properties(&self) -> &$crate::layers::base::LayerProperties {
            &self.$field
        }

        fn properties_mut(&mut self) -> &mut $crate::layers::base::LayerProperties {
            &mut self.$field
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}
