pub mod cache;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use cache::{TileBytes, TileCache};
pub use loader::{TileLoader, TileResult};
pub use source::{OpenStreetMapSource, TileSource};
