pub mod layer;

pub use layer::ParallaxLayer;
