//! Random shape generation
//!
//! Shapes are sampled uniformly from the ranges of a [`ShapeConfig`] and can
//! be turned into markup nodes or fixed-width report rows.

pub mod config;
pub mod random_shape;

pub use config::{ConfigRange, RangeSpec, ShapeConfig, ShapeKey};
pub use random_shape::{RandomShape, SampleValue, ShapeKind};
