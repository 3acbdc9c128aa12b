//! Filter implementations for the recommendation pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod city;
pub mod price_range;

// Re-export for convenience
pub use city::CityFilter;
pub use price_range::PriceRangeFilter;
