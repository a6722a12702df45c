//! # Generation Module
//!
//! Procedural placement of the fountain, the entrance and the hazards.
//!
//! Generation is driven by a [`GenerationConfig`] and a single seeded
//! [`StdRng`], so the same seed and map size always produce the same cavern.

pub mod cavern;

pub use cavern::*;

use crate::{FountainResult, MapLayout, MapSize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Which cavern size to build
    pub map_size: MapSize,
}

impl GenerationConfig {
    /// Creates a configuration for the given seed and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{GenerationConfig, MapSize};
    ///
    /// let config = GenerationConfig::new(42, MapSize::Large);
    /// assert_eq!(config.layout().rows, 8);
    /// ```
    pub fn new(seed: u64, map_size: MapSize) -> Self {
        Self { seed, map_size }
    }

    /// Creates a configuration for testing: the small cavern.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(seed, MapSize::Small)
    }

    /// Creates a configuration seeded from the operating system.
    pub fn from_entropy(map_size: MapSize) -> Self {
        Self::new(rand::random(), map_size)
    }

    /// Dimensions and hazard counts for the configured size.
    pub fn layout(&self) -> MapLayout {
        self.map_size.layout()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42, MapSize::Small)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> FountainResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> FountainResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
