//! Zone generation configuration and builder
//!
//! This module provides configuration types for deterministic zone generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneGenError};
use crate::geom::Bounds;

/// Configuration for deterministic zone generation
///
/// The same configuration will always produce the identical zone: the seed
/// drives site placement, the island silhouette and river seeding through a
/// single explicit random source.
///
/// # Example
///
/// ```rust
/// use voronoi_zonegen::*;
///
/// let config = ZoneConfigBuilder::new()
///     .seed(42)
///     .site_count(3000)
///     .unwrap()
///     .extent(200)
///     .unwrap()
///     .relaxation_passes(1)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.extent, 200);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneConfig {
    /// Random seed for deterministic zone generation
    pub seed: u64,

    /// Number of Voronoi sites (coarse regions) to scatter over the zone
    pub site_count: usize,

    /// Side length of the square zone, in world cells
    ///
    /// The rasterized zone is `extent` x `extent` cells; one pixel becomes
    /// one world cell.
    pub extent: u32,

    /// Number of Lloyd relaxation passes applied to the random sites
    ///
    /// - 0: raw random sites (clumpy)
    /// - 1: the production default, smooths the worst clustering
    /// - 2-5: progressively more uniform, honeycomb-like regions
    pub relaxation_passes: usize,
}

impl ZoneConfig {
    /// The zone bounds implied by this configuration
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.extent as f64)
    }

    /// Validate the configuration, rejecting values the pipeline cannot run on
    ///
    /// Called eagerly by [`crate::Zone::generate`] so that bad input fails
    /// before any generation work starts.
    pub fn validate(&self) -> Result<()> {
        if self.site_count < 3 {
            return Err(ZoneGenError::InvalidConfig(format!(
                "site count must be >= 3 (got {})",
                self.site_count
            )));
        }
        if self.extent == 0 {
            return Err(ZoneGenError::InvalidConfig(
                "extent must be positive".to_string(),
            ));
        }
        if self.relaxation_passes > 20 {
            return Err(ZoneGenError::InvalidConfig(format!(
                "relaxation passes must be <= 20 (got {})",
                self.relaxation_passes
            )));
        }
        Ok(())
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating [`ZoneConfig`] with validation
///
/// # Example
///
/// ```rust
/// use voronoi_zonegen::*;
///
/// // Use defaults (random seed, production-scale zone)
/// let config = ZoneConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = ZoneConfigBuilder::new()
///     .seed(12345)
///     .site_count(1000)
///     .unwrap()
///     .extent(128)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ZoneConfigBuilder {
    seed: Option<u64>,
    site_count: usize,
    extent: u32,
    relaxation_passes: usize,
}

impl ZoneConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults match the production world: 30,000 sites over a 2000x2000
    /// zone with one relaxation pass, and a random seed unless one is set.
    pub fn new() -> Self {
        Self {
            seed: None,
            site_count: 30_000,
            extent: 2000,
            relaxation_passes: 1,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of Voronoi sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for fewer than 3 sites (no triangulation
    /// exists below that).
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count < 3 {
            return Err(ZoneGenError::InvalidConfig(format!(
                "site count must be >= 3 (got {})",
                count
            )));
        }
        self.site_count = count;
        Ok(self)
    }

    /// Set the zone side length in world cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero extent.
    pub fn extent(mut self, extent: u32) -> Result<Self> {
        if extent == 0 {
            return Err(ZoneGenError::InvalidConfig(
                "extent must be positive".to_string(),
            ));
        }
        self.extent = extent;
        Ok(self)
    }

    /// Set the number of Lloyd relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for more than 20 passes (excessive and
    /// impractical).
    pub fn relaxation_passes(mut self, passes: usize) -> Result<Self> {
        if passes > 20 {
            return Err(ZoneGenError::InvalidConfig(format!(
                "relaxation passes must be <= 20 (got {})",
                passes
            )));
        }
        self.relaxation_passes = passes;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed.
    pub fn build(self) -> Result<ZoneConfig> {
        let config = ZoneConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            site_count: self.site_count,
            extent: self.extent,
            relaxation_passes: self.relaxation_passes,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ZoneConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ZoneConfigBuilder::new().build().unwrap();
        assert_eq!(config.site_count, 30_000);
        assert_eq!(config.extent, 2000);
        assert_eq!(config.relaxation_passes, 1);
    }

    #[test]
    fn test_builder_custom() {
        let config = ZoneConfigBuilder::new()
            .seed(42)
            .site_count(500)
            .unwrap()
            .extent(100)
            .unwrap()
            .relaxation_passes(2)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.site_count, 500);
        assert_eq!(config.extent, 100);
        assert_eq!(config.relaxation_passes, 2);
    }

    #[test]
    fn test_builder_rejects_tiny_site_count() {
        assert!(ZoneConfigBuilder::new().site_count(2).is_err());
        assert!(ZoneConfigBuilder::new().site_count(0).is_err());
        assert!(ZoneConfigBuilder::new().site_count(3).is_ok());
    }

    #[test]
    fn test_builder_rejects_zero_extent() {
        assert!(ZoneConfigBuilder::new().extent(0).is_err());
        assert!(ZoneConfigBuilder::new().extent(1).is_ok());
    }

    #[test]
    fn test_builder_rejects_excessive_relaxation() {
        assert!(ZoneConfigBuilder::new().relaxation_passes(21).is_err());
        assert!(ZoneConfigBuilder::new().relaxation_passes(20).is_ok());
    }

    #[test]
    fn test_validate_rejects_hand_built_config() {
        let config = ZoneConfig {
            seed: 1,
            site_count: 2,
            extent: 100,
            relaxation_passes: 1,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds() {
        let config = ZoneConfigBuilder::new()
            .seed(1)
            .extent(200)
            .unwrap()
            .build()
            .unwrap();
        let bounds = config.bounds();
        assert_eq!(bounds.width, 200.0);
        assert_eq!(bounds.height, 200.0);
        assert_eq!(bounds.x, 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = ZoneConfigBuilder::new()
            .seed(12345)
            .site_count(1000)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: ZoneConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
