//! Voronoi-based zone terrain generation
//!
//! Turns a random seed into a fully classified terrain mesh and rasterizes
//! it into a grid of biome-tagged world cells, streamed out one row at a
//! time. Built for procedurally generated game worlds where each zone is
//! generated once, persisted externally and then served as discrete rooms.
//!
//! The pipeline runs strictly downstream:
//!
//! 1. scatter random sites and relax them (Lloyd's algorithm)
//! 2. build the Center/Corner/Edge dual-graph arena
//! 3. classify water/ocean/coast and compute elevations
//! 4. route rivers and diffuse moisture
//! 5. select a biome per polygon from the external catalog
//! 6. rasterize and stream one world cell per pixel, row by row
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_zonegen::*;
//!
//! let config = ZoneConfigBuilder::new()
//!     .seed(42)
//!     .site_count(3000)
//!     .unwrap()
//!     .extent(200)
//!     .unwrap()
//!     .relaxation_passes(1)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let catalog = BiomeCatalog::default_catalog();
//!
//! // Rows are handed over one at a time; persist them however you like
//! let mut sink = |row: &[WorldCell]| -> Result<()> {
//!     println!("row of {} cells", row.len());
//!     Ok(())
//! };
//!
//! let zone = Zone::generate(config, &catalog, &mut sink).unwrap();
//! println!("generated {} regions", zone.region_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) point-to-region lookups using a KD-tree
//! - `serde`: serialization support for configuration and biome records

// Modules
pub mod biome;
pub mod config;
pub mod elevation;
pub mod error;
pub mod generation;
pub mod geom;
pub mod hydrology;
pub mod island;
pub mod mesh;
pub mod raster;
pub mod zone;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use biome::{assign_biomes, select_biome, Biome, BiomeCatalog, BiomeId};
pub use config::{ZoneConfig, ZoneConfigBuilder};
pub use error::{Result, ZoneGenError};
pub use geom::Bounds;
pub use island::{IslandShape, RadialIslandShape};
pub use mesh::{Center, Corner, Edge, ZoneMesh};
pub use raster::{RowSink, WorldCell};
pub use zone::Zone;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
