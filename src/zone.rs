//! Zone generation orchestration
//!
//! Drives the full pipeline: site sampling and relaxation, mesh building,
//! elevation, hydrology, biome assignment and rasterization, streaming the
//! resulting world cells out through the injected row sink.

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::biome::{self, BiomeCatalog};
use crate::config::ZoneConfig;
use crate::elevation;
use crate::error::{Result, ZoneGenError};
use crate::generation;
use crate::hydrology;
use crate::island::{IslandShape, RadialIslandShape};
use crate::mesh::ZoneMesh;
use crate::raster::{self, RowSink};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// A fully generated zone
///
/// Holds the classified mesh for queries; the rasterized world cells were
/// already streamed to the sink during generation and are not retained.
///
/// # Example
///
/// ```rust,no_run
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
/// let catalog = BiomeCatalog::default_catalog();
/// let mut rows = 0usize;
/// let mut sink = |row: &[WorldCell]| -> Result<()> {
///     rows += row.len();
///     Ok(())
/// };
///
/// let zone = Zone::generate(config, &catalog, &mut sink).unwrap();
/// assert_eq!(zone.region_count(), 3000);
/// ```
pub struct Zone {
    config: ZoneConfig,
    mesh: ZoneMesh,

    /// Spatial index over region centers (requires the spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl Zone {
    /// Generate a zone with the default radial island silhouette
    ///
    /// The silhouette's parameters are drawn from the zone's seeded random
    /// source, so the seed fully determines the result.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration, an empty biome catalog or a
    /// catalog without the "Ocean" fallback; fails during rasterization if
    /// the sink rejects a row.
    pub fn generate<S: RowSink>(
        config: ZoneConfig,
        catalog: &BiomeCatalog,
        sink: &mut S,
    ) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let shape = RadialIslandShape::new(&mut rng);
        Self::run_pipeline(config, &shape, catalog, sink, rng)
    }

    /// Generate a zone with a custom island silhouette
    ///
    /// Lets callers swap the overall world shape without touching the mesh,
    /// elevation or moisture logic.
    pub fn generate_with_shape<I, S>(
        config: ZoneConfig,
        shape: &I,
        catalog: &BiomeCatalog,
        sink: &mut S,
    ) -> Result<Self>
    where
        I: IslandShape + ?Sized,
        S: RowSink,
    {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::run_pipeline(config, shape, catalog, sink, rng)
    }

    fn run_pipeline<I, S>(
        config: ZoneConfig,
        shape: &I,
        catalog: &BiomeCatalog,
        sink: &mut S,
        mut rng: ChaCha8Rng,
    ) -> Result<Self>
    where
        I: IslandShape + ?Sized,
        S: RowSink,
    {
        if catalog.is_empty() {
            return Err(ZoneGenError::EmptyBiomeCatalog);
        }
        if catalog.find_by_name("Ocean").is_none() {
            return Err(ZoneGenError::MissingOceanBiome);
        }

        info!(
            "Generating zone: seed={} sites={} extent={} relaxation={}",
            config.seed, config.site_count, config.extent, config.relaxation_passes
        );

        let mut mesh = generation::build_mesh(&config, &mut rng);

        elevation::assign_corner_elevations(&mut mesh, shape);
        elevation::assign_ocean_coast_and_land(&mut mesh);
        elevation::redistribute_elevations(&mut mesh);
        elevation::assign_polygon_elevations(&mut mesh);
        elevation::calculate_downslopes(&mut mesh);

        hydrology::create_rivers(&mut mesh, &mut rng);
        hydrology::assign_corner_moisture(&mut mesh);
        hydrology::redistribute_moisture(&mut mesh);
        hydrology::assign_polygon_moisture(&mut mesh);

        biome::assign_biomes(&mut mesh, catalog);

        let map = raster::render(&mesh, catalog);
        raster::stream_rows(&map, catalog, sink)?;

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<DVec2> = mesh.centers.iter().map(|c| c.position).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            mesh,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// The configuration this zone was generated from
    #[inline]
    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    /// The classified terrain mesh
    #[inline]
    pub fn mesh(&self) -> &ZoneMesh {
        &self.mesh
    }

    /// Number of coarse regions (Voronoi polygons) in the zone
    #[inline]
    pub fn region_count(&self) -> usize {
        self.mesh.centers.len()
    }

    /// Re-render the zone's map image, e.g. for PNG export by the caller
    pub fn render_map(&self, catalog: &BiomeCatalog) -> image::RgbaImage {
        raster::render(&self.mesh, catalog)
    }

    /// All regions within `hops` neighbor steps of a region, itself included
    ///
    /// Returns an empty list for an invalid region id.
    pub fn regions_within(&self, region: usize, hops: usize) -> Vec<usize> {
        if region >= self.mesh.centers.len() {
            return Vec::new();
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = vec![region];
        visited.insert(region);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &r in &current {
                for &neighbor in &self.mesh.centers[r].neighbors {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        visited.into_iter().collect()
    }

    /// The region containing a zone-space position (requires spatial-index)
    #[cfg(feature = "spatial-index")]
    pub fn find_region_at(&self, position: DVec2) -> usize {
        self.spatial_index.find_nearest(position)
    }
}
