//! The geometric half of the pipeline: sites, relaxation, dual, mesh
//!
//! Turns a configuration and a seeded random source into the wired
//! Center/Corner/Edge arena the classification stages operate on.

mod dual;
mod graph;
mod lloyd;
mod points;

pub use dual::{DualEdge, VoronoiDual};
pub use graph::{build_graph, compute_edge_midpoints, improve_corners};
pub use lloyd::relax;
pub use points::generate_sites;

use rand::Rng;

use crate::config::ZoneConfig;
use crate::mesh::ZoneMesh;

/// Build the finished mesh for a configuration
///
/// Scatters the sites, relaxes them, builds the dual graph, smooths the
/// corners and computes edge midpoints. The mesh topology is final after
/// this; later stages only mutate classification fields.
pub fn build_mesh<R: Rng>(config: &ZoneConfig, rng: &mut R) -> ZoneMesh {
    let bounds = config.bounds();

    let sites = points::generate_sites(config.site_count, &bounds, rng);
    let dual = lloyd::relax(sites, bounds, config.relaxation_passes);

    let mut mesh = graph::build_graph(&dual);
    graph::improve_corners(&mut mesh);
    graph::compute_edge_midpoints(&mut mesh);
    mesh
}
