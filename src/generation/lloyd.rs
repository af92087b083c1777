//! Lloyd's relaxation for uniform site distribution
//!
//! A uniform random scatter tends to clump. Each relaxation pass moves every
//! site to the average of its Voronoi cell's vertices and recomputes the
//! diagram, spreading the sites toward an even, honeycomb-like layout.

use glam::DVec2;
use log::{debug, info};

use crate::generation::dual::VoronoiDual;
use crate::geom::Bounds;

/// Apply `passes` Lloyd relaxation passes and return the final dual
///
/// The returned [`VoronoiDual`] is already recomputed from the relaxed
/// sites, ready for the graph builder. Zero passes simply computes the dual
/// of the raw sites.
pub fn relax(sites: Vec<DVec2>, bounds: Bounds, passes: usize) -> VoronoiDual {
    info!("Relaxing {} sites ({} passes)...", sites.len(), passes);

    let mut dual = VoronoiDual::compute(sites, bounds);

    for pass in 0..passes {
        let mut max_displacement = 0.0f64;
        let mut relaxed = Vec::with_capacity(dual.sites().len());

        for (i, &site) in dual.sites().iter().enumerate() {
            let region = dual.region(i);
            if region.is_empty() {
                relaxed.push(site);
                continue;
            }

            let mut sum = DVec2::ZERO;
            for vertex in &region {
                sum += *vertex;
            }
            let centroid = sum / region.len() as f64;

            max_displacement = max_displacement.max(centroid.distance(site));
            relaxed.push(centroid);
        }

        debug!(
            "Lloyd pass {} of {}: max displacement {:.4}",
            pass + 1,
            passes,
            max_displacement
        );

        dual = VoronoiDual::compute(relaxed, bounds);
    }

    dual
}
