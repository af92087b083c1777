//! Random site sampling

use glam::DVec2;
use log::info;
use rand::Rng;

use crate::geom::Bounds;

/// Scatter `count` uniformly random sites inside the bounds
///
/// The random source is injected so that a seeded generator reproduces the
/// same sites every run.
pub fn generate_sites<R: Rng>(count: usize, bounds: &Bounds, rng: &mut R) -> Vec<DVec2> {
    info!("Generating {} sites...", count);

    (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen_range(bounds.x..bounds.right()),
                rng.gen_range(bounds.y..bounds.bottom()),
            )
        })
        .collect()
}
