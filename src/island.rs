//! Island silhouettes: the land/water shape predicate
//!
//! The overall outline of a zone's landmass is decided by a single predicate
//! answering "is this point water?". It is injected into the elevation stage
//! so different world shapes can be swapped without touching the mesh,
//! elevation or moisture logic.

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;

use crate::geom::Bounds;

/// The land/water silhouette of a zone
pub trait IslandShape {
    /// True if the point (in zone coordinates) is water
    fn is_water(&self, bounds: &Bounds, point: DVec2) -> bool;
}

/// Any matching closure works as a silhouette
impl<F> IslandShape for F
where
    F: Fn(&Bounds, DVec2) -> bool,
{
    fn is_water(&self, bounds: &Bounds, point: DVec2) -> bool {
        self(bounds, point)
    }
}

/// A rounded island outline perturbed by overlapping sine bumps
///
/// Produces a single central landmass with an irregular coastline and one
/// "dip" (a bay or inlet) at a random angle. All parameters are drawn from
/// the injected random source, so the same seed shapes the same island.
#[derive(Debug, Clone)]
pub struct RadialIslandShape {
    bumps: u32,
    start_angle: f64,
    dip_angle: f64,
    dip_width: f64,
}

impl RadialIslandShape {
    /// Draw a random silhouette from the given random source
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            bumps: rng.gen_range(1..=5),
            start_angle: rng.gen::<f64>() * 2.0 * PI,
            dip_angle: rng.gen::<f64>() * 2.0 * PI,
            dip_width: rng.gen::<f64>() * 0.5 + 0.2,
        }
    }

    pub fn bumps(&self) -> u32 {
        self.bumps
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn dip_angle(&self) -> f64 {
        self.dip_angle
    }

    pub fn dip_width(&self) -> f64 {
        self.dip_width
    }
}

impl IslandShape for RadialIslandShape {
    fn is_water(&self, bounds: &Bounds, point: DVec2) -> bool {
        // Normalize into [-1, 1] on both axes
        let p = DVec2::new(
            2.0 * ((point.x - bounds.x) / bounds.width - 0.5),
            2.0 * ((point.y - bounds.y) / bounds.height - 0.5),
        );

        let angle = p.y.atan2(p.x);
        let length = 0.5 * (p.x.abs().max(p.y.abs()) + p.length());

        let bumps = self.bumps as f64;
        let mut r1 =
            0.5 + 0.40 * (self.start_angle + bumps * angle + ((bumps + 3.0) * angle).cos()).sin();
        let mut r2 =
            0.7 - 0.20 * (self.start_angle + bumps * angle - ((bumps + 2.0) * angle).sin()).sin();

        // Carve the dip: a bay where both radii collapse
        if (angle - self.dip_angle).abs() < self.dip_width
            || (angle - self.dip_angle + 2.0 * PI).abs() < self.dip_width
            || (angle - self.dip_angle - 2.0 * PI).abs() < self.dip_width
        {
            r1 = 0.2;
            r2 = 0.2;
        }

        !(length < r1 || (length > r1 * 1.07 && length < r2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parameter_ranges() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let shape = RadialIslandShape::new(&mut rng);

            assert!((1..=5).contains(&shape.bumps()));
            assert!((0.0..2.0 * PI).contains(&shape.start_angle()));
            assert!((0.0..2.0 * PI).contains(&shape.dip_angle()));
            assert!((0.2..0.7).contains(&shape.dip_width()));
        }
    }

    #[test]
    fn test_corner_is_water() {
        let mut rng = ChaCha8Rng::seed_from_u64(29384);
        let shape = RadialIslandShape::new(&mut rng);
        let bounds = Bounds::square(100.0);

        // The very corner of the map is always outside the island
        assert!(shape.is_water(&bounds, DVec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_center_is_land() {
        let mut rng = ChaCha8Rng::seed_from_u64(29384);
        let shape = RadialIslandShape::new(&mut rng);
        let bounds = Bounds::square(100.0);

        assert!(!shape.is_water(&bounds, DVec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_deterministic_silhouette() {
        let bounds = Bounds::square(100.0);
        let mut rng1 = ChaCha8Rng::seed_from_u64(5);
        let mut rng2 = ChaCha8Rng::seed_from_u64(5);
        let shape1 = RadialIslandShape::new(&mut rng1);
        let shape2 = RadialIslandShape::new(&mut rng2);

        for x in (0..100).step_by(10) {
            for y in (0..100).step_by(10) {
                let p = DVec2::new(x as f64, y as f64);
                assert_eq!(shape1.is_water(&bounds, p), shape2.is_water(&bounds, p));
            }
        }
    }

    #[test]
    fn test_closure_as_shape() {
        let bounds = Bounds::square(100.0);
        let everything_land = |_: &Bounds, _: DVec2| false;

        assert!(!everything_land.is_water(&bounds, DVec2::new(0.0, 0.0)));
    }
}
