//! Spatial indexing for fast point-to-region lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::DVec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree of region centers
///
/// In a Voronoi tessellation the polygon containing a point is exactly the
/// polygon of the nearest site, so a nearest-neighbor lookup answers
/// "which region is this point in?" in O(log n).
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from region center positions
    pub fn new(centers: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = centers.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the region whose center is nearest to the position
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let centers = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(50.0, 90.0),
        ];

        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(DVec2::new(12.0, 8.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(85.0, 15.0)), 1);
        assert_eq!(index.find_nearest(DVec2::new(50.0, 80.0)), 2);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let centers = vec![DVec2::new(25.0, 25.0), DVec2::new(75.0, 75.0)];
        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(centers[0]), 0);
        assert_eq!(index.find_nearest(centers[1]), 1);
    }
}
