//! Adapter over the delaunator triangulation primitive
//!
//! The rest of the pipeline never talks to delaunator directly; it consumes
//! this dual view of the triangulation: the site list, one record per
//! Delaunay edge carrying the dual Voronoi segment, and the Voronoi cell
//! polygon around any site. Circumcenters are clamped into the zone bounds,
//! which plays the role of clipping the Voronoi diagram to the map rectangle
//! and puts boundary corners exactly on the perimeter.

use glam::DVec2;

use crate::geom::{circumcenter, Bounds};

/// One Delaunay edge together with its dual Voronoi segment
///
/// `voronoi1` is `None` for hull edges, whose Voronoi segment runs off the
/// edge of the triangulation; downstream code treats such open segments as
/// expected boundary degeneracy, not an error.
#[derive(Debug, Clone, Copy)]
pub struct DualEdge {
    /// Site on one side of the Delaunay edge
    pub site0: usize,
    /// Site on the other side
    pub site1: usize,
    /// Clamped circumcenter of the triangle on this side
    pub voronoi0: Option<DVec2>,
    /// Clamped circumcenter of the opposite triangle, if one exists
    pub voronoi1: Option<DVec2>,
}

/// The Voronoi/Delaunay dual of a set of sites
pub struct VoronoiDual {
    sites: Vec<DVec2>,
    bounds: Bounds,
    triangulation: delaunator::Triangulation,
    /// One incoming half-edge per site, preferring hull edges so boundary
    /// cells can be walked completely
    site_to_halfedge: Vec<usize>,
    /// Clamped circumcenter per triangle
    circumcenters: Vec<DVec2>,
}

impl VoronoiDual {
    /// Triangulate the sites and derive the dual structures
    pub fn compute(sites: Vec<DVec2>, bounds: Bounds) -> Self {
        let points: Vec<delaunator::Point> = sites
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();

        let triangulation = delaunator::triangulate(&points);

        let triangle_count = triangulation.triangles.len() / 3;
        let circumcenters: Vec<DVec2> = (0..triangle_count)
            .map(|t| {
                let a = sites[triangulation.triangles[3 * t]];
                let b = sites[triangulation.triangles[3 * t + 1]];
                let c = sites[triangulation.triangles[3 * t + 2]];
                bounds.clamp(circumcenter(a, b, c))
            })
            .collect();

        let mut site_to_halfedge = vec![delaunator::EMPTY; sites.len()];
        for e in 0..triangulation.triangles.len() {
            let endpoint = triangulation.triangles[next_halfedge(e)];
            if site_to_halfedge[endpoint] == delaunator::EMPTY
                || triangulation.halfedges[e] == delaunator::EMPTY
            {
                site_to_halfedge[endpoint] = e;
            }
        }

        Self {
            sites,
            bounds,
            triangulation,
            site_to_halfedge,
            circumcenters,
        }
    }

    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// True if triangulation failed (e.g. all sites collinear)
    pub fn is_degenerate(&self) -> bool {
        self.triangulation.triangles.is_empty()
    }

    /// All Delaunay edges with their dual Voronoi segments, each edge once
    pub fn edges(&self) -> Vec<DualEdge> {
        let mut edges = Vec::new();

        for e in 0..self.triangulation.triangles.len() {
            let opposite = self.triangulation.halfedges[e];
            // Each half-edge pair yields one dual edge
            if opposite != delaunator::EMPTY && opposite < e {
                continue;
            }

            let voronoi1 = if opposite == delaunator::EMPTY {
                None
            } else {
                Some(self.circumcenters[opposite / 3])
            };

            edges.push(DualEdge {
                site0: self.triangulation.triangles[e],
                site1: self.triangulation.triangles[next_halfedge(e)],
                voronoi0: Some(self.circumcenters[e / 3]),
                voronoi1,
            });
        }

        edges
    }

    /// Vertices of the Voronoi cell polygon around a site
    ///
    /// Returns an empty list for sites the triangulation never reached
    /// (duplicate or degenerate input).
    pub fn region(&self, site: usize) -> Vec<DVec2> {
        let start = match self.site_to_halfedge.get(site) {
            Some(&s) if s != delaunator::EMPTY => s,
            _ => return Vec::new(),
        };

        let mut vertices = Vec::new();
        let mut incoming = start;
        loop {
            vertices.push(self.circumcenters[incoming / 3]);
            let outgoing = next_halfedge(incoming);
            incoming = self.triangulation.halfedges[outgoing];
            if incoming == delaunator::EMPTY || incoming == start {
                break;
            }
        }

        vertices
    }
}

/// Next half-edge within the same triangle (counter-clockwise)
#[inline]
fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_sites;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_dual(count: usize, seed: u64) -> VoronoiDual {
        let bounds = Bounds::square(100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sites = generate_sites(count, &bounds, &mut rng);
        VoronoiDual::compute(sites, bounds)
    }

    #[test]
    fn test_compute_dual() {
        let dual = sample_dual(100, 42);

        assert!(!dual.is_degenerate());
        assert_eq!(dual.sites().len(), 100);
        assert!(!dual.edges().is_empty());
    }

    #[test]
    fn test_edges_reference_valid_sites() {
        let dual = sample_dual(50, 7);

        for edge in dual.edges() {
            assert!(edge.site0 < 50);
            assert!(edge.site1 < 50);
            assert_ne!(edge.site0, edge.site1);
            assert!(edge.voronoi0.is_some());
        }
    }

    #[test]
    fn test_voronoi_endpoints_clamped() {
        let dual = sample_dual(50, 11);
        let bounds = dual.bounds();

        for edge in dual.edges() {
            for v in [edge.voronoi0, edge.voronoi1].into_iter().flatten() {
                assert!(bounds.contains(v), "endpoint {:?} escaped bounds", v);
            }
        }
    }

    #[test]
    fn test_regions_are_polygons() {
        let dual = sample_dual(100, 3);

        let mut nonempty = 0;
        for site in 0..100 {
            let region = dual.region(site);
            if region.len() >= 3 {
                nonempty += 1;
            }
        }
        // The odd hull cell may degenerate, but the bulk must be real polygons
        assert!(nonempty > 90);
    }

    #[test]
    fn test_minimal_three_sites() {
        let bounds = Bounds::square(100.0);
        let sites = vec![
            DVec2::new(20.0, 20.0),
            DVec2::new(80.0, 30.0),
            DVec2::new(50.0, 80.0),
        ];
        let dual = VoronoiDual::compute(sites, bounds);

        assert!(!dual.is_degenerate());
        // One triangle: three hull edges, each with an open Voronoi segment
        let edges = dual.edges();
        assert_eq!(edges.len(), 3);
        for edge in edges {
            assert!(edge.voronoi1.is_none());
        }
    }
}
