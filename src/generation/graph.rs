//! Graph builder: from the Voronoi dual to the Center/Corner/Edge arena
//!
//! For every dual edge this resolves (or creates) the two corner entities,
//! creates the edge entity and wires all six adjacency relations:
//! center-edge, corner-edge, center-center, corner-corner and center-corner
//! both ways. Corners are deduplicated by a quantized location key so the
//! floating-point endpoints of neighboring segments collapse into a single
//! shared vertex.

use std::collections::HashMap;

use glam::DVec2;
use log::info;

use crate::generation::dual::VoronoiDual;
use crate::mesh::{Center, Corner, Edge, ZoneMesh};

/// Build the mesh arena from the relaxed Voronoi dual
pub fn build_graph(dual: &VoronoiDual) -> ZoneMesh {
    info!("Building graph...");

    let mut mesh = ZoneMesh::new(dual.bounds());

    for (i, &site) in dual.sites().iter().enumerate() {
        mesh.centers.push(Center::new(i, site));
    }

    let mut corner_lookup: HashMap<i64, usize> = HashMap::new();

    for dual_edge in dual.edges() {
        let index = mesh.edges.len();
        let mut edge = Edge::new(index);

        edge.v0 = make_corner(&mut mesh, &mut corner_lookup, dual_edge.voronoi0);
        edge.v1 = make_corner(&mut mesh, &mut corner_lookup, dual_edge.voronoi1);
        edge.d0 = Some(dual_edge.site0);
        edge.d1 = Some(dual_edge.site1);

        // Centers point to edges, corners point to edges
        if let Some(d0) = edge.d0 {
            mesh.centers[d0].borders.push(index);
        }
        if let Some(d1) = edge.d1 {
            mesh.centers[d1].borders.push(index);
        }
        if let Some(v0) = edge.v0 {
            mesh.corners[v0].protrudes.push(index);
        }
        if let Some(v1) = edge.v1 {
            mesh.corners[v1].protrudes.push(index);
        }

        // Centers point to centers
        if let (Some(d0), Some(d1)) = (edge.d0, edge.d1) {
            push_unique(&mut mesh.centers[d0].neighbors, d1);
            push_unique(&mut mesh.centers[d1].neighbors, d0);
        }

        // Corners point to corners
        if let (Some(v0), Some(v1)) = (edge.v0, edge.v1) {
            push_unique(&mut mesh.corners[v0].adjacent, v1);
            push_unique(&mut mesh.corners[v1].adjacent, v0);
        }

        // Centers point to corners
        if let Some(d0) = edge.d0 {
            if let Some(v0) = edge.v0 {
                push_unique(&mut mesh.centers[d0].corners, v0);
            }
            if let Some(v1) = edge.v1 {
                push_unique(&mut mesh.centers[d0].corners, v1);
            }
        }
        if let Some(d1) = edge.d1 {
            if let Some(v0) = edge.v0 {
                push_unique(&mut mesh.centers[d1].corners, v0);
            }
            if let Some(v1) = edge.v1 {
                push_unique(&mut mesh.centers[d1].corners, v1);
            }
        }

        // Corners point to centers
        if let Some(v0) = edge.v0 {
            if let Some(d0) = edge.d0 {
                push_unique(&mut mesh.corners[v0].touches, d0);
            }
            if let Some(d1) = edge.d1 {
                push_unique(&mut mesh.corners[v0].touches, d1);
            }
        }
        if let Some(v1) = edge.v1 {
            if let Some(d0) = edge.d0 {
                push_unique(&mut mesh.corners[v1].touches, d0);
            }
            if let Some(d1) = edge.d1 {
                push_unique(&mut mesh.corners[v1].touches, d1);
            }
        }

        mesh.edges.push(edge);
    }

    mesh
}

/// Smooth the mesh by moving every non-border corner to the centroid of the
/// centers that touch it
///
/// Border corners stay put so the mesh keeps its rectangular outline. New
/// positions are computed in a first pass and applied in a second, so every
/// centroid is based on the pre-smoothing layout.
pub fn improve_corners(mesh: &mut ZoneMesh) {
    info!("Improving graph corners...");

    let new_positions: Vec<DVec2> = mesh
        .corners
        .iter()
        .map(|corner| {
            if corner.border || corner.touches.is_empty() {
                corner.position
            } else {
                let mut sum = DVec2::ZERO;
                for &center in &corner.touches {
                    sum += mesh.centers[center].position;
                }
                sum / corner.touches.len() as f64
            }
        })
        .collect();

    for (corner, position) in mesh.corners.iter_mut().zip(new_positions) {
        corner.position = position;
    }
}

/// Set the midpoint of every edge whose two corners both exist
///
/// Open boundary edges are skipped, not errored.
pub fn compute_edge_midpoints(mesh: &mut ZoneMesh) {
    info!("Computing edge midpoints...");

    for ei in 0..mesh.edges.len() {
        if let (Some(v0), Some(v1)) = (mesh.edges[ei].v0, mesh.edges[ei].v1) {
            let midpoint = (mesh.corners[v0].position + mesh.corners[v1].position) * 0.5;
            mesh.edges[ei].midpoint = Some(midpoint);
        }
    }
}

/// Resolve a Voronoi endpoint to a deduplicated corner entity
fn make_corner(
    mesh: &mut ZoneMesh,
    lookup: &mut HashMap<i64, usize>,
    position: Option<DVec2>,
) -> Option<usize> {
    let position = position?;

    // Quantized location key: coincident floating endpoints share a corner
    let key = position.x as i64 + (position.y as i64) * (mesh.bounds.width as i64) * 2;
    if let Some(&existing) = lookup.get(&key) {
        return Some(existing);
    }

    let index = mesh.corners.len();
    let border = mesh.bounds.lies_on_perimeter(position);
    mesh.corners.push(Corner::new(index, position, border));
    lookup.insert(key, index);
    Some(index)
}

fn push_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::lloyd::relax;
    use crate::generation::points::generate_sites;
    use crate::geom::Bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_mesh(count: usize, seed: u64) -> ZoneMesh {
        let bounds = Bounds::square(100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sites = generate_sites(count, &bounds, &mut rng);
        let dual = relax(sites, bounds, 1);
        build_graph(&dual)
    }

    #[test]
    fn test_build_graph_basic_shape() {
        let mesh = sample_mesh(100, 42);

        assert_eq!(mesh.centers.len(), 100);
        assert!(!mesh.corners.is_empty());
        assert!(!mesh.edges.is_empty());
    }

    #[test]
    fn test_neighbor_symmetry() {
        let mesh = sample_mesh(100, 42);

        for center in &mesh.centers {
            for &neighbor in &center.neighbors {
                assert!(
                    mesh.centers[neighbor].neighbors.contains(&center.index),
                    "center adjacency must be symmetric"
                );
            }
        }
    }

    #[test]
    fn test_corner_adjacency_symmetry() {
        let mesh = sample_mesh(100, 7);

        for corner in &mesh.corners {
            for &adjacent in &corner.adjacent {
                assert!(
                    mesh.corners[adjacent].adjacent.contains(&corner.index),
                    "corner adjacency must be symmetric"
                );
            }
        }
    }

    #[test]
    fn test_center_corner_wiring_is_mutual() {
        let mesh = sample_mesh(80, 3);

        for center in &mesh.centers {
            for &q in &center.corners {
                assert!(mesh.corners[q].touches.contains(&center.index));
            }
        }
        for corner in &mesh.corners {
            for &c in &corner.touches {
                assert!(mesh.centers[c].corners.contains(&corner.index));
            }
        }
    }

    #[test]
    fn test_border_corners_exist() {
        let mesh = sample_mesh(200, 42);
        assert!(
            mesh.corners.iter().any(|c| c.border),
            "clamped hull circumcenters must produce border corners"
        );
    }

    #[test]
    fn test_minimal_three_site_mesh() {
        // Smallest valid diagram: must build without panicking even though
        // nearly everything is boundary geometry
        let mesh = sample_mesh(3, 42);

        assert_eq!(mesh.centers.len(), 3);
        assert!(!mesh.edges.is_empty());
    }

    #[test]
    fn test_improve_corners_keeps_border_fixed() {
        let mut mesh = sample_mesh(100, 42);
        let before: Vec<_> = mesh
            .corners
            .iter()
            .filter(|c| c.border)
            .map(|c| (c.index, c.position))
            .collect();

        improve_corners(&mut mesh);

        for (index, position) in before {
            assert_eq!(mesh.corners[index].position, position);
        }
    }

    #[test]
    fn test_edge_midpoints() {
        let mut mesh = sample_mesh(100, 42);
        compute_edge_midpoints(&mut mesh);

        for edge in &mesh.edges {
            match (edge.v0, edge.v1) {
                (Some(v0), Some(v1)) => {
                    let expected =
                        (mesh.corners[v0].position + mesh.corners[v1].position) * 0.5;
                    assert_eq!(edge.midpoint, Some(expected));
                }
                _ => assert!(edge.midpoint.is_none()),
            }
        }
    }
}
