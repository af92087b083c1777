//! Hydrology engine: river routing and moisture diffusion
//!
//! Rivers start at randomly drawn mid-elevation corners and follow the
//! downslope chain toward the coast, accumulating flow counters along the
//! way. Moisture then diffuses outward from fresh water and is redistributed
//! linearly over the land corners.

use std::cmp::Ordering;
use std::collections::VecDeque;

use log::info;
use rand::Rng;

use crate::mesh::ZoneMesh;

/// Moisture assigned per unit of river flow at a seed corner
const RIVER_MOISTURE_STEP: f64 = 0.2;
/// Cap for river-derived moisture seeds
const RIVER_MOISTURE_CAP: f64 = 3.0;
/// Decay applied per corner hop during moisture diffusion
const MOISTURE_DECAY: f64 = 0.9;

/// Route rivers down the slopes
///
/// One seed attempt per two units of zone width. Each attempt draws a random
/// corner and skips it unless it is land in the (0.3, 0.9] elevation band;
/// otherwise the walk follows `downslope` until it reaches the coast,
/// bumping the flow counter on every traversed edge and both of its
/// corners. A walk that lands in a local minimum before the coast just
/// stops there; the flow it already recorded remains.
pub fn create_rivers<R: Rng>(mesh: &mut ZoneMesh, rng: &mut R) {
    info!("Creating rivers...");

    if mesh.corners.is_empty() {
        return;
    }

    let attempts = (mesh.bounds.width / 2.0) as usize;
    for _ in 0..attempts {
        let mut current = rng.gen_range(0..mesh.corners.len());

        {
            let corner = &mesh.corners[current];
            if corner.ocean || corner.elevation < 0.3 || corner.elevation > 0.9 {
                continue;
            }
        }

        while !mesh.corners[current].coast {
            let down = mesh.corners[current].downslope;
            if down == current {
                break;
            }

            if let Some(ei) = mesh.edge_between_corners(current, down) {
                let crosses_land = match (mesh.edges[ei].v0, mesh.edges[ei].v1) {
                    (Some(v0), Some(v1)) => {
                        !mesh.corners[v0].water || !mesh.corners[v1].water
                    }
                    _ => false,
                };
                if crosses_land {
                    mesh.edges[ei].river += 1;
                    mesh.corners[current].river += 1;
                    mesh.corners[down].river += 1;
                }
            }

            current = down;
        }
    }
}

/// Seed moisture at fresh water and diffuse it outward
///
/// Non-ocean corners that are water or carry river flow seed the queue
/// (river corners at `min(3.0, 0.2 * flow)`, plain water at 1.0). Diffusion
/// proposes `0.9 * moisture` to each neighbor and only ever raises values,
/// so the pass is monotone and terminates. Ocean and coast corners are
/// forced to 1.0 at the end: salt water.
pub fn assign_corner_moisture(mesh: &mut ZoneMesh) {
    info!("Assigning corner moisture...");

    let mut queue = VecDeque::new();
    for corner in mesh.corners.iter_mut() {
        if (corner.water || corner.river > 0) && !corner.ocean {
            corner.moisture = if corner.river > 0 {
                (RIVER_MOISTURE_STEP * corner.river as f64).min(RIVER_MOISTURE_CAP)
            } else {
                1.0
            };
            queue.push_back(corner.index);
        } else {
            corner.moisture = 0.0;
        }
    }

    while let Some(current) = queue.pop_front() {
        let moisture = mesh.corners[current].moisture;
        let adjacent = mesh.corners[current].adjacent.clone();

        for neighbor in adjacent {
            let candidate = MOISTURE_DECAY * moisture;
            if candidate > mesh.corners[neighbor].moisture {
                mesh.corners[neighbor].moisture = candidate;
                queue.push_back(neighbor);
            }
        }
    }

    // Salt water
    for corner in mesh.corners.iter_mut() {
        if corner.ocean || corner.coast {
            corner.moisture = 1.0;
        }
    }
}

/// Redistribute land corner moisture linearly by rank
///
/// Unlike elevation, moisture gets a straight `rank / n` reassignment.
pub fn redistribute_moisture(mesh: &mut ZoneMesh) {
    info!("Redistributing moisture...");

    let mut land = mesh.land_corner_ids();
    land.sort_by(|&a, &b| {
        mesh.corners[a]
            .moisture
            .partial_cmp(&mesh.corners[b].moisture)
            .unwrap_or(Ordering::Equal)
    });

    let n = land.len();
    for (rank, &ci) in land.iter().enumerate() {
        mesh.corners[ci].moisture = rank as f64 / n as f64;
    }
}

/// Each polygon's moisture is the mean of its corners'
pub fn assign_polygon_moisture(mesh: &mut ZoneMesh) {
    info!("Assigning moisture to polygons...");

    for ci in 0..mesh.centers.len() {
        let count = mesh.centers[ci].corners.len();
        if count == 0 {
            mesh.centers[ci].moisture = 0.0;
            continue;
        }
        let total: f64 = mesh.centers[ci]
            .corners
            .iter()
            .map(|&q| mesh.corners[q].moisture)
            .sum();
        mesh.centers[ci].moisture = total / count as f64;
    }
}
