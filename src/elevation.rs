//! Elevation engine: water classification, flood-distance elevation,
//! redistribution and downslope routing
//!
//! Elevation approximates "distance inland": border corners sit at zero and
//! every step away from the border adds a small cost, with a heavy surcharge
//! for steps across land. A rank-based redistribution then reshapes the raw
//! distances into the canonical island profile (broad lowlands, few peaks).

use std::cmp::Ordering;
use std::collections::VecDeque;

use log::info;

use crate::island::IslandShape;
use crate::mesh::ZoneMesh;

/// Base cost of one corner-to-corner step
const ELEVATION_STEP: f64 = 0.01;
/// Surcharge when both corners of a step are land
const LAND_STEP_PENALTY: f64 = 1.0;
/// Fraction of water corners that makes a polygon water
const WATER_THRESHOLD: f64 = 0.3;
/// Curve scale for elevation redistribution
const ELEVATION_SCALE_FACTOR: f64 = 1.1;

/// Resolve each corner's water flag and relax corner elevations outward from
/// the border
///
/// Border corners seed the queue at elevation zero; everyone else starts at
/// the unresolved sentinel. This is a multi-source shortest-path relaxation
/// rather than a plain breadth-first fill, because step weights differ
/// (0.01 across water, 1.01 across land) and corners re-enter the queue
/// whenever a cheaper path improves them.
pub fn assign_corner_elevations<S: IslandShape + ?Sized>(mesh: &mut ZoneMesh, shape: &S) {
    info!("Assigning corner elevations...");

    let bounds = mesh.bounds;
    let mut queue = VecDeque::new();

    for corner in mesh.corners.iter_mut() {
        corner.water = shape.is_water(&bounds, corner.position);
        if corner.border {
            corner.elevation = 0.0;
            queue.push_back(corner.index);
        } else {
            corner.elevation = f64::MAX;
        }
    }

    while let Some(current) = queue.pop_front() {
        let elevation = mesh.corners[current].elevation;
        let water = mesh.corners[current].water;
        let adjacent = mesh.corners[current].adjacent.clone();

        for neighbor in adjacent {
            let mut candidate = ELEVATION_STEP + elevation;
            if !water && !mesh.corners[neighbor].water {
                candidate += LAND_STEP_PENALTY;
            }
            if candidate < mesh.corners[neighbor].elevation {
                mesh.corners[neighbor].elevation = candidate;
                queue.push_back(neighbor);
            }
        }
    }
}

/// Classify polygons and corners as ocean, coast or land
///
/// Polygons touching the border seed an ocean flood fill that spreads
/// through connected water; water that the flood never reaches stays a lake.
/// Coast is land next to ocean. Corner flags are then derived from the
/// touching polygons.
pub fn assign_ocean_coast_and_land(mesh: &mut ZoneMesh) {
    info!("Assigning ocean, coast and land...");

    let mut queue = VecDeque::new();

    for ci in 0..mesh.centers.len() {
        let mut num_water = 0;
        let mut touches_border = false;
        for &q in &mesh.centers[ci].corners {
            if mesh.corners[q].border {
                touches_border = true;
            }
            if mesh.corners[q].water {
                num_water += 1;
            }
        }

        let corner_count = mesh.centers[ci].corners.len();
        let center = &mut mesh.centers[ci];
        if touches_border {
            center.border = true;
            center.water = true;
            center.ocean = true;
            queue.push_back(ci);
        }
        center.water = center.ocean
            || (corner_count > 0 && num_water as f64 / corner_count as f64 >= WATER_THRESHOLD);
    }

    while let Some(current) = queue.pop_front() {
        let neighbors = mesh.centers[current].neighbors.clone();
        for ni in neighbors {
            let neighbor = &mut mesh.centers[ni];
            if neighbor.water && !neighbor.ocean {
                neighbor.ocean = true;
                queue.push_back(ni);
            }
        }
    }

    for ci in 0..mesh.centers.len() {
        let ocean_neighbor = mesh.centers[ci]
            .neighbors
            .iter()
            .any(|&n| mesh.centers[n].ocean);
        let land_neighbor = mesh.centers[ci]
            .neighbors
            .iter()
            .any(|&n| !mesh.centers[n].water);
        mesh.centers[ci].coast = ocean_neighbor && land_neighbor;
    }

    for qi in 0..mesh.corners.len() {
        let num_ocean = mesh.corners[qi]
            .touches
            .iter()
            .filter(|&&t| mesh.centers[t].ocean)
            .count();
        let num_land = mesh.corners[qi]
            .touches
            .iter()
            .filter(|&&t| !mesh.centers[t].water)
            .count();
        let total = mesh.corners[qi].touches.len();

        let ocean = num_ocean == total;
        let coast = num_ocean > 0 && num_land > 0;
        let water = mesh.corners[qi].border || (num_land != total && !coast);

        let corner = &mut mesh.corners[qi];
        corner.ocean = ocean;
        corner.coast = coast;
        corner.water = water;
    }
}

/// Reshape land corner elevations onto the canonical island profile
///
/// Land corners are ranked by raw elevation and reassigned along
/// `sqrt(1.1) - sqrt(1.1 * (1 - rank/n))`, capped at 1: a curve that keeps
/// most of the mass in the lowlands and leaves only a few peaks. Ocean and
/// coast corners are forced to zero afterwards.
pub fn redistribute_elevations(mesh: &mut ZoneMesh) {
    info!("Redistributing elevations...");

    let mut land = mesh.land_corner_ids();
    land.sort_by(|&a, &b| {
        mesh.corners[a]
            .elevation
            .partial_cmp(&mesh.corners[b].elevation)
            .unwrap_or(Ordering::Equal)
    });

    let n = land.len();
    for (rank, &ci) in land.iter().enumerate() {
        let y = rank as f64 / n as f64;
        let x = ELEVATION_SCALE_FACTOR.sqrt() - (ELEVATION_SCALE_FACTOR * (1.0 - y)).sqrt();
        mesh.corners[ci].elevation = x.min(1.0);
    }

    for corner in mesh.corners.iter_mut() {
        if corner.ocean || corner.coast {
            corner.elevation = 0.0;
        }
    }
}

/// Each polygon's elevation is the mean of its corners'
pub fn assign_polygon_elevations(mesh: &mut ZoneMesh) {
    info!("Assigning elevations to polygons...");

    for ci in 0..mesh.centers.len() {
        let count = mesh.centers[ci].corners.len();
        if count == 0 {
            mesh.centers[ci].elevation = 0.0;
            continue;
        }
        let total: f64 = mesh.centers[ci]
            .corners
            .iter()
            .map(|&q| mesh.corners[q].elevation)
            .sum();
        mesh.centers[ci].elevation = total / count as f64;
    }
}

/// Point each corner at its strictly lowest neighbor
///
/// A corner with no strictly lower neighbor is a local minimum and points at
/// itself, which terminates river walks. Strict descent guarantees that
/// repeatedly following `downslope` cannot cycle.
pub fn calculate_downslopes(mesh: &mut ZoneMesh) {
    info!("Calculating downslopes...");

    for ci in 0..mesh.corners.len() {
        let mut down = ci;
        for &neighbor in &mesh.corners[ci].adjacent {
            if mesh.corners[neighbor].elevation < mesh.corners[down].elevation {
                down = neighbor;
            }
        }
        mesh.corners[ci].downslope = down;
    }
}
