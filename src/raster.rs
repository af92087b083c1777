//! Rasterizer: paint the classified mesh and stream world cells row by row
//!
//! Each polygon is filled as a triangle fan around its center, using the map
//! color of its biome. Polygons on the zone boundary are missing their
//! outermost edge data, so the wedge against the map edge is reconstructed
//! as an extra triangle or quad instead of being left unpainted. River
//! edges are stroked on top.
//!
//! The finished buffer is then scanned one row at a time: every pixel is
//! matched back to a biome by exact color and becomes one world cell. A
//! pixel whose color matches nothing (sentinel paint or rounding artifacts
//! near polygon boundaries) falls back to the Ocean biome with a debug log.
//! Rows are handed to the sink one by one, so at most one row of cells is
//! ever held in memory.

use glam::DVec2;
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::biome::{BiomeCatalog, BiomeId};
use crate::error::{Result, ZoneGenError};
use crate::geom::close_enough;
use crate::mesh::{Center, ZoneMesh};

/// Paint color for polygons whose biome name had no catalog entry; never a
/// catalog color, so the row scan turns it into the Ocean fallback
const UNKNOWN_BIOME_COLOR: u32 = 0xff00ff;

/// One rasterized unit of terrain, handed off to the sink and not retained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldCell {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    /// Catalog id of the cell's biome
    pub biome: BiomeId,
}

/// Receives each finished row of world cells
///
/// The scan does not proceed to the next row until `persist_row` returns,
/// making the sink the natural backpressure point. An error aborts the scan.
pub trait RowSink {
    fn persist_row(&mut self, row: &[WorldCell]) -> Result<()>;
}

/// Any matching closure works as a sink
impl<F> RowSink for F
where
    F: FnMut(&[WorldCell]) -> Result<()>,
{
    fn persist_row(&mut self, row: &[WorldCell]) -> Result<()> {
        self(row)
    }
}

/// Render the classified mesh into an RGBA buffer sized to the zone bounds
pub fn render(mesh: &ZoneMesh, catalog: &BiomeCatalog) -> RgbaImage {
    let width = mesh.bounds.width as u32;
    let height = mesh.bounds.height as u32;
    let mut image = RgbaImage::new(width, height);

    info!("Rendering zone map: {}x{}", width, height);

    for center in &mesh.centers {
        let color = center
            .biome
            .and_then(|id| catalog.get(id))
            .map(|b| b.color)
            .unwrap_or(UNKNOWN_BIOME_COLOR);
        fill_polygon(&mut image, mesh, center, rgba(color));
    }

    if let Some(river_color) = catalog
        .find_by_name("River")
        .and_then(|id| catalog.get(id))
        .map(|b| rgba(b.color))
    {
        for edge in &mesh.edges {
            if edge.river == 0 {
                continue;
            }
            if let (Some(v0), Some(v1)) = (edge.v0, edge.v1) {
                let stroke_width = 1.0 + ((edge.river * 2) as f64).sqrt();
                stroke_segment(
                    &mut image,
                    mesh.corners[v0].position,
                    mesh.corners[v1].position,
                    stroke_width,
                    river_color,
                );
            }
        }
    } else {
        debug!("catalog has no \"River\" biome; skipping river strokes");
    }

    image
}

/// Scan the buffer row by row and persist one world cell per pixel
///
/// The scan row `y` maps to world row `height - 1 - y`, so world cell (0, 0)
/// is the bottom-left of the map. Exactly `height` calls to the sink are
/// made, each with exactly `width` cells.
pub fn stream_rows<S: RowSink + ?Sized>(
    image: &RgbaImage,
    catalog: &BiomeCatalog,
    sink: &mut S,
) -> Result<()> {
    let ocean = catalog
        .find_by_name("Ocean")
        .ok_or(ZoneGenError::MissingOceanBiome)?;

    let (width, height) = image.dimensions();
    let mut row = Vec::with_capacity(width as usize);

    for scan_y in 0..height {
        row.clear();

        for scan_x in 0..width {
            let pixel = image.get_pixel(scan_x, scan_y);
            let color =
                ((pixel[0] as u32) << 16) | ((pixel[1] as u32) << 8) | (pixel[2] as u32);

            let biome = catalog.find_by_color(color).unwrap_or_else(|| {
                // Expected near polygon boundaries; hides glitches around
                // the edge of the map
                debug!(
                    "no biome for color #{:06x} at ({}, {}); using Ocean",
                    color, scan_x, scan_y
                );
                ocean
            });

            row.push(WorldCell {
                x: scan_x as i64,
                y: (height - 1 - scan_y) as i64,
                z: 0,
                biome,
            });
        }

        sink.persist_row(&row)?;
        debug!("persisted {} cells, row {} of {}", row.len(), scan_y + 1, height);
    }

    info!("Persisted {} rows of {} cells", height, width);
    Ok(())
}

/// Fill one polygon as a triangle fan around its center
///
/// Only edges with both corners present can be drawn directly. If the
/// polygon sits on the zone boundary, its two outermost corners are
/// collected while fanning; the wedge between them and the map edge is
/// filled afterwards, as a triangle when both lie on the same boundary
/// edge, or as a quad through the enclosed map corner when they do not.
fn fill_polygon(image: &mut RgbaImage, mesh: &ZoneMesh, center: &Center, color: Rgba<u8>) {
    let bounds = &mesh.bounds;
    let mut edge_corner1: Option<usize> = None;
    let mut edge_corner2: Option<usize> = None;

    for &neighbor in &center.neighbors {
        let Some(ei) = mesh.edge_with_centers(center.index, neighbor) else {
            continue;
        };
        // The outermost voronoi segments aren't stored in the graph
        let (Some(v0), Some(v1)) = (mesh.edges[ei].v0, mesh.edges[ei].v1) else {
            continue;
        };

        // An edge with one exterior corner always has two; remember them for
        // the missing wedge below
        let exterior = if mesh.corners[v0].border { v0 } else { v1 };
        if mesh.corners[exterior].border {
            if edge_corner1.is_none() {
                edge_corner1 = Some(exterior);
            } else {
                edge_corner2 = Some(exterior);
            }
        }

        fill_triangle(
            image,
            center.position,
            mesh.corners[v0].position,
            mesh.corners[v1].position,
            color,
        );
    }

    let (Some(c1), Some(c2)) = (edge_corner1, edge_corner2) else {
        return;
    };
    let p1 = mesh.corners[c1].position;
    let p2 = mesh.corners[c2].position;

    if close_enough(p1.x, p2.x, 1.0) {
        // Both exterior corners share a vertical boundary edge
        fill_triangle(image, center.position, p1, p2, color);
    } else {
        // The wedge wraps around one of the four map corners
        let corner = DVec2::new(
            if close_enough(p1.x, bounds.x, 1.0) || close_enough(p2.x, bounds.x, 0.5) {
                bounds.x
            } else {
                bounds.right()
            },
            if close_enough(p1.y, bounds.y, 1.0) || close_enough(p2.y, bounds.y, 0.5) {
                bounds.y
            } else {
                bounds.bottom()
            },
        );
        fill_triangle(image, center.position, p1, corner, color);
        fill_triangle(image, center.position, corner, p2, color);
    }
}

/// Fill a triangle by testing every pixel center in its bounding box
///
/// The coverage test accepts either winding and includes points exactly on
/// an edge, so fan triangles sharing an edge leave no seams.
fn fill_triangle(image: &mut RgbaImage, a: DVec2, b: DVec2, c: DVec2, color: Rgba<u8>) {
    let (width, height) = image.dimensions();

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(width as i64 - 1);
    let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(height as i64 - 1);
    if max_x < 0 || max_y < 0 {
        return;
    }

    for y in min_y..=max_y as u32 {
        for x in min_x..=max_x as u32 {
            let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if point_in_triangle(p, a, b, c) {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Stroke a line segment with a round brush
fn stroke_segment(image: &mut RgbaImage, from: DVec2, to: DVec2, width: f64, color: Rgba<u8>) {
    let radius = (width / 2.0).max(0.5);
    let steps = (from.distance(to) * 2.0).ceil().max(1.0) as usize;

    for i in 0..=steps {
        let p = from.lerp(to, i as f64 / steps as f64);
        fill_disc(image, p, radius, color);
    }
}

fn fill_disc(image: &mut RgbaImage, at: DVec2, radius: f64, color: Rgba<u8>) {
    let (width, height) = image.dimensions();

    let min_x = (at.x - radius).floor().max(0.0) as u32;
    let min_y = (at.y - radius).floor().max(0.0) as u32;
    let max_x = ((at.x + radius).ceil() as i64).min(width as i64 - 1);
    let max_y = ((at.y + radius).ceil() as i64).min(height as i64 - 1);
    if max_x < 0 || max_y < 0 {
        return;
    }

    for y in min_y..=max_y as u32 {
        for x in min_x..=max_x as u32 {
            let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if p.distance(at) <= radius {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d0 = edge_function(a, b, p);
    let d1 = edge_function(b, c, p);
    let d2 = edge_function(c, a, p);

    let has_negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_negative && has_positive)
}

#[inline]
fn edge_function(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

#[inline]
fn rgba(color: u32) -> Rgba<u8> {
    Rgba([
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
        0xff,
    ])
}
