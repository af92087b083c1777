//! The Center/Corner/Edge dual-graph arena
//!
//! Centers, corners and edges reference each other cyclically, so the mesh
//! stores them in flat `Vec` arenas and every cross-reference is a `usize`
//! index into the owning arena. Topology is fixed once the graph builder
//! finishes; the later pipeline stages only mutate the scalar classification
//! fields.

use glam::DVec2;

use crate::biome::BiomeId;
use crate::geom::Bounds;

/// A Voronoi polygon keyed by one generator site; one coarse region of the zone
#[derive(Debug, Clone)]
pub struct Center {
    /// Index in the centers arena
    pub index: usize,
    /// Site location (the relaxed generator point)
    pub position: DVec2,

    /// True if any of this polygon's corners lies on the zone perimeter
    pub border: bool,
    /// True for ocean and lakes alike
    pub water: bool,
    /// Water connected to the zone perimeter
    pub ocean: bool,
    /// Land polygon with at least one ocean neighbor
    pub coast: bool,

    /// Mean elevation of the touching corners, in [0, 1]
    pub elevation: f64,
    /// Mean moisture of the touching corners, in [0, 1]
    pub moisture: f64,
    /// Catalog id of the selected biome; `None` until assignment, or when the
    /// catalog has no entry for the selected name
    pub biome: Option<BiomeId>,

    /// Neighboring centers (share an edge)
    pub neighbors: Vec<usize>,
    /// Edges bordering this polygon
    pub borders: Vec<usize>,
    /// Corners of this polygon
    pub corners: Vec<usize>,
}

impl Center {
    pub(crate) fn new(index: usize, position: DVec2) -> Self {
        Self {
            index,
            position,
            border: false,
            water: false,
            ocean: false,
            coast: false,
            elevation: 0.0,
            moisture: 0.0,
            biome: None,
            neighbors: Vec::new(),
            borders: Vec::new(),
            corners: Vec::new(),
        }
    }
}

/// A Voronoi vertex shared by three or more polygons
#[derive(Debug, Clone)]
pub struct Corner {
    /// Index in the corners arena
    pub index: usize,
    pub position: DVec2,

    /// True if the corner lies on the zone perimeter
    pub border: bool,
    pub water: bool,
    pub ocean: bool,
    pub coast: bool,

    /// Distance-from-border elevation; `f64::MAX` until resolved, then >= 0
    pub elevation: f64,
    /// Moisture in [0, 1] after redistribution
    pub moisture: f64,
    /// River flow count; 0 means no river touches this corner
    pub river: u32,
    /// Index of the adjacent corner with the lowest elevation; refers to
    /// itself at a local minimum
    pub downslope: usize,

    /// Adjacent corners (connected by an edge)
    pub adjacent: Vec<usize>,
    /// Edges protruding from this corner
    pub protrudes: Vec<usize>,
    /// Centers whose polygons meet at this corner
    pub touches: Vec<usize>,
}

impl Corner {
    pub(crate) fn new(index: usize, position: DVec2, border: bool) -> Self {
        Self {
            index,
            position,
            border,
            water: false,
            ocean: false,
            coast: false,
            elevation: f64::MAX,
            moisture: 0.0,
            river: 0,
            downslope: index,
            adjacent: Vec::new(),
            protrudes: Vec::new(),
            touches: Vec::new(),
        }
    }
}

/// One Voronoi edge segment, dual to one Delaunay edge
#[derive(Debug, Clone)]
pub struct Edge {
    /// Index in the edges arena
    pub index: usize,

    /// Center on one side of the Delaunay edge
    pub d0: Option<usize>,
    /// Center on the other side
    pub d1: Option<usize>,
    /// Corner at one end of the Voronoi segment; `None` at the open boundary
    pub v0: Option<usize>,
    /// Corner at the other end
    pub v1: Option<usize>,

    /// River flow along this edge
    pub river: u32,
    /// Midpoint of the Voronoi segment; set whenever both corners exist
    pub midpoint: Option<DVec2>,
}

impl Edge {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            d0: None,
            d1: None,
            v0: None,
            v1: None,
            river: 0,
            midpoint: None,
        }
    }
}

/// The complete dual mesh of a zone
///
/// All cross-references between entities are indices into these arenas.
#[derive(Debug, Clone)]
pub struct ZoneMesh {
    pub bounds: Bounds,
    pub centers: Vec<Center>,
    pub corners: Vec<Corner>,
    pub edges: Vec<Edge>,
}

impl ZoneMesh {
    pub(crate) fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            centers: Vec::new(),
            corners: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Ids of the corners that take part in elevation and moisture
    /// redistribution: everything that is neither ocean nor coast
    /// (inland lakes included).
    pub fn land_corner_ids(&self) -> Vec<usize> {
        self.corners
            .iter()
            .filter(|c| !c.ocean && !c.coast)
            .map(|c| c.index)
            .collect()
    }

    /// The edge separating two centers, if they are neighbors
    pub fn edge_with_centers(&self, c0: usize, c1: usize) -> Option<usize> {
        self.centers.get(c0)?.borders.iter().copied().find(|&ei| {
            let edge = &self.edges[ei];
            edge.d0 == Some(c1) || edge.d1 == Some(c1)
        })
    }

    /// The edge connecting two corners, if they are adjacent
    pub fn edge_between_corners(&self, q0: usize, q1: usize) -> Option<usize> {
        self.corners.get(q0)?.protrudes.iter().copied().find(|&ei| {
            let edge = &self.edges[ei];
            edge.v0 == Some(q1) || edge.v1 == Some(q1)
        })
    }
}
