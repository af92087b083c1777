//! Biomes: catalog snapshot and the classification decision table
//!
//! Biome definitions (name, map color, room descriptions) come from outside
//! the generator. The catalog is loaded once, up front, and passed down as
//! an immutable snapshot; the selector itself is a pure function of a
//! polygon's classification fields.

use std::collections::HashMap;

use log::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mesh::{Center, ZoneMesh};

/// Index of a biome inside a [`BiomeCatalog`]
pub type BiomeId = usize;

/// An externally defined terrain classification
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biome {
    /// Display name, also the selector's lookup key
    pub name: String,
    /// 24-bit RGB map color, also the rasterizer's reverse-lookup key
    pub color: u32,
    /// Room description variants; rotated by location
    pub descriptions: Vec<String>,
}

impl Biome {
    pub fn new(name: impl Into<String>, color: u32) -> Self {
        Self {
            name: name.into(),
            color,
            descriptions: Vec::new(),
        }
    }

    pub fn with_descriptions(
        name: impl Into<String>,
        color: u32,
        descriptions: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            descriptions,
        }
    }

    /// Pick the description variant for a world location
    ///
    /// Variants rotate by `|x + y + z| mod len`, so neighboring cells of the
    /// same biome cycle through the available text.
    pub fn description_at(&self, x: i64, y: i64, z: i64) -> Option<&str> {
        if self.descriptions.is_empty() {
            return None;
        }
        let index = (x + y + z).unsigned_abs() as usize % self.descriptions.len();
        self.descriptions.get(index).map(String::as_str)
    }
}

/// An immutable snapshot of the available biomes
///
/// Built once before generation starts from whatever external source defines
/// the biomes, then shared read-only by the selector and the rasterizer.
#[derive(Debug, Clone)]
pub struct BiomeCatalog {
    biomes: Vec<Biome>,
    by_name: HashMap<String, BiomeId>,
    by_color: HashMap<u32, BiomeId>,
}

impl BiomeCatalog {
    /// Snapshot a list of biome records
    ///
    /// Later records win on duplicate names or colors.
    pub fn new(biomes: Vec<Biome>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_color = HashMap::new();
        for (id, biome) in biomes.iter().enumerate() {
            by_name.insert(biome.name.clone(), id);
            by_color.insert(biome.color, id);
        }
        Self {
            biomes,
            by_name,
            by_color,
        }
    }

    /// The default biome set shipped with the game, with its map colors
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Biome::new("Ocean", 0x444471),
            Biome::new("Lake", 0x336699),
            Biome::new("Beach", 0xa09077),
            Biome::new("Snow", 0xffffff),
            Biome::new("Tundra", 0xbbbbaa),
            Biome::new("Bare", 0x888888),
            Biome::new("Scorched", 0x555555),
            Biome::new("Taiga", 0x99aa77),
            Biome::new("Shrubland", 0x889977),
            Biome::new("Temperate Desert", 0xc9d29b),
            Biome::new("Temperate Rain Forest", 0x448855),
            Biome::new("Temperate Deciduous Forest", 0x679459),
            Biome::new("Grassland", 0x88aa55),
            Biome::new("Subtropical Desert", 0xd2b98b),
            Biome::new("Ice", 0x99ffff),
            Biome::new("Marsh", 0x2f6666),
            Biome::new("Tropical Rain Forest", 0x337755),
            Biome::new("Tropical Seasonal Forest", 0x559944),
            Biome::new("River", 0x225588),
        ])
    }

    #[inline]
    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<BiomeId> {
        self.by_name.get(name).copied()
    }

    pub fn find_by_color(&self, color: u32) -> Option<BiomeId> {
        self.by_color.get(&color).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.iter()
    }
}

/// Select the biome name for a polygon's classification
///
/// A pure decision table over (ocean, water, coast, elevation, moisture),
/// evaluated in fixed priority order. The returned name may or may not
/// exist in the catalog; resolution is the caller's concern.
pub fn select_biome(center: &Center) -> &'static str {
    if center.ocean {
        "Ocean"
    } else if center.water {
        if center.elevation < 0.1 {
            "Marsh"
        } else if center.elevation > 0.8 {
            "Ice"
        } else {
            "Lake"
        }
    } else if center.coast {
        "Beach"
    } else if center.elevation > 0.8 {
        if center.moisture > 0.50 {
            "Snow"
        } else if center.moisture > 0.33 {
            "Tundra"
        } else if center.moisture > 0.16 {
            "Bare"
        } else {
            "Scorched"
        }
    } else if center.elevation > 0.6 {
        if center.moisture > 0.66 {
            "Taiga"
        } else if center.moisture > 0.33 {
            "Shrubland"
        } else {
            "Temperate Desert"
        }
    } else if center.elevation > 0.3 {
        if center.moisture > 0.83 {
            "Temperate Rain Forest"
        } else if center.moisture > 0.50 {
            "Temperate Deciduous Forest"
        } else if center.moisture > 0.16 {
            "Grassland"
        } else {
            "Temperate Desert"
        }
    } else if center.moisture > 0.66 {
        "Tropical Rain Forest"
    } else if center.moisture > 0.33 {
        "Tropical Seasonal Forest"
    } else if center.moisture > 0.16 {
        "Grassland"
    } else {
        "Subtropical Desert"
    }
}

/// Resolve and store the biome of every polygon
///
/// A name missing from the catalog leaves the polygon's biome as `None`;
/// the rasterizer paints such polygons in a sentinel color and its row scan
/// falls back to Ocean, so the miss is cosmetic rather than fatal.
pub fn assign_biomes(mesh: &mut ZoneMesh, catalog: &BiomeCatalog) {
    info!("Assigning biomes...");

    for center in mesh.centers.iter_mut() {
        center.biome = catalog.find_by_name(select_biome(center));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn center_with(
        ocean: bool,
        water: bool,
        coast: bool,
        elevation: f64,
        moisture: f64,
    ) -> Center {
        let mut center = Center::new(0, DVec2::ZERO);
        center.ocean = ocean;
        center.water = water;
        center.coast = coast;
        center.elevation = elevation;
        center.moisture = moisture;
        center
    }

    #[test]
    fn test_selector_priority_order() {
        assert_eq!(select_biome(&center_with(true, true, false, 0.5, 0.5)), "Ocean");
        assert_eq!(select_biome(&center_with(false, true, false, 0.05, 0.5)), "Marsh");
        assert_eq!(select_biome(&center_with(false, true, false, 0.9, 0.5)), "Ice");
        assert_eq!(select_biome(&center_with(false, true, false, 0.5, 0.5)), "Lake");
        assert_eq!(select_biome(&center_with(false, false, true, 0.5, 0.5)), "Beach");
    }

    #[test]
    fn test_selector_high_elevation_band() {
        assert_eq!(select_biome(&center_with(false, false, false, 0.9, 0.6)), "Snow");
        assert_eq!(select_biome(&center_with(false, false, false, 0.9, 0.4)), "Tundra");
        assert_eq!(select_biome(&center_with(false, false, false, 0.9, 0.2)), "Bare");
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.9, 0.1)),
            "Scorched"
        );
    }

    #[test]
    fn test_selector_mid_and_low_bands() {
        assert_eq!(select_biome(&center_with(false, false, false, 0.7, 0.7)), "Taiga");
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.7, 0.5)),
            "Shrubland"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.7, 0.2)),
            "Temperate Desert"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.5, 0.9)),
            "Temperate Rain Forest"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.5, 0.6)),
            "Temperate Deciduous Forest"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.2, 0.7)),
            "Tropical Rain Forest"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.2, 0.4)),
            "Tropical Seasonal Forest"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.2, 0.2)),
            "Grassland"
        );
        assert_eq!(
            select_biome(&center_with(false, false, false, 0.2, 0.1)),
            "Subtropical Desert"
        );
    }

    #[test]
    fn test_selector_is_pure() {
        let center = center_with(false, false, false, 0.45, 0.45);
        let first = select_biome(&center);
        for _ in 0..10 {
            assert_eq!(select_biome(&center), first);
        }
    }

    #[test]
    fn test_default_catalog_complete() {
        let catalog = BiomeCatalog::default_catalog();
        assert_eq!(catalog.len(), 19);

        assert_eq!(
            catalog
                .find_by_name("Ocean")
                .and_then(|id| catalog.get(id))
                .map(|b| b.color),
            Some(0x444471)
        );
        assert_eq!(
            catalog
                .find_by_name("River")
                .and_then(|id| catalog.get(id))
                .map(|b| b.color),
            Some(0x225588)
        );
        assert!(catalog.find_by_name("Temperate Rain Forest").is_some());
    }

    #[test]
    fn test_catalog_lookup_by_color() {
        let catalog = BiomeCatalog::default_catalog();
        let id = catalog.find_by_color(0xa09077).unwrap();
        assert_eq!(catalog.get(id).unwrap().name, "Beach");
        assert!(catalog.find_by_color(0x123456).is_none());
    }

    #[test]
    fn test_description_rotation() {
        let biome = Biome::with_descriptions(
            "Grassland",
            0x88aa55,
            vec!["a".into(), "b".into(), "c".into()],
        );

        assert_eq!(biome.description_at(0, 0, 0), Some("a"));
        assert_eq!(biome.description_at(1, 0, 0), Some("b"));
        assert_eq!(biome.description_at(1, 1, 0), Some("c"));
        assert_eq!(biome.description_at(-4, 0, 0), Some("b"));

        let empty = Biome::new("Bare", 0x888888);
        assert_eq!(empty.description_at(5, 5, 0), None);
    }

    #[test]
    fn test_assign_biomes_with_sparse_catalog() {
        let mut mesh = ZoneMesh::new(crate::geom::Bounds::square(10.0));
        let mut land = Center::new(0, DVec2::new(5.0, 5.0));
        land.elevation = 0.9;
        land.moisture = 0.6;
        let mut ocean = Center::new(1, DVec2::new(1.0, 1.0));
        ocean.ocean = true;
        ocean.water = true;
        mesh.centers.push(land);
        mesh.centers.push(ocean);

        // Catalog without "Snow": the land polygon resolves to None
        let catalog = BiomeCatalog::new(vec![Biome::new("Ocean", 0x444471)]);
        assign_biomes(&mut mesh, &catalog);

        assert_eq!(mesh.centers[0].biome, None);
        assert_eq!(mesh.centers[1].biome, catalog.find_by_name("Ocean"));
    }
}
