//! Error types for zone generation

use std::fmt;

/// Errors that can occur during zone generation
#[derive(Debug, Clone)]
pub enum ZoneGenError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The biome catalog snapshot contains no biomes
    EmptyBiomeCatalog,
    /// The biome catalog has no "Ocean" entry, so rasterization has no fallback
    MissingOceanBiome,
    /// The row sink rejected a row of world cells
    Persistence(String),
}

impl fmt::Display for ZoneGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneGenError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            ZoneGenError::EmptyBiomeCatalog => write!(f, "biome catalog is empty"),
            ZoneGenError::MissingOceanBiome => {
                write!(f, "biome catalog has no \"Ocean\" fallback biome")
            }
            ZoneGenError::Persistence(msg) => write!(f, "row persistence failed: {}", msg),
        }
    }
}

impl std::error::Error for ZoneGenError {}

/// Result type alias for zone generation operations
pub type Result<T> = std::result::Result<T, ZoneGenError>;
