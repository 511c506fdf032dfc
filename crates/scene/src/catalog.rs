use cakestand_common::{CakeId, Rgba};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One row of the cake table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakeSpec {
    pub id: CakeId,
    pub name: String,
    pub position: [f32; 3],
    /// Fallback colour, used when the image cannot be loaded.
    #[serde(with = "hex_color")]
    pub color: Rgba,
    /// Image path, relative to the assets directory.
    pub image: PathBuf,
}

/// Errors from loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("catalog has no cakes")]
    Empty,
    #[error("duplicate cake id {0}")]
    DuplicateId(CakeId),
}

/// The table of cakes a scene is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub cakes: Vec<CakeSpec>,
}

impl Catalog {
    /// The four cakes shown when no catalog file is given.
    pub fn builtin() -> Self {
        let row = |id, name: &str, position, color, image: &str| CakeSpec {
            id: CakeId(id),
            name: name.to_string(),
            position,
            color,
            image: PathBuf::from(image),
        };
        Self {
            cakes: vec![
                row(
                    1,
                    "Chocolate Cake",
                    [2.0, 0.0, 0.0],
                    Rgba::from_rgb8(0x8B, 0x45, 0x13),
                    "PinkBunny.png",
                ),
                row(
                    2,
                    "Vanilla Cake",
                    [-2.0, 0.0, 0.0],
                    Rgba::from_rgb8(0xF3, 0xE5, 0xAB),
                    "Barcelona.png",
                ),
                row(
                    3,
                    "Strawberry Cake",
                    [0.0, 0.0, 2.0],
                    Rgba::from_rgb8(0xFF, 0xC0, 0xCB),
                    "WinniePooh.png",
                ),
                row(
                    4,
                    "Lemon Cake",
                    [0.0, 0.0, -2.0],
                    Rgba::from_rgb8(0xFF, 0xFA, 0xCD),
                    "Principito.png",
                ),
            ],
        }
    }

    /// Parse and validate a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml_str(&text)?;
        tracing::debug!(
            "loaded {} cakes from {}",
            catalog.cakes.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Serialize to YAML (the format `load` reads).
    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that the table is non-empty and ids are unique.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.cakes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = BTreeSet::new();
        for spec in &self.cakes {
            if !seen.insert(spec.id) {
                return Err(CatalogError::DuplicateId(spec.id));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cakes.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Colours are written as `#RRGGBB` strings in catalog files.
mod hex_color {
    use cakestand_common::Rgba;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgba::from_hex(&text).map_err(D::Error::custom)
    }
}
