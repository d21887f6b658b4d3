//! Static constellation definitions and sky culture files.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ConstellationError;

/// Drawing weight of a line segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineWeight {
    Thin,
    #[default]
    Normal,
    Bold,
}

impl LineWeight {
    /// Alpha multiplier applied to the segment.
    pub fn alpha_scale(self) -> f32 {
        match self {
            LineWeight::Thin => 0.25,
            LineWeight::Normal => 1.0,
            LineWeight::Bold => 1.6,
        }
    }
}

/// A segment between two stars, by Hipparcos number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineDef {
    pub stars: [u32; 2],
    #[serde(default)]
    pub weight: LineWeight,
}

/// Pins a point of the illustration onto a star.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Texture coordinates in `[0, 1]`.
    pub uv: [f64; 2],
    pub hip: u32,
}

/// Illustration drawn over the constellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageDef {
    /// Image path, relative to the culture base path.
    pub path: String,
    pub anchors: [Anchor; 3],
}

/// Everything a sky culture says about one constellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstellationInfo {
    /// Catalog id, e.g. `CON western Ori`.
    pub id: String,
    /// IAU abbreviation, empty for non-IAU figures.
    #[serde(default)]
    pub iau: String,
    #[serde(default)]
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub image: Option<ImageDef>,
    /// Boundary edges as pairs of (ra, dec) in B1875.0, radians.
    #[serde(default)]
    pub edges: Vec<[[f64; 2]; 2]>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
}

impl ConstellationInfo {
    /// Minimal definition with only an id and IAU code.
    pub fn new(id: impl Into<String>, iau: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            iau: iau.into(),
            lines: Vec::new(),
            image: None,
            edges: Vec::new(),
            description: None,
            base_path: None,
        }
    }

    /// Full path of the illustration, if any.
    pub fn image_path(&self) -> Option<String> {
        let image = self.image.as_ref()?;
        Some(match &self.base_path {
            Some(base) => format!("{base}/{}", image.path),
            None => image.path.clone(),
        })
    }
}

/// A sky culture: localized names plus constellation definitions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SkyCulture {
    pub name: String,
    /// Localized label by constellation id.
    #[serde(default)]
    pub names: FxHashMap<String, String>,
    #[serde(default)]
    pub constellations: Vec<ConstellationInfo>,
}

impl SkyCulture {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConstellationError> {
        ron::from_str(contents).map_err(ConstellationError::ParseError)
    }

    /// Load a culture file. Constellations without a base path get the
    /// directory of the file.
    pub fn load(path: &Path) -> Result<Self, ConstellationError> {
        let contents = std::fs::read_to_string(path).map_err(ConstellationError::ReadError)?;
        let mut culture = Self::from_ron_str(&contents)?;
        if let Some(dir) = path.parent() {
            let dir = dir.to_string_lossy().into_owned();
            for info in &mut culture.constellations {
                info.base_path.get_or_insert_with(|| dir.clone());
            }
        }
        tracing::info!(
            "Loaded sky culture '{}' with {} constellations",
            culture.name,
            culture.constellations.len()
        );
        Ok(culture)
    }
}
