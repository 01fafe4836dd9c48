//! Gallery asset manifest.
//!
//! The asset source hands the engine a JSON list of items before startup:
//!
//! ```json
//! { "items": [
//!     { "source": "img/harbor-01.jpg", "project": "harbor", "width": 1600, "height": 1067 },
//!     { "source": "img/loom-03.png", "project": "loom", "width": 800, "height": 800 }
//! ] }
//! ```
//!
//! `width`/`height` are the decoded image size in pixels and default to a
//! square of the configured desired width when unknown.

use serde::{Deserialize, Serialize};

/// One source asset and the project it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManifestItem {
    pub source: String,
    pub project: String,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GalleryManifest {
    pub items: Vec<ManifestItem>,
}

impl GalleryManifest {
    /// Loads the manifest from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json(&file_content)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let manifest: GalleryManifest = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Distinct project tags in manifest order.
    pub fn projects(&self) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.items
            .iter()
            .map(|item| item.project.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }
}
