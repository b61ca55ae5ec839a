use serde::{Deserialize, Serialize};

/// Image manifest for the game. Loaded from a JSON file at runtime,
/// or taken from `AssetManifest::default()` when the host supplies none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Every image the level can reference, in id order.
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

/// Describes a single image asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Name levels refer to (e.g., "platform").
    pub name: String,
    /// Path handed to the browser's image loader (e.g., "./imgs/platform.png").
    pub path: String,
}

impl ImageDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            images: vec![
                ImageDescriptor::new("platform", "./imgs/platform.png"),
                ImageDescriptor::new("background", "./imgs/background.png"),
                ImageDescriptor::new("hills", "./imgs/hills.png"),
            ],
        }
    }
}
