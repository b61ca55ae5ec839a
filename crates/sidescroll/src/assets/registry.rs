use std::collections::HashMap;

use crate::api::types::ImageId;
use crate::assets::manifest::AssetManifest;

/// Registry of named images, built from an AssetManifest.
/// Ids are manifest positions, so they stay stable for a given manifest.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    by_name: HashMap<String, ImageId>,
    paths: Vec<String>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest.
    /// A repeated name keeps its first id.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut by_name = HashMap::with_capacity(manifest.images.len());
        let mut paths = Vec::with_capacity(manifest.images.len());
        for (idx, desc) in manifest.images.iter().enumerate() {
            by_name.entry(desc.name.clone()).or_insert(ImageId(idx as u32));
            paths.push(desc.path.clone());
        }
        Self { by_name, paths }
    }

    /// Look up an image by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<ImageId> {
        self.by_name.get(name).copied()
    }

    /// All (id, path) pairs in id order, for the host to start loading.
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &str)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(idx, path)| (ImageId(idx as u32), path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
