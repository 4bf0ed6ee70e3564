use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use parking_lot::RwLock;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::models::TerrainData;

/// Loads terrain reference data (`terrains/<name>.json`) and caches it for reuse.
#[derive(Clone)]
pub struct TerrainCatalog {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    root_path: PathBuf,
    cache: HashMap<String, Arc<TerrainData>>,
}

impl TerrainCatalog {
    /// Build a catalog rooted at the resources directory.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                root_path: root_path.into(),
                cache: HashMap::new(),
            })),
        }
    }

    /// Terrain data by name (case-insensitive), loading it on first use.
    pub fn terrain(&self, name: &str) -> Result<Arc<TerrainData>> {
        let key = name.trim().to_lowercase();
        if let Some(terrain) = self.inner.read().cache.get(&key) {
            return Ok(Arc::clone(terrain));
        }

        let mut inner = self.inner.write();
        if let Some(terrain) = inner.cache.get(&key) {
            return Ok(Arc::clone(terrain));
        }
        let path = terrain_dir(&inner.root_path).join(format!("{key}.json"));
        if !path.is_file() {
            return Err(anyhow!("no terrain data for {name} at {}", path.display()));
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let terrain: TerrainData = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!(
            terrain = %terrain.name,
            airfields = terrain.airfields.len(),
            beacons = terrain.beacons.len(),
            "Terrain loaded"
        );

        let terrain = Arc::new(terrain);
        inner.cache.insert(key, Arc::clone(&terrain));
        Ok(terrain)
    }

    /// Names of all terrain files beneath the resources directory, sorted.
    pub fn available(&self) -> Result<Vec<String>> {
        let dir = terrain_dir(&self.inner.read().root_path);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable terrain entry: {err}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("json")
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn terrain_dir(root: &Path) -> PathBuf {
    root.join("terrains")
}
