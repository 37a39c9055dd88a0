//! # Texture Cache
//!
//! Loads images from the asset directory on demand and keeps them for reuse.

use crate::generation::{AssetCatalog, DirectoryCatalog};
use log::{debug, warn};
use macroquad::prelude::*;
use std::collections::{HashMap, HashSet};

/// Textures keyed by asset reference.
pub struct TextureCache {
    catalog: DirectoryCatalog,
    textures: HashMap<String, Texture2D>,
    /// References that failed once and are not retried
    missing: HashSet<String>,
}

impl TextureCache {
    pub fn new(catalog: DirectoryCatalog) -> Self {
        Self {
            catalog,
            textures: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Loads an asset unless it is cached or known to be missing.
    pub async fn ensure(&mut self, asset: &str) {
        if self.textures.contains_key(asset) || self.missing.contains(asset) {
            return;
        }
        if !self.catalog.contains(asset) {
            debug!("Texture {} not in asset directory", asset);
            self.missing.insert(asset.to_string());
            return;
        }

        let path = self.catalog.path_of(asset);
        match load_texture(&path.to_string_lossy()).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                self.textures.insert(asset.to_string(), texture);
            }
            Err(e) => {
                warn!("Failed to load texture {}: {}", asset, e);
                self.missing.insert(asset.to_string());
            }
        }
    }

    pub async fn ensure_all<'a>(&mut self, assets: impl IntoIterator<Item = &'a str>) {
        for asset in assets {
            self.ensure(asset).await;
        }
    }

    pub fn get(&self, asset: &str) -> Option<&Texture2D> {
        self.textures.get(asset)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
