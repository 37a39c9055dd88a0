//! # Asset Catalog
//!
//! The core only needs to know whether an asset reference resolves; loading and
//! drawing belong to the front-end.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Reports which asset references can be resolved.
pub trait AssetCatalog {
    /// Returns true if the asset exists and can be used.
    fn contains(&self, asset: &str) -> bool;

    /// Returns `asset` if it resolves, `fallback` otherwise.
    fn resolve_or<'a>(&self, asset: Option<&'a str>, fallback: &'a str) -> &'a str {
        match asset {
            Some(name) if self.contains(name) => name,
            _ => fallback,
        }
    }
}

/// An explicit set of known assets.
#[derive(Debug, Clone, Default)]
pub struct AssetSet {
    known: HashSet<String>,
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: impl Into<String>) {
        self.known.insert(asset.into());
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AssetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            known: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetCatalog for AssetSet {
    fn contains(&self, asset: &str) -> bool {
        self.known.contains(asset)
    }
}

/// Resolves assets as files in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, asset: &str) -> PathBuf {
        self.root.join(asset)
    }
}

impl AssetCatalog for DirectoryCatalog {
    fn contains(&self, asset: &str) -> bool {
        !asset.is_empty() && self.path_of(asset).is_file()
    }
}
