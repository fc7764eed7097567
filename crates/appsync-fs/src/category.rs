//! The three synchronized object categories and their layout constants.
//!
//! Directory name, snapshot key, and archive manifest stem are the same
//! literal per category; keeping them behind one enum removes the
//! stringly-typed coupling the sync code would otherwise accumulate.

use std::path::Path;

/// Suffix of metadata sidecar files co-located with an object's primary file.
pub const SIDECAR_SUFFIX: &str = ".meta.json";

/// An object category synchronized with the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raw content items uploaded as byte streams with sidecar metadata.
    DataItems,
    /// Source items uploaded as JSON documents embedding base64 source.
    DataSourceItems,
    /// Data objects, same wire shape as source items.
    DataObjects,
}

impl Category {
    /// All categories, in the order they appear in the persisted snapshot.
    pub const ALL: [Category; 3] = [
        Category::DataItems,
        Category::DataSourceItems,
        Category::DataObjects,
    ];

    /// Directory name under the work root; also the snapshot key.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::DataItems => "data-items",
            Self::DataSourceItems => "data-source-items",
            Self::DataObjects => "data-objects",
        }
    }

    /// Name of this category's manifest entry inside a downloaded archive.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            Self::DataItems => "data-items.json",
            Self::DataSourceItems => "data-source-items.json",
            Self::DataObjects => "data-objects.json",
        }
    }

    /// Source-file suffix stripped when deriving an object's remote name.
    ///
    /// `None` for data items, whose remote name is the full relative path.
    pub fn source_suffix(&self) -> Option<&'static str> {
        match self {
            Self::DataItems => None,
            Self::DataSourceItems | Self::DataObjects => Some(".py"),
        }
    }

    /// Derive the remote object name for a file in this category.
    pub fn remote_name<'a>(&self, path: &'a str) -> &'a str {
        match self.source_suffix() {
            Some(suffix) => path.strip_suffix(suffix).unwrap_or(path),
            None => path,
        }
    }

    /// Path of the metadata sidecar accompanying `path`.
    ///
    /// Data items keep the full file name as the sidecar stem (`x` →
    /// `x.meta.json`); source categories drop their suffix first (`foo.py` →
    /// `foo.meta.json`).
    pub fn sidecar_path(&self, path: &str) -> String {
        format!("{}{}", self.remote_name(path), SIDECAR_SUFFIX)
    }

    /// Map a sidecar path back to its owning primary file.
    ///
    /// Returns `None` if `path` is not a sidecar.
    pub fn primary_for_sidecar(&self, path: &str) -> Option<String> {
        let stem = path.strip_suffix(SIDECAR_SUFFIX)?;
        Some(format!("{}{}", stem, self.source_suffix().unwrap_or("")))
    }
}

/// Whether a relative path names a metadata sidecar file.
pub fn is_sidecar(path: &str) -> bool {
    path.ends_with(SIDECAR_SUFFIX)
}

impl AsRef<Path> for Category {
    fn as_ref(&self) -> &Path {
        Path::new(self.dir_name())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
