//! Filesystem layer for the appsync engine
//!
//! Provides the category layout constants, content checksums, ignore-rule
//! filtering, recursive file listing, and safe I/O used by the sync core.

pub mod category;
pub mod checksum;
pub mod error;
pub mod ignore;
pub mod io;
pub mod lister;

pub use category::{Category, SIDECAR_SUFFIX, is_sidecar};
pub use checksum::{checksum_bytes, checksum_file};
pub use error::{Error, Result};
pub use ignore::{IGNORE_FILE, IgnoreFilter};
pub use lister::{list_files, list_files_filtered};
