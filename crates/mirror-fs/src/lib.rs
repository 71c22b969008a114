//! Filesystem access layer for Directory Mirror
//!
//! Provides the [`Filesystem`] seam the synchronization engine drives, a
//! [`LocalFs`] implementation over `std::fs`, root path resolution, content
//! checksums and format-agnostic configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{DirListing, FileStat, Filesystem, LocalFs};
pub use path::{absolute_path, resolve_root};
