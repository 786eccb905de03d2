//! Filesystem capability abstraction for sitegen.
//!
//! This crate provides a [`FileSystem`] trait covering the handful of
//! operations the site pipeline performs against disk. Depending on the
//! trait rather than on `std::fs` directly enables:
//!
//! - **Unit testing** of scanning, index synthesis and output materialization
//!   without touching the real filesystem
//! - **Clean separation** between pipeline logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`FileSystem`] trait with `stat()`, `read_dir()`, `read()`, `write()`,
//!   `remove_file()` and `create_dir_all()`
//! - [`OsFileSystem`] backed by `std::fs`
//! - [`MemoryFileSystem`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sitegen_storage::{FileSystem, OsFileSystem};
//!
//! let fs = OsFileSystem;
//! for child in fs.read_dir(Path::new("content"))? {
//!     println!("{}", child.display());
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::OsFileSystem;
#[cfg(feature = "mock")]
pub use mock::MemoryFileSystem;
pub use storage::{FileKind, FileSystem, StorageError, StorageErrorKind};
