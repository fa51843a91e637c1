//! Shared test utilities for the gfs-viewer workspace.
//!
//! Provides a counting fake `GridSource` (the fetch-count probe used by
//! the cache and pipeline tests) and synthetic field generators.
//!
//! Add as a path dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod generators;
pub mod source;

pub use generators::*;
pub use source::FakeGridSource;
