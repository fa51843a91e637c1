//! Dataset accessor for the NOMADS GrADS Data Server (OPeNDAP).
//!
//! The GDS serves each GFS run as an OPeNDAP dataset with a text metadata
//! endpoint (`.dds`) and an ASCII hyperslab endpoint (`.ascii?var[...]`).
//! This crate resolves run identifiers to dataset URLs, parses both text
//! formats, and caches opened grids per run for the process lifetime.

pub mod ascii;
pub mod client;
pub mod dds;
pub mod source;
pub mod store;

pub use client::{DodsClient, DEFAULT_BASE_URL};
pub use source::{GridInfo, GridSource};
pub use store::GfsStore;

/// GDS marks undefined grid points with 9.999e20; anything at or above
/// this threshold is mapped to NaN at the protocol boundary.
pub const MISSING_THRESHOLD: f32 = 9.0e19;
