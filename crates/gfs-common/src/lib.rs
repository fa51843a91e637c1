//! Common types shared across the gfs-viewer workspace.

pub mod bounds;
pub mod error;
pub mod param;
pub mod run;
pub mod slice;

pub use bounds::GeoBounds;
pub use error::{ViewerError, ViewerResult};
pub use param::{Derivation, Palette, Parameter};
pub use run::{Cycle, RunId};
pub use slice::DataSlice;
