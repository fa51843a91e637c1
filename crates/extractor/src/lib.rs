//! Slice extraction: step validation, coordinate windowing and unit
//! derivation, producing the 2D slice the renderer draws.

pub mod extract;
pub mod window;

pub use extract::extract_slice;
pub use window::coord_window;
