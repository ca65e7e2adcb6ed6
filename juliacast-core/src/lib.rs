//! Feasibility oracle for rigorous Julia set interior detection.
//!
//! For a polynomial map `p(z) = z^d + A·z + c` this crate predicts the
//! smallest grid refinement level at which the cell-mapping/interval
//! arithmetic algorithm of Figueiredo, Nehab, Stolfi and Oliveira ("Images
//! of Julia sets that you can trust") would classify at least one cell
//! around a bounded attracting cycle as interior — so that the expensive
//! high-resolution computation need not be started blindly.

pub mod arena;
pub mod complex;
pub mod config;
pub mod context;
pub mod critical;
pub mod driver;
pub mod error;
pub mod grid;
pub mod map;
pub mod orbit;
pub mod polynomial;
pub mod propagator;
pub mod rect;

// Re-export primary types for convenience.
pub use arena::WordArena;
pub use complex::{Complex, ZERO_EPS};
pub use config::RunConfig;
pub use context::Context;
pub use driver::{analyze, Analysis};
pub use error::CoreError;
pub use grid::{CellMark, LocalGrid};
pub use map::MapKind;
pub use orbit::{PeriodicPoint, Root};
pub use polynomial::Polynomial;
pub use rect::{Frame, PlaneRect, ScreenRect};

/// Iteration budget shared by the Newton driver and the forward-orbit
/// classifier.
pub const MAX_ITERATIONS: usize = 25_000;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
