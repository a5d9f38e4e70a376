#![warn(clippy::all)]

mod coord;
mod engines;
mod error;
pub mod formats;
pub mod geometry;
mod pattern;
mod rule;
mod traits;

pub use coord::Coord;
pub use engines::{CellOrigin, QuickLifeEngine, SparseEngine};
pub use error::{FormatError, RuleError};
pub use formats::PatternFormat;
pub use pattern::Pattern;
pub use rule::{Rule, RuleFormat, NAMED_RULES};
pub use traits::LifeEngine;

/// Sparse cell storage shared by engines, patterns and codecs.
///
/// A missing key and a zero value both mean a dead cell.
pub type CellMap = ahash::AHashMap<Coord, u8>;

pub type DefaultEngine = SparseEngine;

pub const VERSION: &str = "0.1.0";
