//! # infill-pattern-core
//!
//! Integer geometry, clipping and infill pattern generation for a slicer.
//!
//! The flow for one request:
//!
//! ```text
//! pattern id ──► Pattern::from_id ──► InfillGenerator::new ──► generate(outlines)
//!                                                                   │
//!                      bounding box ─► curve walk ─► clip ◄─────────┘
//! ```
//!
//! ## Rust Lesson #4: Re-exports
//!
//! `pub use foo::Bar;` makes `Bar` reachable as `infill_pattern_core::Bar`
//! while it still lives in `foo.rs`. Callers get a flat API and the files
//! stay organised by concern.

pub mod clip;
pub mod error;
pub mod geometry;
pub mod patterns;
pub mod region;
pub mod settings;

// Re-export common types at crate root for convenience.
pub use clip::clip;
pub use error::{Error, GenerateError, GeometryError, PatternError, Result, SettingsError};
pub use geometry::{bounding_box, BoundingBox, Coord, Path, PathKind, Paths, Point};
pub use patterns::{make_infill_generator, CurveSizing, Hilbert, InfillGenerator, InfillOutput, Pattern};
pub use region::{inside, inside_any, locate, locate_even_odd, nest_rings, signed_area2, PointLocation, Region};
pub use settings::{InfillSettings, LINE_DISTANCE_KEY};
