//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `generate` - Answer an infill request with a JSON response
//! - `preview` - Render a request's outlines and infill to SVG
//! - `patterns` - List available patterns

pub mod common;
pub mod generate;
pub mod patterns;
pub mod preview;
pub mod wire;

pub use generate::cmd_generate;
pub use patterns::cmd_patterns;
pub use preview::cmd_preview;
