//! Patterns command: list what the registry knows.

use infill_pattern_core::Pattern;

/// Print every registered pattern identifier with its label.
pub fn cmd_patterns() {
    println!("Available patterns:");
    for pattern in Pattern::all() {
        println!("  {}  ({}, {})", pattern.id(), pattern.short_name(), pattern.label());
    }
}
