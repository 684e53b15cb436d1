//! Pattern registry and infill generators.
//!
//! Patterns are looked up by the identifier the slicer sends with each
//! request. Each pattern has exactly one generator; building one is a
//! two-step resolve then construct, chained by [`make_infill_generator`].

mod hilbert;

pub use hilbert::{CurveSizing, Hilbert};

use crate::error::PatternError;
use crate::geometry::{Coord, Path, Paths};

/// Identifier prefix shared by every pattern this plugin registers.
const ID_PREFIX: &str = "PLUGIN::CuraEnginePattern@0.1.0::";

/// Available pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Hilbert,
}

/// Read-only lookup table: full identifier to pattern.
static REGISTRY: &[(&str, Pattern)] = &[("PLUGIN::CuraEnginePattern@0.1.0::HILBERT", Pattern::Hilbert)];

impl Pattern {
    /// Get all available patterns.
    pub fn all() -> &'static [Pattern] {
        &[Pattern::Hilbert]
    }

    /// Short name as advertised to the slicer.
    pub fn short_name(&self) -> &'static str {
        match self {
            Pattern::Hilbert => "HILBERT",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Pattern::Hilbert => "Hilbert Curve",
        }
    }

    /// Full registry identifier.
    pub fn id(&self) -> String {
        format!("{ID_PREFIX}{}", self.short_name())
    }

    /// Resolve a registry identifier. Matching is exact.
    pub fn from_id(name: &str) -> Result<Pattern, PatternError> {
        REGISTRY
            .iter()
            .find(|(id, _)| *id == name)
            .map(|&(_, pattern)| pattern)
            .ok_or_else(|| PatternError::UnknownPattern { name: name.to_string() })
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfillOutput {
    /// Open print-line paths.
    pub lines: Paths,
    /// Closed area paths. Line patterns leave this empty.
    pub polygons: Paths,
}

/// A constructed generator, one case per pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfillGenerator {
    Hilbert(Hilbert),
}

impl InfillGenerator {
    /// Build the generator for `pattern`.
    ///
    /// Fails with [`PatternError::NoGenerator`] for a pattern that has no
    /// constructor; today every pattern has one.
    pub fn new(pattern: Pattern, line_distance: Coord) -> Result<Self, PatternError> {
        match pattern {
            Pattern::Hilbert => Ok(InfillGenerator::Hilbert(Hilbert::new(line_distance))),
        }
    }

    pub fn pattern(&self) -> Pattern {
        match self {
            InfillGenerator::Hilbert(_) => Pattern::Hilbert,
        }
    }

    /// Fill `outlines` (outer contours plus holes, unlabeled).
    ///
    /// Consumes the generator. Failures are logged and give empty output.
    pub fn generate(self, outlines: &[Path]) -> InfillOutput {
        match self {
            InfillGenerator::Hilbert(generator) => generator.generate(outlines),
        }
    }

    /// Like [`generate`](Self::generate) but returns the failure.
    pub fn try_generate(self, outlines: &[Path]) -> crate::Result<InfillOutput> {
        match self {
            InfillGenerator::Hilbert(generator) => Ok(generator.try_generate(outlines)?),
        }
    }
}

/// Resolve `name` and build its generator.
pub fn make_infill_generator(name: &str, line_distance: Coord) -> Result<InfillGenerator, PatternError> {
    let pattern = Pattern::from_id(name)?;
    InfillGenerator::new(pattern, line_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const HILBERT_ID: &str = "PLUGIN::CuraEnginePattern@0.1.0::HILBERT";

    #[test]
    fn hilbert_id_resolves() {
        assert_eq!(Pattern::from_id(HILBERT_ID), Ok(Pattern::Hilbert));
        assert_eq!(Pattern::Hilbert.id(), HILBERT_ID);
    }

    #[test]
    fn every_pattern_round_trips_through_its_id() {
        for pattern in Pattern::all() {
            assert_eq!(Pattern::from_id(&pattern.id()), Ok(*pattern));
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        for name in ["", "HILBERT", "hilbert", "PLUGIN::CuraEnginePattern@0.1.0::hilbert", "GYROID"] {
            assert_eq!(
                Pattern::from_id(name),
                Err(PatternError::UnknownPattern { name: name.to_string() })
            );
        }
    }

    #[test]
    fn advertised_names() {
        assert_eq!(Pattern::Hilbert.short_name(), "HILBERT");
        assert_eq!(Pattern::Hilbert.label(), "Hilbert Curve");
    }

    #[test]
    fn make_generator_builds_hilbert() {
        let generator = make_infill_generator(HILBERT_ID, 250).unwrap();
        assert_eq!(generator.pattern(), Pattern::Hilbert);
        assert_eq!(generator, InfillGenerator::Hilbert(Hilbert::new(250)));
        match generator {
            InfillGenerator::Hilbert(h) => assert_eq!(h.line_distance(), 250),
        }
    }

    #[test]
    fn make_generator_reports_unknown_name() {
        let err = make_infill_generator("FOO", 250).unwrap_err();
        assert_eq!(err.to_string(), "Pattern: FOO is unknown");
    }

    #[test]
    fn generate_and_try_generate_agree() {
        let square = vec![vec![
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(1000, 1000),
            Point::new(0, 1000),
        ]];
        let generator = make_infill_generator(HILBERT_ID, 250).unwrap();
        let soft = generator.clone().generate(&square);
        let strict = generator.try_generate(&square).unwrap();
        assert_eq!(soft, strict);
        assert!(!soft.lines.is_empty());
    }

    #[test]
    fn try_generate_surfaces_failures() {
        let generator = make_infill_generator(HILBERT_ID, 250).unwrap();
        assert!(generator.try_generate(&[]).is_err());
    }
}
