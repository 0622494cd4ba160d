//! Pluggable scene quality scoring.
//!
//! The engine does not compute plausibility or solvability itself; a scorer
//! is injected and resolved by name at configuration time. The default
//! placeholder returns fixed values that are NOT real measurements.

use crate::error::{PerturbError, Result};
use crate::scene::data::SceneAnalysis;
use std::collections::HashMap;

/// Quality scores for a scene, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneScores {
    pub plausibility: f64,
    pub solvability: f64,
}

impl SceneScores {
    /// Create scores, rejecting values outside [0, 1]
    pub fn new(plausibility: f64, solvability: f64) -> Result<Self> {
        for (name, value) in [("plausibility", plausibility), ("solvability", solvability)] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(PerturbError::InvalidScore { name: name.to_string(), value });
            }
        }
        Ok(Self { plausibility, solvability })
    }
}

/// Computes quality scores for an analyzed scene
pub trait SceneScorer {
    fn score(&self, scene: &SceneAnalysis) -> Result<SceneScores>;
}

/// Stand-in scorer used when no real scorer is wired.
///
/// Returns fixed placeholder values; callers must not treat them as
/// measurements.
#[derive(Debug, Default)]
pub struct PlaceholderScorer;

impl PlaceholderScorer {
    pub const PLAUSIBILITY: f64 = 0.8;
    pub const SOLVABILITY: f64 = 0.7;
}

impl SceneScorer for PlaceholderScorer {
    fn score(&self, _scene: &SceneAnalysis) -> Result<SceneScores> {
        SceneScores::new(Self::PLAUSIBILITY, Self::SOLVABILITY)
    }
}

/// Registry of named scorers, resolved at configuration time
#[derive(Default)]
pub struct ScorerRegistry {
    scorers: HashMap<String, Box<dyn SceneScorer>>,
}

impl ScorerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the placeholder scorer registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("placeholder", Box::new(PlaceholderScorer));
        registry
    }

    /// Register a scorer under a name, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, scorer: Box<dyn SceneScorer>) {
        self.scorers.insert(name.into(), scorer);
    }

    /// Resolve a scorer by name
    pub fn get(&self, name: &str) -> Option<&dyn SceneScorer> {
        self.scorers.get(name).map(|scorer| scorer.as_ref())
    }

    /// Registered scorer names
    pub fn names(&self) -> Vec<&str> {
        self.scorers.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::data::Layout;

    fn empty_scene() -> SceneAnalysis {
        SceneAnalysis {
            scene_id: "empty".to_string(),
            elements: Vec::new(),
            layout: Layout::default(),
            goal_relevant_elements: Vec::new(),
            background_elements: Vec::new(),
            functional_components: Vec::new(),
            plausibility_score: 0.0,
            solvability_score: 0.0,
        }
    }

    #[test]
    fn test_scores_validate_range() {
        assert!(SceneScores::new(0.0, 1.0).is_ok());
        assert!(SceneScores::new(0.5, 0.5).is_ok());

        assert!(matches!(
            SceneScores::new(1.2, 0.5),
            Err(PerturbError::InvalidScore { .. })
        ));
        assert!(matches!(
            SceneScores::new(0.5, -0.1),
            Err(PerturbError::InvalidScore { .. })
        ));
        assert!(SceneScores::new(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_placeholder_scorer() {
        let scores = PlaceholderScorer.score(&empty_scene()).unwrap();
        assert_eq!(scores.plausibility, 0.8);
        assert_eq!(scores.solvability, 0.7);
    }

    #[test]
    fn test_registry_resolution() {
        let registry = ScorerRegistry::with_defaults();

        assert!(registry.get("placeholder").is_some());
        assert!(registry.get("learned").is_none());

        let scores = registry.get("placeholder").unwrap().score(&empty_scene()).unwrap();
        assert_eq!(scores.plausibility, PlaceholderScorer::PLAUSIBILITY);
    }

    #[test]
    fn test_registry_register_custom() {
        struct FixedScorer;
        impl SceneScorer for FixedScorer {
            fn score(&self, _scene: &SceneAnalysis) -> Result<SceneScores> {
                SceneScores::new(1.0, 0.0)
            }
        }

        let mut registry = ScorerRegistry::with_defaults();
        registry.register("fixed", Box::new(FixedScorer));

        let scores = registry.get("fixed").unwrap().score(&empty_scene()).unwrap();
        assert_eq!(scores.plausibility, 1.0);
        assert_eq!(scores.solvability, 0.0);
    }
}
