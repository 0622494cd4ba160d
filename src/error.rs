use thiserror::Error;

/// Errors that can occur during scene analysis and perturbation
#[derive(Debug, Error)]
pub enum PerturbError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to load or render a page snapshot; fatal for the scene
    #[error("Failed to load snapshot '{path}': {reason}")]
    SnapshotLoadFailed { path: String, reason: String },

    /// Failed to collect element records from the rendered page
    #[error("Failed to extract elements: {0}")]
    ExtractionFailed(String),

    /// A perturbation config requested sampling for a type with no sampler
    #[error("No sampler for perturbation type '{perturbation}'")]
    UnsupportedPerturbation { perturbation: String },

    /// A sampling range has its lower bound above its upper bound
    #[error("Invalid {axis} bounds: min {min} > max {max}")]
    InvalidBounds { axis: String, min: f64, max: f64 },

    /// A scorer produced a value outside [0, 1]
    #[error("Score '{name}' out of range: {value}")]
    InvalidScore { name: String, value: f64 },

    /// Paired inputs disagree on length; contract violation
    #[error("Count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    /// A sample targets a selector that matches no element record
    #[error("No element record for target selector '{selector}'")]
    TargetNotFound { selector: String },

    /// Failed to serialize scene data
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Result type alias for scene-perturb operations
pub type Result<T> = std::result::Result<T, PerturbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PerturbError::SnapshotLoadFailed {
            path: "scene.mhtml".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load snapshot 'scene.mhtml': timeout"
        );

        let err = PerturbError::InvalidBounds {
            axis: "hue".to_string(),
            min: 300.0,
            max: 100.0,
        };
        assert!(err.to_string().contains("hue"));
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_count_mismatch_display() {
        let err = PerturbError::CountMismatch { expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "Count mismatch: expected 3, got 2");
    }
}
