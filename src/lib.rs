//! # scene-perturb
//!
//! Scene analysis and deterministic perturbation generation for captured web
//! page snapshots, built for robustness testing of UI-driving agents.
//!
//! The engine works in two stages:
//!
//! 1. **Scene analysis**: a rendered snapshot is walked into a flat,
//!    deduplicated catalogue of [`Element`] records with CSS selectors and
//!    interactivity flags, then partitioned into goal-relevant (interactive,
//!    task-critical) and background (decorative/structural) elements.
//! 2. **Perturbation**: each background element gets exactly one
//!    [`PerturbationConfig`]; concrete CSS values are sampled from a config
//!    deterministically, so the same config and seed always produce
//!    byte-identical output. Goal-relevant elements are never touched, so
//!    the underlying task stays completable.
//!
//! ## Analyzing a snapshot
//!
//! ```rust,no_run
//! use scene_perturb::{LaunchOptions, SceneAnalyzer, SnapshotSession};
//! use std::path::Path;
//!
//! # fn main() -> scene_perturb::Result<()> {
//! let session = SnapshotSession::launch(LaunchOptions::default())?;
//!
//! let analyzer = SceneAnalyzer::new();
//! let analysis = analyzer.analyze_scene(&session, Path::new("scene.mhtml"), "Click the button")?;
//!
//! println!(
//!     "{} elements, {} background",
//!     analysis.elements.len(),
//!     analysis.background_elements.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Generating a perturbed variant
//!
//! ```rust,no_run
//! use scene_perturb::{assemble, PerturbationProposer, SceneData};
//! # use scene_perturb::{LaunchOptions, SceneAnalyzer, SnapshotSession};
//! # use std::path::Path;
//!
//! # fn main() -> scene_perturb::Result<()> {
//! # let session = SnapshotSession::launch(LaunchOptions::default())?;
//! # let analyzer = SceneAnalyzer::new();
//! # let analysis = analyzer.analyze_scene(&session, Path::new("scene.mhtml"), "task")?;
//! let configs = PerturbationProposer::new().propose(&analysis);
//!
//! let samples = configs
//!     .iter()
//!     .map(|c| c.sample_concrete(42))
//!     .collect::<scene_perturb::Result<Vec<_>>>()?;
//!
//! let original = SceneData::from_analysis(&analysis)?;
//! let result = assemble(&original, &configs, &samples, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: snapshot rendering session (scoped Chrome instance)
//! - [`scene`]: element extraction, cataloguing and scene classification
//! - [`perturb`]: perturbation proposal, deterministic sampling, assembly
//! - [`scoring`]: pluggable scene quality scoring
//! - [`error`]: error types and result alias

pub mod browser;
pub mod error;
pub mod perturb;
pub mod scene;
pub mod scoring;

pub use browser::{LaunchOptions, SnapshotSession};
pub use error::{PerturbError, Result};
pub use perturb::{
    assemble, sample_concrete, ColorBounds, ConcreteSample, PerturbationConfig,
    PerturbationProposer, PerturbationResult, PerturbationType, Range, SampledColor,
    SampledParameters, SceneData,
};
pub use scene::{
    catalogue_elements, BoundingBox, ComponentType, Element, FunctionalComponent, Layout,
    PageSnapshot, RawNode, SceneAnalysis, SceneAnalyzer, Viewport,
};
pub use scoring::{PlaceholderScorer, SceneScorer, SceneScores, ScorerRegistry};
