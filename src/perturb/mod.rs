//! Perturbation engine module
//!
//! Proposes perturbation configurations for background elements and derives
//! concrete, renderable samples from them:
//! - PerturbationConfig / PerturbationType: perturbable parameter spaces
//! - PerturbationProposer: one config per background element
//! - sample_concrete / ConcreteSample: seed-deterministic sampling
//! - assemble / PerturbationResult: perturbed scene assembly

pub mod assembler;
pub mod config;
pub mod proposer;
pub mod sampler;

pub use assembler::{assemble, PerturbationResult, SceneData};
pub use config::{ColorBounds, PerturbationConfig, PerturbationType, Range};
pub use proposer::PerturbationProposer;
pub use sampler::{sample_concrete, ConcreteSample, SampledColor, SampledParameters};
