use crate::perturb::config::{ColorBounds, PerturbationConfig};
use crate::scene::data::SceneAnalysis;

/// Maps background elements to perturbation configurations.
///
/// Proposes exactly one config per background element, in catalogue order.
/// Goal-relevant elements are never targeted, so the task stays completable
/// under any sampled perturbation.
#[derive(Debug, Clone, Default)]
pub struct PerturbationProposer {
    /// Sampling region handed to every proposed color config
    bounds: ColorBounds,
}

impl PerturbationProposer {
    /// Create a proposer with the default color bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a proposer with custom color bounds
    pub fn with_bounds(bounds: ColorBounds) -> Self {
        Self { bounds }
    }

    /// Propose one color perturbation per background element
    pub fn propose(&self, analysis: &SceneAnalysis) -> Vec<PerturbationConfig> {
        let configs: Vec<PerturbationConfig> = analysis
            .background_elements
            .iter()
            .map(|element| PerturbationConfig::color_change(element.selector.clone(), self.bounds.clone()))
            .collect();

        log::info!(
            "Proposed {} perturbation configs for scene {}",
            configs.len(),
            analysis.scene_id
        );

        configs
    }
}
