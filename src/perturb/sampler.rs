use crate::error::{PerturbError, Result};
use crate::perturb::config::{PerturbationConfig, PerturbationType, Range};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A sampled HSL color, rounded to whole units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SampledColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl SampledColor {
    /// Render the color as CSS declarations
    pub fn to_css(&self) -> IndexMap<String, String> {
        let mut css = IndexMap::new();
        css.insert(
            "background-color".to_string(),
            format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness),
        );
        css
    }
}

/// A fully resolved parameter assignment for one perturbation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SampledParameters {
    Color(SampledColor),
}

impl SampledParameters {
    /// Render the parameters as CSS declarations, in a stable order
    pub fn to_css(&self) -> IndexMap<String, String> {
        match self {
            Self::Color(color) => color.to_css(),
        }
    }
}

/// A concrete, renderable perturbation derived from a config and a seed.
///
/// Never cached: always recomputed as a pure function of (config, seed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConcreteSample {
    pub perturbation_type: PerturbationType,
    pub target_selector: String,
    pub parameters: SampledParameters,
}

impl ConcreteSample {
    /// Render the sample as a style attribute fragment,
    /// e.g. `background-color: hsl(210, 45%, 67%)`
    pub fn style_declarations(&self) -> String {
        self.parameters
            .to_css()
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Sample a concrete parameter assignment from a config.
///
/// All randomness comes from a generator seeded with `seed` and scoped to
/// this call; no process-wide random state is read or written. Sampled
/// values are rounded at sample time so rendering is byte-identical across
/// calls with the same inputs.
pub fn sample_concrete(config: &PerturbationConfig, seed: u64) -> Result<ConcreteSample> {
    let target_selector = config.target_selector().unwrap_or_default().to_string();

    match config.perturbation_type {
        PerturbationType::ColorChange => {
            let bounds = config.bounds.clone().unwrap_or_default().validated()?;

            let mut rng = StdRng::seed_from_u64(seed);
            let color = SampledColor {
                hue: sample_axis(&mut rng, bounds.hue),
                saturation: sample_axis(&mut rng, bounds.saturation),
                lightness: sample_axis(&mut rng, bounds.lightness),
            };

            Ok(ConcreteSample {
                perturbation_type: config.perturbation_type,
                target_selector,
                parameters: SampledParameters::Color(color),
            })
        }
        other => Err(PerturbError::UnsupportedPerturbation { perturbation: other.as_str().to_string() }),
    }
}

fn sample_axis(rng: &mut StdRng, range: Range) -> f64 {
    rng.gen_range(range.min..=range.max).round()
}
