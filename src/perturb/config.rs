use crate::error::{PerturbError, Result};
use crate::perturb::sampler::{self, ConcreteSample};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kinds of perturbations that can be applied to a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationType {
    ColorChange,
    PositionShift,
    SizeScale,
    TextSubstitution,
    ElementAddition,
    CssModification,
    ElementRemoval,
    LayoutReorganization,
}

impl PerturbationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColorChange => "color_change",
            Self::PositionShift => "position_shift",
            Self::SizeScale => "size_scale",
            Self::TextSubstitution => "text_substitution",
            Self::ElementAddition => "element_addition",
            Self::CssModification => "css_modification",
            Self::ElementRemoval => "element_removal",
            Self::LayoutReorganization => "layout_reorganization",
        }
    }
}

/// An inclusive numeric sampling range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp the range into the legal span of an axis.
    ///
    /// Out-of-range endpoints are clamped; an inverted range is a
    /// configuration error.
    pub fn clamped_to(&self, axis: &str, lo: f64, hi: f64) -> Result<Range> {
        if self.min > self.max {
            return Err(PerturbError::InvalidBounds {
                axis: axis.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(Range { min: self.min.clamp(lo, hi), max: self.max.clamp(lo, hi) })
    }
}

/// HSL sampling region for color perturbations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorBounds {
    pub hue: Range,
    pub saturation: Range,
    pub lightness: Range,
}

impl ColorBounds {
    /// Clamp every axis into the legal HSL space, rejecting inverted ranges
    pub fn validated(&self) -> Result<ColorBounds> {
        Ok(ColorBounds {
            hue: self.hue.clamped_to("hue", 0.0, 360.0)?,
            saturation: self.saturation.clamped_to("saturation", 0.0, 100.0)?,
            lightness: self.lightness.clamped_to("lightness", 0.0, 100.0)?,
        })
    }
}

impl Default for ColorBounds {
    fn default() -> Self {
        // Full hue wheel, mid saturation and lightness: colors that stay
        // renderable without washing out to near-white or near-black
        Self {
            hue: Range::new(0.0, 360.0),
            saturation: Range::new(20.0, 90.0),
            lightness: Range::new(25.0, 85.0),
        }
    }
}

/// Configuration for a single perturbation.
///
/// An immutable value object describing a sampling space; concrete values
/// are derived on demand from a seed and never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerturbationConfig {
    /// What kind of perturbation this config describes
    pub perturbation_type: PerturbationType,

    /// Description of the sampling space
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,

    /// Sampling region for color perturbations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ColorBounds>,

    /// Likelihood of applying this config when several are eligible;
    /// reserved for multi-config selection, unused by the
    /// one-config-per-element pipeline
    #[serde(default = "default_probability")]
    pub probability: f64,

    /// CSS selectors this config applies to
    #[serde(default)]
    pub target_elements: Vec<String>,
}

fn default_probability() -> f64 {
    1.0
}

impl PerturbationConfig {
    /// Create a background-color perturbation for one selector
    pub fn color_change(selector: impl Into<String>, bounds: ColorBounds) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("property".to_string(), serde_json::json!("background-color"));
        parameters.insert("color_space".to_string(), serde_json::json!("hsl"));

        Self {
            perturbation_type: PerturbationType::ColorChange,
            parameters,
            bounds: Some(bounds),
            probability: default_probability(),
            target_elements: vec![selector.into()],
        }
    }

    /// The single selector this config targets (first, if several)
    pub fn target_selector(&self) -> Option<&str> {
        self.target_elements.first().map(String::as_str)
    }

    /// Derive a concrete parameter assignment from this config and a seed.
    ///
    /// Pure: the same (config, seed) pair always yields the same sample.
    pub fn sample_concrete(&self, seed: u64) -> Result<ConcreteSample> {
        sampler::sample_concrete(self, seed)
    }
}
