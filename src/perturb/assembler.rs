use crate::error::{PerturbError, Result};
use crate::perturb::config::PerturbationConfig;
use crate::perturb::sampler::ConcreteSample;
use crate::scene::data::SceneAnalysis;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// A scene as serializable element records plus metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneData {
    pub scene_id: String,

    /// Serialized element records
    pub elements: Vec<Value>,

    /// Free-form scene metadata
    #[serde(default)]
    pub metadata: HashMap<String, Value>,

    /// Screenshot of the scene, if captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,

    /// DOM-tree snapshot, if captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom_tree: Option<Value>,
}

impl SceneData {
    /// Serialize an analysis into scene data records
    pub fn from_analysis(analysis: &SceneAnalysis) -> Result<Self> {
        let elements = analysis
            .elements
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()?;

        let mut metadata = HashMap::new();
        metadata.insert("element_count".to_string(), Value::from(analysis.elements.len()));
        metadata.insert(
            "goal_relevant_count".to_string(),
            Value::from(analysis.goal_relevant_elements.len()),
        );
        metadata.insert(
            "background_count".to_string(),
            Value::from(analysis.background_elements.len()),
        );

        Ok(Self {
            scene_id: analysis.scene_id.clone(),
            elements,
            metadata,
            screenshot_path: None,
            dom_tree: None,
        })
    }
}

/// Result of applying perturbations to a scene.
///
/// Assembled once per perturbation run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerturbationResult {
    pub original_scene: SceneData,
    pub perturbed_scene: SceneData,

    /// Configs in the order they were applied
    pub applied_perturbations: Vec<PerturbationConfig>,

    /// Externally supplied quality score, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,

    /// Free-form run metadata
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// Build a perturbed scene by applying each sample's rendered declarations
/// to its target element records' style attribute.
///
/// Element records not targeted by any sample (goal-relevant ones in
/// particular) come out byte-for-byte unchanged. Interactive records are
/// never styled even when a background selector happens to match one.
/// A length mismatch between configs and samples is a contract violation
/// and fails loudly, as does a sample whose selector matches nothing.
pub fn assemble(
    original: &SceneData,
    applied: &[PerturbationConfig],
    samples: &[ConcreteSample],
    quality: Option<f64>,
) -> Result<PerturbationResult> {
    if applied.len() != samples.len() {
        return Err(PerturbError::CountMismatch { expected: applied.len(), actual: samples.len() });
    }

    let mut perturbed = original.clone();
    for sample in samples {
        apply_style(&mut perturbed.elements, sample)?;
    }

    let mut metadata = HashMap::new();
    metadata.insert("applied_count".to_string(), Value::from(samples.len()));

    log::info!(
        "Assembled perturbation result for scene {} ({} perturbations)",
        original.scene_id,
        samples.len()
    );

    Ok(PerturbationResult {
        original_scene: original.clone(),
        perturbed_scene: perturbed,
        applied_perturbations: applied.to_vec(),
        quality_score: quality,
        metadata,
    })
}

fn apply_style(elements: &mut [Value], sample: &ConcreteSample) -> Result<()> {
    let declarations = sample.style_declarations();
    let mut applied = false;

    for record in elements.iter_mut() {
        let matches_selector = record.get("selector").and_then(Value::as_str)
            == Some(sample.target_selector.as_str());
        if !matches_selector {
            continue;
        }
        // Selector collisions must not bleed styles onto interactive records
        if record.get("is_interactive").and_then(Value::as_bool).unwrap_or(false) {
            continue;
        }

        let Some(attributes) = record
            .as_object_mut()
            .map(|obj| obj.entry("attributes").or_insert_with(|| Value::Object(Default::default())))
            .and_then(Value::as_object_mut)
        else {
            continue;
        };

        let style = match attributes.get("style").and_then(Value::as_str) {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{}; {}", existing.trim_end_matches([' ', ';']), declarations)
            }
            _ => declarations.clone(),
        };
        attributes.insert("style".to_string(), Value::String(style));
        applied = true;
    }

    if !applied {
        return Err(PerturbError::TargetNotFound { selector: sample.target_selector.clone() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perturb::config::ColorBounds;
    use crate::perturb::proposer::PerturbationProposer;
    use crate::scene::data::Layout;
    use crate::scene::element::Element;

    fn sample_analysis() -> SceneAnalysis {
        let elements = vec![
            Element::new("button-submit-Submit-", "button", "#submit", true).with_text("Submit"),
            Element::new("div--Promo-", "div", ".banner", false).with_text("Promo"),
        ];

        SceneAnalysis {
            scene_id: "scene_r".to_string(),
            goal_relevant_elements: vec![elements[0].clone()],
            background_elements: vec![elements[1].clone()],
            elements,
            layout: Layout::default(),
            functional_components: Vec::new(),
            plausibility_score: 0.8,
            solvability_score: 0.7,
        }
    }

    fn configs_and_samples(analysis: &SceneAnalysis) -> (Vec<PerturbationConfig>, Vec<ConcreteSample>) {
        let configs = PerturbationProposer::new().propose(analysis);
        let samples = configs
            .iter()
            .map(|c| c.sample_concrete(7).unwrap())
            .collect();
        (configs, samples)
    }

    #[test]
    fn test_assemble_applies_style_to_target() {
        let analysis = sample_analysis();
        let original = SceneData::from_analysis(&analysis).unwrap();
        let (configs, samples) = configs_and_samples(&analysis);

        let result = assemble(&original, &configs, &samples, Some(0.9)).unwrap();

        assert_eq!(result.quality_score, Some(0.9));
        assert_eq!(result.applied_perturbations.len(), 1);
        assert_eq!(result.metadata.get("applied_count"), Some(&Value::from(1usize)));

        let banner = result
            .perturbed_scene
            .elements
            .iter()
            .find(|e| e["selector"] == ".banner")
            .unwrap();
        let style = banner["attributes"]["style"].as_str().unwrap();
        assert!(style.starts_with("background-color: hsl("));
    }

    #[test]
    fn test_assemble_leaves_untargeted_records_unchanged() {
        let analysis = sample_analysis();
        let original = SceneData::from_analysis(&analysis).unwrap();
        let (configs, samples) = configs_and_samples(&analysis);

        let result = assemble(&original, &configs, &samples, None).unwrap();

        let before = original.elements.iter().find(|e| e["selector"] == "#submit").unwrap();
        let after = result
            .perturbed_scene
            .elements
            .iter()
            .find(|e| e["selector"] == "#submit")
            .unwrap();
        assert_eq!(before, after);

        assert_eq!(result.original_scene, original);
    }

    #[test]
    fn test_assemble_appends_to_existing_style() {
        let mut analysis = sample_analysis();
        analysis.elements[1].add_attribute("style", "margin: 4px;");
        analysis.background_elements[0].add_attribute("style", "margin: 4px;");

        let original = SceneData::from_analysis(&analysis).unwrap();
        let (configs, samples) = configs_and_samples(&analysis);

        let result = assemble(&original, &configs, &samples, None).unwrap();

        let banner = result
            .perturbed_scene
            .elements
            .iter()
            .find(|e| e["selector"] == ".banner")
            .unwrap();
        let style = banner["attributes"]["style"].as_str().unwrap();
        assert!(style.starts_with("margin: 4px; background-color: hsl("));
    }

    #[test]
    fn test_assemble_count_mismatch_fails() {
        let analysis = sample_analysis();
        let original = SceneData::from_analysis(&analysis).unwrap();
        let (configs, samples) = configs_and_samples(&analysis);

        let result = assemble(&original, &configs, &samples[..0], None);
        assert!(matches!(
            result,
            Err(PerturbError::CountMismatch { expected: 1, actual: 0 })
        ));
    }

    #[test]
    fn test_assemble_unknown_target_fails() {
        let analysis = sample_analysis();
        let original = SceneData::from_analysis(&analysis).unwrap();

        let config = PerturbationConfig::color_change(".missing", ColorBounds::default());
        let sample = config.sample_concrete(7).unwrap();

        let result = assemble(&original, &[config], &[sample], None);
        assert!(matches!(
            result,
            Err(PerturbError::TargetNotFound { ref selector }) if selector == ".missing"
        ));
    }

    #[test]
    fn test_interactive_records_never_styled_on_selector_collision() {
        // A background element sharing its selector with an interactive one
        let elements = vec![
            Element::new("a--Promo-/promo", "a", ".banner", true).with_text("Promo"),
            Element::new("div--Promo text-", "div", ".banner", false).with_text("Promo text"),
        ];
        let analysis = SceneAnalysis {
            scene_id: "scene_c".to_string(),
            goal_relevant_elements: vec![elements[0].clone()],
            background_elements: vec![elements[1].clone()],
            elements,
            layout: Layout::default(),
            functional_components: Vec::new(),
            plausibility_score: 0.8,
            solvability_score: 0.7,
        };

        let original = SceneData::from_analysis(&analysis).unwrap();
        let (configs, samples) = configs_and_samples(&analysis);

        let result = assemble(&original, &configs, &samples, None).unwrap();

        let link = result
            .perturbed_scene
            .elements
            .iter()
            .find(|e| e["element_type"] == "a")
            .unwrap();
        assert!(link.get("attributes").and_then(|a| a.get("style")).is_none());

        let div = result
            .perturbed_scene
            .elements
            .iter()
            .find(|e| e["element_type"] == "div")
            .unwrap();
        assert!(div["attributes"]["style"].as_str().unwrap().contains("hsl("));
    }
}
