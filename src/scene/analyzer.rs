use crate::browser::SnapshotSession;
use crate::error::Result;
use crate::scene::data::{Layout, SceneAnalysis};
use crate::scene::element::Element;
use crate::scene::extract::catalogue_elements;
use crate::scoring::{PlaceholderScorer, SceneScorer};
use std::path::Path;
use std::time::Instant;

/// Analyzes rendered snapshots into classified element catalogues.
///
/// The analyzer only classifies; quality scores come from the injected
/// scorer (a placeholder unless one is wired in).
pub struct SceneAnalyzer {
    scorer: Box<dyn SceneScorer>,
}

impl SceneAnalyzer {
    /// Create an analyzer with the placeholder scorer
    pub fn new() -> Self {
        Self { scorer: Box::new(PlaceholderScorer) }
    }

    /// Create an analyzer with a custom scorer
    pub fn with_scorer(scorer: Box<dyn SceneScorer>) -> Self {
        Self { scorer }
    }

    /// Analyze a page snapshot and identify its elements.
    ///
    /// The task string is recorded in the logs for context only; it does not
    /// influence classification.
    pub fn analyze_scene(
        &self,
        session: &SnapshotSession,
        snapshot: &Path,
        task: &str,
    ) -> Result<SceneAnalysis> {
        let scene_id = snapshot
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| snapshot.display().to_string());

        log::info!("Analyzing scene: {} (task: {})", scene_id, task);

        session.load_snapshot(snapshot)?;

        let start = Instant::now();
        let page = session.collect_page()?;
        let elements = catalogue_elements(&page.nodes);
        log::debug!("Identified {} elements in {:.4?}", elements.len(), start.elapsed());

        self.analyze_elements(scene_id, elements)
    }

    /// Partition an element catalogue and assemble the scored analysis.
    ///
    /// All currently-interactive elements are goal-relevant; the remainder
    /// is background. Every element lands in exactly one partition.
    pub fn analyze_elements(&self, scene_id: String, elements: Vec<Element>) -> Result<SceneAnalysis> {
        let goal_relevant: Vec<Element> =
            elements.iter().filter(|e| e.is_interactive).cloned().collect();
        let background: Vec<Element> =
            elements.iter().filter(|e| !e.is_interactive).cloned().collect();

        log::info!(
            "Elements: total={}, goal_relevant={}, background={}",
            elements.len(),
            goal_relevant.len(),
            background.len()
        );

        let mut analysis = SceneAnalysis {
            scene_id,
            elements,
            layout: Layout::default(),
            goal_relevant_elements: goal_relevant,
            background_elements: background,
            functional_components: Vec::new(),
            plausibility_score: 0.0,
            solvability_score: 0.0,
        };

        let scores = self.scorer.score(&analysis)?;
        analysis.plausibility_score = scores.plausibility;
        analysis.solvability_score = scores.solvability;

        debug_assert!(analysis.partition_is_valid());

        Ok(analysis)
    }
}

impl Default for SceneAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
