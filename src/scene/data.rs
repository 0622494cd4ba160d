use crate::scene::element::{BoundingBox, Element};
use serde::{Deserialize, Serialize};

/// Layout of the scene (placeholder, reserved for geometry/grouping data)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Layout {}

/// Categories of functional UI components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Button,
    InputField,
    Dropdown,
    Navigation,
    Header,
    Footer,
    Card,
    Modal,
    Tab,
    Breadcrumb,
    SearchBar,
    Form,
    List,
    Table,
    Image,
    TextBlock,
    Unknown,
}

/// A group of related elements forming one UI component.
///
/// Members are referenced by element id and resolved through the owning
/// scene, never held directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionalComponent {
    pub component_id: String,
    pub component_type: ComponentType,

    /// Ids of the member elements
    pub element_ids: Vec<String>,

    /// Union of the member bounding boxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Whether any member is interactive
    #[serde(default)]
    pub is_interactive: bool,
}

impl FunctionalComponent {
    /// Build a component from its member elements, deriving the bounding
    /// box and interactivity
    pub fn from_members(
        component_id: impl Into<String>,
        component_type: ComponentType,
        members: &[&Element],
    ) -> Self {
        let element_ids = members.iter().map(|e| e.element_id.clone()).collect();

        let bounding_box = members
            .iter()
            .filter_map(|e| e.bounding_box.as_ref())
            .fold(None::<BoundingBox>, |acc, bbox| match acc {
                Some(joined) => Some(joined.union(bbox)),
                None => Some(bbox.clone()),
            });

        let is_interactive = members.iter().any(|e| e.is_interactive);

        Self {
            component_id: component_id.into(),
            component_type,
            element_ids,
            bounding_box,
            is_interactive,
        }
    }
}

/// Results from analyzing a scene: the element catalogue and its partition
/// into goal-relevant and background elements.
///
/// Created once per snapshot and read-only afterwards. The two partitions
/// are disjoint and together cover every catalogued element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneAnalysis {
    /// Identifier derived from the snapshot's file stem
    pub scene_id: String,

    /// Every catalogued element, in document order
    pub elements: Vec<Element>,

    /// Structural summary (placeholder)
    #[serde(default)]
    pub layout: Layout,

    /// Interactive, task-critical elements; never perturbed
    pub goal_relevant_elements: Vec<Element>,

    /// Non-interactive elements eligible for perturbation
    pub background_elements: Vec<Element>,

    /// Optional grouping of related elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functional_components: Vec<FunctionalComponent>,

    /// How realistic the scene looks, in [0, 1]
    pub plausibility_score: f64,

    /// Whether the task remains completable, in [0, 1]
    pub solvability_score: f64,
}

impl SceneAnalysis {
    /// Look up an element by id
    pub fn element(&self, element_id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.element_id == element_id)
    }

    /// Resolve an element's parent reference
    pub fn parent_of(&self, element: &Element) -> Option<&Element> {
        element.parent_id.as_deref().and_then(|id| self.element(id))
    }

    /// Resolve an element's children references
    pub fn children_of(&self, element: &Element) -> Vec<&Element> {
        element.children_ids.iter().filter_map(|id| self.element(id)).collect()
    }

    /// Whether the goal-relevant/background split is a disjoint, exhaustive
    /// partition of the catalogue
    pub fn partition_is_valid(&self) -> bool {
        use std::collections::HashSet;

        let goal: HashSet<&str> =
            self.goal_relevant_elements.iter().map(|e| e.element_id.as_str()).collect();
        let background: HashSet<&str> =
            self.background_elements.iter().map(|e| e.element_id.as_str()).collect();
        let all: HashSet<&str> = self.elements.iter().map(|e| e.element_id.as_str()).collect();

        goal.is_disjoint(&background)
            && goal.union(&background).copied().collect::<HashSet<&str>>() == all
            && goal.len() + background.len() == all.len()
    }
}
