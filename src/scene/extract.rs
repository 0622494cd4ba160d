use crate::scene::element::{BoundingBox, Element};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Tags that never render visible content
const NON_VISUAL_TAGS: [&str; 7] = ["script", "style", "noscript", "meta", "link", "title", "head"];

/// Tags that count as content even without text or attributes
const CONTENT_TAGS: [&str; 6] = ["button", "input", "a", "select", "textarea", "img"];

/// Tags that are interactive by themselves
const INTERACTIVE_TAGS: [&str; 5] = ["button", "input", "a", "select", "textarea"];

/// ARIA roles that mark an element as interactive
const INTERACTIVE_ROLES: [&str; 4] = ["button", "link", "tab", "menuitem"];

/// Input types that mark an element as interactive
const INTERACTIVE_TYPES: [&str; 3] = ["button", "submit", "reset"];

/// Number of text characters that participate in the dedup fingerprint
const FINGERPRINT_TEXT_LEN: usize = 50;

/// Rendered viewport dimensions at collection time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Raw node records collected from a rendered page in document order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub viewport: Viewport,
    pub nodes: Vec<RawNode>,
}

/// A single node record as reported by the in-page walker.
///
/// Visibility and viewport intersection are computed in the page, where the
/// style engine lives; everything downstream of that is decided here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    /// Position of this node in the document-order walk
    pub node_index: usize,

    /// Position of the parent node, None if the parent is the body
    #[serde(default)]
    pub parent_index: Option<usize>,

    /// Lower-cased tag name
    pub tag: String,

    /// Element attributes
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Raw text content, untrimmed
    #[serde(default)]
    pub text: String,

    /// Rendered bounding rect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Computed-style visibility (display, visibility, opacity, non-zero box)
    #[serde(default)]
    pub visible: bool,

    /// Whether the bounding rect intersects the viewport on both axes
    #[serde(default)]
    pub in_viewport: bool,
}

impl RawNode {
    /// Create a raw node record; visible and in-viewport by default
    pub fn new(node_index: usize, tag: impl Into<String>) -> Self {
        Self {
            node_index,
            parent_index: None,
            tag: tag.into(),
            attributes: HashMap::new(),
            text: String::new(),
            bounding_box: None,
            visible: true,
            in_viewport: true,
        }
    }

    /// Builder method: set the parent node index
    pub fn with_parent(mut self, parent_index: usize) -> Self {
        self.parent_index = Some(parent_index);
        self
    }

    /// Builder method: set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method: set the bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox::new(x, y, width, height));
        self
    }

    /// Builder method: set visibility
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Builder method: set viewport intersection
    pub fn with_in_viewport(mut self, in_viewport: bool) -> Self {
        self.in_viewport = in_viewport;
        self
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Composite dedup key: tag, DOM id, leading text, href.
    ///
    /// Live node lists can report the same element more than once; two nodes
    /// with the same fingerprint are treated as one element.
    pub fn fingerprint(&self) -> String {
        let id = self.attribute("id").unwrap_or("");
        let text: String = self.text.trim().chars().take(FINGERPRINT_TEXT_LEN).collect();
        let href = self.attribute("href").unwrap_or("");
        format!("{}-{}-{}-{}", self.tag, id, text, href)
    }

    /// Derive a CSS selector: `#id`, else the first class token, else the tag
    pub fn selector(&self) -> String {
        if let Some(id) = self.attribute("id") {
            if !id.is_empty() {
                return format!("#{}", id);
            }
        }

        if let Some(classes) = self.attribute("class") {
            if let Some(first) = classes.split_whitespace().next() {
                return format!(".{}", first);
            }
        }

        self.tag.clone()
    }

    /// Whether the element responds to user input
    pub fn is_interactive(&self) -> bool {
        INTERACTIVE_TAGS.contains(&self.tag.as_str())
            || self.attribute("onclick").is_some()
            || self.attribute("role").is_some_and(|r| INTERACTIVE_ROLES.contains(&r))
            || self.attribute("href").is_some()
            || self.attribute("type").is_some_and(|t| INTERACTIVE_TYPES.contains(&t))
            || self.attribute("tabindex").is_some()
    }

    /// Whether the element carries anything worth cataloguing
    pub fn has_meaningful_content(&self) -> bool {
        !self.text.trim().is_empty()
            || self.attribute("href").is_some()
            || self.attribute("onclick").is_some()
            || self.attribute("role").is_some()
            || CONTENT_TAGS.contains(&self.tag.as_str())
    }
}

/// Turn raw node records into a deduplicated, ordered element catalogue.
///
/// Filters, in order: non-visual tags, visibility, viewport intersection,
/// meaningful content, fingerprint dedup. The dedup set is local to this
/// call, so concurrent scene analyses cannot interfere. Emission order
/// follows document order; re-running on the same records yields the same
/// catalogue.
pub fn catalogue_elements(nodes: &[RawNode]) -> Vec<Element> {
    let mut processed: HashSet<String> = HashSet::new();
    let mut elements: Vec<Element> = Vec::new();
    let mut id_by_index: HashMap<usize, String> = HashMap::new();

    for node in nodes {
        if NON_VISUAL_TAGS.contains(&node.tag.as_str()) {
            continue;
        }
        if !node.visible || !node.in_viewport {
            continue;
        }
        if !node.has_meaningful_content() {
            continue;
        }

        let fingerprint = node.fingerprint();
        if processed.contains(&fingerprint) {
            // Duplicate report of an already-emitted element; remember the
            // alias so hierarchy links through it still resolve
            id_by_index.insert(node.node_index, fingerprint);
            continue;
        }

        let mut element = Element::new(
            fingerprint.clone(),
            node.tag.clone(),
            node.selector(),
            node.is_interactive(),
        );

        let text = node.text.trim();
        if !text.is_empty() {
            element.text_content = Some(text.to_string());
        }
        element.attributes = node.attributes.clone();
        element.bounding_box = node.bounding_box.clone();

        elements.push(element);
        id_by_index.insert(node.node_index, fingerprint.clone());
        processed.insert(fingerprint);
    }

    link_hierarchy(nodes, &mut elements, &id_by_index);

    log::debug!("Catalogued {} elements from {} raw nodes", elements.len(), nodes.len());

    elements
}

/// Fill in parent/children id references.
///
/// Each element links to its nearest catalogued ancestor; filtered-out
/// wrappers in between are skipped over rather than leaving dangling ids.
fn link_hierarchy(nodes: &[RawNode], elements: &mut [Element], id_by_index: &HashMap<usize, String>) {
    let raw_by_index: HashMap<usize, &RawNode> = nodes.iter().map(|n| (n.node_index, n)).collect();
    let slot_by_id: HashMap<String, usize> = elements
        .iter()
        .enumerate()
        .map(|(slot, e)| (e.element_id.clone(), slot))
        .collect();

    let mut linked: HashSet<String> = HashSet::new();

    for node in nodes {
        let Some(own_id) = id_by_index.get(&node.node_index) else {
            continue;
        };
        // First report of an element decides its position in the hierarchy
        if !linked.insert(own_id.clone()) {
            continue;
        }

        let Some(parent_id) = nearest_catalogued_ancestor(node, &raw_by_index, id_by_index, own_id) else {
            continue;
        };

        let own_slot = slot_by_id[own_id.as_str()];
        elements[own_slot].parent_id = Some(parent_id.clone());

        let parent_slot = slot_by_id[parent_id.as_str()];
        elements[parent_slot].children_ids.push(own_id.clone());
    }
}

fn nearest_catalogued_ancestor(
    node: &RawNode,
    raw_by_index: &HashMap<usize, &RawNode>,
    id_by_index: &HashMap<usize, String>,
    own_id: &str,
) -> Option<String> {
    let mut current = node.parent_index;
    while let Some(index) = current {
        if let Some(id) = id_by_index.get(&index) {
            // A deduplicated ancestor can alias this element; keep climbing
            if id != own_id {
                return Some(id.clone());
            }
        }
        current = raw_by_index.get(&index).and_then(|n| n.parent_index);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_format() {
        let node = RawNode::new(0, "a")
            .with_attribute("id", "home")
            .with_attribute("href", "/home")
            .with_text("  Go home  ");

        assert_eq!(node.fingerprint(), "a-home-Go home-/home");
    }

    #[test]
    fn test_fingerprint_truncates_text() {
        let long_text = "x".repeat(80);
        let node = RawNode::new(0, "p").with_text(long_text);

        let fingerprint = node.fingerprint();
        let text_part: String = std::iter::repeat('x').take(50).collect();
        assert_eq!(fingerprint, format!("p--{}-", text_part));
    }

    #[test]
    fn test_selector_prefers_id() {
        let node = RawNode::new(0, "button")
            .with_attribute("id", "submit")
            .with_attribute("class", "btn primary");

        assert_eq!(node.selector(), "#submit");
    }

    #[test]
    fn test_selector_first_class_token() {
        let node = RawNode::new(0, "div").with_attribute("class", "banner promo wide");
        assert_eq!(node.selector(), ".banner");
    }

    #[test]
    fn test_selector_falls_back_to_tag() {
        let node = RawNode::new(0, "span").with_text("plain");
        assert_eq!(node.selector(), "span");

        // Empty class attribute also falls through
        let node = RawNode::new(0, "p").with_attribute("class", "   ");
        assert_eq!(node.selector(), "p");
    }

    #[test]
    fn test_interactivity_rules() {
        assert!(RawNode::new(0, "button").is_interactive());
        assert!(RawNode::new(0, "select").is_interactive());
        assert!(!RawNode::new(0, "div").is_interactive());

        assert!(RawNode::new(0, "div").with_attribute("onclick", "go()").is_interactive());
        assert!(RawNode::new(0, "div").with_attribute("role", "menuitem").is_interactive());
        assert!(!RawNode::new(0, "div").with_attribute("role", "banner").is_interactive());
        assert!(RawNode::new(0, "span").with_attribute("href", "/x").is_interactive());
        assert!(RawNode::new(0, "div").with_attribute("type", "submit").is_interactive());
        assert!(RawNode::new(0, "div").with_attribute("tabindex", "0").is_interactive());
    }

    #[test]
    fn test_meaningful_content() {
        assert!(RawNode::new(0, "p").with_text("hello").has_meaningful_content());
        assert!(RawNode::new(0, "img").has_meaningful_content());
        assert!(RawNode::new(0, "div").with_attribute("role", "banner").has_meaningful_content());
        assert!(!RawNode::new(0, "div").with_text("   ").has_meaningful_content());
    }

    #[test]
    fn test_catalogue_filters_non_visual_tags() {
        let nodes = vec![
            RawNode::new(0, "script").with_text("var x = 1;"),
            RawNode::new(1, "style").with_text(".a { color: red }"),
            RawNode::new(2, "p").with_text("Visible text"),
        ];

        let elements = catalogue_elements(&nodes);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].element_type, "p");
    }

    #[test]
    fn test_catalogue_filters_hidden_and_offscreen() {
        let nodes = vec![
            RawNode::new(0, "p").with_text("hidden").with_visibility(false),
            RawNode::new(1, "p").with_text("offscreen").with_in_viewport(false),
            RawNode::new(2, "p").with_text("shown"),
        ];

        let elements = catalogue_elements(&nodes);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text_content.as_deref(), Some("shown"));
    }

    #[test]
    fn test_catalogue_deduplicates_by_fingerprint() {
        let nodes = vec![
            RawNode::new(0, "a").with_attribute("href", "/about").with_text("About"),
            RawNode::new(1, "a").with_attribute("href", "/about").with_text("About"),
            RawNode::new(2, "a").with_attribute("href", "/contact").with_text("Contact"),
        ];

        let elements = catalogue_elements(&nodes);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text_content.as_deref(), Some("About"));
        assert_eq!(elements[1].text_content.as_deref(), Some("Contact"));
    }

    #[test]
    fn test_catalogue_is_idempotent() {
        let nodes = vec![
            RawNode::new(0, "button").with_attribute("id", "go").with_text("Go"),
            RawNode::new(1, "div").with_attribute("class", "banner").with_text("Promo"),
            RawNode::new(2, "a").with_attribute("href", "/a").with_text("A"),
        ];

        let first = catalogue_elements(&nodes);
        let second = catalogue_elements(&nodes);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hierarchy_links_nearest_surviving_ancestor() {
        // nav (role) > div (no content, filtered) > a
        let nodes = vec![
            RawNode::new(0, "nav").with_attribute("role", "navigation").with_text("About"),
            RawNode::new(1, "div").with_parent(0),
            RawNode::new(2, "a").with_parent(1).with_attribute("href", "/about").with_text("About"),
        ];

        let elements = catalogue_elements(&nodes);
        assert_eq!(elements.len(), 2);

        let nav = &elements[0];
        let link = &elements[1];
        assert_eq!(link.parent_id.as_deref(), Some(nav.element_id.as_str()));
        assert_eq!(nav.children_ids, vec![link.element_id.clone()]);
        assert!(nav.parent_id.is_none());
    }

    #[test]
    fn test_hierarchy_skips_self_alias() {
        // A wrapper deduplicated into the same element as its child must not
        // produce a self-referencing parent link
        let nodes = vec![
            RawNode::new(0, "div").with_text("Same"),
            RawNode::new(1, "div").with_parent(0).with_text("Same"),
        ];

        let elements = catalogue_elements(&nodes);
        assert_eq!(elements.len(), 1);
        assert!(elements[0].parent_id.is_none());
        assert!(elements[0].children_ids.is_empty());
    }
}
