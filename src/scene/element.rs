use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A catalogued DOM element identified by scene analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// Unique id within a scene, derived from the dedup fingerprint
    pub element_id: String,

    /// HTML tag name (e.g., "div", "button", "input")
    pub element_type: String,

    /// CSS selector targeting this element
    pub selector: String,

    /// Whether the element is interactive (clickable, input, etc.)
    #[serde(default)]
    pub is_interactive: bool,

    /// Trimmed text content of the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Element attributes (e.g., id, class, href, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Bounding box information (x, y, width, height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Id of the nearest catalogued ancestor, resolved via the owning scene
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Ids of catalogued descendants whose nearest catalogued ancestor is
    /// this element, resolved via the owning scene
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<String>,
}

/// Bounding box coordinates for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Element {
    /// Create a new Element
    pub fn new(
        element_id: impl Into<String>,
        element_type: impl Into<String>,
        selector: impl Into<String>,
        is_interactive: bool,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            element_type: element_type.into(),
            selector: selector.into(),
            is_interactive,
            text_content: None,
            attributes: HashMap::new(),
            bounding_box: None,
            parent_id: None,
            children_ids: Vec::new(),
        }
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox { x, y, width, height });
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get the element's DOM id attribute
    pub fn dom_id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if the element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        if let Some(classes) = self.attributes.get("class") {
            classes.split_whitespace().any(|c| c == class_name)
        } else {
            false
        }
    }

    /// Check if the element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.element_type.eq_ignore_ascii_case(tag)
    }
}

impl BoundingBox {
    /// Create a new BoundingBox
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the bounding box has non-zero dimensions
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Calculate the area of the bounding box
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        BoundingBox { x, y, width: right - x, height: bottom - y }
    }
}
