//! Scene analysis module
//!
//! Turns a rendered page snapshot into a structured element catalogue:
//! - Element / BoundingBox: catalogued DOM element records
//! - RawNode / catalogue_elements: extraction and dedup pipeline
//! - SceneAnalysis: the classified catalogue handed to the perturbation
//!   engine
//! - SceneAnalyzer: ties rendering, extraction, classification and scoring
//!   together

pub mod analyzer;
pub mod data;
pub mod element;
pub mod extract;

pub use analyzer::SceneAnalyzer;
pub use data::{ComponentType, FunctionalComponent, Layout, SceneAnalysis};
pub use element::{BoundingBox, Element};
pub use extract::{catalogue_elements, PageSnapshot, RawNode, Viewport};
