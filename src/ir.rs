use serde::{Deserialize, Serialize};

/// Label used for the single implicit sub-group of an axis without hue.
pub const NO_SUBGROUP: &str = "none";

/// One side of a comparison: which box the bracket leg stands on.
///
/// Indices are 1-based, matching how figure instructions count boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointRef {
    ByIndex { category: usize, subgroup: usize },
    ByLabel { category: String, subgroup: String },
}

impl EndpointRef {
    pub fn index(category: usize, subgroup: usize) -> Self {
        Self::ByIndex { category, subgroup }
    }

    pub fn label(category: impl Into<String>, subgroup: impl Into<String>) -> Self {
        Self::ByLabel {
            category: category.into(),
            subgroup: subgroup.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSpec {
    pub first: EndpointRef,
    pub second: EndpointRef,
    pub mark: String,
}

impl BracketSpec {
    pub fn new(first: EndpointRef, second: EndpointRef, mark: impl Into<String>) -> Self {
        Self {
            first,
            second,
            mark: mark.into(),
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
            mark: self.mark.clone(),
        }
    }
}

/// A raw sample for the mean-marker overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub category: String,
    #[serde(default)]
    pub subgroup: Option<String>,
    pub value: f32,
}

/// Vertical extent of the plotting area the brackets are stacked into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub y_min: f32,
    pub y_max: f32,
}

impl AxisFrame {
    pub fn new(y_min: f32, y_max: f32) -> Self {
        Self { y_min, y_max }
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}
