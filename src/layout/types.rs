use serde::Serialize;

use crate::ir::NO_SUBGROUP;

use super::error::{LayoutError, Result};

/// The categorical x-axis of a grouped box plot: categories on integer ticks,
/// sub-groups dodged around each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalAxis {
    categories: Vec<String>,
    subgroups: Vec<String>,
    implicit_subgroup: bool,
}

impl CategoricalAxis {
    /// `subgroups: None` means the plot has no hue; the axis then carries the
    /// single sentinel sub-group [`NO_SUBGROUP`].
    pub fn new(categories: Vec<String>, subgroups: Option<Vec<String>>) -> Result<Self> {
        if categories.is_empty() {
            return Err(LayoutError::PrerequisiteState(
                "the axis has no categories to anchor brackets against".into(),
            ));
        }
        let (subgroups, implicit_subgroup) = match subgroups {
            Some(list) if list.is_empty() => {
                return Err(LayoutError::PrerequisiteState(
                    "the sub-group list is empty".into(),
                ));
            }
            Some(list) => (list, false),
            None => (vec![NO_SUBGROUP.to_string()], true),
        };
        Ok(Self {
            categories,
            subgroups,
            implicit_subgroup,
        })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subgroups(&self) -> &[String] {
        &self.subgroups
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn subgroup_count(&self) -> usize {
        self.subgroups.len()
    }

    pub fn has_subgroups(&self) -> bool {
        !self.implicit_subgroup
    }

    pub fn category_position(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == label)
    }

    pub fn subgroup_position(&self, label: &str) -> Option<usize> {
        if self.implicit_subgroup && label.is_empty() {
            return Some(0);
        }
        self.subgroups.iter().position(|s| s == label)
    }
}

/// A box on the axis addressed by 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxSlot {
    pub category: usize,
    pub subgroup: usize,
}

/// A bracket whose endpoints are known to exist on the axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBracket {
    pub first: BoxSlot,
    pub second: BoxSlot,
    pub mark: String,
}

/// Axis-aligned region occupied by a bracket: `[x1, x2] × [y_bottom, y_bar]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x1: f32,
    pub x2: f32,
    pub y_bottom: f32,
    pub y_bar: f32,
}

impl Rect {
    pub fn new(x1: f32, x2: f32, y_bottom: f32, y_bar: f32) -> Self {
        Self {
            x1,
            x2,
            y_bottom,
            y_bar,
        }
    }

    /// Closed-interval test: shared edges count as contact.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x1 <= other.x2
            && self.x2 >= other.x1
            && self.y_bottom <= other.y_bar
            && self.y_bar >= other.y_bottom
    }

    /// Open-interval test on x only.
    pub fn shares_span(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1
    }

    /// Open-interval test: shared edges are not a collision.
    pub fn collides(&self, other: &Rect) -> bool {
        self.shares_span(other) && self.y_bottom < other.y_bar && self.y_bar > other.y_bottom
    }
}

/// A bracket after horizontal positioning and, once planned, vertical stacking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBracket {
    pub x1: f32,
    pub x2: f32,
    pub y_bottom: f32,
    pub y_bar: f32,
    pub mark: String,
    /// Position of the originating spec in the caller's input list.
    pub source_index: usize,
}

impl PositionedBracket {
    pub fn span(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x1, self.x2, self.y_bottom, self.y_bar)
    }

    /// Legs and bar as a four-point polyline, left leg first.
    pub fn outline(&self) -> [(f32, f32); 4] {
        [
            (self.x1, self.y_bottom),
            (self.x1, self.y_bar),
            (self.x2, self.y_bar),
            (self.x2, self.y_bottom),
        ]
    }

    /// Where the mark is centered, one bracket height above the bar.
    pub fn label_anchor(&self, bracket_height: f32) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, self.y_bar + bracket_height)
    }
}

/// Output of a planning pass for one figure axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketLayout {
    /// Brackets in stacking order (narrowest span first).
    pub brackets: Vec<PositionedBracket>,
    pub box_width: f32,
    pub bracket_height: f32,
    pub bracket_spacing: f32,
    pub mark_font_size: f32,
    /// Upper y-limit that keeps every bracket and its mark inside the axis.
    pub y_limit: f32,
}

impl BracketLayout {
    pub fn label_anchors(&self) -> Vec<(f32, f32)> {
        self.brackets
            .iter()
            .map(|b| b.label_anchor(self.bracket_height))
            .collect()
    }

    /// Brackets restored to the order the caller supplied them in.
    pub fn in_source_order(&self) -> Vec<&PositionedBracket> {
        let mut ordered: Vec<&PositionedBracket> = self.brackets.iter().collect();
        ordered.sort_by_key(|b| b.source_index);
        ordered
    }
}

/// Position of a mean marker drawn over a box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanMarker {
    pub category: String,
    pub subgroup: Option<String>,
    pub x: f32,
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn axis_without_hue_uses_sentinel() {
        let axis = CategoricalAxis::new(labels(&["a", "b"]), None).unwrap();
        assert_eq!(axis.subgroup_count(), 1);
        assert!(!axis.has_subgroups());
        assert_eq!(axis.subgroup_position(NO_SUBGROUP), Some(0));
        assert_eq!(axis.subgroup_position(""), Some(0));
    }

    #[test]
    fn axis_with_hue_does_not_accept_blank() {
        let axis = CategoricalAxis::new(labels(&["a"]), Some(labels(&["x", "y"]))).unwrap();
        assert_eq!(axis.subgroup_position(""), None);
        assert_eq!(axis.subgroup_position("y"), Some(1));
    }

    #[test]
    fn empty_axis_is_a_prerequisite_error() {
        assert!(matches!(
            CategoricalAxis::new(Vec::new(), None),
            Err(LayoutError::PrerequisiteState(_))
        ));
        assert!(matches!(
            CategoricalAxis::new(labels(&["a"]), Some(Vec::new())),
            Err(LayoutError::PrerequisiteState(_))
        ));
    }

    #[test]
    fn touching_edges_differ_between_tests() {
        let a = Rect::new(0.0, 1.0, 0.0, 1.0);
        let b = Rect::new(1.0, 2.0, 0.0, 1.0);
        assert!(a.touches(&b));
        assert!(!a.collides(&b));
        let c = Rect::new(0.5, 1.5, 0.5, 1.5);
        assert!(a.collides(&c));
    }

    #[test]
    fn outline_and_anchor() {
        let bracket = PositionedBracket {
            x1: 0.0,
            x2: 2.0,
            y_bottom: 10.0,
            y_bar: 10.5,
            mark: "*".into(),
            source_index: 0,
        };
        assert_eq!(
            bracket.outline(),
            [(0.0, 10.0), (0.0, 10.5), (2.0, 10.5), (2.0, 10.0)]
        );
        assert_eq!(bracket.label_anchor(0.5), (1.0, 11.0));
    }
}
