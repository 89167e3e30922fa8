//! Horizontal placement of grouped (dodged) boxes.
//!
//! Boxes of one category sit side by side, centered on the integer tick of
//! that category. Brackets and mean markers both resolve their x-coordinates
//! here so they line up with the boxes without asking a renderer.

use super::error::{LayoutError, Result};
use super::types::CategoricalAxis;

/// Center of the box for `subgroup_index` out of `subgroup_count` siblings
/// in category slot `category_index`.
///
/// Callers guarantee `subgroup_count >= 1` and `subgroup_index < subgroup_count`.
pub fn center_x(
    box_width: f32,
    category_index: usize,
    subgroup_index: usize,
    subgroup_count: usize,
) -> f32 {
    let tick = category_index as f32;
    let half = subgroup_count / 2;

    let offset = if subgroup_count % 2 == 0 {
        // Left half counts outward from the boundary as 1, 2, ...; so does the right half.
        let (sign, n) = if subgroup_index < half {
            (-1.0, half - subgroup_index)
        } else {
            (1.0, subgroup_index - half + 1)
        };
        sign * ((n - 1) as f32 * box_width + box_width / 2.0)
    } else {
        (subgroup_index as f32 - half as f32) * box_width
    };

    tick + offset
}

/// Centers of every box on the axis, category-major, as `(category, subgroup, x)`.
pub fn box_centers(axis: &CategoricalAxis, box_width: f32) -> Vec<(usize, usize, f32)> {
    let count = axis.subgroup_count();
    let mut centers = Vec::with_capacity(axis.category_count() * count);
    for category in 0..axis.category_count() {
        for subgroup in 0..count {
            centers.push((category, subgroup, center_x(box_width, category, subgroup, count)));
        }
    }
    centers
}

/// Mean width of drawn box extents `(x_min, x_max)`.
pub fn box_width_from_extents(extents: &[(f32, f32)]) -> Option<f32> {
    if extents.is_empty() {
        return None;
    }
    let total: f32 = extents.iter().map(|(lo, hi)| hi - lo).sum();
    Some(total / extents.len() as f32)
}

/// Box width used when the caller does not measure one: the dodge band split
/// evenly between sub-groups.
pub fn default_box_width(dodge_width: f32, subgroup_count: usize) -> Result<f32> {
    if subgroup_count == 0 {
        return Err(LayoutError::PrerequisiteState(
            "no sub-groups to share the dodge band".into(),
        ));
    }
    Ok(dodge_width / subgroup_count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn even_count_splits_around_tick() {
        assert_eq!(center_x(1.0, 0, 0, 2), -0.5);
        assert_eq!(center_x(1.0, 0, 1, 2), 0.5);
    }

    #[test]
    fn odd_count_puts_middle_on_tick() {
        assert_eq!(center_x(1.0, 0, 1, 3), 0.0);
        assert_eq!(center_x(1.0, 0, 0, 3), -1.0);
        assert_eq!(center_x(1.0, 0, 2, 3), 1.0);
    }

    #[test]
    fn four_subgroups_are_evenly_spaced() {
        let xs: Vec<f32> = (0..4).map(|j| center_x(0.2, 2, j, 4)).collect();
        let expected = [1.7, 1.9, 2.1, 2.3];
        for (x, e) in xs.iter().zip(expected) {
            assert!(approx(*x, e), "expected {e}, got {x}");
        }
    }

    #[test]
    fn single_subgroup_sits_on_tick() {
        assert_eq!(center_x(0.8, 3, 0, 1), 3.0);
    }

    #[test]
    fn centers_are_symmetric_about_tick() {
        for count in 1..8 {
            for j in 0..count {
                let left = center_x(0.3, 1, j, count) - 1.0;
                let right = center_x(0.3, 1, count - 1 - j, count) - 1.0;
                assert!(approx(left, -right), "count {count}, index {j}");
            }
        }
    }

    #[test]
    fn box_centers_cover_grid() {
        let axis = CategoricalAxis::new(
            vec!["a".into(), "b".into()],
            Some(vec!["x".into(), "y".into()]),
        )
        .expect("axis");
        let centers = box_centers(&axis, 0.4);
        assert_eq!(centers.len(), 4);
        assert_eq!((centers[0].0, centers[0].1), (0, 0));
        assert!(approx(centers[0].2, -0.2));
        assert_eq!((centers[3].0, centers[3].1), (1, 1));
        assert!(approx(centers[3].2, 1.2));
    }

    #[test]
    fn extents_average_width() {
        assert_eq!(box_width_from_extents(&[]), None);
        let width = box_width_from_extents(&[(-0.4, 0.0), (0.0, 0.4), (0.6, 1.0)]).unwrap();
        assert!(approx(width, 0.4));
    }

    #[test]
    fn default_width_divides_dodge_band() {
        assert!(approx(default_box_width(0.8, 4).unwrap(), 0.2));
        assert!(default_box_width(0.8, 0).is_err());
    }
}
