use crate::ir::{NO_SUBGROUP, Observation};
use crate::stats::whisker_mean;

use super::error::{AxisKind, LayoutError, Result};
use super::position::center_x;
use super::types::{CategoricalAxis, MeanMarker};

/// One mean marker per box that has data, placed at the box center.
///
/// The mean excludes values outside the `whisker` × IQR fences. Observations
/// naming a category or sub-group that is not on the axis are rejected.
pub fn mean_markers(
    axis: &CategoricalAxis,
    observations: &[Observation],
    box_width: f32,
    whisker: f32,
) -> Result<Vec<MeanMarker>> {
    let count = axis.subgroup_count();
    let mut cells: Vec<Vec<f32>> = vec![Vec::new(); axis.category_count() * count];

    for (idx, obs) in observations.iter().enumerate() {
        let category = axis
            .category_position(&obs.category)
            .ok_or_else(|| LayoutError::OutOfRange {
                index: idx,
                axis: AxisKind::Category,
                reference: obs.category.clone(),
                available: axis.category_count(),
            })?;
        let subgroup_label = obs.subgroup.as_deref().unwrap_or(NO_SUBGROUP);
        let subgroup = axis
            .subgroup_position(subgroup_label)
            .ok_or_else(|| LayoutError::OutOfRange {
                index: idx,
                axis: AxisKind::Subgroup,
                reference: subgroup_label.to_string(),
                available: count,
            })?;
        cells[category * count + subgroup].push(obs.value);
    }

    let mut markers = Vec::new();
    for (cell, values) in cells.iter().enumerate() {
        let (category, subgroup) = (cell / count, cell % count);
        let Some(mean) = whisker_mean(values, whisker) else {
            continue;
        };
        markers.push(MeanMarker {
            category: axis.categories()[category].clone(),
            subgroup: axis
                .has_subgroups()
                .then(|| axis.subgroups()[subgroup].clone()),
            x: center_x(box_width, category, subgroup, count),
            y: mean,
        });
    }
    Ok(markers)
}
