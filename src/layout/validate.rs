//! Bracket validation against the labels actually present on the axis.
//!
//! Typed [`BracketSpec`]s only need their references range-checked. Raw JSON
//! values additionally go through [`spec_from_value`], which is where shape
//! errors (wrong arity, wrong field types) are caught.

use serde_json::Value;

use crate::ir::{BracketSpec, EndpointRef};

use super::error::{AxisKind, LayoutError, Result};
use super::types::{BoxSlot, CategoricalAxis, ValidatedBracket};

const SHAPE_HINT: &str = "expected [[category, subgroup], [category, subgroup], mark]";

/// Resolves both endpoints of `spec` to 0-based box slots.
///
/// Errors carry index 0; the planner re-labels them with the bracket's
/// position in the batch.
pub fn validate(spec: &BracketSpec, axis: &CategoricalAxis) -> Result<ValidatedBracket> {
    Ok(ValidatedBracket {
        first: resolve_endpoint(&spec.first, axis)?,
        second: resolve_endpoint(&spec.second, axis)?,
        mark: spec.mark.clone(),
    })
}

/// Shape-checks and validates a raw bracket value in one step.
pub fn validate_value(value: &Value, axis: &CategoricalAxis) -> Result<ValidatedBracket> {
    let spec = spec_from_value(value)?;
    validate(&spec, axis)
}

/// Converts `[[c, s], [c, s], "mark"]` into a [`BracketSpec`].
///
/// Each endpoint pair must be all unsigned integers (1-based indices) or all
/// strings (labels).
pub fn spec_from_value(value: &Value) -> Result<BracketSpec> {
    let items = value
        .as_array()
        .ok_or_else(|| LayoutError::malformed(0, SHAPE_HINT))?;
    if items.len() != 3 {
        return Err(LayoutError::malformed(
            0,
            format!("{SHAPE_HINT}, got {} elements", items.len()),
        ));
    }
    let first = endpoint_from_value(&items[0], "first")?;
    let second = endpoint_from_value(&items[1], "second")?;
    let mark = items[2]
        .as_str()
        .ok_or_else(|| LayoutError::malformed(0, "the mark must be a string"))?;
    Ok(BracketSpec::new(first, second, mark))
}

fn endpoint_from_value(value: &Value, which: &str) -> Result<EndpointRef> {
    let pair = match value.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        Some(pair) => {
            return Err(LayoutError::malformed(
                0,
                format!(
                    "the {which} endpoint must be a [category, subgroup] pair, got {} elements",
                    pair.len()
                ),
            ));
        }
        None => {
            return Err(LayoutError::malformed(
                0,
                format!("the {which} endpoint must be a [category, subgroup] pair"),
            ));
        }
    };

    match (&pair[0], &pair[1]) {
        (Value::String(category), Value::String(subgroup)) => {
            Ok(EndpointRef::label(category.as_str(), subgroup.as_str()))
        }
        (Value::Number(category), Value::Number(subgroup)) => {
            match (category.as_u64(), subgroup.as_u64()) {
                (Some(category), Some(subgroup)) => {
                    Ok(EndpointRef::index(category as usize, subgroup as usize))
                }
                _ => Err(LayoutError::malformed(
                    0,
                    format!("the {which} endpoint indices must be non-negative integers"),
                )),
            }
        }
        _ => Err(LayoutError::malformed(
            0,
            format!("the {which} endpoint must be two indices or two labels"),
        )),
    }
}

fn resolve_endpoint(endpoint: &EndpointRef, axis: &CategoricalAxis) -> Result<BoxSlot> {
    match endpoint {
        EndpointRef::ByIndex { category, subgroup } => Ok(BoxSlot {
            category: resolve_index(*category, axis.category_count(), AxisKind::Category)?,
            subgroup: resolve_index(*subgroup, axis.subgroup_count(), AxisKind::Subgroup)?,
        }),
        EndpointRef::ByLabel { category, subgroup } => Ok(BoxSlot {
            category: axis.category_position(category).ok_or_else(|| {
                out_of_range(AxisKind::Category, category.clone(), axis.category_count())
            })?,
            subgroup: axis.subgroup_position(subgroup).ok_or_else(|| {
                out_of_range(AxisKind::Subgroup, subgroup.clone(), axis.subgroup_count())
            })?,
        }),
    }
}

fn resolve_index(one_based: usize, available: usize, axis: AxisKind) -> Result<usize> {
    if one_based == 0 || one_based > available {
        return Err(out_of_range(axis, one_based.to_string(), available));
    }
    Ok(one_based - 1)
}

fn out_of_range(axis: AxisKind, reference: String, available: usize) -> LayoutError {
    LayoutError::OutOfRange {
        index: 0,
        axis,
        reference,
        available,
    }
}
