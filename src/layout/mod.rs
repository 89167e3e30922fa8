pub mod bracket;
pub mod error;
pub mod markers;
pub mod overlap;
pub mod position;
pub mod types;
pub mod validate;

pub use error::{AxisKind, LayoutError, Result};
pub use markers::mean_markers;
pub use position::{box_centers, box_width_from_extents, center_x, default_box_width};
pub use types::{
    BoxSlot, BracketLayout, CategoricalAxis, MeanMarker, PositionedBracket, Rect, ValidatedBracket,
};

use tracing::{debug, debug_span};

use crate::config::{BracketConfig, Config};
use crate::ir::{AxisFrame, BracketSpec};
use crate::parser::Instructions;

/// Validates, positions and stacks `specs` for one axis.
///
/// The result is ordered by span, narrowest first; each bracket keeps its
/// `source_index`. Fails on the first bracket that does not resolve.
pub fn plan_brackets(
    specs: &[BracketSpec],
    axis: &CategoricalAxis,
    box_width: f32,
    base_y: f32,
    height: f32,
    spacing: f32,
) -> Result<Vec<PositionedBracket>> {
    error::ensure_positive("box width", box_width)?;
    error::ensure_positive("bracket height", height)?;
    error::ensure_positive("bracket spacing", spacing)?;
    if !base_y.is_finite() {
        return Err(LayoutError::InvalidParameter {
            name: "bracket base y",
            value: base_y,
        });
    }

    let _span = debug_span!("plan_brackets", brackets = specs.len(), base_y).entered();

    let validated = specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| validate::validate(spec, axis).map_err(|err| err.at_index(idx)))
        .collect::<Result<Vec<_>>>()?;

    let mut positioned: Vec<PositionedBracket> = validated
        .iter()
        .enumerate()
        .map(|(idx, valid)| bracket::position(valid, box_width, axis.subgroup_count(), idx))
        .collect();

    // Narrow comparisons claim the low tiers; wider ones nest outward.
    positioned.sort_by(|a, b| a.span().total_cmp(&b.span()));

    Ok(stack(positioned, base_y, height, spacing))
}

fn stack(
    positioned: Vec<PositionedBracket>,
    base_y: f32,
    height: f32,
    spacing: f32,
) -> Vec<PositionedBracket> {
    let mut placed_rects: Vec<Rect> = Vec::with_capacity(positioned.len());
    let mut placed = Vec::with_capacity(positioned.len());
    for mut bracket in positioned {
        let y_bottom = if placed_rects.is_empty() {
            base_y
        } else {
            overlap::place(&placed_rects, bracket.x1, bracket.x2, base_y, height, spacing)
        };
        bracket.y_bottom = y_bottom;
        bracket.y_bar = y_bottom + height;
        debug!(
            mark = %bracket.mark,
            source = bracket.source_index,
            x1 = bracket.x1,
            x2 = bracket.x2,
            y_bottom,
            "placed bracket"
        );
        placed_rects.push(bracket.rect());
        placed.push(bracket);
    }
    placed
}

/// Plans brackets against an axis frame, deriving sizes from `config`.
///
/// Bracket height and spacing scale with the frame height; the base defaults
/// to the frame's upper limit. The returned `y_limit` grows the frame so every
/// mark fits.
pub fn compute_bracket_layout(
    specs: &[BracketSpec],
    axis: &CategoricalAxis,
    frame: AxisFrame,
    config: &BracketConfig,
    base_y: Option<f32>,
) -> Result<BracketLayout> {
    let frame_height = error::ensure_positive("axis frame height", frame.height())?;
    let bracket_height = config.height_ratio * frame_height;
    let bracket_spacing = config.spacing_ratio * frame_height;
    let box_width = match config.box_width {
        Some(width) => width,
        None => default_box_width(config.dodge_width, axis.subgroup_count())?,
    };
    let base_y = base_y.unwrap_or(frame.y_max);

    let brackets = plan_brackets(
        specs,
        axis,
        box_width,
        base_y,
        bracket_height,
        bracket_spacing,
    )?;

    let y_limit = brackets
        .iter()
        .map(|b| b.label_anchor(bracket_height).1 + bracket_height)
        .fold(frame.y_max, f32::max);

    Ok(BracketLayout {
        brackets,
        box_width,
        bracket_height,
        bracket_spacing,
        mark_font_size: config.mark_font_size,
        y_limit,
    })
}

/// Lays out one instruction document: brackets, then mean markers when
/// enabled. A box width in the instructions wins over the configured one.
pub fn lay_out_instructions(
    instructions: &Instructions,
    config: &Config,
    base_y: Option<f32>,
) -> Result<(BracketLayout, Vec<MeanMarker>)> {
    let axis = CategoricalAxis::new(
        instructions.categories.clone(),
        instructions.subgroups.clone(),
    )?;
    let mut bracket_config = config.bracket.clone();
    if instructions.box_width.is_some() {
        bracket_config.box_width = instructions.box_width;
    }
    let layout = compute_bracket_layout(
        &instructions.brackets,
        &axis,
        instructions.frame,
        &bracket_config,
        base_y.or(instructions.bracket_base_y),
    )?;
    let markers = if config.marker.enabled {
        mean_markers(
            &axis,
            &instructions.observations,
            layout.box_width,
            config.marker.whisker,
        )?
    } else {
        Vec::new()
    };
    Ok((layout, markers))
}
