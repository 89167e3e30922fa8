use super::position::center_x;
use super::types::{BoxSlot, PositionedBracket, ValidatedBracket};

/// Places a validated bracket horizontally. The result always has `x1 <= x2`;
/// `y_bottom`/`y_bar` are left at zero until the planner stacks it.
pub fn position(
    bracket: &ValidatedBracket,
    box_width: f32,
    subgroup_count: usize,
    source_index: usize,
) -> PositionedBracket {
    let a = slot_x(bracket.first, box_width, subgroup_count);
    let b = slot_x(bracket.second, box_width, subgroup_count);
    let (x1, x2) = if b < a { (b, a) } else { (a, b) };
    PositionedBracket {
        x1,
        x2,
        y_bottom: 0.0,
        y_bar: 0.0,
        mark: bracket.mark.clone(),
        source_index,
    }
}

fn slot_x(slot: BoxSlot, box_width: f32, subgroup_count: usize) -> f32 {
    center_x(box_width, slot.category, slot.subgroup, subgroup_count)
}
