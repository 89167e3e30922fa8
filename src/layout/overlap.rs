// Vertical slot search for brackets. Pure geometry over already-placed rects.

use tracing::trace;

use super::types::Rect;

/// Lowest `y_bottom` at or above `base_y` where a bracket spanning `x1..x2`
/// clears every rect in `placed`.
///
/// At `base_y` any contact counts, including shared edges. Higher tiers are
/// stepped in multiples of `spacing` and only test rects whose x-interval
/// strictly overlaps `x1..x2`, so brackets that merely share a leg position
/// move up one step instead of stacking fully.
///
/// `spacing` must be positive. A blocked candidate jumps straight to the first
/// grid point at or above the blocker's bar, so the search costs at most one
/// probe per rival regardless of how fine `spacing` is.
pub fn place(placed: &[Rect], x1: f32, x2: f32, base_y: f32, height: f32, spacing: f32) -> f32 {
    debug_assert!(spacing > 0.0, "bracket spacing must be positive");

    let at_base = Rect::new(x1, x2, base_y, base_y + height);
    if !placed.iter().any(|rect| at_base.touches(rect)) {
        return base_y;
    }

    let rivals: Vec<&Rect> = placed.iter().filter(|rect| at_base.shares_span(rect)).collect();
    let mut step: u64 = 1;
    loop {
        let candidate = tier(base_y, step, spacing);
        let pending = Rect::new(x1, x2, candidate, candidate + height);
        match rivals.iter().find(|rect| pending.collides(rect)) {
            Some(blocker) => {
                trace!(
                    candidate,
                    blocker_bottom = blocker.y_bottom,
                    blocker_bar = blocker.y_bar,
                    "tier occupied"
                );
                // Every tier below the blocker's bar still hits it.
                let clear = ((f64::from(blocker.y_bar) - f64::from(base_y)) / f64::from(spacing))
                    .ceil() as u64;
                step = clear.max(step.saturating_add(1));
            }
            None => return candidate,
        }
    }
}

// Computed in f64 so large step counts still land on the grid.
fn tier(base_y: f32, step: u64, spacing: f32) -> f32 {
    (f64::from(base_y) + step as f64 * f64::from(spacing)) as f32
}
