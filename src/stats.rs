//! Summary statistics for the mean overlay drawn on top of box plots.

/// Quantile of already sorted data, interpolating linearly between the two
/// closest ranks. `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f32], q: f32) -> Option<f32> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f32;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Whisker fences `[q1 - k·IQR, q3 + k·IQR]`.
pub fn whisker_bounds(values: &[f32], k: f32) -> Option<(f32, f32)> {
    let sorted = sorted_finite(values);
    let q1 = quantile(&sorted, 0.25)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - k * iqr, q3 + k * iqr))
}

/// Mean of the values inside the whisker fences, i.e. excluding the points a
/// box plot would draw as fliers.
pub fn whisker_mean(values: &[f32], k: f32) -> Option<f32> {
    let (lo, hi) = whisker_bounds(values, k)?;
    let kept: Vec<f32> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= lo && *v <= hi)
        .collect();
    if kept.is_empty() {
        return None;
    }
    Some(kept.iter().sum::<f32>() / kept.len() as f32)
}

fn sorted_finite(values: &[f32]) -> Vec<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f32::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 1.0), Some(4.0));
        assert_eq!(quantile(&data, 0.5), Some(2.5));
        assert_eq!(quantile(&data, 0.25), Some(1.75));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn fences_follow_iqr() {
        let (lo, hi) = whisker_bounds(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.5).unwrap();
        assert_eq!((lo, hi), (-1.0, 7.0));
    }

    #[test]
    fn mean_drops_fliers() {
        let values = [10.0, 11.0, 12.0, 13.0, 100.0];
        assert_eq!(whisker_mean(&values, 1.5), Some(11.5));
    }

    #[test]
    fn mean_of_single_value() {
        assert_eq!(whisker_mean(&[3.0], 1.5), Some(3.0));
        assert_eq!(whisker_mean(&[], 1.5), None);
        assert_eq!(whisker_mean(&[f32::NAN], 1.5), None);
    }
}
