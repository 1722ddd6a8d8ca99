/// Percentile `q` in `[0, 100]` of `values`, interpolating linearly between
/// the two nearest ranks. Returns `None` for an empty slice.
pub fn percentile(values: &[u16], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    let low = f64::from(sorted[lower]);
    let high = f64::from(sorted[upper]);

    Some(low + (high - low) * fraction)
}
