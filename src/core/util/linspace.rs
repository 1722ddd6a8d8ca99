/// `count` evenly spaced values from `start` to `end` inclusive. A single
/// sample is `start`, and the last sample is exactly `end`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;

            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// `count` values spaced evenly in log10 between `start` and `end`, both of
/// which must be positive.
pub fn geomspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    let mut values: Vec<f64> = linspace(start.log10(), end.log10(), count)
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect();

    if let Some(first) = values.first_mut() {
        *first = start;
    }
    if count > 1 {
        if let Some(last) = values.last_mut() {
            *last = end;
        }
    }

    values
}
