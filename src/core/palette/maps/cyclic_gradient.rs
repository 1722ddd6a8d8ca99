use crate::core::data::colour::Colour;

/// Period of the colour cycle in iterations.
pub const CYCLE_LENGTH: usize = 512;

/// Stops of a twilight-style cyclic gradient, `(position, [r, g, b])` in
/// `[0, 1]`. The first and last stop share a colour so the cycle is seamless.
const STOPS: [(f64, [f64; 3]); 5] = [
    (0.0, [0.886, 0.851, 0.886]),
    (0.25, [0.369, 0.502, 0.737]),
    (0.5, [0.184, 0.078, 0.231]),
    (0.75, [0.663, 0.302, 0.259]),
    (1.0, [0.886, 0.851, 0.886]),
];

fn remap(value: f64, low: f64, high: f64, new_low: f64, new_high: f64) -> f64 {
    new_low + (value - low) * (new_high - new_low) / (high - low)
}

fn evaluate(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);

    for pair in STOPS.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];

        if t <= end {
            let local = (t - start) / (end - start);
            return [
                from[0] * (1.0 - local) + to[0] * local,
                from[1] * (1.0 - local) + to[1] * local,
                from[2] * (1.0 - local) + to[2] * local,
            ];
        }
    }

    STOPS[STOPS.len() - 1].1
}

/// Colour of `index` on the cycle, ignoring background rules.
#[must_use]
pub fn cyclic_gradient_native(index: usize) -> Colour {
    let phase = ((index + CYCLE_LENGTH / 2) % CYCLE_LENGTH) as f64;
    let t = remap(phase, 0.0, CYCLE_LENGTH as f64, -1.0, 1.0).abs();
    let [r, g, b] = evaluate(t);

    Colour {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}

/// Like [`cyclic_gradient_native`], with index 0 and indices below
/// `min_index` kept black.
#[must_use]
pub fn cyclic_gradient_colour(index: usize, min_index: usize) -> Colour {
    if index == 0 || index < min_index {
        return Colour::BLACK;
    }

    cyclic_gradient_native(index)
}
