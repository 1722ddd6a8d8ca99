//! File names for exported images and animations, built from rounded view
//! parameters so related exports sort next to each other.

use crate::core::data::complex::Complex;
use crate::core::data::resolution::Resolution;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::round_significant::round_significant;

fn pair(point: Complex, digits: u32) -> String {
    format!(
        "({}, {})",
        round_significant(point.real, digits),
        round_significant(point.imag, digits)
    )
}

fn dimensions(resolution: Resolution) -> String {
    format!("({}, {})", resolution.width(), resolution.height())
}

#[must_use]
pub fn still_file_name(
    fractal: FractalKind,
    center: Complex,
    width: f64,
    output: Resolution,
    digits: u32,
    extension: &str,
) -> String {
    let constant = match fractal {
        FractalKind::Mandelbrot => String::new(),
        FractalKind::Julia { constant } => pair(constant, digits),
    };

    format!(
        "{}{} {} {}.{}",
        pair(center, digits),
        constant,
        round_significant(width, digits),
        dimensions(output),
        extension
    )
}

#[must_use]
pub fn zoom_file_name(center: Complex, end_width: f64, output: Resolution, digits: u32, extension: &str) -> String {
    format!(
        "{} {} {}.{}",
        pair(center, digits),
        round_significant(end_width, digits),
        dimensions(output),
        extension
    )
}

#[must_use]
pub fn sweep_file_name(
    center: Complex,
    max_iterations: u32,
    output: Resolution,
    digits: u32,
    extension: &str,
) -> String {
    format!(
        "{} {} {}.{}",
        pair(center, digits),
        max_iterations,
        dimensions(output),
        extension
    )
}

#[must_use]
pub fn pan_file_name(from: Complex, to: Complex, output: Resolution, digits: u32, extension: &str) -> String {
    format!(
        "{} {} {}.{}",
        pair(from, digits),
        pair(to, digits),
        dimensions(output),
        extension
    )
}
