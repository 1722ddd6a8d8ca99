use rayon::prelude::*;

use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::actions::sample_field::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::iteration_field::IterationField;
use crate::core::data::resolution::Resolution;
use crate::core::util::linspace::linspace;

/// Evaluates `algorithm` over a `resolution` grid spanning `region`.
///
/// Column `i` samples `x_i` from `linspace(min.real, max.real, W)` and row
/// `j` samples `y_j` from `linspace(min.imag, max.imag, H)`, so both edges
/// of the region are sampled. For cancel-aware sampling, use
/// [`sample_field_cancelable`].
pub fn sample_field<Alg>(region: ComplexRect, resolution: Resolution, algorithm: &Alg) -> IterationField
where
    Alg: FractalAlgorithm + Sync,
{
    match sample_field_cancelable_impl(region, resolution, algorithm, &NeverCancel) {
        Ok(field) => field,
        Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
    }
}

/// Like [`sample_field`], but checks `cancel` at the start of each row and
/// every [`CANCEL_CHECK_INTERVAL_PIXELS`] cells within a row.
///
/// Returns [`Cancelled`] if cancellation was requested, which callers treat
/// as expected control flow rather than an error to display.
pub fn sample_field_cancelable<Alg, C>(
    region: ComplexRect,
    resolution: Resolution,
    algorithm: &Alg,
    cancel: &C,
) -> Result<IterationField, Cancelled>
where
    Alg: FractalAlgorithm + Sync,
    C: CancelToken,
{
    sample_field_cancelable_impl(region, resolution, algorithm, cancel)
}

/// Rows are split across rayon's pool and each worker writes only into its
/// own row slice, so no cell is shared between workers. A panicking worker
/// aborts the whole field and resurfaces on the calling thread.
pub(crate) fn sample_field_cancelable_impl<Alg, C>(
    region: ComplexRect,
    resolution: Resolution,
    algorithm: &Alg,
    cancel: &C,
) -> Result<IterationField, Cancelled>
where
    Alg: FractalAlgorithm + Sync,
    C: CancelToken,
{
    let row_width = resolution.width() as usize;
    let xs = linspace(region.min().real, region.max().real, row_width);
    let ys = linspace(
        region.min().imag,
        region.max().imag,
        resolution.height() as usize,
    );

    let mut field = IterationField::new(resolution);

    field
        .cells_mut()
        .par_chunks_mut(row_width)
        .zip(ys.par_iter())
        .try_for_each(|(row, &y)| {
            for (i, (cell, &x)) in row.iter_mut().zip(xs.iter()).enumerate() {
                if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(Cancelled);
                }

                // counts never exceed the cap, which is validated to fit in u16
                *cell = algorithm.compute(Complex::new(x, y)) as u16;
            }

            Ok(())
        })?;

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Encodes the sampled coordinate so tests can check the grid layout.
    #[derive(Debug)]
    struct StubCoordinateAlgorithm {}

    impl FractalAlgorithm for StubCoordinateAlgorithm {
        fn max_iterations(&self) -> u32 {
            u16::MAX as u32
        }

        fn compute(&self, point: Complex) -> u32 {
            (point.real * 10.0 + point.imag * 1000.0) as u32
        }
    }

    fn rect(min: (f64, f64), max: (f64, f64)) -> ComplexRect {
        ComplexRect::new(Complex::new(min.0, min.1), Complex::new(max.0, max.1)).unwrap()
    }

    fn resolution(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    fn sample_serial<Alg: FractalAlgorithm>(
        region: ComplexRect,
        resolution: Resolution,
        algorithm: &Alg,
    ) -> Vec<u16> {
        let xs = linspace(region.min().real, region.max().real, resolution.width() as usize);
        let ys = linspace(region.min().imag, region.max().imag, resolution.height() as usize);

        ys.iter()
            .flat_map(|&y| {
                xs.iter()
                    .map(move |&x| algorithm.compute(Complex::new(x, y)) as u16)
            })
            .collect()
    }

    #[test]
    fn test_field_has_requested_shape() {
        let field = sample_field(rect((0.0, 0.0), (1.0, 1.0)), resolution(7, 3), &StubCoordinateAlgorithm {});

        assert_eq!(field.resolution(), resolution(7, 3));
        assert_eq!(field.cells().len(), 21);
    }

    #[test]
    fn test_samples_include_both_region_edges() {
        // x in {0, 1, 2}, y in {0, 1}
        let field = sample_field(rect((0.0, 0.0), (2.0, 1.0)), resolution(3, 2), &StubCoordinateAlgorithm {});

        assert_eq!(field.get(0, 0), 0);
        assert_eq!(field.get(2, 0), 20);
        assert_eq!(field.get(0, 1), 1000);
        assert_eq!(field.get(2, 1), 1020);
    }

    #[test]
    fn test_parallel_sampling_matches_serial_sampling() {
        let region = rect((-2.5, -1.25), (1.0, 1.25));
        let algorithm = MandelbrotAlgorithm::new(60).unwrap();
        let resolution = resolution(61, 37);

        let field = sample_field(region, resolution, &algorithm);

        assert_eq!(field.cells(), sample_serial(region, resolution, &algorithm).as_slice());
    }

    #[test]
    fn test_mandelbrot_reference_view() {
        // centre (-0.5, 0), width 4.5, 80x40 cells with half-height rows
        let region = rect((-2.75, -2.25), (1.75, 2.25));
        let algorithm = MandelbrotAlgorithm::new(100).unwrap();
        let field = sample_field(region, resolution(80, 40), &algorithm);

        assert!(field.cells().iter().all(|&c| (1..=100).contains(&c)));
        assert_eq!(field.max(), 100);
        assert_eq!(field.get(0, 0), 1);
    }

    #[test]
    fn test_single_row_and_column() {
        let field = sample_field(rect((1.0, 2.0), (3.0, 4.0)), resolution(1, 1), &StubCoordinateAlgorithm {});

        // a single sample sits on the minimum corner
        assert_eq!(field.cells(), &[2010]);
    }

    #[test]
    fn test_cancelable_produces_same_results_when_not_cancelled() {
        let region = rect((-2.0, -1.0), (1.0, 1.0));
        let algorithm = MandelbrotAlgorithm::new(30).unwrap();

        let expected = sample_field(region, resolution(20, 10), &algorithm);
        let cancelable =
            sample_field_cancelable_impl(region, resolution(20, 10), &algorithm, &NeverCancel)
                .unwrap();

        assert_eq!(cancelable, expected);
    }

    #[test]
    fn test_cancelable_returns_cancelled_when_token_is_cancelled() {
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = sample_field_cancelable(
            rect((0.0, 0.0), (1.0, 1.0)),
            resolution(10, 8),
            &StubCoordinateAlgorithm {},
            &cancel_token,
        );

        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn test_cancellation_polled_at_row_start() {
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        let result = sample_field_cancelable(
            rect((0.0, 0.0), (1.0, 1.0)),
            resolution(2, 5),
            &StubCoordinateAlgorithm {},
            &cancel_token,
        );

        assert!(result.is_ok());
        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 5, "Expected at least 5 polls for 5 rows, got {}", polls);
    }

    #[test]
    fn test_cancellation_polled_multiple_times_on_wide_rows() {
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        // 3000 cells per row polls at 0, 1024 and 2048
        let result = sample_field_cancelable(
            rect((0.0, 0.0), (1.0, 1.0)),
            resolution(3000, 2),
            &StubCoordinateAlgorithm {},
            &cancel_token,
        );

        assert!(result.is_ok());
        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 6, "Expected at least 6 polls for 2 wide rows, got {}", polls);
    }

    #[test]
    #[should_panic]
    fn test_worker_panic_propagates_to_caller() {
        #[derive(Debug)]
        struct PanickingAlgorithm {}

        impl FractalAlgorithm for PanickingAlgorithm {
            fn max_iterations(&self) -> u32 {
                1
            }

            fn compute(&self, _: Complex) -> u32 {
                panic!("kernel failure")
            }
        }

        let _ = sample_field(rect((0.0, 0.0), (1.0, 1.0)), resolution(4, 4), &PanickingAlgorithm {});
    }
}
