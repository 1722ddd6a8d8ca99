pub mod linspace;
pub mod percentile;
pub mod round_significant;
