pub mod cyclic_gradient;
pub mod grayscale;
pub mod smooth_noise;
