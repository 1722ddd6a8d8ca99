pub mod png;

pub use png::PngFilePresenter;
