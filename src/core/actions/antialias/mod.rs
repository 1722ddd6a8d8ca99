pub mod antialias;
