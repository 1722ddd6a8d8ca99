pub mod explorer;
pub mod export;
pub mod interactive;
pub mod ports;
