pub mod colour_mode;
pub mod maps;
pub mod noise_offsets;
pub mod palette;
pub mod palette_table;
pub mod perlin;
