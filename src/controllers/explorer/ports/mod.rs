pub mod explorer_input;
