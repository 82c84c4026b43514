pub mod engine;
pub mod palette;
