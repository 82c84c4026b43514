pub mod backend;
pub mod cpu;
pub(crate) mod text;
