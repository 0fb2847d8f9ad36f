pub mod color;
pub mod word;
