//! Sizing and placement of a candidate set on the canvas.

pub mod canvas;
pub mod measure;
pub mod placer;
pub mod scale;
