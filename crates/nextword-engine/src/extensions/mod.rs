// extensions/mod.rs
//
// Animation helpers for the cloud renderer.
// Decoupled from the scene: directives only name elements by id.

pub mod easing;
pub mod timeline;

pub use easing::{Easing, lerp, ease};
pub use timeline::{Directive, DirectiveTarget, Timeline};
