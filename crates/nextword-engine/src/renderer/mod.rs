pub mod surface;

pub use surface::{RecordingSurface, Surface, SurfaceOp, SurfaceSync};
