pub mod api;
pub mod app;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod layout;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{AppConfig, CanvasConfig, ColorConfig, FontConfig, TimingConfig, DEFAULT_SEED};
pub use api::error::{ConfigError, PredictorError};
pub use api::types::{
    CandidateWord, CloudComplete, FetchRequest, PlacedWord, RenderJob, SizedWord, StepToken,
    WordId,
};
pub use app::{AppView, ControlView, WordCloudApp, ELLIPSIS};
pub use components::color::Rgb;
pub use components::word::WordElement;
pub use core::scene::CloudScene;
pub use core::sentence::{RevealState, Sentence};
pub use core::sequencer::{Effect, Sequencer, SequencerState};
pub use systems::cloud::{normalize, CloudRenderer};
pub use renderer::surface::{RecordingSurface, Surface, SurfaceSync};
pub use bridge::protocol::{parse_candidates, PredictRequest, PredictResponse};
pub use input::queue::{AppCommand, CommandQueue};
pub use layout::canvas::CanvasSize;
pub use layout::measure::{EstimatedMeasure, TextMeasure};
pub use layout::placer::{Placer, SpiralPlacer};
pub use layout::scale::{font_scale, PowScale};

// Extensions: animation helpers
pub use extensions::{Easing, lerp, ease, Directive, DirectiveTarget, Timeline};
