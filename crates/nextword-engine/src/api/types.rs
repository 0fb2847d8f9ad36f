use serde::{Deserialize, Serialize};

/// Unique identifier for a word element in the cloud scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordId(pub u32);

/// Generation counter stamped on every fetch and render pass.
/// Anything carrying an older token than the sequencer's current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StepToken(pub u64);

impl StepToken {
    pub fn next(self) -> Self {
        StepToken(self.0 + 1)
    }
}

/// A word proposed by the predictor, weighted by importance in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWord {
    pub text: String,
    pub importance: f32,
}

impl CandidateWord {
    pub fn new(text: impl Into<String>, importance: f32) -> Self {
        Self {
            text: text.into(),
            importance,
        }
    }
}

/// A candidate word after font scaling, ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedWord {
    pub text: String,
    pub importance: f32,
    pub font_size: f32,
}

/// A word with its computed position. `x`/`y` is the centre of the word's box,
/// relative to the canvas centre.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub importance: f32,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
}

/// Work handed from the sequencer to the cloud renderer for one step.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub token: StepToken,
    pub candidates: Vec<CandidateWord>,
    pub target: String,
}

/// A request for the predictor, tagged with the step it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub token: StepToken,
    pub current_words: Vec<String>,
    pub target_word: String,
}

/// Reported by the cloud renderer once every fade has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudComplete {
    pub token: StepToken,
    pub word: String,
}
