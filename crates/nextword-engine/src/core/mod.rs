pub mod scene;
pub mod sentence;
pub mod sequencer;
