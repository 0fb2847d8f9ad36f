//! Composition root: wires the sequencer to the cloud renderer.
//!
//! The app never performs I/O. Fetch requests pile up in an outbox that the host
//! drains and executes; the host feeds responses back through `on_candidates`
//! and drives animation time through `tick`.

use glam::Vec2;

use crate::api::config::AppConfig;
use crate::api::error::{ConfigError, PredictorError};
use crate::api::types::{CandidateWord, CloudComplete, FetchRequest, StepToken};
use crate::core::scene::CloudScene;
use crate::core::sentence::Sentence;
use crate::core::sequencer::{Effect, Sequencer};
use crate::input::queue::{AppCommand, CommandQueue};
use crate::layout::canvas::CanvasSize;
use crate::layout::measure::TextMeasure;
use crate::systems::cloud::CloudRenderer;

/// Suffix shown after the revealed text while words remain.
pub const ELLIPSIS: &str = "...";

/// What the start/restart control should show. `None` in [`AppView`] means hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub label: &'static str,
}

/// Snapshot of the text panel and control for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    /// Displayed words; the last one carries the ellipsis while words remain.
    pub words: Vec<String>,
    /// Index of the most recently revealed word (gets the red-to-white fade).
    pub fresh_index: Option<usize>,
    pub control: Option<ControlView>,
    pub completed: bool,
}

pub struct WordCloudApp {
    config: AppConfig,
    sequencer: Sequencer,
    renderer: CloudRenderer,
    commands: CommandQueue,
    outbox: Vec<FetchRequest>,
    viewport: Vec2,
}

impl WordCloudApp {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let sentence = Sentence::parse(&config.sentence)?;
        let renderer = CloudRenderer::new(
            config.font.clone(),
            config.timing.clone(),
            config.colors.clone(),
            config.layout_seed(),
        );
        Ok(Self {
            sequencer: Sequencer::new(sentence),
            renderer,
            commands: CommandQueue::new(),
            outbox: Vec::new(),
            viewport: Vec2::new(1280.0, 800.0),
            config,
        })
    }

    /// Replace the text measurer (browsers measure with a real font).
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.renderer.set_measure(measure);
        self
    }

    // -- Queries --

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn scene(&self) -> &CloudScene {
        self.renderer.scene()
    }

    pub fn scene_mut(&mut self) -> &mut CloudScene {
        self.renderer.scene_mut()
    }

    /// Canvas size for the current viewport.
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::from_viewport(self.viewport.x, self.viewport.y, &self.config.canvas)
    }

    /// Canvas the on-screen cloud was laid out for.
    pub fn cloud_canvas(&self) -> CanvasSize {
        self.renderer.canvas()
    }

    pub fn view(&self) -> AppView {
        let has_more = self.sequencer.has_more();
        let mut words = self.sequencer.reveal().revealed().to_vec();
        if has_more {
            if let Some(last) = words.last_mut() {
                last.push_str(ELLIPSIS);
            }
        }
        let fresh_index = words.len().checked_sub(1);

        let control = (!self.sequencer.is_auto_advancing()).then(|| ControlView {
            label: if self.sequencer.is_completed() { "Restart" } else { "Start" },
        });

        AppView {
            words,
            fresh_index,
            control,
            completed: self.sequencer.is_completed(),
        }
    }

    // -- Commands --

    /// Queue a command for the next `tick`.
    pub fn push_command(&mut self, command: AppCommand) {
        self.commands.push(command);
    }

    /// Start or restart. Any on-screen pass and unsent request is discarded.
    pub fn start(&mut self) {
        self.renderer.clear();
        self.outbox.clear();
        let effect = self.sequencer.start();
        self.apply(effect);
    }

    pub fn retry(&mut self) {
        let effect = self.sequencer.retry();
        self.apply(effect);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Feed a predictor outcome back in.
    pub fn on_candidates(
        &mut self,
        token: StepToken,
        result: Result<Vec<CandidateWord>, PredictorError>,
    ) {
        match result {
            Ok(candidates) => {
                let effect = self.sequencer.candidates_received(token, candidates);
                self.apply(effect);
            }
            Err(err) => self.sequencer.fetch_failed(token, &err),
        }
    }

    /// Process queued commands and advance animation time.
    pub fn tick(&mut self, dt_ms: f32) {
        for command in self.commands.drain() {
            match command {
                AppCommand::Start => self.start(),
                AppCommand::Retry => self.retry(),
                AppCommand::Viewport { width, height } => self.set_viewport(width, height),
            }
        }

        if let Some(done) = self.renderer.tick(dt_ms) {
            let effect = self.finish_pass(done);
            self.apply(effect);
        }
    }

    /// Take the fetches the host should perform now.
    pub fn drain_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// The cloud is cleared once its word has been handed to the sequencer.
    fn finish_pass(&mut self, done: CloudComplete) -> Option<Effect> {
        self.renderer.clear();
        self.sequencer.animation_complete(done.token, &done.word)
    }

    fn apply(&mut self, mut effect: Option<Effect>) {
        while let Some(next) = effect.take() {
            match next {
                Effect::Fetch(request) => {
                    log::debug!(
                        "app: fetch {:?} for \"{}\"",
                        request.token, request.target_word
                    );
                    self.outbox.push(request);
                }
                Effect::Render(job) => {
                    let canvas = self.canvas();
                    self.renderer.begin(job, canvas);
                    // nothing to fade: the pass completes right after placement
                    if let Some(done) = self.renderer.tick(0.0) {
                        effect = self.finish_pass(done);
                    }
                }
            }
        }
    }
}
