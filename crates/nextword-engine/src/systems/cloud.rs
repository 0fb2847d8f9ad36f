//! Cloud renderer: one render pass per sequencer step.
//!
//! A pass normalizes the candidate set, sizes words with a power scale, places
//! them, builds the scene and schedules the fade/highlight directives. `tick`
//! drives the timeline and reports [`CloudComplete`] exactly once, after the
//! last fade settles.

use glam::Vec2;

use crate::api::config::{ColorConfig, FontConfig, TimingConfig};
use crate::api::types::{
    CandidateWord, CloudComplete, PlacedWord, RenderJob, SizedWord, StepToken, WordId,
};
use crate::components::word::WordElement;
use crate::core::scene::CloudScene;
use crate::extensions::easing::Easing;
use crate::extensions::timeline::{Directive, Timeline};
use crate::layout::canvas::CanvasSize;
use crate::layout::measure::{EstimatedMeasure, TextMeasure};
use crate::layout::placer::{Placer, SpiralPlacer};
use crate::layout::scale::font_scale;

/// Timeline event id carried by every fade directive.
const EVENT_FADE_DONE: u32 = 1;

/// Re-placements at a size that fits one orientation before forcing both.
const TARGET_FIT_ATTEMPTS: usize = 4;

/// Shrunk targets leave this much of the fitting size, so the spiral has slack.
const FIT_MARGIN: f32 = 0.95;

/// Ensure the target is in the set. If missing it is appended with the current
/// maximum importance (100 if that maximum is zero), so it is drawn at least as
/// large as any other word.
pub fn normalize(candidates: &[CandidateWord], target: &str) -> Vec<CandidateWord> {
    let mut words = candidates.to_vec();
    if !target.is_empty() && !words.iter().any(|w| w.text == target) {
        let max = words
            .iter()
            .map(|w| w.importance)
            .filter(|v| v.is_finite())
            .fold(f32::NEG_INFINITY, f32::max);
        let importance = if max.is_finite() && max != 0.0 { max } else { 100.0 };
        words.push(CandidateWord::new(target, importance));
    }
    words
}

/// Bookkeeping for the pass currently on screen.
#[derive(Debug, Clone)]
struct RenderPass {
    token: StepToken,
    target: String,
    fading: usize,
    settled: usize,
    reported: bool,
}

pub struct CloudRenderer {
    font: FontConfig,
    timing: TimingConfig,
    colors: ColorConfig,
    placer: Box<dyn Placer>,
    measure: Box<dyn TextMeasure>,
    scene: CloudScene,
    timeline: Timeline,
    canvas: CanvasSize,
    pass: Option<RenderPass>,
    next_id: u32,
}

impl CloudRenderer {
    pub fn new(font: FontConfig, timing: TimingConfig, colors: ColorConfig, seed: u64) -> Self {
        let placer = SpiralPlacer::new(seed, font.padding);
        Self {
            font,
            timing,
            colors,
            placer: Box::new(placer),
            measure: Box::new(EstimatedMeasure::default()),
            scene: CloudScene::new(),
            timeline: Timeline::new(),
            canvas: CanvasSize::new(0.0, 0.0),
            pass: None,
            next_id: 1,
        }
    }

    // -- Builder methods --

    pub fn with_placer(mut self, placer: Box<dyn Placer>) -> Self {
        self.placer = placer;
        self
    }

    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn set_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    // -- Queries --

    pub fn scene(&self) -> &CloudScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut CloudScene {
        &mut self.scene
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Number of fade directives in the current pass.
    pub fn fading_count(&self) -> usize {
        self.pass.as_ref().map_or(0, |p| p.fading)
    }

    // -- Pass lifecycle --

    /// Start a new pass, replacing whatever is on screen. Returns the number of
    /// words placed. An empty candidate set renders nothing and never completes.
    pub fn begin(&mut self, job: RenderJob, canvas: CanvasSize) -> usize {
        self.clear();
        self.canvas = canvas;

        if job.candidates.is_empty() {
            log::debug!("cloud: empty candidate set, nothing to render");
            return 0;
        }

        let words = normalize(&job.candidates, &job.target);
        let scale = font_scale(&words, &self.font);

        let mut sized: Vec<SizedWord> = words
            .into_iter()
            .map(|w| SizedWord {
                font_size: scale.apply(w.importance),
                text: w.text,
                importance: w.importance,
            })
            .collect();
        // target first, then largest first; stable so equal sizes keep predictor order
        sized.sort_by(|a, b| {
            let a_target = a.text == job.target;
            let b_target = b.text == job.target;
            b_target
                .cmp(&a_target)
                .then(b.font_size.total_cmp(&a.font_size))
        });

        let placed = self.place_keeping_target(&mut sized, &job.target, canvas);

        let mut fading = 0;
        let mut targets = Vec::new();
        for word in &placed {
            let id = WordId(self.next_id);
            self.next_id += 1;

            let is_target = word.text == job.target;
            let mut element = WordElement::from_placed(id, word).with_fill(self.colors.initial_fill);
            if is_target {
                element = element.highlighted();
                targets.push(id);
            } else {
                self.timeline.add(
                    Directive::fade(id, 1.0, 0.0)
                        .with_delay(self.timing.fade_delay(fading))
                        .with_duration(self.timing.fade_duration_ms)
                        .with_easing(Easing::CubicInOut)
                        .with_on_complete(EVENT_FADE_DONE),
                );
                fading += 1;
            }
            self.scene.spawn(element);
        }

        let highlight_delay = self.timing.highlight_delay(fading).max(0.0);
        for id in targets {
            self.scene.raise(id);
            self.timeline.add(
                Directive::fill(id, self.colors.initial_fill, self.colors.highlight_fill)
                    .with_delay(highlight_delay)
                    .with_duration(self.timing.highlight_duration_ms),
            );
        }

        log::info!(
            "cloud: placed {}/{} words, {} fading, target \"{}\"",
            placed.len(),
            sized.len(),
            fading,
            job.target
        );

        self.pass = Some(RenderPass {
            token: job.token,
            target: job.target,
            fading,
            settled: 0,
            reported: false,
        });
        placed.len()
    }

    /// Place the set so the target always lands. The target is placed first, so
    /// it is only dropped when its box is larger than the canvas; it is then
    /// shrunk until it fits in either orientation, and as a last resort in both.
    /// Other words are capped at the target's size so it stays the largest.
    fn place_keeping_target(
        &mut self,
        sized: &mut [SizedWord],
        target: &str,
        canvas: CanvasSize,
    ) -> Vec<PlacedWord> {
        let mut placed = self.placer.place(sized, canvas, self.measure.as_ref());

        for attempt in 0..=TARGET_FIT_ATTEMPTS {
            if placed.iter().any(|p| p.text == target) {
                break;
            }
            let Some(word) = sized.iter().find(|w| w.text == target) else {
                break;
            };
            let both_orientations = attempt == TARGET_FIT_ATTEMPTS;
            let scale = self.fit_scale(&word.text, word.font_size, canvas, both_orientations);
            let size = word.font_size * scale;
            log::debug!(
                "cloud: target \"{}\" did not fit at {}px, retrying at {}px",
                target, word.font_size, size
            );
            for w in sized.iter_mut() {
                w.font_size = w.font_size.min(size);
            }
            placed = self.placer.place(sized, canvas, self.measure.as_ref());
        }

        if !placed.iter().any(|p| p.text == target) {
            log::warn!("cloud: target \"{}\" could not be placed", target);
        }
        placed
    }

    /// Scale factor (at most 1) that makes `text` fit the empty canvas with
    /// padding, unrotated or rotated, or in both orientations when `both` is set.
    fn fit_scale(&self, text: &str, font_size: f32, canvas: CanvasSize, both: bool) -> f32 {
        let size = self.measure.measure(text, font_size);
        let avail = Vec2::new(canvas.width, canvas.height) - Vec2::splat(2.0 * self.font.padding);
        if size.x <= 0.0 || size.y <= 0.0 || avail.x <= 0.0 || avail.y <= 0.0 {
            return 1.0;
        }
        let upright = (avail.x / size.x).min(avail.y / size.y);
        let turned = (avail.x / size.y).min(avail.y / size.x);
        let fit = if both { upright.min(turned) } else { upright.max(turned) };
        if fit >= 1.0 {
            1.0
        } else {
            fit * FIT_MARGIN
        }
    }

    /// Advance animations. Returns the completion once, when every fade has
    /// settled; with nothing to fade that is the first tick after `begin`.
    pub fn tick(&mut self, dt_ms: f32) -> Option<CloudComplete> {
        self.timeline.tick(dt_ms, &mut self.scene);

        let pass = self.pass.as_mut()?;
        pass.settled += self
            .timeline
            .drain_completed()
            .filter(|&e| e == EVENT_FADE_DONE)
            .count();

        if pass.reported || pass.settled < pass.fading {
            return None;
        }
        pass.reported = true;
        Some(CloudComplete {
            token: pass.token,
            word: pass.target.clone(),
        })
    }

    /// Drop the current pass, its elements and any pending directives.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.timeline.clear();
        self.pass = None;
    }
}
