// extensions/timeline.rs
//
// Timeline runner: executes declarative animation directives against word
// elements by WordId. Knows nothing about how elements are drawn.
//
// Usage:
//   let mut timeline = Timeline::new();
//   timeline.add(Directive::fade(id, 1.0, 0.0).with_delay(2000.0).with_duration(1000.0));
//   timeline.tick(dt_ms, &mut scene);  // advances all directives, updates elements
//   for event in timeline.drain_completed() { ... }

use crate::api::types::WordId;
use crate::components::color::Rgb;
use crate::core::scene::CloudScene;
use super::easing::{ease, Easing};

/// What property a directive animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectiveTarget {
    /// Animate element opacity.
    Opacity { from: f32, to: f32 },
    /// Animate element fill colour.
    Fill { from: Rgb, to: Rgb },
}

/// One scheduled transition: wait `delay_ms`, then interpolate over `duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub element: WordId,
    pub target: DirectiveTarget,
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    /// Event id reported through `drain_completed` when the directive ends.
    pub on_complete: Option<u32>,
    /// Time since the directive was added, delay included.
    elapsed_ms: f32,
}

impl Directive {
    fn new(element: WordId, target: DirectiveTarget) -> Self {
        Self {
            element,
            target,
            delay_ms: 0.0,
            duration_ms: 0.0,
            easing: Easing::default(),
            on_complete: None,
            elapsed_ms: 0.0,
        }
    }

    /// Opacity transition.
    pub fn fade(element: WordId, from: f32, to: f32) -> Self {
        Self::new(element, DirectiveTarget::Opacity { from, to })
    }

    /// Fill colour transition.
    pub fn fill(element: WordId, from: Rgb, to: Rgb) -> Self {
        Self::new(element, DirectiveTarget::Fill { from, to })
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Whether the delay has elapsed.
    pub fn has_started(&self) -> bool {
        self.elapsed_ms >= self.delay_ms
    }

    /// Normalized progress [0, 1]; 0 while still delayed.
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.delay_ms;
        if active < 0.0 {
            0.0
        } else if self.duration_ms <= 0.0 {
            1.0
        } else {
            (active / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

/// Runs all active directives.
#[derive(Debug, Default)]
pub struct Timeline {
    /// Insertion order is kept so completions are reported deterministically.
    directives: Vec<Directive>,
    completed_events: Vec<u32>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a directive. Its clock starts now.
    pub fn add(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Advance every directive by `dt_ms` and apply values to the scene.
    /// Returns the number of directives that finished this tick.
    pub fn tick(&mut self, dt_ms: f32, scene: &mut CloudScene) -> usize {
        let mut finished = 0;

        for directive in self.directives.iter_mut() {
            directive.elapsed_ms += dt_ms.max(0.0);

            if !directive.has_started() {
                continue;
            }

            let t = directive.progress();
            if let Some(element) = scene.get_mut(directive.element) {
                match directive.target {
                    DirectiveTarget::Opacity { from, to } => {
                        element.set_opacity(ease(from, to, t, directive.easing));
                    }
                    DirectiveTarget::Fill { from, to } => {
                        element.set_fill(from.mix(to, directive.easing.apply(t)));
                    }
                }
            }

            if directive.is_complete() {
                if let Some(event_id) = directive.on_complete {
                    self.completed_events.push(event_id);
                }
                finished += 1;
            }
        }

        self.directives.retain(|d| !d.is_complete());
        finished
    }

    /// Drain completion events recorded since the last drain.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn clear(&mut self) {
        self.directives.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::word::WordElement;

    fn scene_with(id: WordId) -> CloudScene {
        let mut scene = CloudScene::new();
        scene.spawn(WordElement::new(id, "word"));
        scene
    }

    #[test]
    fn nothing_happens_during_delay() {
        let id = WordId(1);
        let mut scene = scene_with(id);
        let mut timeline = Timeline::new();
        timeline.add(
            Directive::fade(id, 1.0, 0.0)
                .with_delay(2000.0)
                .with_duration(1000.0)
                .with_easing(Easing::Linear),
        );

        assert_eq!(timeline.tick(1999.0, &mut scene), 0);
        assert_eq!(scene.get(id).unwrap().opacity, 1.0);
    }

    #[test]
    fn fade_interpolates_then_completes() {
        let id = WordId(1);
        let mut scene = scene_with(id);
        let mut timeline = Timeline::new();
        timeline.add(
            Directive::fade(id, 1.0, 0.0)
                .with_delay(2000.0)
                .with_duration(1000.0)
                .with_easing(Easing::Linear)
                .with_on_complete(7),
        );

        timeline.tick(2500.0, &mut scene);
        assert!((scene.get(id).unwrap().opacity - 0.5).abs() < 0.001);
        assert_eq!(timeline.drain_completed().count(), 0);

        assert_eq!(timeline.tick(500.0, &mut scene), 1);
        assert_eq!(scene.get(id).unwrap().opacity, 0.0);
        assert_eq!(timeline.drain_completed().collect::<Vec<_>>(), vec![7]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn fill_reaches_target_colour() {
        let id = WordId(1);
        let mut scene = scene_with(id);
        let mut timeline = Timeline::new();
        timeline.add(
            Directive::fill(id, Rgb::CYAN, Rgb::RED)
                .with_delay(100.0)
                .with_duration(500.0),
        );

        timeline.tick(350.0, &mut scene);
        let mid = scene.get(id).unwrap().fill;
        assert_ne!(mid, Rgb::CYAN);
        assert_ne!(mid, Rgb::RED);

        timeline.tick(250.0, &mut scene);
        assert_eq!(scene.get(id).unwrap().fill, Rgb::RED);
    }

    #[test]
    fn zero_duration_snaps_at_delay() {
        let id = WordId(1);
        let mut scene = scene_with(id);
        let mut timeline = Timeline::new();
        timeline.add(Directive::fade(id, 1.0, 0.0).with_delay(10.0).with_on_complete(1));
        assert_eq!(timeline.tick(10.0, &mut scene), 1);
        assert_eq!(scene.get(id).unwrap().opacity, 0.0);
    }

    #[test]
    fn completions_reported_in_insertion_order() {
        let a = WordId(1);
        let b = WordId(2);
        let mut scene = scene_with(a);
        scene.spawn(WordElement::new(b, "other"));
        let mut timeline = Timeline::new();
        timeline.add(Directive::fade(a, 1.0, 0.0).with_duration(100.0).with_on_complete(1));
        timeline.add(Directive::fade(b, 1.0, 0.0).with_duration(100.0).with_on_complete(2));
        timeline.tick(100.0, &mut scene);
        assert_eq!(timeline.drain_completed().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn missing_element_still_completes() {
        let mut scene = CloudScene::new();
        let mut timeline = Timeline::new();
        timeline.add(Directive::fade(WordId(9), 1.0, 0.0).with_duration(10.0).with_on_complete(3));
        timeline.tick(10.0, &mut scene);
        assert_eq!(timeline.drain_completed().collect::<Vec<_>>(), vec![3]);
    }
}
