//! Drawing contract between the cloud scene and whatever shows it.
//!
//! The engine never touches the DOM. A host implements [`Surface`] (the web
//! crate draws SVG) and lets [`SurfaceSync`] decide, each frame, whether the
//! scene needs a full rebuild or only attribute patches.

use crate::components::word::WordElement;
use crate::core::scene::CloudScene;
use crate::layout::canvas::CanvasSize;

pub trait Surface {
    type Error;

    /// Remove every drawn word.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Rebuild from scratch: size the drawing area and draw every element in
    /// paint order.
    fn mount(&mut self, scene: &CloudScene, canvas: CanvasSize) -> Result<(), Self::Error>;

    /// Patch the animated attributes (opacity, fill) of one element.
    fn update(&mut self, element: &WordElement) -> Result<(), Self::Error>;
}

/// Tracks what a surface last showed.
#[derive(Debug, Default)]
pub struct SurfaceSync {
    generation: Option<u32>,
    canvas: Option<CanvasSize>,
}

impl SurfaceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring `surface` up to date with `scene` and clear the dirty flags.
    pub fn present<S: Surface>(
        &mut self,
        surface: &mut S,
        scene: &mut CloudScene,
        canvas: CanvasSize,
    ) -> Result<(), S::Error> {
        let rebuild = self.generation != Some(scene.generation()) || self.canvas != Some(canvas);

        if rebuild {
            if scene.is_empty() {
                surface.clear()?;
            } else {
                surface.mount(scene, canvas)?;
            }
            self.generation = Some(scene.generation());
            self.canvas = Some(canvas);
        } else {
            for element in scene.iter().filter(|e| e.dirty) {
                surface.update(element)?;
            }
        }

        scene.mark_clean();
        Ok(())
    }

    /// Forget the last state so the next `present` rebuilds.
    pub fn invalidate(&mut self) {
        self.generation = None;
        self.canvas = None;
    }
}

/// What a [`RecordingSurface`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Mount { words: Vec<String>, canvas: CanvasSize },
    Update { text: String, opacity: f32, fill: String },
}

/// Headless surface that records calls. Used by tests and native hosts.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    type Error = std::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Clear);
        Ok(())
    }

    fn mount(&mut self, scene: &CloudScene, canvas: CanvasSize) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Mount {
            words: scene.iter().map(|e| e.text.clone()).collect(),
            canvas,
        });
        Ok(())
    }

    fn update(&mut self, element: &WordElement) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Update {
            text: element.text.clone(),
            opacity: element.opacity,
            fill: element.fill.to_css(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::WordId;

    const CANVAS: CanvasSize = CanvasSize { width: 800.0, height: 400.0 };

    fn scene_of(words: &[&str]) -> CloudScene {
        let mut scene = CloudScene::new();
        for (i, w) in words.iter().enumerate() {
            scene.spawn(WordElement::new(WordId(i as u32), *w));
        }
        scene
    }

    #[test]
    fn first_present_mounts() {
        let mut scene = scene_of(&["every", "word"]);
        let mut surface = RecordingSurface::new();
        let mut sync = SurfaceSync::new();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        assert_eq!(
            surface.take(),
            vec![SurfaceOp::Mount { words: vec!["every".into(), "word".into()], canvas: CANVAS }]
        );
        assert!(scene.iter().all(|e| !e.dirty));
    }

    #[test]
    fn only_dirty_elements_are_patched() {
        let mut scene = scene_of(&["every", "word"]);
        let mut surface = RecordingSurface::new();
        let mut sync = SurfaceSync::new();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        surface.take();

        scene.get_mut(WordId(0)).unwrap().set_opacity(0.5);
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        let ops = surface.take();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], SurfaceOp::Update { text, opacity, .. } if text == "every" && *opacity == 0.5));

        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        assert!(surface.take().is_empty());
    }

    #[test]
    fn reorder_triggers_rebuild() {
        let mut scene = scene_of(&["a", "b"]);
        let mut surface = RecordingSurface::new();
        let mut sync = SurfaceSync::new();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        surface.take();

        scene.raise(WordId(0));
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        assert_eq!(
            surface.take(),
            vec![SurfaceOp::Mount { words: vec!["b".into(), "a".into()], canvas: CANVAS }]
        );
    }

    #[test]
    fn emptied_scene_clears() {
        let mut scene = scene_of(&["a"]);
        let mut surface = RecordingSurface::new();
        let mut sync = SurfaceSync::new();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        surface.take();

        scene.clear();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        assert_eq!(surface.take(), vec![SurfaceOp::Clear]);
    }

    #[test]
    fn canvas_change_triggers_rebuild() {
        let mut scene = scene_of(&["a"]);
        let mut surface = RecordingSurface::new();
        let mut sync = SurfaceSync::new();
        sync.present(&mut surface, &mut scene, CANVAS).unwrap();
        surface.take();

        sync.present(&mut surface, &mut scene, CanvasSize::new(400.0, 800.0)).unwrap();
        assert!(matches!(surface.take()[0], SurfaceOp::Mount { .. }));
    }
}
