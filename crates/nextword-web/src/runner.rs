use nextword_engine::{
    AppCommand, AppView, CandidateWord, FetchRequest, PredictorError, StepToken, SurfaceSync,
    WordCloudApp,
};

use crate::dom::Page;
use crate::surface::SvgSurface;

/// Wires the app to the page: drives time, presents the scene and redraws the
/// text panel.
///
/// The crate keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`, because wasm-bindgen cannot export the app directly.
/// Fetches are not performed here; `tick` hands them back to the caller, which
/// spawns them and feeds results into `on_candidates`.
pub struct AppRunner {
    app: WordCloudApp,
    surface: SvgSurface,
    sync: SurfaceSync,
    page: Page,
    last_view: Option<AppView>,
}

impl AppRunner {
    pub fn new(app: WordCloudApp, surface: SvgSurface, page: Page) -> Self {
        Self {
            app,
            surface,
            sync: SurfaceSync::new(),
            page,
            last_view: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.app.config().endpoint
    }

    /// Queue a command for the next frame.
    pub fn push_command(&mut self, command: AppCommand) {
        self.app.push_command(command);
    }

    pub fn on_candidates(
        &mut self,
        token: StepToken,
        result: Result<Vec<CandidateWord>, PredictorError>,
    ) {
        self.app.on_candidates(token, result);
    }

    /// Run one frame. Returns the fetches to perform.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<FetchRequest> {
        self.app.tick(dt_ms);

        let canvas = self.app.cloud_canvas();
        if let Err(err) = self
            .sync
            .present(&mut self.surface, self.app.scene_mut(), canvas)
        {
            log::warn!("svg surface error: {:?}", err);
            self.sync.invalidate();
        }

        self.refresh_page();
        self.app.drain_requests()
    }

    /// Redraw the text panel and button when the view changed. Rebuilding the
    /// spans restarts the fade, so unchanged views are skipped.
    fn refresh_page(&mut self) {
        let view = self.app.view();
        if self.last_view.as_ref() == Some(&view) {
            return;
        }
        if let Err(err) = self.page.render(&view) {
            log::warn!("page render error: {:?}", err);
        }
        self.last_view = Some(view);
    }
}
