pub mod dom;
pub mod measure;
pub mod predictor;
pub mod runner;
pub mod surface;

pub use runner::AppRunner;

use std::cell::{Cell, RefCell};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Window;

use nextword_engine::{AppCommand, AppConfig, FetchRequest, WordCloudApp};

use crate::dom::Page;
use crate::measure::CanvasMeasure;
use crate::surface::SvgSurface;

thread_local! {
    static RUNNER: RefCell<Option<AppRunner>> = RefCell::new(None);
    static FRAME: RefCell<Option<AnimationFrame>> = RefCell::new(None);
    static LAST_FRAME_MS: Cell<Option<f64>> = Cell::new(None);
    static LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

/// Run `f` against the runner. `None` before `app_init`.
fn with_runner<R>(f: impl FnOnce(&mut AppRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("app not initialized; call app_init() first");
                None
            }
        }
    })
}

/// Surface a Rust error to the caller as a JS `Error`.
fn to_js(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn viewport_command(window: &Window) -> Option<AppCommand> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(AppCommand::Viewport {
        width: width as f32,
        height: height as f32,
    })
}

fn schedule_frame() {
    let handle = request_animation_frame(on_frame);
    FRAME.with(|frame| *frame.borrow_mut() = Some(handle));
}

fn on_frame(timestamp: f64) {
    FRAME.with(|frame| frame.borrow_mut().take());
    let dt_ms = LAST_FRAME_MS.with(|last| {
        let prev = last.replace(Some(timestamp));
        prev.map_or(0.0, |prev| (timestamp - prev).max(0.0))
    });

    let tick = with_runner(|r| (r.tick(dt_ms as f32), r.endpoint().to_string()));
    if let Some((requests, endpoint)) = tick {
        for request in requests {
            dispatch(endpoint.clone(), request);
        }
    }
    schedule_frame();
}

/// Perform one fetch off the frame loop and feed the outcome back in.
fn dispatch(endpoint: String, request: FetchRequest) {
    spawn_local(async move {
        let result = predictor::fetch_candidates(&endpoint, &request).await;
        with_runner(|r| r.on_candidates(request.token, result));
    });
}

/// Build the page, create the app and start the frame loop.
///
/// `config_json` is an optional partial `AppConfig`; missing fields take defaults.
#[wasm_bindgen]
pub fn app_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if RUNNER.with(|cell| cell.borrow().is_some()) {
        log::warn!("app_init called twice; keeping the running app");
        return Ok(());
    }

    let mut config = match config_json {
        Some(json) => AppConfig::from_json(&json).map_err(to_js)?,
        None => AppConfig::default(),
    };
    // fresh rotations and spiral starts on every load unless pinned
    config.seed.get_or_insert_with(random_seed);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let page = Page::build(&document)?;
    let surface = SvgSurface::new(&document, &page.cloud, &config.font.family)?;
    let measure = CanvasMeasure::new(&document, &config.font.family)?;
    let mut app = WordCloudApp::new(config)
        .map_err(to_js)?
        .with_measure(Box::new(measure));
    if let Some(viewport) = viewport_command(&window) {
        app.push_command(viewport);
    }

    let click = EventListener::new(&page.button, "click", |_| {
        with_runner(|r| r.push_command(AppCommand::Start));
    });
    let resize_window = window.clone();
    let resize = EventListener::new(&window, "resize", move |_| {
        if let Some(viewport) = viewport_command(&resize_window) {
            with_runner(|r| r.push_command(viewport));
        }
    });
    LISTENERS.with(|listeners| listeners.borrow_mut().extend([click, resize]));

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(AppRunner::new(app, surface, page));
    });
    schedule_frame();

    log::info!("nextword: initialized");
    Ok(())
}

/// Start, or restart after completion. Same as pressing the button.
#[wasm_bindgen]
pub fn app_start() {
    with_runner(|r| r.push_command(AppCommand::Start));
}

/// Re-issue the current step's fetch after a predictor failure.
#[wasm_bindgen]
pub fn app_retry() {
    with_runner(|r| r.push_command(AppCommand::Retry));
}
