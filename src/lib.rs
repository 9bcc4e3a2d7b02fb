//! Gesture-controlled 3D Christmas tree for the browser.
//!
//! `core` is plain Rust and runs on the host (it is what the tests exercise).
//! Everything that touches the DOM, the GPU or the hand detector is compiled
//! for `wasm32` only.

pub mod constants;
pub mod core;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod hands;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use app::{mount, SceneHandle};

#[cfg(target_arch = "wasm32")]
mod app {
    use crate::constants::{CANVAS_ID, VIDEO_ID};
    use crate::core::{
        AppState, CaptureConfig, DecorationKind, DetectorConfig, GestureAdapter, OrbitCamera,
        SceneConfig, SceneController, Subscription,
    };
    use crate::events::{self, EventListener};
    use crate::frame::{self, FrameContext, FrameLoop, SceneClock};
    use crate::hands::HandTracker;
    use crate::input::DragState;
    use crate::{dom, render};
    use instant::Instant;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("ice-westie loaded");
        Ok(())
    }

    /// Mount the scene onto the page and start it.
    ///
    /// Expects `#app-canvas`, `#input-video`, `#instruction` and the
    /// `[data-deco]` buttons to be present, and the detector scripts to have
    /// been loaded. Resolves to a handle whose `dispose()` tears everything down.
    #[wasm_bindgen]
    pub async fn mount() -> Result<SceneHandle, JsValue> {
        match init().await {
            Ok(mounted) => {
                log::info!("[mount] scene mounted");
                Ok(SceneHandle {
                    inner: Some(mounted),
                })
            }
            Err(e) => {
                log::error!("init error: {:?}", e);
                Err(JsValue::from_str(&format!("{e:#}")))
            }
        }
    }

    /// Everything a mounted scene holds on to.
    struct Mounted {
        frame_loop: FrameLoop,
        frame_ctx: Rc<RefCell<FrameContext>>,
        tracker: HandTracker,
        listeners: Vec<EventListener>,
        fist_subscription: Subscription,
    }

    #[wasm_bindgen]
    pub struct SceneHandle {
        inner: Option<Mounted>,
    }

    #[wasm_bindgen]
    impl SceneHandle {
        /// Stop the frame loop and the camera, detach every listener and
        /// release the GPU. Calling it again does nothing.
        pub fn dispose(&mut self) {
            let Some(m) = self.inner.take() else {
                return;
            };
            m.frame_loop.cancel();
            m.tracker.stop();
            m.fist_subscription.unsubscribe();
            drop(m.listeners);
            m.frame_ctx.borrow_mut().gpu = None;
            log::info!("[mount] scene disposed");
        }
    }

    async fn init() -> anyhow::Result<Mounted> {
        let (window, document) = dom::window_document()?;
        let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
        let video: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;

        let mut listeners = vec![events::wire_canvas_resize(&window, &canvas).map_err(js_error)?];

        let config = SceneConfig::default();
        let adapter = Rc::new(GestureAdapter::new(config.fist_threshold));
        let scene = Rc::new(RefCell::new(SceneController::new(config)));
        let camera = Rc::new(RefCell::new(OrbitCamera::default()));
        let app_state = Rc::new(RefCell::new(AppState::default()));
        let selected = Rc::new(Cell::new(DecorationKind::Westie));
        let clock = SceneClock::start();

        let gpu = render::GpuState::new(&canvas).await?;

        let state_for_signal = app_state.clone();
        let fist_subscription = adapter.on_signal(move |is_fist| {
            state_for_signal.borrow_mut().is_fist = is_fist;
        });
        let tracker = HandTracker::start(
            &video,
            &DetectorConfig::default(),
            &CaptureConfig::default(),
            adapter,
            app_state.clone(),
        )?;

        listeners.extend(
            events::wire_input_handlers(&events::InputWiring {
                window: window.clone(),
                canvas: canvas.clone(),
                scene: scene.clone(),
                camera: camera.clone(),
                selected: selected.clone(),
                drag_state: Rc::new(RefCell::new(DragState::default())),
                clock,
            })
            .map_err(js_error)?,
        );
        listeners.extend(events::wire_deco_buttons(&document, &selected).map_err(js_error)?);

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            scene,
            camera,
            app_state,
            document,
            canvas,
            gpu: Some(gpu),
            clock,
            last_instant: Instant::now(),
            shown_state: None,
            instances: Vec::new(),
        }));
        let frame_loop = frame::start_loop(frame_ctx.clone());

        Ok(Mounted {
            frame_loop,
            frame_ctx,
            tracker,
            listeners,
            fist_subscription,
        })
    }

    fn js_error(e: JsValue) -> anyhow::Error {
        anyhow::anyhow!("{:?}", e)
    }
}
