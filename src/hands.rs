//! Bindings to the MediaPipe `Hands` detector and its `Camera` capture loop.
//!
//! Both are loaded by the page as plain globals. The capture loop pushes
//! every video frame into the detector; each detector result is reduced to
//! a fist signal by [`GestureAdapter`] and published to its subscribers.

use crate::constants::HANDS_ASSET_BASE;
use crate::core::config::{CaptureConfig, DetectorConfig};
use crate::core::gesture::{GestureAdapter, Landmark};
use crate::core::{AppState, SceneError};
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    type Hands;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &JsValue) -> Result<Hands, JsValue>;

    #[wasm_bindgen(method, js_name = setOptions)]
    fn set_options(this: &Hands, options: &JsValue);

    #[wasm_bindgen(method, js_name = onResults)]
    fn on_results(this: &Hands, callback: &Function);

    #[wasm_bindgen(method)]
    fn send(this: &Hands, inputs: &JsValue) -> Promise;

    #[wasm_bindgen(method)]
    fn close(this: &Hands) -> Promise;

    #[wasm_bindgen(js_name = Camera)]
    type CaptureLoop;

    #[wasm_bindgen(constructor, js_class = "Camera", catch)]
    fn new(video: &web::HtmlVideoElement, options: &JsValue) -> Result<CaptureLoop, JsValue>;

    #[wasm_bindgen(method)]
    fn start(this: &CaptureLoop) -> Promise;

    #[wasm_bindgen(method)]
    fn stop(this: &CaptureLoop) -> Promise;
}

fn js_object(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj)
}

fn require_global(name: &str) -> Result<(), SceneError> {
    let present = Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|v| !v.is_undefined())
        .unwrap_or(false);
    if present {
        Ok(())
    } else {
        Err(SceneError::DetectorUnavailable(name.to_string()))
    }
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// First hand of a detector result, or `None` when nothing was detected.
fn first_hand(results: &JsValue) -> Option<Vec<Landmark>> {
    let hands = Reflect::get(results, &JsValue::from_str("multiHandLandmarks")).ok()?;
    let hands: Array = hands.dyn_into().ok()?;
    let hand: Array = hands.get(0).dyn_into().ok()?;
    let coord = |point: &JsValue, key: &str| {
        Reflect::get(point, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    };
    Some(
        hand.iter()
            .map(|p| Landmark::new(coord(&p, "x"), coord(&p, "y"), coord(&p, "z")))
            .collect(),
    )
}

/// JS objects and the callbacks they hold. The callbacks must outlive any
/// `send()` still in flight, so they are only dropped once both shutdown
/// promises have settled.
struct Running {
    hands: Hands,
    capture: CaptureLoop,
    _locate_file: Closure<dyn Fn(String) -> String>,
    _on_results: Closure<dyn FnMut(JsValue)>,
    _on_frame: Closure<dyn FnMut() -> Promise>,
}

/// A running detector plus capture loop. Stopped by [`HandTracker::stop`]
/// or on drop.
pub struct HandTracker {
    running: Option<Running>,
    adapter: Rc<GestureAdapter>,
}

impl HandTracker {
    /// Create the detector and the capture loop, then start capturing.
    ///
    /// Capture starts asynchronously: success flips `camera_active` in
    /// `app_state`; a rejection (usually denied permission) is logged and
    /// leaves the camera instruction on screen.
    pub fn start(
        video: &web::HtmlVideoElement,
        detector: &DetectorConfig,
        capture: &CaptureConfig,
        adapter: Rc<GestureAdapter>,
        app_state: Rc<RefCell<AppState>>,
    ) -> anyhow::Result<Self> {
        require_global("Hands")?;
        require_global("Camera")?;

        let locate_file = Closure::wrap(
            Box::new(|file: String| format!("{HANDS_ASSET_BASE}{file}")) as Box<dyn Fn(String) -> String>,
        );
        let hands = Hands::new(&js_object(&[("locateFile", locate_file.as_ref().clone())]).map_err(js_error)?)
            .map_err(|e| SceneError::DetectorUnavailable(format!("{:?}", e)))?;
        let options = js_object(&[
            ("maxNumHands", detector.max_num_hands.into()),
            ("modelComplexity", detector.model_complexity.into()),
            ("minDetectionConfidence", detector.min_detection_confidence.into()),
            ("minTrackingConfidence", detector.min_tracking_confidence.into()),
        ])
        .map_err(js_error)?;
        hands.set_options(&options);

        let adapter_cb = adapter.clone();
        let on_results = Closure::wrap(Box::new(move |results: JsValue| {
            if adapter_cb.is_closed() {
                return;
            }
            let hand = first_hand(&results);
            adapter_cb.on_frame(hand.as_deref());
        }) as Box<dyn FnMut(JsValue)>);
        hands.on_results(on_results.as_ref().unchecked_ref());

        let inputs = js_object(&[("image", video.clone().into())]).map_err(js_error)?;
        let hands_for_frame: JsValue = hands.clone().into();
        let on_frame = Closure::wrap(Box::new(move || {
            hands_for_frame.unchecked_ref::<Hands>().send(&inputs)
        }) as Box<dyn FnMut() -> Promise>);

        let capture_options = js_object(&[
            ("onFrame", on_frame.as_ref().clone()),
            ("width", capture.width.into()),
            ("height", capture.height.into()),
        ])
        .map_err(js_error)?;
        let capture_loop = CaptureLoop::new(video, &capture_options)
            .map_err(|e| SceneError::CameraUnavailable(format!("{:?}", e)))?;

        let started = capture_loop.start();
        spawn_local(async move {
            match JsFuture::from(started).await {
                Ok(_) => {
                    app_state.borrow_mut().camera_active = true;
                    log::info!("[camera] capture started");
                }
                Err(e) => {
                    log::warn!("[camera] capture failed to start: {:?}", e);
                }
            }
        });

        Ok(Self {
            running: Some(Running {
                hands,
                capture: capture_loop,
                _locate_file: locate_file,
                _on_results: on_results,
                _on_frame: on_frame,
            }),
            adapter,
        })
    }

    /// Stop capturing and close the detector.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        // Late results still reach `on_results`; they are ignored from here on.
        self.adapter.close();
        let stopped = running.capture.stop();
        let closed = running.hands.close();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(stopped).await {
                log::warn!("[camera] stop failed: {:?}", e);
            }
            if let Err(e) = JsFuture::from(closed).await {
                log::warn!("[camera] detector close failed: {:?}", e);
            }
            drop(running);
            log::info!("[camera] capture stopped");
        });
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
