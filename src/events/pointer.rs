use super::EventListener;
use crate::core::placement::uv_to_ndc;
use crate::core::{DecorationKind, OrbitCamera, SceneController};
use crate::frame::SceneClock;
use crate::input::{self, DragState};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneController>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub selected: Rc<Cell<DecorationKind>>,
    pub drag_state: Rc<RefCell<DragState>>,
    pub clock: SceneClock,
}

pub fn wire_input_handlers(w: &InputWiring) -> Result<Vec<EventListener>, JsValue> {
    Ok(vec![
        wire_click(w)?,
        wire_pointerdown(w)?,
        wire_pointermove(w)?,
        wire_pointerup(w, "pointerup")?,
        wire_pointerup(w, "pointercancel")?,
        wire_wheel(w)?,
    ])
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
fn canvas_uv(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_uv(
        client_pos(ev),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

// Click on the canvas: cast through the camera and try to place a decoration
fn wire_click(w: &InputWiring) -> Result<EventListener, JsValue> {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "click", move |ev: web::MouseEvent| {
        let uv = canvas_uv(&ev, &w.canvas);
        let aspect = w.canvas.width() as f32 / w.canvas.height().max(1) as f32;
        let ray = w.camera.borrow().ray(uv_to_ndc(uv), aspect);
        let now = w.clock.now_sec();
        if let Some(i) = w.scene.borrow_mut().click(&ray, w.selected.get(), now) {
            log::info!("[click] decoration #{} placed", i);
        }
    })
}

fn wire_pointerdown(w: &InputWiring) -> Result<EventListener, JsValue> {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "pointerdown", move |ev: web::PointerEvent| {
        w.drag_state
            .borrow_mut()
            .press(ev.pointer_id(), client_pos(&ev));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    })
}

fn wire_pointermove(w: &InputWiring) -> Result<EventListener, JsValue> {
    let w = w.clone();
    let target = w.window.clone();
    EventListener::new(&target, "pointermove", move |ev: web::PointerEvent| {
        let delta = w
            .drag_state
            .borrow_mut()
            .motion(ev.pointer_id(), client_pos(&ev));
        if let Some(delta) = delta {
            let height = w.canvas.get_bounding_client_rect().height() as f32;
            w.camera.borrow_mut().drag(delta, height);
        }
    })
}

fn wire_pointerup(w: &InputWiring, kind: &'static str) -> Result<EventListener, JsValue> {
    let w = w.clone();
    let target = w.window.clone();
    EventListener::new(&target, kind, move |ev: web::PointerEvent| {
        w.drag_state.borrow_mut().release(ev.pointer_id());
    })
}

fn wire_wheel(w: &InputWiring) -> Result<EventListener, JsValue> {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "wheel", move |ev: web::WheelEvent| {
        w.camera.borrow_mut().zoom(ev.delta_y() as f32);
        ev.prevent_default();
    })
}
