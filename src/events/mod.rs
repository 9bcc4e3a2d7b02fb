use crate::constants::DECO_ATTR;
use crate::core::DecorationKind;
use crate::{dom, overlay};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

mod pointer;
pub use pointer::{wire_input_handlers, InputWiring};

/// A DOM listener that stays attached for as long as this value lives.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    /// Attach `handler` for `kind` events on `target`. Events that are not
    /// an `E` are ignored.
    pub fn new<E, F>(target: &web::EventTarget, kind: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

// Keep the canvas backing store matched to its CSS size
pub fn wire_canvas_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
) -> Result<EventListener, JsValue> {
    dom::sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    EventListener::new(window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
    })
}

/// One click listener per `[data-deco]` button; clicking selects that kind.
pub fn wire_deco_buttons(
    document: &web::Document,
    selected: &Rc<Cell<DecorationKind>>,
) -> Result<Vec<EventListener>, JsValue> {
    overlay::mark_selected(document, selected.get());
    dom::query_all(document, &format!("[{DECO_ATTR}]"))
        .into_iter()
        .map(|button| {
            let id = button.get_attribute(DECO_ATTR).unwrap_or_default();
            let kind = DecorationKind::from_id(&id);
            let selected = selected.clone();
            let doc = document.clone();
            EventListener::new(&button, "click", move |_: web::MouseEvent| {
                selected.set(kind);
                overlay::mark_selected(&doc, kind);
                log::info!("[deco] selected {}", kind.id());
            })
        })
        .collect()
}
