use crate::constants::MAX_PIXEL_RATIO;
use crate::core::SceneError;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Result<(web::Window, web::Document), SceneError> {
    let window = web::window().ok_or(SceneError::NoWindow)?;
    let document = window.document().ok_or(SceneError::NoWindow)?;
    Ok((window, document))
}

/// Look up `#id` and cast it to the element type the caller expects.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Result<T, SceneError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SceneError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| SceneError::WrongElementType(id.to_string()))
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
