use crate::constants::{DECO_ATTR, DECO_BAR_ID, HIDDEN_CLASS, INSTRUCTION_ID, SELECTED_CLASS};
use crate::core::{AppState, DecorationKind};
use crate::dom;
use web_sys as web;

#[inline]
pub fn set_instruction(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(INSTRUCTION_ID) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_deco_bar_visible(document: &web::Document, visible: bool) {
    if let Some(el) = document.get_element_by_id(DECO_BAR_ID) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1(HIDDEN_CLASS);
        } else {
            _ = cl.add_1(HIDDEN_CLASS);
        }
    }
}

/// Highlight the button for `kind` and clear the others.
pub fn mark_selected(document: &web::Document, kind: DecorationKind) {
    for el in dom::query_all(document, &format!("[{DECO_ATTR}]")) {
        let is_selected = el.get_attribute(DECO_ATTR).as_deref() == Some(kind.id());
        _ = el.class_list().toggle_with_force(SELECTED_CLASS, is_selected);
    }
}

/// Bring the instruction line and decoration bar in line with `state`.
pub fn render_state(document: &web::Document, state: &AppState) {
    set_instruction(document, state.instruction());
    set_deco_bar_visible(document, state.decorations_enabled());
}
