//! dom_utils.rs - thin helper layer for repetitive DOM operations.
//!
//! Small ergonomic wrappers for the show / hide / activate patterns the
//! pages repeat constantly, plus typed element lookups, so the rest of the
//! code base is not sprinkled with casts.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// Make an element visible by toggling CSS classes.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Mark a tab button as the active one.
pub fn set_active(btn: &Element) {
    btn.set_class_name("tab-button active");
}

/// Remove the `active` modifier from a tab button.
pub fn set_inactive(btn: &Element) {
    btn.set_class_name("tab-button");
}

/// Fetch an `<input>` by id and cast it. Returns `None` when the element is
/// missing or of a different type; fixed page chrome uses ids that always
/// exist, dynamic form fields may legitimately be absent.
pub fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Current value of an `<input>` by id, empty string when missing.
pub fn input_value(document: &Document, id: &str) -> String {
    input_by_id(document, id)
        .map(|input| input.value())
        .unwrap_or_default()
}
