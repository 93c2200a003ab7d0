//! Shared modal helpers.
//!
//! Keeps creation / show / hide logic in one place so the editor modals and
//! the delete confirmation don't duplicate the same boilerplate. The
//! confirmation dialog is the only gate in front of destructive requests:
//! cancelling it issues zero network traffic.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom_utils;
use crate::ui_components::{create_danger_button, create_secondary_button, create_actions_row};

/// Ensure a `<div id="{id}" class="modal">` backdrop exists and return it
/// together with its inner `<div class="modal-content">`.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name("modal");
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };

    Ok((backdrop, content))
}

/// Show the modal backdrop.
pub fn show(modal_backdrop: &Element) {
    dom_utils::show(modal_backdrop);
}

/// Hide the modal backdrop.
pub fn hide(modal_backdrop: &Element) {
    dom_utils::hide(modal_backdrop);
}

/// Hide a modal by id if it exists in the document.
pub fn hide_by_id(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        dom_utils::hide(&el);
    }
}

/// Open a confirmation dialog. `on_confirm` runs only when the destructive
/// button is pressed; cancelling just hides the dialog.
pub fn confirm(
    document: &Document,
    id: &str,
    message: &str,
    confirm_label: &str,
    on_confirm: Rc<dyn Fn()>,
) -> Result<(), JsValue> {
    let (backdrop, content) = ensure_modal(document, id)?;
    content.set_inner_html("");

    let text = document.create_element("p")?;
    text.set_class_name("confirm-text");
    text.set_text_content(Some(message));
    content.append_child(&text)?;

    let actions = create_actions_row(document)?;

    let cancel = create_secondary_button(document, "Cancelar", Some(&format!("{}-cancel", id)))?;
    {
        let backdrop = backdrop.clone();
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            hide(&backdrop);
        }) as Box<dyn FnMut(_)>);
        cancel
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    actions.append_child(&cancel)?;

    let confirm_btn = create_danger_button(document, confirm_label, Some(&format!("{}-confirm", id)))?;
    {
        let backdrop = backdrop.clone();
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            hide(&backdrop);
            on_confirm();
        }) as Box<dyn FnMut(_)>);
        confirm_btn
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    actions.append_child(&confirm_btn)?;

    content.append_child(&actions)?;
    show(&backdrop);
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn click(document: &Document, id: &str) {
        let el: HtmlElement = document
            .get_element_by_id(id)
            .expect("element")
            .unchecked_into();
        el.click();
    }

    #[wasm_bindgen_test]
    fn cancelling_never_runs_the_callback() {
        let document = web_sys::window().unwrap().document().unwrap();
        let fired = Rc::new(Cell::new(0u32));
        let fired_in = fired.clone();

        confirm(
            &document,
            "confirm-cancel-test",
            "¿Eliminar cliente Ana?",
            "Eliminar",
            Rc::new(move || fired_in.set(fired_in.get() + 1)),
        )
        .unwrap();

        click(&document, "confirm-cancel-test-cancel");

        // The delete request is only issued from the callback, so zero
        // callback runs means zero network requests.
        assert_eq!(fired.get(), 0);
        let backdrop = document.get_element_by_id("confirm-cancel-test").unwrap();
        assert!(backdrop.class_list().contains("hidden"));
    }

    #[wasm_bindgen_test]
    fn confirming_runs_the_callback_once() {
        let document = web_sys::window().unwrap().document().unwrap();
        let fired = Rc::new(Cell::new(0u32));
        let fired_in = fired.clone();

        confirm(
            &document,
            "confirm-ok-test",
            "¿Eliminar producto?",
            "Eliminar",
            Rc::new(move || fired_in.set(fired_in.get() + 1)),
        )
        .unwrap();

        click(&document, "confirm-ok-test-confirm");
        assert_eq!(fired.get(), 1);
    }
}
