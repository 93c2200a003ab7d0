//! Tiny toast / notification helper.
//! Creates a `#toast-root` container once per page and appends toast divs
//! that remove themselves after a few seconds. Success toasts confirm
//! mutations; read failures go through `window.alert` instead.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, HtmlElement};

const TOAST_LIFETIME_MS: i32 = 4000;

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn show(message: &str, kind: ToastKind) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let document = match window.document() {
        Some(d) => d,
        None => return,
    };

    let root = match ensure_root(&document) {
        Some(el) => el,
        None => return,
    };

    let toast = match document.create_element("div") {
        Ok(el) => el,
        Err(_) => return,
    };
    toast.set_class_name(match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    });
    toast.set_text_content(Some(message));

    // Prepend so the newest appears on top.
    let _ = root.prepend_with_node_1(&toast);

    let toast_el: HtmlElement = toast.unchecked_into();
    let cb = Closure::once_into_js(move || {
        if let Some(parent) = toast_el.parent_node() {
            let _ = parent.remove_child(&toast_el);
        }
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        TOAST_LIFETIME_MS,
    );
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}
