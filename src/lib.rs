use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

#[macro_use]
mod macros;

mod components;
mod config;
mod constants;
mod cookies;
mod dates;
mod dom_utils;
mod messages;
mod models;
mod network;
mod pages;
mod state;
mod storage;
mod toast;
mod ui_components;
mod update;
mod utils;

thread_local! {
    // Keeps the configUpdated listener alive for the app's lifetime;
    // dropping the handle would unsubscribe it.
    static CONFIG_SUBSCRIPTION: RefCell<Option<config::ConfigSubscription>> =
        RefCell::new(None);
}

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Better panic messages in the browser console.
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    ensure_base_styles(&document)?;
    create_base_layout(&document)?;

    // Config: fetch once, re-apply on every configUpdated broadcast.
    let subscription = config::ConfigSubscription::subscribe(|| {
        let current = state::APP_STATE.with(|state| state.borrow().config.clone());
        config::apply_to_dom(&current);
    })?;
    CONFIG_SUBSCRIPTION.with(|cell| {
        *cell.borrow_mut() = Some(subscription);
    });
    config::load_config();

    // Land on the clients list.
    state::dispatch_global_message(messages::Message::NavigateTo(pages::PageKind::Clients));

    Ok(())
}

// Header with one tab per page plus the page container.
fn create_base_layout(document: &Document) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let header = document.create_element("header")?;
    header.set_id("app-header");

    let brand = document.create_element("h1")?;
    brand.set_class_name("brand");
    brand.set_text_content(Some("Back-office"));
    header.append_child(&brand)?;

    let tabs = document.create_element("nav")?;
    tabs.set_id("tabs-container");
    tabs.set_class_name("tabs-container");

    for kind in pages::PageKind::ALL {
        let tab = document.create_element("button")?;
        tab.set_id(&format!("tab-{}", kind.slug()));
        tab.set_class_name("tab-button");
        tab.set_attribute(constants::ATTR_TYPE, constants::BUTTON_TYPE_BUTTON)?;
        tab.set_text_content(Some(kind.spec().title));

        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            state::dispatch_global_message(messages::Message::NavigateTo(kind));
        }) as Box<dyn FnMut(_)>);
        tab.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();

        tabs.append_child(&tab)?;
    }
    header.append_child(&tabs)?;
    body.append_child(&header)?;

    let container = document.create_element("main")?;
    container.set_id("page-container");
    body.append_child(&container)?;

    Ok(())
}

// Minimal app-wide styles injected once, same trick the toast root uses:
// no build pipeline for CSS, the bundle carries what it needs.
fn ensure_base_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("app-styles").is_some() {
        return Ok(());
    }

    let css = "
body{font-family:system-ui,Arial,sans-serif;margin:0;color:#1f2937}
body.no-scrollbars ::-webkit-scrollbar{display:none}
body.no-scrollbars *{scrollbar-width:none}
#app-header{display:flex;align-items:center;gap:24px;padding:8px 16px;border-bottom:1px solid #e5e7eb}
.brand{font-size:18px;margin:0}
.tab-button{background:none;border:none;padding:10px 12px;cursor:pointer;border-bottom:2px solid transparent}
.tab-button.active{border-bottom-color:#2563eb;font-weight:600}
#page-container{padding:16px;max-width:1100px;margin:0 auto}
.page-header{display:flex;justify-content:space-between;align-items:center;margin-bottom:12px}
.header-buttons{display:flex;gap:8px;align-items:center}
.filter-bar{display:flex;flex-wrap:wrap;gap:8px;margin-bottom:12px;align-items:center}
.search-input{flex:1 1 220px;padding:6px 10px;border:1px solid #d1d5db;border-radius:4px}
.date-input{padding:5px 8px;border:1px solid #d1d5db;border-radius:4px}
.shortcut-btn.active{background:#2563eb;color:#fff}
.table-wrap{overflow:auto;max-height:70vh;border:1px solid #e5e7eb;border-radius:4px}
.data-table{width:100%;border-collapse:collapse;table-layout:fixed}
.data-table th,.data-table td{padding:8px 10px;border-bottom:1px solid #f3f4f6;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.sticky-header th{position:sticky;top:0;background:#f9fafb;z-index:1}
.sortable{cursor:pointer;user-select:none}
.sort-indicator{margin-left:4px;font-size:10px}
.align-left{text-align:left}
.align-center{text-align:center}
.align-right{text-align:right}
.skeleton-cell{height:14px;border-radius:3px;background:linear-gradient(90deg,#f3f4f6 25%,#e5e7eb 50%,#f3f4f6 75%);background-size:200% 100%;animation:shimmer 1.2s infinite}
@keyframes shimmer{to{background-position:-200% 0}}
.empty-state{padding:32px;text-align:center;color:#6b7280}
.pagination-bar{display:flex;gap:12px;align-items:center;margin-top:12px}
.pagination-label{color:#6b7280}
.per-page-select{margin-left:auto;padding:5px 8px}
.btn,.btn-primary,.btn-danger,.action-btn{padding:6px 12px;border-radius:4px;border:1px solid #d1d5db;background:#fff;cursor:pointer}
.btn-primary{background:#2563eb;border-color:#2563eb;color:#fff}
.btn-danger{background:#dc2626;border-color:#dc2626;color:#fff}
.action-btn{border:none;background:none;padding:2px 6px;font-size:14px}
.action-btn.danger{color:#dc2626}
.row-actions{display:flex;gap:4px;justify-content:center}
.modal{position:fixed;inset:0;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center;z-index:100}
.modal.hidden{display:none}
.modal-content{background:#fff;border-radius:6px;padding:16px;min-width:360px;max-width:480px}
.modal-header{display:flex;justify-content:space-between;align-items:center}
.modal-header h2{font-size:16px;margin:0}
.form-row{display:flex;flex-direction:column;gap:4px;margin:10px 0}
.form-row input{padding:6px 10px;border:1px solid #d1d5db;border-radius:4px}
.field-error{color:#dc2626;font-size:12px}
.actions-row{display:flex;justify-content:flex-end;gap:8px;margin-top:12px}
.card{border:1px solid #e5e7eb;border-radius:6px;padding:12px 16px;margin-bottom:16px}
.caja-detail{color:#6b7280}
.movement.in{color:#16a34a}
.movement.out{color:#dc2626}
.saldo.deudor{color:#dc2626}
.stock-low{color:#dc2626;font-weight:600}
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.15)}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.spinner{display:inline-block;width:14px;height:14px;border:2px solid #fff;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite;vertical-align:middle}
@keyframes spin{to{transform:rotate(360deg)}}
.hidden{display:none}
";

    let style = document.create_element("style")?;
    style.set_id("app-styles");
    style.set_text_content(Some(css));
    if let Some(head) = document.query_selector("head")? {
        head.append_child(&style)?;
    } else if let Some(body) = document.body() {
        body.append_child(&style)?;
    }
    Ok(())
}
