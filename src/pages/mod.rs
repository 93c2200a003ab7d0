//! Page registry.
//!
//! Every screen is an instance of the generic CRUD engine in `crud.rs`
//! described by an [`EntitySpec`]; this module maps page identities to their
//! descriptors and renders the active one.

pub mod cash_register;
pub mod categories;
pub mod clients;
pub mod crud;
pub mod products;
pub mod providers;

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::components::data_table::Column;
use crate::dom_utils;
use crate::models::Row;
use crate::state::APP_STATE;

/// Identity of a screen. Also the key for per-table persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Clients,
    Products,
    Providers,
    Categories,
    CashRegister,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Clients,
        PageKind::Products,
        PageKind::Providers,
        PageKind::Categories,
        PageKind::CashRegister,
    ];

    /// Stable slug used for DOM ids and storage keys.
    pub fn slug(self) -> &'static str {
        match self {
            PageKind::Clients => "clientes",
            PageKind::Products => "productos",
            PageKind::Providers => "proveedores",
            PageKind::Categories => "rubros",
            PageKind::CashRegister => "caja",
        }
    }

    pub fn spec(self) -> &'static EntitySpec {
        match self {
            PageKind::Clients => &clients::SPEC,
            PageKind::Products => &products::SPEC,
            PageKind::Providers => &providers::SPEC,
            PageKind::Categories => &categories::SPEC,
            PageKind::CashRegister => &cash_register::SPEC,
        }
    }
}

/// One form field of an entity editor.
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// "text", "number" or "date"; numbers are parsed before posting.
    pub input_type: &'static str,
    pub required: bool,
}

/// Everything the CRUD engine needs to know about an entity screen.
pub struct EntitySpec {
    pub title: &'static str,
    pub title_singular: &'static str,
    /// List endpoint; `crear/`, `{id}/editar/` and `{id}/eliminar/` hang
    /// off this base.
    pub api_path: &'static str,
    pub search_placeholder: &'static str,
    pub with_dates: bool,
    pub empty_text: &'static str,
    pub fields: &'static [FieldSpec],
    pub columns: fn() -> Vec<Column>,
    /// Human label of a row, used in the delete confirmation text.
    pub row_label: fn(&Row) -> String,
}

/// Render the active page into `#page-container` and sync the tab bar.
pub fn render_active_page(document: &Document) -> Result<(), JsValue> {
    let active = APP_STATE.with(|state| state.borrow().active_page);

    for kind in PageKind::ALL {
        if let Some(btn) = document.get_element_by_id(&format!("tab-{}", kind.slug())) {
            if kind == active {
                dom_utils::set_active(&btn);
            } else {
                dom_utils::set_inactive(&btn);
            }
        }
    }

    let container = document
        .get_element_by_id("page-container")
        .ok_or_else(|| JsValue::from_str("page-container not found"))?;
    container.set_inner_html("");

    if active == PageKind::CashRegister {
        cash_register::render_register_panel(document, &container)?;
    }

    crud::render_page(document, &container, active)
}

/// Fallback text label of a row by field, used by the `row_label` hooks.
pub(crate) fn row_text(row: &Row, key: &str) -> String {
    row.get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or("registro")
        .to_string()
}
