//! Generic CRUD page engine.
//!
//! Every entity screen follows the same machine: `idle -> loading ->
//! { success: table, error: alert + empty list }`, with mutations going
//! `submit -> disabled button -> POST -> { toast + refetch | inline/alert
//! error } -> re-enabled`. This module renders that machine from an
//! [`EntitySpec`]; the per-entity files only declare columns, fields and
//! endpoints.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use serde_json::Value;

use crate::components::data_table::{self, SortState, TableConfig};
use crate::components::pagination::{self, PaginationConfig};
use crate::components::{filter_bar, modal};
use crate::dom_utils;
use crate::messages::Message;
use crate::models::Row;
use crate::pages::{EntitySpec, PageKind};
use crate::state::{dispatch_global_message, EditorState, ListPhase, APP_STATE};
use crate::ui_components::{
    append_field_errors, create_actions_row, create_button, create_form_field, create_icon_button,
    create_modal_header, create_primary_button, create_secondary_button, set_button_loading,
    ButtonConfig, FormFieldConfig,
};

struct Snapshot {
    phase: ListPhase,
    rows: Vec<Row>,
    sort: SortState,
    search: String,
    date_start: String,
    date_end: String,
    page: u32,
    per_page: u32,
    total_items: u64,
    server_paged: bool,
    editor: Option<EditorState>,
}

fn snapshot(kind: PageKind) -> Option<Snapshot> {
    APP_STATE.with(|state| {
        let state = state.borrow();
        let list = state.lists.get(&kind)?;
        Some(Snapshot {
            phase: list.phase,
            rows: list.rows.clone(),
            sort: list.sort.clone(),
            search: list.search.clone(),
            date_start: list.date_start.clone(),
            date_end: list.date_end.clone(),
            page: list.page,
            per_page: list.per_page,
            total_items: list.total_items,
            server_paged: list.server_paged,
            editor: state.editors.get(&kind).cloned(),
        })
    })
}

/// Render a full entity page (header, filter bar, table, pagination and the
/// editor modal) into `container`.
pub fn render_page(document: &Document, container: &Element, kind: PageKind) -> Result<(), JsValue> {
    let spec = kind.spec();
    let Some(snap) = snapshot(kind) else {
        // Not visited yet; NavigateTo will initialise it.
        return Ok(());
    };

    render_header(document, container, kind, spec)?;

    filter_bar::render(
        document,
        container,
        &filter_bar::FilterBarConfig {
            table_id: kind.slug().to_string(),
            page: kind,
            placeholder: spec.search_placeholder.to_string(),
            with_dates: spec.with_dates,
        },
        &filter_bar::FilterValues {
            search: snap.search.clone(),
            date_start: snap.date_start.clone(),
            date_end: snap.date_end.clone(),
        },
    )?;

    let loading = snap.phase == ListPhase::Loading;
    let visible = visible_rows(&snap);

    let empty_text = spec.empty_text;
    let table_config = TableConfig {
        columns: (spec.columns)(),
        sortable: true,
        on_sort: Some(Rc::new(move |sort| {
            dispatch_global_message(Message::UpdateSort { page: kind, sort });
        })),
        on_row_click: Some(Rc::new(move |row, _index| {
            dispatch_global_message(Message::OpenEditModal { page: kind, row });
        })),
        row_actions: Some(Rc::new(move |document, row, _index| {
            build_row_actions(document, kind, row)
        })),
        // Failure leaves the list empty without the "nothing here yet"
        // illustration; the alert already told the user what happened.
        empty_state: if snap.phase == ListPhase::Ready {
            Some(Rc::new(move |document: &Document| {
                let wrap = document.create_element("div")?;
                wrap.set_class_name("empty-state");
                let msg = document.create_element("p")?;
                msg.set_class_name("empty-state-text");
                msg.set_text_content(Some(empty_text));
                wrap.append_child(&msg)?;
                Ok(wrap)
            }))
        } else {
            None
        },
    };

    data_table::render(document, container, &table_config, &visible, &snap.sort, loading)?;

    pagination::render(
        document,
        container,
        &PaginationConfig {
            table_id: kind.slug().to_string(),
            on_page: Rc::new(move |number| {
                dispatch_global_message(Message::GoToPage { page: kind, number });
            }),
            on_per_page: Rc::new(move |per_page| {
                dispatch_global_message(Message::ChangePerPage { page: kind, per_page });
            }),
        },
        snap.page,
        snap.per_page,
        snap.total_items,
    )?;

    match &snap.editor {
        Some(editor) => render_editor(document, kind, spec, editor)?,
        None => modal::hide_by_id(document, &editor_modal_id(kind)),
    }

    Ok(())
}

/// Rows the table should display right now. Server-paginated sets come down
/// one page at a time; full sets are sorted and sliced client-side so page
/// changes never refetch.
fn visible_rows(snap: &Snapshot) -> Vec<Row> {
    if snap.server_paged {
        return snap.rows.clone();
    }
    let mut rows = snap.rows.clone();
    data_table::sort_rows(&mut rows, &snap.sort);
    let (start, end) = pagination::page_bounds(rows.len(), snap.page, snap.per_page);
    rows[start..end].to_vec()
}

fn render_header(
    document: &Document,
    container: &Element,
    kind: PageKind,
    spec: &EntitySpec,
) -> Result<(), JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("page-header");

    let title = document.create_element("h2")?;
    title.set_text_content(Some(spec.title));
    header.append_child(&title)?;

    let buttons = document.create_element("div")?;
    buttons.set_class_name("header-buttons");

    let refresh_btn = create_icon_button(document, "⟳", "Actualizar", Some("action-btn"))?;
    refresh_btn.set_id(&format!("{}-refresh", kind.slug()));
    {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            dispatch_global_message(Message::RefreshList(kind));
        }) as Box<dyn FnMut(_)>);
        refresh_btn
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    buttons.append_child(&refresh_btn)?;

    let create_btn = create_button(
        document,
        ButtonConfig::new(&format!("Nuevo {}", spec.title_singular))
            .with_id(&format!("{}-create", kind.slug()))
            .with_class("btn-primary")
            .with_testid(&format!("{}-create-btn", kind.slug())),
    )?;
    {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            dispatch_global_message(Message::OpenCreateModal(kind));
        }) as Box<dyn FnMut(_)>);
        create_btn
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    buttons.append_child(&create_btn)?;

    header.append_child(&buttons)?;
    container.append_child(&header)?;
    Ok(())
}

/// Per-row edit and delete buttons. Clicks must not bubble into the row's
/// own click handler.
fn build_row_actions(document: &Document, kind: PageKind, row: &Row) -> Result<Element, JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("row-actions");

    let edit = create_icon_button(document, "✎", "Editar", Some("action-btn"))?;
    {
        let row = row.clone();
        let callback = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            dispatch_global_message(Message::OpenEditModal {
                page: kind,
                row: row.clone(),
            });
        }) as Box<dyn FnMut(_)>);
        edit.dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    wrap.append_child(&edit)?;

    // Rows without a numeric id cannot be deleted.
    if let Some(id) = row.get("id").and_then(Value::as_u64) {
        let spec = kind.spec();
        let label = (spec.row_label)(row);
        let delete = create_icon_button(document, "🗑", "Eliminar", Some("action-btn danger"))?;
        let callback = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            dispatch_global_message(Message::RequestDelete {
                page: kind,
                id,
                label: label.clone(),
            });
        }) as Box<dyn FnMut(_)>);
        delete
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
        wrap.append_child(&delete)?;
    }

    Ok(wrap)
}

// ---------------------------------------------------------------------------
// Editor modal
// ---------------------------------------------------------------------------

fn editor_modal_id(kind: PageKind) -> String {
    format!("{}-editor-modal", kind.slug())
}

fn field_input_id(kind: PageKind, key: &str) -> String {
    format!("{}-field-{}", kind.slug(), key)
}

fn render_editor(
    document: &Document,
    kind: PageKind,
    spec: &EntitySpec,
    editor: &EditorState,
) -> Result<(), JsValue> {
    let modal_id = editor_modal_id(kind);
    let (backdrop, content) = modal::ensure_modal(document, &modal_id)?;
    content.set_inner_html("");

    let title = if editor.id.is_some() {
        format!("Editar {}", spec.title_singular)
    } else {
        format!("Nuevo {}", spec.title_singular)
    };
    let close_id = format!("{}-close", modal_id);
    let header = create_modal_header(document, &title, &close_id)?;
    if let Some(close_btn) = header.query_selector(&format!("#{}", close_id))? {
        wire_dismiss(&close_btn, kind)?;
    }
    content.append_child(&header)?;

    for field in spec.fields {
        let field_id = field_input_id(kind, field.key);
        let value = editor
            .values
            .get(field.key)
            .map(data_table::display_value)
            .unwrap_or_default();
        let row = create_form_field(
            document,
            FormFieldConfig::new(&field_id, field.label, field.input_type)
                .with_value(&value)
                .required(field.required),
        )?;
        if let Some(messages) = editor.field_errors.get(field.key) {
            append_field_errors(document, &row, messages)?;
        }
        content.append_child(&row)?;
    }

    let actions = create_actions_row(document)?;

    let cancel = create_secondary_button(document, "Cancelar", Some(&format!("{}-cancel", modal_id)))?;
    wire_dismiss(&cancel, kind)?;
    actions.append_child(&cancel)?;

    let save = create_primary_button(
        document,
        "Guardar",
        Some(&format!("{}-save", modal_id)),
    )?;
    if editor.submitting {
        set_button_loading(&save, true);
    } else {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let values = collect_values(&document, kind);
            dispatch_global_message(Message::SubmitEditor { page: kind, values });
        }) as Box<dyn FnMut(_)>);
        save.dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    actions.append_child(&save)?;

    content.append_child(&actions)?;
    modal::show(&backdrop);
    Ok(())
}

fn wire_dismiss(button: &Element, kind: PageKind) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
        dispatch_global_message(Message::CloseEditor(kind));
    }) as Box<dyn FnMut(_)>);
    button
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Read the editor inputs back into a row. Number fields are posted as JSON
/// numbers; unparseable input is passed through as text so the backend's
/// validation reports it inline.
fn collect_values(document: &Document, kind: PageKind) -> Row {
    let spec = kind.spec();
    let mut values = Row::new();
    for field in spec.fields {
        let id = field_input_id(kind, field.key);
        let raw = dom_utils::input_value(document, &id);
        let value = match field.input_type {
            "number" => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    match trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                        Some(n) => Value::Number(n),
                        None => Value::String(raw),
                    }
                }
            }
            _ => {
                if raw.is_empty() {
                    Value::Null
                } else {
                    Value::String(raw)
                }
            }
        };
        values.insert(field.key.to_string(), value);
    }
    values
}
