//! Cash register (caja): movement list plus the open/close session panel.
//!
//! Movements are the date-filtered table handled by the generic engine;
//! this module adds the session card above it. Opening and closing the
//! register are ordinary mutations (toast on success, alert on failure);
//! only deletes go through the confirmation dialog.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::components::data_table::{Align, Column};
use crate::components::modal;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::CashSession;
use crate::pages::{row_text, EntitySpec, FieldSpec};
use crate::state::{dispatch_global_message, APP_STATE};
use crate::ui_components::{
    create_actions_row, create_card, create_danger_button, create_form_field,
    create_primary_button, create_secondary_button, FormFieldConfig,
};
use crate::utils::format_money;

pub static SPEC: EntitySpec = EntitySpec {
    title: "Caja",
    title_singular: "movimiento",
    api_path: "/api/caja/",
    search_placeholder: "Buscar por concepto...",
    with_dates: true,
    empty_text: "Sin movimientos en el período.",
    fields: &[
        FieldSpec {
            key: "concepto",
            label: "Concepto",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "tipo",
            label: "Tipo (ingreso/egreso)",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "monto",
            label: "Monto",
            input_type: "number",
            required: true,
        },
    ],
    columns,
    row_label,
};

fn columns() -> Vec<Column> {
    vec![
        Column::new("fecha", "Fecha").with_width("120px"),
        Column::new("concepto", "Concepto"),
        Column::new("tipo", "Tipo")
            .align(Align::Center)
            .with_width("100px")
            .with_render(|value, _row, _index| match value.as_str() {
                Some("ingreso") => "<span class=\"movement in\">▲ ingreso</span>".to_string(),
                Some("egreso") => "<span class=\"movement out\">▼ egreso</span>".to_string(),
                other => other.unwrap_or("").to_string(),
            }),
        Column::new("monto", "Monto")
            .align(Align::Right)
            .with_width("130px")
            .with_render(|value, row, _index| {
                let amount = value.as_f64().unwrap_or(0.0);
                let signed = match row.get("tipo").and_then(serde_json::Value::as_str) {
                    Some("egreso") => -amount,
                    _ => amount,
                };
                format_money(signed)
            }),
    ]
}

fn row_label(row: &crate::models::Row) -> String {
    row_text(row, "concepto")
}

/// Session card above the movement table: open state, running amounts and
/// the open/close actions.
pub fn render_register_panel(document: &Document, container: &Element) -> Result<(), JsValue> {
    let (session, loaded) = APP_STATE.with(|state| {
        let state = state.borrow();
        (state.register.clone(), state.register_loaded)
    });

    let card = create_card(document, Some("caja-panel"))?;

    if !loaded {
        let text = document.create_element("p")?;
        text.set_text_content(Some("Consultando estado de caja..."));
        card.append_child(&text)?;
        container.append_child(&card)?;
        return Ok(());
    }

    match session {
        Some(session) => render_open_session(document, &card, &session)?,
        None => render_closed_session(document, &card)?,
    }

    container.append_child(&card)?;
    Ok(())
}

fn render_open_session(
    document: &Document,
    card: &Element,
    session: &CashSession,
) -> Result<(), JsValue> {
    let title = document.create_element("h3")?;
    title.set_text_content(Some("Caja abierta"));
    card.append_child(&title)?;

    let detail = document.create_element("p")?;
    detail.set_class_name("caja-detail");
    detail.set_text_content(Some(&format!(
        "Abierta desde {} · Saldo inicial {} · Saldo esperado {}",
        session.opened_at,
        format_money(session.opening_amount),
        format_money(session.expected_amount),
    )));
    card.append_child(&detail)?;

    let close_btn = create_danger_button(document, "Cerrar caja", Some("caja-close-btn"))?;
    {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            // The cashier counts the drawer and enters the result; the
            // backend computes the difference against the expected amount.
            if let Err(e) = open_amount_modal(
                &document,
                "caja-cerrar-modal",
                "Cierre de caja (arqueo)",
                "Monto contado",
                "Confirmar cierre",
                |amount| Message::CloseRegister {
                    counted_amount: amount,
                },
            ) {
                crate::error_log!("No se pudo abrir el cierre de caja: {:?}", e);
            }
        }) as Box<dyn FnMut(_)>);
        close_btn
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    card.append_child(&close_btn)?;
    Ok(())
}

fn render_closed_session(document: &Document, card: &Element) -> Result<(), JsValue> {
    let title = document.create_element("h3")?;
    title.set_text_content(Some("Caja cerrada"));
    card.append_child(&title)?;

    let detail = document.create_element("p")?;
    detail.set_class_name("caja-detail");
    detail.set_text_content(Some(
        "Abra la caja con el efectivo inicial para registrar movimientos.",
    ));
    card.append_child(&detail)?;

    let open_btn = create_primary_button(document, "Abrir caja", Some("caja-open-btn"))?;
    {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Err(e) = open_amount_modal(
                &document,
                "caja-abrir-modal",
                "Apertura de caja",
                "Monto inicial",
                "Abrir",
                |amount| Message::OpenRegister {
                    opening_amount: amount,
                },
            ) {
                crate::error_log!("No se pudo abrir la apertura de caja: {:?}", e);
            }
        }) as Box<dyn FnMut(_)>);
        open_btn
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    card.append_child(&open_btn)?;
    Ok(())
}

/// Small one-amount modal shared by the open and close flows.
fn open_amount_modal(
    document: &Document,
    modal_id: &str,
    title: &str,
    field_label: &str,
    submit_label: &str,
    to_message: fn(f64) -> Message,
) -> Result<(), JsValue> {
    let (backdrop, content) = modal::ensure_modal(document, modal_id)?;
    content.set_inner_html("");

    let heading = document.create_element("h2")?;
    heading.set_text_content(Some(title));
    content.append_child(&heading)?;

    let input_id = format!("{}-monto", modal_id);
    let field = create_form_field(
        document,
        FormFieldConfig::new(&input_id, field_label, "number").required(true),
    )?;
    content.append_child(&field)?;

    let actions = create_actions_row(document)?;

    let cancel = create_secondary_button(document, "Cancelar", Some(&format!("{}-cancel", modal_id)))?;
    {
        let backdrop = backdrop.clone();
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            modal::hide(&backdrop);
        }) as Box<dyn FnMut(_)>);
        cancel
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    actions.append_child(&cancel)?;

    let submit = create_primary_button(document, submit_label, Some(&format!("{}-submit", modal_id)))?;
    {
        let backdrop = backdrop.clone();
        let input_id = input_id.clone();
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let raw = dom_utils::input_value(&document, &input_id);
            let Ok(amount) = raw.trim().parse::<f64>() else {
                crate::toast::error("Ingrese un monto válido");
                return;
            };
            modal::hide(&backdrop);
            dispatch_global_message(to_message(amount));
        }) as Box<dyn FnMut(_)>);
        submit
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    actions.append_child(&submit)?;

    content.append_child(&actions)?;
    modal::show(&backdrop);
    Ok(())
}
