//! Reusable UI element factories.
//!
//! Buttons, form fields and modal chrome are built here so the CRUD pages
//! stay declarative and every control carries the same attributes
//! (type="button", test ids, aria labels).

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::constants::*;

/// Button configuration for the button factory.
#[derive(Debug, Clone, Default)]
pub struct ButtonConfig {
    pub id: Option<String>,
    pub text: String,
    pub class_name: Option<String>,
    pub data_testid: Option<String>,
    pub aria_label: Option<String>,
    pub disabled: bool,
}

impl ButtonConfig {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn with_testid(mut self, testid: &str) -> Self {
        self.data_testid = Some(testid.to_string());
        self
    }

    pub fn with_aria_label(mut self, aria_label: &str) -> Self {
        self.aria_label = Some(aria_label.to_string());
        self
    }
}

/// Create a button element with consistent attributes.
pub fn create_button(document: &Document, config: ButtonConfig) -> Result<Element, JsValue> {
    let button = document.create_element("button")?;

    // Always type="button" so buttons inside forms never submit natively.
    button.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
    button.set_text_content(Some(&config.text));

    if let Some(id) = config.id {
        button.set_id(&id);
    }
    if let Some(class_name) = config.class_name {
        button.set_class_name(&class_name);
    }
    if let Some(testid) = config.data_testid {
        button.set_attribute(ATTR_DATA_TESTID, &testid)?;
    }
    if let Some(aria_label) = config.aria_label {
        button.set_attribute("aria-label", &aria_label)?;
    }
    if config.disabled {
        button.set_attribute("disabled", "true")?;
    }

    Ok(button)
}

pub fn create_primary_button(
    document: &Document,
    text: &str,
    id: Option<&str>,
) -> Result<Element, JsValue> {
    let mut config = ButtonConfig::new(text).with_class("btn-primary");
    if let Some(id) = id {
        config = config.with_id(id);
    }
    create_button(document, config)
}

pub fn create_secondary_button(
    document: &Document,
    text: &str,
    id: Option<&str>,
) -> Result<Element, JsValue> {
    let mut config = ButtonConfig::new(text).with_class("btn");
    if let Some(id) = id {
        config = config.with_id(id);
    }
    create_button(document, config)
}

pub fn create_danger_button(
    document: &Document,
    text: &str,
    id: Option<&str>,
) -> Result<Element, JsValue> {
    let mut config = ButtonConfig::new(text).with_class("btn-danger");
    if let Some(id) = id {
        config = config.with_id(id);
    }
    create_button(document, config)
}

/// Icon-only action button; the icon is any displayable text handed in by
/// the caller, the aria label keeps it accessible.
pub fn create_icon_button(
    document: &Document,
    icon: &str,
    aria_label: &str,
    class_name: Option<&str>,
) -> Result<Element, JsValue> {
    let config = ButtonConfig::new(icon)
        .with_class(class_name.unwrap_or("action-btn"))
        .with_aria_label(aria_label);
    create_button(document, config)
}

// ---------------------------------------------------------------------------
// Loading helpers
// ---------------------------------------------------------------------------

/// Toggle a button into *loading* state: disables it and swaps the label for
/// a spinner. The original label is stashed in a data attribute so passing
/// `false` restores it. Disabling during the in-flight window is the only
/// double-submit protection the app has.
pub fn set_button_loading(btn: &Element, loading: bool) {
    let class_list = btn.class_list();
    if loading {
        let _ = class_list.add_1("loading");
        let _ = btn.set_attribute("disabled", "true");
        if btn.get_attribute("data-orig-label").is_none() {
            if let Some(label) = btn.text_content() {
                let _ = btn.set_attribute("data-orig-label", &label);
            }
        }
        btn.set_inner_html("<span class='spinner'></span>");
    } else {
        let _ = class_list.remove_1("loading");
        let _ = btn.remove_attribute("disabled");
        if let Some(orig) = btn.get_attribute("data-orig-label") {
            btn.set_text_content(Some(&orig));
        }
    }
}

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// Form field configuration.
#[derive(Debug, Clone)]
pub struct FormFieldConfig {
    pub id: String,
    pub label_text: String,
    pub input_type: String,
    pub value: String,
    pub required: bool,
}

impl FormFieldConfig {
    pub fn new(id: &str, label_text: &str, input_type: &str) -> Self {
        Self {
            id: id.to_string(),
            label_text: label_text.to_string(),
            input_type: input_type.to_string(),
            value: String::new(),
            required: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Create a labelled input row. Number inputs get a step attribute so the
/// browser accepts decimals.
pub fn create_form_field(document: &Document, config: FormFieldConfig) -> Result<Element, JsValue> {
    let container = document.create_element("div")?;
    container.set_class_name(CSS_FORM_ROW);

    let label = document.create_element("label")?;
    label.set_text_content(Some(&config.label_text));
    label.set_attribute("for", &config.id)?;
    container.append_child(&label)?;

    let input = document.create_element("input")?;
    input.set_id(&config.id);
    input.set_attribute(ATTR_TYPE, &config.input_type)?;
    if config.input_type == "number" {
        input.set_attribute("step", "0.01")?;
    }
    if config.required {
        input.set_attribute("required", "true")?;
    }
    input.set_attribute("value", &config.value)?;
    container.append_child(&input)?;

    Ok(container)
}

/// Append an inline error list under a form row.
pub fn append_field_errors(
    document: &Document,
    row: &Element,
    messages: &[String],
) -> Result<(), JsValue> {
    let error_box = document.create_element("div")?;
    error_box.set_class_name("field-error");
    error_box.set_text_content(Some(&messages.join(" ")));
    row.append_child(&error_box)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Modal chrome
// ---------------------------------------------------------------------------

/// Modal header with title and close button; the close button is returned
/// so the caller can wire its click handler.
pub fn create_modal_header(
    document: &Document,
    title: &str,
    close_id: &str,
) -> Result<Element, JsValue> {
    let header = document.create_element("div")?;
    header.set_class_name("modal-header");

    let title_element = document.create_element("h2")?;
    title_element.set_text_content(Some(title));
    header.append_child(&title_element)?;

    let close_button = create_icon_button(document, "\u{00d7}", "Cerrar", Some("close"))?;
    close_button.set_id(close_id);
    header.append_child(&close_button)?;

    Ok(header)
}

/// Actions row container with flex layout.
pub fn create_actions_row(document: &Document) -> Result<Element, JsValue> {
    let container = document.create_element("div")?;
    container.set_class_name(CSS_ACTIONS_ROW);
    Ok(container)
}

/// Card container used by the cash-register status panel.
pub fn create_card(document: &Document, id: Option<&str>) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("card");
    if let Some(id) = id {
        card.set_id(id);
    }
    Ok(card)
}
