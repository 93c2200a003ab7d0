//! Filter bar: debounced free-text search, quick date shortcuts and an
//! explicit date-range pair, plus a clear-all action.
//!
//! The debouncer is the unit worth testing, so it is a standalone type fed
//! by plain callbacks; the render function only wires DOM events into it and
//! into the global dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::constants::SEARCH_DEBOUNCE_MS;
use crate::dates;
use crate::messages::Message;
use crate::pages::PageKind;
use crate::state::dispatch_global_message;
use crate::ui_components::{create_button, create_secondary_button, ButtonConfig};

/// Debounced string input. Each call to [`Debouncer::input`] resets the
/// timer; only the last value of a burst reaches the callback. An empty
/// value short-circuits the timer and propagates immediately, so clearing
/// the field feels instant.
pub struct Debouncer {
    delay_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
    callback: Rc<dyn Fn(String)>,
}

impl Debouncer {
    pub fn new(delay_ms: u32, callback: impl Fn(String) + 'static) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
            callback: Rc::new(callback),
        }
    }

    pub fn input(&self, value: String) {
        if value.is_empty() {
            // Dropping the pending timeout cancels it.
            self.pending.borrow_mut().take();
            (self.callback)(value);
            return;
        }

        let callback = self.callback.clone();
        let pending = self.pending.clone();
        let timeout = Timeout::new(self.delay_ms, move || {
            pending.borrow_mut().take();
            callback(value);
        });
        // Replacing the previous timeout drops it, which cancels it.
        *self.pending.borrow_mut() = Some(timeout);
    }
}

thread_local! {
    // One debouncer per table instance, created on first render and kept
    // for the lifetime of the app so re-renders do not cancel a pending
    // search.
    static DEBOUNCERS: RefCell<HashMap<String, Rc<Debouncer>>> = RefCell::new(HashMap::new());
}

fn debouncer_for(table_id: &str, page: PageKind) -> Rc<Debouncer> {
    DEBOUNCERS.with(|cell| {
        cell.borrow_mut()
            .entry(table_id.to_string())
            .or_insert_with(|| {
                Rc::new(Debouncer::new(SEARCH_DEBOUNCE_MS, move |query| {
                    dispatch_global_message(Message::SearchChanged { page, query });
                }))
            })
            .clone()
    })
}

/// Current filter values, straight from the page's list state.
pub struct FilterValues {
    pub search: String,
    pub date_start: String,
    pub date_end: String,
}

/// Static configuration for one bar instance.
pub struct FilterBarConfig {
    pub table_id: String,
    pub page: PageKind,
    pub placeholder: String,
    pub with_dates: bool,
}

/// Render the bar into `container`.
pub fn render(
    document: &Document,
    container: &Element,
    config: &FilterBarConfig,
    current: &FilterValues,
) -> Result<(), JsValue> {
    let bar = document.create_element("div")?;
    bar.set_class_name("filter-bar");

    // Search ------------------------------------------------------------
    let search = document.create_element("input")?;
    search.set_id(&format!("{}-search", config.table_id));
    search.set_class_name("search-input");
    search.set_attribute("type", "search")?;
    search.set_attribute("placeholder", &config.placeholder)?;
    search.set_attribute("value", &current.search)?;
    {
        let debouncer = debouncer_for(&config.table_id, config.page);
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event.target() else { return };
            let Ok(input) = target.dyn_into::<HtmlInputElement>() else {
                return;
            };
            debouncer.input(input.value());
        }) as Box<dyn FnMut(_)>);
        search
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("input is not an HtmlElement"))?
            .add_event_listener_with_callback("input", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    bar.append_child(&search)?;

    // Date range ----------------------------------------------------------
    if config.with_dates {
        let today = dates::today_local();
        let yesterday = dates::yesterday_local();
        // Highlight by string equality against the freshly computed values;
        // recomputed on every render, never cached.
        let today_active = current.date_start == today && current.date_end == today;
        let yesterday_active =
            current.date_start == yesterday && current.date_end == yesterday;

        bar.append_child(&shortcut_button(
            document,
            config,
            "Hoy",
            today,
            today_active,
        )?.into())?;
        bar.append_child(&shortcut_button(
            document,
            config,
            "Ayer",
            yesterday,
            yesterday_active,
        )?.into())?;

        let start_id = format!("{}-date-start", config.table_id);
        let end_id = format!("{}-date-end", config.table_id);
        bar.append_child(&date_input(document, config, &start_id, &current.date_start)?.into())?;
        bar.append_child(&date_input(document, config, &end_id, &current.date_end)?.into())?;
    }

    // Clear all -----------------------------------------------------------
    let clear = create_secondary_button(
        document,
        "Limpiar filtros",
        Some(&format!("{}-clear-filters", config.table_id)),
    )?;
    {
        let page = config.page;
        let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
            dispatch_global_message(Message::ClearFilters(page));
        }) as Box<dyn FnMut(_)>);
        clear
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    bar.append_child(&clear)?;

    container.append_child(&bar)?;
    Ok(())
}

fn shortcut_button(
    document: &Document,
    config: &FilterBarConfig,
    label: &str,
    date: String,
    active: bool,
) -> Result<Element, JsValue> {
    let class = if active {
        "btn shortcut-btn active"
    } else {
        "btn shortcut-btn"
    };
    let button = create_button(document, ButtonConfig::new(label).with_class(class))?;
    let page = config.page;
    let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
        dispatch_global_message(Message::DateRangeChanged {
            page,
            start: date.clone(),
            end: date.clone(),
        });
    }) as Box<dyn FnMut(_)>);
    button
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(button)
}

fn date_input(
    document: &Document,
    config: &FilterBarConfig,
    id: &str,
    value: &str,
) -> Result<Element, JsValue> {
    let input = document.create_element("input")?;
    input.set_id(id);
    input.set_class_name("date-input");
    input.set_attribute("type", "date")?;
    input.set_attribute("value", value)?;

    let page = config.page;
    let start_id = format!("{}-date-start", config.table_id);
    let end_id = format!("{}-date-end", config.table_id);
    let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        dispatch_global_message(Message::DateRangeChanged {
            page,
            start: crate::dom_utils::input_value(&document, &start_id),
            end: crate::dom_utils::input_value(&document, &end_id),
        });
    }) as Box<dyn FnMut(_)>);
    input
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("input is not an HtmlElement"))?
        .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(input)
}
