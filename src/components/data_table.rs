//! Generic sortable data table.
//!
//! The table renders whatever rows it is handed: it never fetches and has no
//! error state of its own. Sorting happens client-side over the raw field
//! values; the loading skeleton fully replaces content while a request is in
//! flight; the empty state is supplied by the caller.

use std::cmp::Ordering;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use serde_json::Value;

use crate::constants::SKELETON_ROW_COUNT;
use crate::models::Row;

/// Cell renderer: receives the raw value, the full row and the row index and
/// returns the markup to show instead of the raw value. Must be pure.
pub type CellRenderer = Rc<dyn Fn(&Value, &Row, usize) -> String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Column descriptor. Keys must be unique within a table instance.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub width: Option<String>,
    pub align: Align,
    pub sortable: bool,
    pub render: Option<CellRenderer>,
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            width: None,
            align: Align::Left,
            sortable: true,
            render: None,
        }
    }

    pub fn with_width(mut self, width: &str) -> Self {
        self.width = Some(width.to_string());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_render(mut self, render: impl Fn(&Value, &Row, usize) -> String + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

/// Active sort. `key: None` means insertion order; once a column has been
/// clicked the table never returns to insertion order, it only toggles
/// direction or moves to another column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub ascending: bool,
}

impl SortState {
    /// Next sort after a click on `key`: same column toggles the direction,
    /// a different column resets to ascending.
    pub fn toggled(&self, key: &str) -> SortState {
        match &self.key {
            Some(current) if current == key => SortState {
                key: Some(key.to_string()),
                ascending: !self.ascending,
            },
            _ => SortState {
                key: Some(key.to_string()),
                ascending: true,
            },
        }
    }
}

/// Generic comparison over raw JSON values. Values of different types sort
/// by a fixed type rank; numbers use IEEE ordering with NaN treated as equal
/// so the sort stays total.
pub fn cmp_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable sort of `rows` by the active sort key. Equal keys keep their
/// relative input order, so toggling a column twice reproduces the first
/// ascending order exactly.
pub fn sort_rows(rows: &mut [Row], sort: &SortState) {
    if let Some(key) = &sort.key {
        rows.sort_by(|ra, rb| {
            let a = ra.get(key).unwrap_or(&Value::Null);
            let b = rb.get(key).unwrap_or(&Value::Null);
            let ord = cmp_values(a, b);
            if sort.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
}

/// Raw-value display text used when a column has no renderer.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Table wiring supplied by the page.
pub struct TableConfig {
    pub columns: Vec<Column>,
    /// Global sortable toggle; individual columns may still opt out.
    pub sortable: bool,
    pub on_sort: Option<Rc<dyn Fn(SortState)>>,
    pub on_row_click: Option<Rc<dyn Fn(Row, usize)>>,
    /// Builds the trailing actions cell for a row, when the page has
    /// per-row actions that need real event handlers.
    pub row_actions: Option<Rc<dyn Fn(&Document, &Row, usize) -> Result<Element, JsValue>>>,
    /// Caller-supplied empty-state view; without it nothing is rendered
    /// below the header.
    pub empty_state: Option<Rc<dyn Fn(&Document) -> Result<Element, JsValue>>>,
}

fn align_class(align: Align) -> &'static str {
    match align {
        Align::Left => "align-left",
        Align::Center => "align-center",
        Align::Right => "align-right",
    }
}

/// Render the table into `container`. `rows` are displayed after a stable
/// client-side sort by `sort`; while `loading` is true a skeleton with the
/// same column count replaces all content, even if rows are present.
pub fn render(
    document: &Document,
    container: &Element,
    config: &TableConfig,
    rows: &[Row],
    sort: &SortState,
    loading: bool,
) -> Result<(), JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name("table-wrap");

    let table = document.create_element("table")?;
    table.set_class_name("data-table");

    let column_count = config.columns.len() + config.row_actions.is_some() as usize;

    // Header -----------------------------------------------------------
    let thead = document.create_element("thead")?;
    thead.set_class_name("sticky-header");
    let header_row = document.create_element("tr")?;

    for column in &config.columns {
        let th = document.create_element("th")?;
        th.set_text_content(Some(&column.label));
        th.set_attribute("data-column", &column.key)?;
        th.set_class_name(align_class(column.align));
        if let Some(width) = &column.width {
            th.set_attribute("style", &format!("width:{}", width))?;
        }

        let is_sorted = sort.key.as_deref() == Some(column.key.as_str());
        if is_sorted {
            let indicator = document.create_element("span")?;
            indicator.set_class_name("sort-indicator");
            indicator.set_text_content(Some(if sort.ascending { "▲" } else { "▼" }));
            th.append_child(&indicator)?;
        }

        if config.sortable && column.sortable {
            if let Some(on_sort) = &config.on_sort {
                let _ = th.class_list().add_1("sortable");
                let on_sort = on_sort.clone();
                let key = column.key.clone();
                let current = sort.clone();
                let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
                    on_sort(current.toggled(&key));
                }) as Box<dyn FnMut(_)>);
                th.dyn_ref::<HtmlElement>()
                    .ok_or_else(|| JsValue::from_str("th is not an HtmlElement"))?
                    .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
                callback.forget();
            }
        }

        header_row.append_child(&th)?;
    }

    if config.row_actions.is_some() {
        let th = document.create_element("th")?;
        th.set_class_name("actions-header align-center");
        th.set_text_content(Some("Acciones"));
        header_row.append_child(&th)?;
    }

    thead.append_child(&header_row)?;
    table.append_child(&thead)?;

    // Body -------------------------------------------------------------
    let tbody = document.create_element("tbody")?;

    if loading {
        // The skeleton fully replaces content: rows already in memory are
        // not shown while a request is in flight.
        for _ in 0..SKELETON_ROW_COUNT {
            let tr = document.create_element("tr")?;
            tr.set_class_name("skeleton-row");
            for _ in 0..column_count {
                let td = document.create_element("td")?;
                let shimmer = document.create_element("div")?;
                shimmer.set_class_name("skeleton-cell");
                td.append_child(&shimmer)?;
                tr.append_child(&td)?;
            }
            tbody.append_child(&tr)?;
        }
    } else if rows.is_empty() {
        if let Some(empty_state) = &config.empty_state {
            let tr = document.create_element("tr")?;
            let td = document.create_element("td")?;
            td.set_attribute("colspan", &column_count.to_string())?;
            td.append_child(&empty_state(document)?.into())?;
            tr.append_child(&td)?;
            tbody.append_child(&tr)?;
        }
    } else {
        let mut sorted: Vec<Row> = rows.to_vec();
        sort_rows(&mut sorted, sort);

        for (index, row) in sorted.iter().enumerate() {
            let tr = document.create_element("tr")?;
            // Stable render key: the row id when present, index otherwise.
            let row_key = row
                .get("id")
                .and_then(Value::as_u64)
                .map(|id| id.to_string())
                .unwrap_or_else(|| index.to_string());
            tr.set_attribute("data-row-key", &row_key)?;

            for column in &config.columns {
                let td = document.create_element("td")?;
                td.set_class_name(align_class(column.align));
                let raw = row.get(&column.key).unwrap_or(&Value::Null);
                match &column.render {
                    Some(render) => td.set_inner_html(&render(raw, row, index)),
                    None => td.set_text_content(Some(&display_value(raw))),
                }
                tr.append_child(&td)?;
            }

            if let Some(row_actions) = &config.row_actions {
                let td = document.create_element("td")?;
                td.set_class_name("actions-cell align-center");
                td.append_child(&row_actions(document, row, index)?.into())?;
                tr.append_child(&td)?;
            }

            if let Some(on_row_click) = &config.on_row_click {
                let on_row_click = on_row_click.clone();
                let row = row.clone();
                let callback = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
                    on_row_click(row.clone(), index);
                }) as Box<dyn FnMut(_)>);
                tr.dyn_ref::<HtmlElement>()
                    .ok_or_else(|| JsValue::from_str("tr is not an HtmlElement"))?
                    .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
                callback.forget();
            }

            tbody.append_child(&tr)?;
        }
    }

    table.append_child(&tbody)?;
    wrap.append_child(&table)?;
    container.append_child(&wrap)?;
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn toggle_same_column_flips_direction() {
        let none = SortState::default();
        let first = none.toggled("nombre");
        assert_eq!(first.key.as_deref(), Some("nombre"));
        assert!(first.ascending);

        let second = first.toggled("nombre");
        assert!(!second.ascending);

        let third = second.toggled("nombre");
        assert!(third.ascending);
    }

    #[test]
    fn toggle_other_column_resets_to_ascending() {
        let descending = SortState {
            key: Some("nombre".to_string()),
            ascending: false,
        };
        let next = descending.toggled("saldo");
        assert_eq!(next.key.as_deref(), Some("saldo"));
        assert!(next.ascending);
    }

    #[test]
    fn sorts_raw_numbers_not_display_text() {
        // Lexicographic order would put 100 before 2.
        let mut rows = vec![
            row(&[("monto", json!(100))]),
            row(&[("monto", json!(2))]),
            row(&[("monto", json!(30))]),
        ];
        sort_rows(
            &mut rows,
            &SortState {
                key: Some("monto".to_string()),
                ascending: true,
            },
        );
        let values: Vec<i64> = rows
            .iter()
            .map(|r| r.get("monto").unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![2, 30, 100]);
    }

    #[test]
    fn missing_keys_sort_first_ascending() {
        let mut rows = vec![
            row(&[("nombre", json!("Zoe"))]),
            row(&[("otro", json!(1))]),
            row(&[("nombre", json!("Ana"))]),
        ];
        sort_rows(
            &mut rows,
            &SortState {
                key: Some("nombre".to_string()),
                ascending: true,
            },
        );
        assert!(rows[0].get("nombre").is_none());
        assert_eq!(rows[1].get("nombre").unwrap(), "Ana");
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut rows = vec![
            row(&[("rubro", json!("almacén")), ("id", json!(1))]),
            row(&[("rubro", json!("almacén")), ("id", json!(2))]),
            row(&[("rubro", json!("almacén")), ("id", json!(3))]),
        ];
        sort_rows(
            &mut rows,
            &SortState {
                key: Some("rubro".to_string()),
                ascending: true,
            },
        );
        let ids: Vec<i64> = rows
            .iter()
            .map(|r| r.get("id").unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn display_value_is_unquoted_for_strings() {
        assert_eq!(display_value(&json!("Ana")), "Ana");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(true)), "true");
    }

    proptest! {
        /// Toggling a column twice lands back on the first ascending order,
        /// not on insertion order.
        #[test]
        fn double_toggle_reproduces_first_ascending(values in prop::collection::vec(0u8..10, 0..40)) {
            let rows: Vec<Row> = values
                .iter()
                .enumerate()
                .map(|(i, v)| row(&[("v", json!(v)), ("pos", json!(i))]))
                .collect();

            let sort = SortState::default().toggled("v");
            let mut first_asc = rows.clone();
            sort_rows(&mut first_asc, &sort);

            let sort = sort.toggled("v");
            let mut desc = first_asc.clone();
            sort_rows(&mut desc, &sort);

            let sort = sort.toggled("v");
            let mut second_asc = desc.clone();
            sort_rows(&mut second_asc, &sort);

            prop_assert!(sort.ascending);
            prop_assert_eq!(first_asc, second_asc);
        }

        /// Mixed-type columns still sort totally (no panic, deterministic).
        #[test]
        fn mixed_types_sort_deterministically(seed in prop::collection::vec(0u8..4, 0..20)) {
            let rows: Vec<Row> = seed
                .iter()
                .map(|k| {
                    let v = match k {
                        0 => Value::Null,
                        1 => json!(true),
                        2 => json!(7),
                        _ => json!("texto"),
                    };
                    row(&[("v", v)])
                })
                .collect();

            let sort = SortState { key: Some("v".to_string()), ascending: true };
            let mut a = rows.clone();
            sort_rows(&mut a, &sort);
            let mut b = rows;
            sort_rows(&mut b, &sort);
            prop_assert_eq!(a, b);
        }
    }
}
