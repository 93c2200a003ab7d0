//! Pagination control: page navigation plus items-per-page selection.
//!
//! The arithmetic lives in free functions so the clamping invariant is
//! testable without a DOM: `page` is always within `[1, max(1, total_pages)]`
//! after any data change, and changing the page size resets to page 1.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement};

use crate::constants::PAGE_SIZE_CHOICES;

/// Number of pages for a total; an empty data set still has one page so the
/// control always shows something sane.
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    if total_items == 0 || per_page == 0 {
        return 1;
    }
    total_items.div_ceil(per_page as u64) as u32
}

/// Clamp a requested page into the valid range for the data set.
pub fn clamp_page(page: u32, total_items: u64, per_page: u32) -> u32 {
    page.clamp(1, total_pages(total_items, per_page))
}

/// Half-open index range `[start, end)` of the rows visible on `page` when
/// slicing client-side.
pub fn page_bounds(total_items: usize, page: u32, per_page: u32) -> (usize, usize) {
    let page = clamp_page(page, total_items as u64, per_page) as usize;
    let per_page = per_page.max(1) as usize;
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    (start.min(total_items), end)
}

/// Wiring supplied by the page.
pub struct PaginationConfig {
    pub table_id: String,
    pub on_page: Rc<dyn Fn(u32)>,
    pub on_per_page: Rc<dyn Fn(u32)>,
}

/// Render the control into `container`.
pub fn render(
    document: &Document,
    container: &Element,
    config: &PaginationConfig,
    page: u32,
    per_page: u32,
    total_items: u64,
) -> Result<(), JsValue> {
    let bar = document.create_element("div")?;
    bar.set_class_name("pagination-bar");

    let pages = total_pages(total_items, per_page);
    let page = clamp_page(page, total_items, per_page);

    // Prev / next -------------------------------------------------------
    let prev = nav_button(document, "« Anterior", page > 1, {
        let on_page = config.on_page.clone();
        move || on_page(page - 1)
    })?;
    prev.set_id(&format!("{}-prev-page", config.table_id));
    bar.append_child(&prev)?;

    let label = document.create_element("span")?;
    label.set_class_name("pagination-label");
    label.set_text_content(Some(&format!(
        "Página {} de {} ({} registros)",
        page, pages, total_items
    )));
    bar.append_child(&label)?;

    let next = nav_button(document, "Siguiente »", page < pages, {
        let on_page = config.on_page.clone();
        move || on_page(page + 1)
    })?;
    next.set_id(&format!("{}-next-page", config.table_id));
    bar.append_child(&next)?;

    // Per-page selector -------------------------------------------------
    let select = document.create_element("select")?;
    select.set_id(&format!("{}-per-page", config.table_id));
    select.set_class_name("per-page-select");

    let mut choices: Vec<u32> = PAGE_SIZE_CHOICES.to_vec();
    if !choices.contains(&per_page) {
        // A previously stored custom size still has to be selectable.
        choices.push(per_page);
        choices.sort_unstable();
    }
    for choice in choices {
        let option = document.create_element("option")?;
        option.set_attribute("value", &choice.to_string())?;
        option.set_text_content(Some(&format!("{} por página", choice)));
        if choice == per_page {
            option.set_attribute("selected", "selected")?;
        }
        select.append_child(&option)?;
    }

    {
        let on_per_page = config.on_per_page.clone();
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event.target() else { return };
            let Ok(select) = target.dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Ok(value) = select.value().parse::<u32>() {
                if value > 0 {
                    on_per_page(value);
                }
            }
        }) as Box<dyn FnMut(_)>);
        select
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("select is not an HtmlElement"))?
            .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    bar.append_child(&select)?;

    container.append_child(&bar)?;
    Ok(())
}

fn nav_button(
    document: &Document,
    label: &str,
    enabled: bool,
    on_click: impl Fn() + 'static,
) -> Result<Element, JsValue> {
    let button =
        crate::ui_components::create_button(document, crate::ui_components::ButtonConfig {
            text: label.to_string(),
            class_name: Some("btn page-btn".to_string()),
            disabled: !enabled,
            ..Default::default()
        })?;
    if enabled {
        let callback =
            Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| on_click())
                as Box<dyn FnMut(_)>);
        button
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("button is not an HtmlElement"))?
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    Ok(button)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_data_set_has_one_page() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(clamp_page(7, 0, 10), 1);
    }

    #[test]
    fn forty_seven_rows_at_ten_per_page() {
        assert_eq!(total_pages(47, 10), 5);
        // Page 5 shows rows 41..=47 (indices 40..47).
        assert_eq!(page_bounds(47, 5, 10), (40, 47));
    }

    #[test]
    fn per_page_change_lands_on_full_first_page() {
        // After switching 10 -> 20 per page the caller resets to page 1.
        assert_eq!(page_bounds(47, 1, 20), (0, 20));
    }

    #[test]
    fn out_of_range_page_is_clamped_before_slicing() {
        assert_eq!(page_bounds(47, 99, 10), (40, 47));
        assert_eq!(page_bounds(47, 0, 10), (0, 10));
    }

    proptest! {
        /// The clamp invariant from the component contract: for any totals
        /// the current page lands in [1, ceil(total / per_page)] (or 1 for
        /// an empty set).
        #[test]
        fn clamped_page_is_always_in_range(
            page in 0u32..10_000,
            total in 0u64..100_000,
            per_page in 1u32..500,
        ) {
            let clamped = clamp_page(page, total, per_page);
            let upper = if total == 0 {
                1
            } else {
                (total as f64 / per_page as f64).ceil() as u32
            };
            prop_assert!(clamped >= 1);
            prop_assert!(clamped <= upper.max(1));
        }

        /// Slices tile the data set without gaps or overlap.
        #[test]
        fn page_slices_partition_the_rows(
            total in 0usize..1000,
            per_page in 1u32..100,
        ) {
            let pages = total_pages(total as u64, per_page);
            let mut covered = 0usize;
            for page in 1..=pages {
                let (start, end) = page_bounds(total, page, per_page);
                prop_assert_eq!(start, covered);
                prop_assert!(end >= start);
                covered = end;
            }
            prop_assert_eq!(covered, total);
        }
    }
}
