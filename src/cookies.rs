//! Single shared cookie reader.
//!
//! The CSRF token lives in the `csrftoken` cookie and must be attached to
//! every mutating request; this module is the only place that parses
//! `document.cookie` so the logic is never duplicated per page.

use wasm_bindgen::JsCast;

use crate::constants::CSRF_COOKIE_NAME;

/// Read the CSRF token for the current document, if the cookie is set.
pub fn csrf_token() -> Option<String> {
    raw_cookies().and_then(|all| value_of(&all, CSRF_COOKIE_NAME))
}

fn raw_cookies() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html_doc = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    html_doc.cookie().ok()
}

/// Extract a cookie value from a `document.cookie` string.
///
/// Cookie names match exactly; values are returned verbatim (the backend
/// writes the token unencoded). Empty values count as absent.
pub fn value_of(cookie_str: &str, name: &str) -> Option<String> {
    cookie_str
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let raw = "sessionid=abc123; csrftoken=tok-42; theme=dark";
        assert_eq!(value_of(raw, "csrftoken"), Some("tok-42".to_string()));
    }

    #[test]
    fn exact_name_match_only() {
        let raw = "xcsrftoken=nope; csrftoken2=nope";
        assert_eq!(value_of(raw, "csrftoken"), None);
    }

    #[test]
    fn empty_value_counts_as_absent() {
        assert_eq!(value_of("csrftoken=", "csrftoken"), None);
    }

    #[test]
    fn value_may_contain_equals() {
        let raw = "csrftoken=a=b=c";
        assert_eq!(value_of(raw, "csrftoken"), Some("a=b=c".to_string()));
    }

    #[test]
    fn empty_cookie_string() {
        assert_eq!(value_of("", "csrftoken"), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn reads_token_from_real_document() {
        let document = web_sys::window().unwrap().document().unwrap();
        let html_doc = document.dyn_into::<web_sys::HtmlDocument>().unwrap();
        html_doc.set_cookie("csrftoken=browser-tok").unwrap();
        assert_eq!(csrf_token(), Some("browser-tok".to_string()));
    }
}
