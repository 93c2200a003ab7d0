//! localStorage persistence.
//!
//! The only durable client-side state is the per-table page size: each table
//! instance remembers the user's last items-per-page choice under its own
//! key, so the preference survives reloads without being shared between
//! tables.

use crate::constants::STORAGE_PREFIX;

fn local_storage() -> Option<web_sys::Storage> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Storage key for a table's page-size preference. Keyed per table identity,
/// never shared globally.
pub fn per_page_key(table_id: &str) -> String {
    format!("{}:{}:per_page", STORAGE_PREFIX, table_id)
}

/// Read the persisted page size for a table. Called once when the table
/// mounts; `fallback` is the config-provided (or hardcoded) default used
/// when nothing valid is stored.
pub fn load_per_page(table_id: &str, fallback: u32) -> u32 {
    local_storage()
        .and_then(|s| s.get_item(&per_page_key(table_id)).ok().flatten())
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(fallback)
}

/// Persist a user-initiated page-size change.
pub fn save_per_page(table_id: &str, per_page: u32) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(&per_page_key(table_id), &per_page.to_string());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_table() {
        assert_eq!(per_page_key("clientes"), "backoffice:clientes:per_page");
        assert_ne!(per_page_key("clientes"), per_page_key("productos"));
    }

    #[test]
    fn fallback_without_storage() {
        // Native builds have no localStorage; the fallback must win.
        assert_eq!(load_per_page("clientes", 25), 25);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn round_trip_per_table() {
        save_per_page("t-alpha", 50);
        save_per_page("t-beta", 20);
        assert_eq!(load_per_page("t-alpha", 10), 50);
        assert_eq!(load_per_page("t-beta", 10), 20);
    }

    #[wasm_bindgen_test]
    fn invalid_stored_value_falls_back() {
        let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
        storage
            .set_item(&per_page_key("t-broken"), "cincuenta")
            .unwrap();
        assert_eq!(load_per_page("t-broken", 10), 10);

        storage.set_item(&per_page_key("t-zero"), "0").unwrap();
        assert_eq!(load_per_page("t-zero", 10), 10);
    }
}
