//! UI configuration service.
//!
//! Preferences come from `/api/config/obtener/` once at startup. Changes are
//! propagated to already-mounted components through a single `configUpdated`
//! custom event on `window`; consumers hold a [`ConfigSubscription`] whose
//! drop removes the underlying DOM listener, so the subscribe / unsubscribe
//! lifecycle is explicit instead of leaking forgotten closures.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::CustomEvent;

use crate::constants::CONFIG_UPDATED_EVENT;
use crate::debug_log;
use crate::models::UiConfig;
use crate::network::ApiClient;

/// Fetch the config in the background and dispatch the result into the
/// update loop. A failed fetch is not an error dialog: the app simply keeps
/// running on defaults.
pub fn load_config() {
    spawn_local(async {
        match ApiClient::fetch_config().await {
            Ok(config) => {
                crate::state::dispatch_global_message(crate::messages::Message::ConfigLoaded(
                    config,
                ));
            }
            Err(err) => {
                debug_log!("Config no disponible, usando valores por defecto: {:?}", err);
            }
        }
    });
}

/// Fire the `configUpdated` event so mounted components re-apply the
/// current config without a reload.
pub fn broadcast_config_updated() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    if let Ok(event) = CustomEvent::new(CONFIG_UPDATED_EVENT) {
        let _ = window.dispatch_event(&event);
    }
}

/// Apply config-driven presentation to the document. Safe to call on every
/// broadcast; class toggles are idempotent.
pub fn apply_to_dom(config: &UiConfig) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let class_list = body.class_list();
        let _ = if config.hide_scrollbars {
            class_list.add_1("no-scrollbars")
        } else {
            class_list.remove_1("no-scrollbars")
        };
    }
}

/// Listener handle for `configUpdated`. Dropping it unsubscribes.
pub struct ConfigSubscription {
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ConfigSubscription {
    pub fn subscribe(mut handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure =
            Closure::wrap(Box::new(move |_event: web_sys::Event| handler())
                as Box<dyn FnMut(web_sys::Event)>);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        window.add_event_listener_with_callback(
            CONFIG_UPDATED_EVENT,
            closure.as_ref().unchecked_ref(),
        )?;
        Ok(Self { closure })
    }
}

impl Drop for ConfigSubscription {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                CONFIG_UPDATED_EVENT,
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn broadcast_reaches_subscriber() {
        let hits = Rc::new(Cell::new(0u32));
        let hits_in = hits.clone();
        let sub = ConfigSubscription::subscribe(move || hits_in.set(hits_in.get() + 1)).unwrap();

        broadcast_config_updated();
        broadcast_config_updated();
        assert_eq!(hits.get(), 2);
        drop(sub);
    }

    #[wasm_bindgen_test]
    fn dropped_subscription_stops_listening() {
        let hits = Rc::new(Cell::new(0u32));
        let hits_in = hits.clone();
        let sub = ConfigSubscription::subscribe(move || hits_in.set(hits_in.get() + 1)).unwrap();

        broadcast_config_updated();
        drop(sub);
        broadcast_config_updated();
        assert_eq!(hits.get(), 1);
    }
}
