//! Wire types shared by every page.
//!
//! The backend speaks a single envelope shape (see DESIGN.md): lists come
//! back as `{ "ok": true, "data": [...] }` and mutations as `{ "ok": true }`
//! or `{ "ok": false, "error" | "errors": ... }`. Nothing here parses any
//! other shape on purpose.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A list row is an opaque field-name to value mapping. The generic table
/// never learns entity schemas; pages project whatever the backend sends.
pub type Row = Map<String, Value>;

/// Envelope for list endpoints.
///
/// `total` is present when the backend paginates server-side; when absent the
/// payload is the full result set and paging happens client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope for create/edit/delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

/// Mutation failure as surfaced to the form layer: either a field-keyed map
/// rendered inline, or a single message shown in an alert dialog.
#[derive(Debug, Clone)]
pub enum MutationError {
    Fields(HashMap<String, Vec<String>>),
    Message(String),
}

impl MutationEnvelope {
    pub fn into_result(self) -> Result<(), MutationError> {
        if self.ok {
            return Ok(());
        }
        if let Some(errors) = self.errors {
            if !errors.is_empty() {
                return Err(MutationError::Fields(errors));
            }
        }
        Err(MutationError::Message(
            self.error
                .unwrap_or_else(|| crate::constants::GENERIC_ERROR_MSG.to_string()),
        ))
    }
}

/// UI preferences served by `/api/config/obtener/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub hide_scrollbars: bool,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_page_size() -> u32 {
    crate::constants::DEFAULT_PAGE_SIZE
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hide_scrollbars: false,
            default_page_size: crate::constants::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Envelope for the config endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<UiConfig>,
}

/// Current cash-register session as reported by `/api/caja/estado/`.
/// `data: null` means the register is closed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CashSession {
    pub id: u64,
    pub opened_at: String,
    pub opening_amount: f64,
    pub expected_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<CashSession>,
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_parses_canonical_shape() {
        let env: ListEnvelope =
            serde_json::from_str(r#"{"ok": true, "data": [{"id": 1, "nombre": "Ana"}]}"#).unwrap();
        assert!(env.ok);
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.total, None);
        assert_eq!(env.data[0].get("nombre").unwrap(), "Ana");
    }

    #[test]
    fn list_envelope_carries_server_total() {
        let env: ListEnvelope =
            serde_json::from_str(r#"{"ok": true, "data": [], "total": 47}"#).unwrap();
        assert_eq!(env.total, Some(47));
    }

    #[test]
    fn mutation_ok_maps_to_unit() {
        let env: MutationEnvelope = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(env.into_result().is_ok());
    }

    #[test]
    fn mutation_field_errors_win_over_message() {
        let env: MutationEnvelope = serde_json::from_str(
            r#"{"ok": false, "error": "inválido", "errors": {"nombre": ["Requerido"]}}"#,
        )
        .unwrap();
        match env.into_result() {
            Err(MutationError::Fields(map)) => {
                assert_eq!(map["nombre"], vec!["Requerido".to_string()]);
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn mutation_without_detail_falls_back_to_generic_message() {
        let env: MutationEnvelope = serde_json::from_str(r#"{"ok": false}"#).unwrap();
        match env.into_result() {
            Err(MutationError::Message(msg)) => {
                assert_eq!(msg, crate::constants::GENERIC_ERROR_MSG);
            }
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn register_envelope_null_means_closed() {
        let env: RegisterEnvelope = serde_json::from_str(r#"{"ok": true, "data": null}"#).unwrap();
        assert!(env.data.is_none());
    }
}
