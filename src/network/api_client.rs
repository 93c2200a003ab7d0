//! REST client for the back-office API.
//!
//! All traffic goes through [`ApiClient::fetch_json`], which attaches the
//! CSRF header on mutating requests and maps non-2xx statuses to errors.
//! There is no retry anywhere: a failed request surfaces once and the user
//! repeats the action manually.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, Headers, Request, RequestCredentials, RequestInit, RequestMode, Response};

use serde_json::Value;

use crate::constants::{CONFIG_ENDPOINT, CSRF_HEADER_NAME};
use crate::models::{ConfigEnvelope, ListEnvelope, MutationEnvelope, RegisterEnvelope, UiConfig};

/// Query parameters every list endpoint understands.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub q: String,
    pub desde: String,
    pub hasta: String,
}

impl ListQuery {
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("page={}", self.page),
            format!("per_page={}", self.per_page),
        ];
        if !self.q.is_empty() {
            parts.push(format!("q={}", encode_component(&self.q)));
        }
        if !self.desde.is_empty() {
            parts.push(format!("desde={}", self.desde));
        }
        if !self.hasta.is_empty() {
            parts.push(format!("hasta={}", self.hasta));
        }
        parts.join("&")
    }
}

/// Percent-encode a query-string component (RFC 3986 unreserved set stays
/// as-is, everything else is encoded as UTF-8 bytes).
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// REST API client for all back-office endpoints.
pub struct ApiClient;

impl ApiClient {
    fn url(path: &str) -> String {
        format!("{}{}", super::api_base_url(), path)
    }

    /// Perform a request and return the response body as text.
    ///
    /// Mutating methods get the `X-CSRFToken` header read from the shared
    /// cookie module; the backend rejects them without it.
    pub async fn fetch_json(
        path: &str,
        method: &str,
        body: Option<&str>,
        signal: Option<&AbortSignal>,
    ) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        opts.set_credentials(RequestCredentials::SameOrigin);

        let headers = Headers::new()?;
        if method != "GET" {
            if let Some(token) = crate::cookies::csrf_token() {
                headers.append(CSRF_HEADER_NAME, &token)?;
            }
        }
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);
        if let Some(signal) = signal {
            opts.set_signal(Some(signal));
        }

        let request = Request::new_with_str_and_init(&Self::url(path), &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "La API respondió {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }

    /// Fetch one page of a list endpoint. The abort signal belongs to the
    /// owning page's list state; a superseded fetch is cancelled through it.
    pub async fn fetch_list(
        base: &str,
        query: &ListQuery,
        signal: Option<&AbortSignal>,
    ) -> Result<ListEnvelope, JsValue> {
        let path = format!("{}?{}", base, query.to_query_string());
        let text = Self::fetch_json(&path, "GET", None, signal).await?;
        let envelope: ListEnvelope = serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("Respuesta ilegible del servidor: {}", e)))?;
        if !envelope.ok {
            return Err(JsValue::from_str(
                envelope
                    .error
                    .as_deref()
                    .unwrap_or("El servidor rechazó la consulta"),
            ));
        }
        Ok(envelope)
    }

    /// POST a JSON payload to a mutation endpoint (create / edit / register
    /// open-close). Mutations are never aborted; the submit button stays
    /// disabled while the request is in flight.
    pub async fn submit(path: &str, payload: &Value) -> Result<MutationEnvelope, JsValue> {
        let body = payload.to_string();
        let text = Self::fetch_json(path, "POST", Some(&body), None).await?;
        serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("Respuesta ilegible del servidor: {}", e)))
    }

    /// Delete an entity. Only reachable after the confirmation dialog.
    pub async fn delete(base: &str, id: u64) -> Result<MutationEnvelope, JsValue> {
        let path = format!("{}{}/eliminar/", base, id);
        let text = Self::fetch_json(&path, "POST", None, None).await?;
        serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("Respuesta ilegible del servidor: {}", e)))
    }

    /// Current cash-register session, `None` when closed.
    pub async fn fetch_register_state() -> Result<Option<crate::models::CashSession>, JsValue> {
        let text = Self::fetch_json("/api/caja/estado/", "GET", None, None).await?;
        let envelope: RegisterEnvelope = serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("Respuesta ilegible del servidor: {}", e)))?;
        Ok(envelope.data)
    }

    /// Fetch UI preferences. Parsed straight from the JS value the way the
    /// browser hands it over.
    pub async fn fetch_config() -> Result<UiConfig, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        opts.set_credentials(RequestCredentials::SameOrigin);

        let request = Request::new_with_str_and_init(&Self::url(CONFIG_ENDPOINT), &opts)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "La API respondió {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        let json = JsFuture::from(resp.json()?).await?;
        let envelope: ConfigEnvelope = serde_wasm_bindgen::from_value(json)
            .map_err(|e| JsValue::from_str(&format!("Configuración ilegible: {}", e)))?;
        Ok(envelope.data.unwrap_or_default())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn query_string_always_carries_paging() {
        let query = ListQuery {
            page: 3,
            per_page: 20,
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "page=3&per_page=20");
    }

    #[test]
    fn query_string_includes_filters_when_set() {
        let query = ListQuery {
            page: 1,
            per_page: 10,
            q: "juan perez".to_string(),
            desde: "2026-08-01".to_string(),
            hasta: "2026-08-04".to_string(),
        };
        assert_eq!(
            query.to_query_string(),
            "page=1&per_page=10&q=juan%20perez&desde=2026-08-01&hasta=2026-08-04"
        );
    }

    #[test]
    fn encode_component_handles_reserved_and_utf8() {
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("año"), "a%C3%B1o");
        assert_eq!(encode_component("ok-._~"), "ok-._~");
    }
}
