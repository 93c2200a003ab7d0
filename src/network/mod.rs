// Re-export network modules
pub mod api_client;

pub use api_client::{ApiClient, ListQuery};

/// Base URL for API calls. In development the backend runs on its own port;
/// in production the frontend is served from the same origin.
pub(crate) fn api_base_url() -> String {
    #[cfg(debug_assertions)]
    {
        "http://localhost:8000".to_string()
    }
    #[cfg(not(debug_assertions))]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
}
