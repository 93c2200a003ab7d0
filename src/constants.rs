// Defaults and shared literals - single source of truth so individual pages
// never hardcode their own copies.

/// Page size used before the config endpoint answers and before the user has
/// ever touched a per-page selector.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Choices offered by every pagination control.
pub const PAGE_SIZE_CHOICES: [u32; 4] = [10, 20, 50, 100];

/// Quiet period for the free-text search input.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Placeholder rows shown while a list request is in flight.
pub const SKELETON_ROW_COUNT: usize = 6;

// Backend contract ----------------------------------------------------------

/// Cookie the backend sets for CSRF protection (Django convention).
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header every mutating request must carry.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Endpoint serving UI preferences.
pub const CONFIG_ENDPOINT: &str = "/api/config/obtener/";

/// Custom window event fired when the UI config changes.
pub const CONFIG_UPDATED_EVENT: &str = "configUpdated";

// Storage -------------------------------------------------------------------

/// Prefix for every localStorage key owned by this app.
pub const STORAGE_PREFIX: &str = "backoffice";

// Markup --------------------------------------------------------------------

pub const ATTR_DATA_TESTID: &str = "data-testid";
pub const ATTR_TYPE: &str = "type";
pub const BUTTON_TYPE_BUTTON: &str = "button";
pub const CSS_FORM_ROW: &str = "form-row";
pub const CSS_ACTIONS_ROW: &str = "actions-row";

// User-facing fallback strings ----------------------------------------------

pub const GENERIC_ERROR_MSG: &str = "Ocurrió un error inesperado. Intente nuevamente.";
pub const SAVED_TOAST: &str = "Guardado correctamente";
pub const DELETED_TOAST: &str = "Eliminado correctamente";
