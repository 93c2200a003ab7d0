//! Global application state and the dispatch loop.
//!
//! State lives in a `thread_local!` `RefCell`; every UI event goes through
//! [`dispatch_global_message`], which runs the reducer while holding the
//! borrow, releases it, then executes the returned commands (network calls,
//! dialogs, broadcasts) and finally re-renders the active page.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortController;

use crate::components::data_table::SortState;
use crate::messages::{Command, Message};
use crate::models::{CashSession, MutationError, Row, UiConfig};
use crate::network::{ApiClient, ListQuery};
use crate::pages::PageKind;
use crate::update::update;
use crate::{debug_log, error_log};

/// Lifecycle of one page's list: `Idle` until first visited, then
/// `Loading -> Ready | Failed` on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Per-table state: rows, filters, sort and pagination. One instance per
/// page, created lazily on first navigation.
pub struct ListState {
    pub table_id: &'static str,
    pub phase: ListPhase,
    pub rows: Vec<Row>,
    pub total_items: u64,
    /// True when the backend sent a `total`, meaning rows are one page of a
    /// server-paginated set; false means the full set came down and paging
    /// is a client-side slice.
    pub server_paged: bool,
    pub sort: SortState,
    pub search: String,
    pub date_start: String,
    pub date_end: String,
    pub page: u32,
    pub per_page: u32,
    /// Monotonic fetch counter; completions carrying an older value are
    /// discarded.
    pub generation: u64,
    /// Abort handle for the in-flight list request, if any. Starting a new
    /// fetch aborts the previous one.
    pub abort: Option<AbortController>,
}

impl ListState {
    pub fn new(page: PageKind, fallback_per_page: u32) -> Self {
        let table_id = page.slug();
        Self {
            table_id,
            phase: ListPhase::Idle,
            rows: Vec::new(),
            total_items: 0,
            server_paged: false,
            sort: SortState::default(),
            search: String::new(),
            date_start: String::new(),
            date_end: String::new(),
            page: 1,
            // Read once at mount; the config/server default only applies
            // when nothing valid is stored for this table.
            per_page: crate::storage::load_per_page(table_id, fallback_per_page),
            generation: 0,
            abort: None,
        }
    }
}

/// State of the create/edit modal for one page.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub id: Option<u64>,
    pub values: Row,
    pub field_errors: HashMap<String, Vec<String>>,
    pub submitting: bool,
}

// Store global application state
pub struct AppState {
    pub active_page: PageKind,
    pub lists: HashMap<PageKind, ListState>,
    pub editors: HashMap<PageKind, EditorState>,
    pub config: UiConfig,
    pub register: Option<CashSession>,
    pub register_loaded: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_page: PageKind::Clients,
            lists: HashMap::new(),
            editors: HashMap::new(),
            config: UiConfig::default(),
            register: None,
            register_loaded: false,
        }
    }

    /// List state for a page, created on first use with the page-size
    /// preference read from storage.
    pub fn ensure_list(&mut self, page: PageKind) -> &mut ListState {
        let fallback = self.config.default_page_size;
        self.lists
            .entry(page)
            .or_insert_with(|| ListState::new(page, fallback))
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Run a message through the reducer, then execute the side effects it
/// requested and refresh the DOM. Commands run after the borrow is dropped
/// so their own dispatches never hit a nested-borrow panic.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        update(&mut state, msg)
    });

    for command in commands {
        execute(command);
    }

    if let Err(e) = refresh_ui() {
        error_log!("No se pudo refrescar la interfaz: {:?}", e);
    }
}

/// Re-render the active page from the current state.
pub fn refresh_ui() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    crate::pages::render_active_page(&document)
}

fn execute(command: Command) {
    match command {
        Command::FetchList(page) => start_list_fetch(page),
        Command::SubmitMutation {
            page,
            path,
            payload,
            success_toast,
        } => {
            spawn_local(async move {
                match ApiClient::submit(&path, &payload).await {
                    Ok(envelope) => match envelope.into_result() {
                        Ok(()) => dispatch_global_message(Message::MutationSucceeded {
                            page,
                            toast: success_toast,
                        }),
                        Err(error) => {
                            dispatch_global_message(Message::MutationFailed { page, error })
                        }
                    },
                    Err(err) => dispatch_global_message(Message::MutationFailed {
                        page,
                        error: MutationError::Message(js_error_text(&err)),
                    }),
                }
            });
        }
        Command::DeleteEntity { page, id } => {
            spawn_local(async move {
                let base = page.spec().api_path;
                match ApiClient::delete(base, id).await {
                    Ok(envelope) => match envelope.into_result() {
                        Ok(()) => dispatch_global_message(Message::MutationSucceeded {
                            page,
                            toast: crate::constants::DELETED_TOAST.to_string(),
                        }),
                        Err(error) => {
                            dispatch_global_message(Message::MutationFailed { page, error })
                        }
                    },
                    Err(err) => dispatch_global_message(Message::MutationFailed {
                        page,
                        error: MutationError::Message(js_error_text(&err)),
                    }),
                }
            });
        }
        Command::FetchRegisterState => {
            spawn_local(async {
                match ApiClient::fetch_register_state().await {
                    Ok(session) => {
                        dispatch_global_message(Message::RegisterStateLoaded(session));
                    }
                    Err(err) => {
                        debug_log!("Estado de caja no disponible: {:?}", err);
                    }
                }
            });
        }
        Command::BroadcastConfigUpdated => crate::config::broadcast_config_updated(),
        Command::UpdateUI(f) => f(),
    }
}

/// Kick off a list request for a page. The previous in-flight request is
/// aborted; its completion is additionally fenced off by the generation
/// counter in case the abort races the response.
fn start_list_fetch(page: PageKind) {
    let fetch = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let list = match state.lists.get_mut(&page) {
            Some(list) => list,
            None => return None,
        };

        if let Some(previous) = list.abort.take() {
            previous.abort();
        }
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        list.abort = controller;
        list.generation += 1;

        let query = ListQuery {
            page: list.page,
            per_page: list.per_page,
            q: list.search.clone(),
            desde: list.date_start.clone(),
            hasta: list.date_end.clone(),
        };
        Some((query, signal, list.generation))
    });

    let Some((query, signal, generation)) = fetch else {
        return;
    };

    spawn_local(async move {
        let base = page.spec().api_path;
        match ApiClient::fetch_list(base, &query, signal.as_ref()).await {
            Ok(envelope) => dispatch_global_message(Message::ListLoaded {
                page,
                generation,
                rows: envelope.data,
                total: envelope.total,
            }),
            Err(err) => {
                // An aborted request was superseded by a newer one; its
                // result is simply discarded.
                if is_abort_error(&err) {
                    debug_log!("Listado de {} reemplazado por un pedido más nuevo", base);
                    return;
                }
                dispatch_global_message(Message::ListLoadFailed {
                    page,
                    generation,
                    error: js_error_text(&err),
                });
            }
        }
    });
}

fn is_abort_error(err: &JsValue) -> bool {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .is_some_and(|name| name == "AbortError")
}

fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
