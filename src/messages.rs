// src/messages.rs
//
// Every event the UI can produce, plus the side effects the reducer can ask
// for. The reducer in `update.rs` stays synchronous; commands are executed
// by `state.rs` after the state borrow is released.

use serde_json::Value;

use crate::models::{CashSession, MutationError, Row, UiConfig};
use crate::components::data_table::SortState;
use crate::pages::PageKind;

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    NavigateTo(PageKind),

    // List lifecycle. `generation` ties a response to the fetch that
    // produced it; stale completions are dropped.
    RefreshList(PageKind),
    ListLoaded {
        page: PageKind,
        generation: u64,
        rows: Vec<Row>,
        total: Option<u64>,
    },
    ListLoadFailed {
        page: PageKind,
        generation: u64,
        error: String,
    },

    // Table interactions
    UpdateSort {
        page: PageKind,
        sort: SortState,
    },
    SearchChanged {
        page: PageKind,
        query: String,
    },
    DateRangeChanged {
        page: PageKind,
        start: String,
        end: String,
    },
    ClearFilters(PageKind),
    GoToPage {
        page: PageKind,
        number: u32,
    },
    ChangePerPage {
        page: PageKind,
        per_page: u32,
    },

    // CRUD editor
    OpenCreateModal(PageKind),
    OpenEditModal {
        page: PageKind,
        row: Row,
    },
    CloseEditor(PageKind),
    SubmitEditor {
        page: PageKind,
        values: Row,
    },
    MutationSucceeded {
        page: PageKind,
        toast: String,
    },
    MutationFailed {
        page: PageKind,
        error: MutationError,
    },

    // Deletion, always through the confirmation dialog
    RequestDelete {
        page: PageKind,
        id: u64,
        label: String,
    },
    ConfirmDelete {
        page: PageKind,
        id: u64,
    },

    // Cash register
    OpenRegister {
        opening_amount: f64,
    },
    CloseRegister {
        counted_amount: f64,
    },
    RegisterStateLoaded(Option<CashSession>),

    // Config
    ConfigLoaded(UiConfig),
}

/// Side effects requested by the reducer.
pub enum Command {
    FetchList(PageKind),
    SubmitMutation {
        page: PageKind,
        path: String,
        payload: Value,
        success_toast: String,
    },
    DeleteEntity {
        page: PageKind,
        id: u64,
    },
    FetchRegisterState,
    BroadcastConfigUpdated,
    /// Run an arbitrary UI side effect (alert, toast, confirmation dialog)
    /// outside the state borrow.
    UpdateUI(Box<dyn FnOnce()>),
}

impl Command {
    /// Helper to create an UpdateUI command.
    pub fn update_ui<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Command::UpdateUI(Box::new(f))
    }
}
