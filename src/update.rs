// src/update.rs
//
// The reducer: state transitions for every Message. Pure except for the
// page-size persistence write; everything with a DOM or network footprint
// is returned as a Command and executed by state.rs afterwards.

use crate::components::pagination::clamp_page;
use crate::constants::SAVED_TOAST;
use crate::messages::{Command, Message};
use crate::models::MutationError;
use crate::pages::PageKind;
use crate::state::{AppState, EditorState, ListPhase};

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    match msg {
        Message::NavigateTo(page) => {
            state.active_page = page;
            let mut commands = Vec::new();
            {
                let list = state.ensure_list(page);
                if list.phase == ListPhase::Idle {
                    list.phase = ListPhase::Loading;
                    commands.push(Command::FetchList(page));
                }
            }
            if page == PageKind::CashRegister && !state.register_loaded {
                commands.push(Command::FetchRegisterState);
            }
            commands
        }

        Message::RefreshList(page) => {
            let list = state.ensure_list(page);
            list.phase = ListPhase::Loading;
            vec![Command::FetchList(page)]
        }

        Message::ListLoaded {
            page,
            generation,
            rows,
            total,
        } => {
            if let Some(list) = state.lists.get_mut(&page) {
                if generation != list.generation {
                    return Vec::new();
                }
                list.abort = None;
                list.server_paged = total.is_some();
                list.total_items = total.unwrap_or(rows.len() as u64);
                list.rows = rows;
                list.phase = ListPhase::Ready;
                // Pagination invariant: the current page is re-clamped after
                // every data change.
                list.page = clamp_page(list.page, list.total_items, list.per_page);
            }
            Vec::new()
        }

        Message::ListLoadFailed {
            page,
            generation,
            error,
        } => {
            if let Some(list) = state.lists.get_mut(&page) {
                if generation != list.generation {
                    return Vec::new();
                }
                list.abort = None;
                list.phase = ListPhase::Failed;
                list.rows.clear();
                list.total_items = 0;
                list.page = 1;
            }
            let text = format!("No se pudo cargar el listado: {}", error);
            vec![Command::update_ui(move || {
                crate::error_log!("{}", text);
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&text);
                }
            })]
        }

        Message::UpdateSort { page, sort } => {
            if let Some(list) = state.lists.get_mut(&page) {
                // Sorting is client-side; no refetch.
                list.sort = sort;
            }
            Vec::new()
        }

        Message::SearchChanged { page, query } => {
            let list = state.ensure_list(page);
            if list.search == query {
                return Vec::new();
            }
            list.search = query;
            list.page = 1;
            list.phase = ListPhase::Loading;
            vec![Command::FetchList(page)]
        }

        Message::DateRangeChanged { page, start, end } => {
            let list = state.ensure_list(page);
            list.date_start = start;
            list.date_end = end;
            list.page = 1;
            let both_set = !list.date_start.is_empty() && !list.date_end.is_empty();
            if both_set && !crate::dates::is_valid_range(&list.date_start, &list.date_end) {
                // Keep the inputs as typed but do not query with an
                // inverted range.
                return vec![Command::update_ui(|| {
                    crate::toast::error("El rango de fechas es inválido");
                })];
            }
            list.phase = ListPhase::Loading;
            vec![Command::FetchList(page)]
        }

        Message::ClearFilters(page) => {
            let list = state.ensure_list(page);
            list.search.clear();
            list.date_start.clear();
            list.date_end.clear();
            list.page = 1;
            list.phase = ListPhase::Loading;
            vec![Command::FetchList(page)]
        }

        Message::GoToPage { page, number } => {
            let mut commands = Vec::new();
            if let Some(list) = state.lists.get_mut(&page) {
                let clamped = clamp_page(number, list.total_items, list.per_page);
                if clamped == list.page {
                    return Vec::new();
                }
                list.page = clamped;
                if list.server_paged {
                    list.phase = ListPhase::Loading;
                    commands.push(Command::FetchList(page));
                }
            }
            commands
        }

        Message::ChangePerPage { page, per_page } => {
            if per_page == 0 {
                return Vec::new();
            }
            let mut commands = Vec::new();
            if let Some(list) = state.lists.get_mut(&page) {
                if list.per_page == per_page {
                    return Vec::new();
                }
                list.per_page = per_page;
                // Changing the page size always lands on page 1 so the
                // current page can never end up out of range.
                list.page = 1;
                crate::storage::save_per_page(list.table_id, per_page);
                if list.server_paged {
                    list.phase = ListPhase::Loading;
                    commands.push(Command::FetchList(page));
                }
            }
            commands
        }

        Message::OpenCreateModal(page) => {
            state.editors.insert(page, EditorState::default());
            Vec::new()
        }

        Message::OpenEditModal { page, row } => {
            let id = row.get("id").and_then(serde_json::Value::as_u64);
            state.editors.insert(
                page,
                EditorState {
                    id,
                    values: row,
                    ..Default::default()
                },
            );
            Vec::new()
        }

        Message::CloseEditor(page) => {
            state.editors.remove(&page);
            Vec::new()
        }

        Message::SubmitEditor { page, values } => {
            let Some(editor) = state.editors.get_mut(&page) else {
                return Vec::new();
            };
            if editor.submitting {
                // The submit button is disabled while in flight; a second
                // event in the same window is dropped here as well.
                return Vec::new();
            }
            editor.submitting = true;
            editor.field_errors.clear();
            editor.values = values.clone();

            let spec = page.spec();
            let path = match editor.id {
                Some(id) => format!("{}{}/editar/", spec.api_path, id),
                None => format!("{}crear/", spec.api_path),
            };
            vec![Command::SubmitMutation {
                page,
                path,
                payload: serde_json::Value::Object(values),
                success_toast: SAVED_TOAST.to_string(),
            }]
        }

        Message::MutationSucceeded { page, toast } => {
            state.editors.remove(&page);
            let mut commands = vec![Command::update_ui(move || {
                crate::toast::success(&toast);
            })];
            {
                let list = state.ensure_list(page);
                list.phase = ListPhase::Loading;
            }
            commands.push(Command::FetchList(page));
            if page == PageKind::CashRegister {
                commands.push(Command::FetchRegisterState);
            }
            commands
        }

        Message::MutationFailed { page, error } => {
            if let Some(editor) = state.editors.get_mut(&page) {
                editor.submitting = false;
                if let MutationError::Fields(map) = &error {
                    editor.field_errors = map.clone();
                    return Vec::new();
                }
            }
            let text = match error {
                MutationError::Message(m) => m,
                MutationError::Fields(_) => crate::constants::GENERIC_ERROR_MSG.to_string(),
            };
            vec![Command::update_ui(move || {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&text);
                }
            })]
        }

        Message::RequestDelete { page, id, label } => {
            // The dialog itself is a UI effect; the destructive request is
            // only dispatched from its confirm button.
            vec![Command::update_ui(move || {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let message = format!("¿Eliminar \"{}\"? Esta acción no se puede deshacer.", label);
                let on_confirm = std::rc::Rc::new(move || {
                    crate::state::dispatch_global_message(Message::ConfirmDelete { page, id });
                });
                if let Err(e) = crate::components::modal::confirm(
                    &document,
                    &format!("{}-confirm-delete", page.slug()),
                    &message,
                    "Eliminar",
                    on_confirm,
                ) {
                    crate::error_log!("No se pudo abrir la confirmación: {:?}", e);
                }
            })]
        }

        Message::ConfirmDelete { page, id } => {
            vec![Command::DeleteEntity { page, id }]
        }

        Message::OpenRegister { opening_amount } => {
            vec![Command::SubmitMutation {
                page: PageKind::CashRegister,
                path: "/api/caja/abrir/".to_string(),
                payload: serde_json::json!({ "monto_inicial": opening_amount }),
                success_toast: "Caja abierta".to_string(),
            }]
        }

        Message::CloseRegister { counted_amount } => {
            vec![Command::SubmitMutation {
                page: PageKind::CashRegister,
                path: "/api/caja/cerrar/".to_string(),
                payload: serde_json::json!({ "monto_contado": counted_amount }),
                success_toast: "Caja cerrada".to_string(),
            }]
        }

        Message::RegisterStateLoaded(session) => {
            state.register = session;
            state.register_loaded = true;
            Vec::new()
        }

        Message::ConfigLoaded(config) => {
            if config == state.config {
                return Vec::new();
            }
            state.config = config;
            vec![Command::BroadcastConfigUpdated]
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::components::pagination::page_bounds;
    use serde_json::json;

    fn loaded_state(total_rows: usize) -> AppState {
        let mut state = AppState::new();
        let commands = update(&mut state, Message::NavigateTo(PageKind::Clients));
        assert!(matches!(commands[0], Command::FetchList(PageKind::Clients)));

        let generation = fetch_generation(&mut state, PageKind::Clients);
        let rows = (0..total_rows)
            .map(|i| {
                let mut row = serde_json::Map::new();
                row.insert("id".to_string(), json!(i + 1));
                row.insert("nombre".to_string(), json!(format!("Cliente {}", i + 1)));
                row
            })
            .collect();
        update(
            &mut state,
            Message::ListLoaded {
                page: PageKind::Clients,
                generation,
                rows,
                total: None,
            },
        );
        state
    }

    // Native tests drive the reducer directly, so the generation bump that
    // start_list_fetch would do is simulated here.
    fn fetch_generation(state: &mut AppState, page: PageKind) -> u64 {
        state.ensure_list(page).generation
    }

    #[test]
    fn forty_seven_rows_paginate_into_five_pages() {
        let mut state = loaded_state(47);
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.phase, ListPhase::Ready);
        assert_eq!(list.total_items, 47);
        assert!(!list.server_paged);

        update(
            &mut state,
            Message::GoToPage {
                page: PageKind::Clients,
                number: 5,
            },
        );
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.page, 5);
        // Page 5 holds the last 7 rows.
        assert_eq!(page_bounds(47, list.page, list.per_page), (40, 47));

        // Switching to 20 per page from page 5 resets to page 1.
        update(
            &mut state,
            Message::ChangePerPage {
                page: PageKind::Clients,
                per_page: 20,
            },
        );
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.page, 1);
        assert_eq!(list.per_page, 20);
        assert_eq!(page_bounds(47, list.page, list.per_page), (0, 20));
    }

    #[test]
    fn page_requests_beyond_range_are_clamped() {
        let mut state = loaded_state(47);
        update(
            &mut state,
            Message::GoToPage {
                page: PageKind::Clients,
                number: 99,
            },
        );
        assert_eq!(state.lists.get(&PageKind::Clients).unwrap().page, 5);
    }

    #[test]
    fn refresh_reclamps_the_current_page() {
        let mut state = loaded_state(47);
        update(
            &mut state,
            Message::GoToPage {
                page: PageKind::Clients,
                number: 5,
            },
        );

        // The data set shrank: a refresh must pull the page back in range.
        let generation = fetch_generation(&mut state, PageKind::Clients);
        update(
            &mut state,
            Message::ListLoaded {
                page: PageKind::Clients,
                generation,
                rows: Vec::new(),
                total: Some(12),
            },
        );
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.page, 2);
        assert!(list.server_paged);
    }

    #[test]
    fn search_resets_pagination_and_refetches() {
        let mut state = loaded_state(47);
        update(
            &mut state,
            Message::GoToPage {
                page: PageKind::Clients,
                number: 3,
            },
        );

        let commands = update(
            &mut state,
            Message::SearchChanged {
                page: PageKind::Clients,
                query: "ana".to_string(),
            },
        );
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.page, 1);
        assert_eq!(list.search, "ana");
        assert_eq!(list.phase, ListPhase::Loading);
        assert!(matches!(commands[0], Command::FetchList(PageKind::Clients)));
    }

    #[test]
    fn identical_search_is_a_no_op() {
        let mut state = loaded_state(5);
        update(
            &mut state,
            Message::SearchChanged {
                page: PageKind::Clients,
                query: "ana".to_string(),
            },
        );
        let commands = update(
            &mut state,
            Message::SearchChanged {
                page: PageKind::Clients,
                query: "ana".to_string(),
            },
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn stale_completions_are_discarded() {
        let mut state = loaded_state(10);
        // A newer fetch started: bump the generation past the in-flight one.
        state.ensure_list(PageKind::Clients).generation += 1;

        update(
            &mut state,
            Message::ListLoaded {
                page: PageKind::Clients,
                generation: 0,
                rows: Vec::new(),
                total: Some(0),
            },
        );
        // The stale empty payload did not clobber the rows.
        assert_eq!(state.lists.get(&PageKind::Clients).unwrap().rows.len(), 10);
    }

    #[test]
    fn failed_load_empties_the_list_and_alerts() {
        let mut state = loaded_state(10);
        let generation = fetch_generation(&mut state, PageKind::Clients);
        let commands = update(
            &mut state,
            Message::ListLoadFailed {
                page: PageKind::Clients,
                generation,
                error: "500 Internal Server Error".to_string(),
            },
        );
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert_eq!(list.phase, ListPhase::Failed);
        assert!(list.rows.is_empty());
        assert!(matches!(commands[0], Command::UpdateUI(_)));
    }

    #[test]
    fn clear_filters_resets_everything_to_defaults() {
        let mut state = loaded_state(47);
        update(
            &mut state,
            Message::SearchChanged {
                page: PageKind::Clients,
                query: "x".to_string(),
            },
        );
        update(
            &mut state,
            Message::DateRangeChanged {
                page: PageKind::Clients,
                start: "2026-01-01".to_string(),
                end: "2026-01-31".to_string(),
            },
        );

        let commands = update(&mut state, Message::ClearFilters(PageKind::Clients));
        let list = state.lists.get(&PageKind::Clients).unwrap();
        assert!(list.search.is_empty());
        assert!(list.date_start.is_empty());
        assert!(list.date_end.is_empty());
        assert_eq!(list.page, 1);
        assert!(matches!(commands[0], Command::FetchList(PageKind::Clients)));
    }

    #[test]
    fn inverted_date_range_does_not_query() {
        let mut state = loaded_state(5);
        let commands = update(
            &mut state,
            Message::DateRangeChanged {
                page: PageKind::Clients,
                start: "2026-02-01".to_string(),
                end: "2026-01-01".to_string(),
            },
        );
        assert!(matches!(commands[0], Command::UpdateUI(_)));
        assert!(!matches!(commands[0], Command::FetchList(_)));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn double_submit_is_dropped_while_in_flight() {
        let mut state = AppState::new();
        update(&mut state, Message::NavigateTo(PageKind::Products));
        update(&mut state, Message::OpenCreateModal(PageKind::Products));

        let mut values = serde_json::Map::new();
        values.insert("descripcion".to_string(), json!("Yerba 1kg"));

        let first = update(
            &mut state,
            Message::SubmitEditor {
                page: PageKind::Products,
                values: values.clone(),
            },
        );
        assert!(matches!(first[0], Command::SubmitMutation { .. }));

        let second = update(
            &mut state,
            Message::SubmitEditor {
                page: PageKind::Products,
                values,
            },
        );
        assert!(second.is_empty());
    }

    #[test]
    fn create_and_edit_hit_different_endpoints() {
        let mut state = AppState::new();
        update(&mut state, Message::NavigateTo(PageKind::Products));

        update(&mut state, Message::OpenCreateModal(PageKind::Products));
        let commands = update(
            &mut state,
            Message::SubmitEditor {
                page: PageKind::Products,
                values: serde_json::Map::new(),
            },
        );
        match &commands[0] {
            Command::SubmitMutation { path, .. } => {
                assert_eq!(path, "/api/productos/crear/");
            }
            _ => panic!("expected SubmitMutation"),
        }

        let mut row = serde_json::Map::new();
        row.insert("id".to_string(), json!(7));
        update(
            &mut state,
            Message::OpenEditModal {
                page: PageKind::Products,
                row,
            },
        );
        let commands = update(
            &mut state,
            Message::SubmitEditor {
                page: PageKind::Products,
                values: serde_json::Map::new(),
            },
        );
        match &commands[0] {
            Command::SubmitMutation { path, .. } => {
                assert_eq!(path, "/api/productos/7/editar/");
            }
            _ => panic!("expected SubmitMutation"),
        }
    }

    #[test]
    fn field_errors_land_inline_not_in_an_alert() {
        let mut state = AppState::new();
        update(&mut state, Message::NavigateTo(PageKind::Clients));
        update(&mut state, Message::OpenCreateModal(PageKind::Clients));
        update(
            &mut state,
            Message::SubmitEditor {
                page: PageKind::Clients,
                values: serde_json::Map::new(),
            },
        );

        let mut errors = std::collections::HashMap::new();
        errors.insert("nombre".to_string(), vec!["Requerido".to_string()]);
        let commands = update(
            &mut state,
            Message::MutationFailed {
                page: PageKind::Clients,
                error: MutationError::Fields(errors),
            },
        );
        assert!(commands.is_empty());

        let editor = state.editors.get(&PageKind::Clients).unwrap();
        assert!(!editor.submitting);
        assert_eq!(editor.field_errors["nombre"], vec!["Requerido".to_string()]);
    }

    #[test]
    fn successful_mutation_closes_editor_and_refetches() {
        let mut state = AppState::new();
        update(&mut state, Message::NavigateTo(PageKind::Clients));
        update(&mut state, Message::OpenCreateModal(PageKind::Clients));

        let commands = update(
            &mut state,
            Message::MutationSucceeded {
                page: PageKind::Clients,
                toast: "ok".to_string(),
            },
        );
        assert!(state.editors.get(&PageKind::Clients).is_none());
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::FetchList(PageKind::Clients))));
        assert_eq!(
            state.lists.get(&PageKind::Clients).unwrap().phase,
            ListPhase::Loading
        );
    }

    #[test]
    fn confirm_delete_is_the_only_path_to_the_delete_command() {
        let mut state = AppState::new();
        // The request only opens a dialog.
        let commands = update(
            &mut state,
            Message::RequestDelete {
                page: PageKind::Clients,
                id: 3,
                label: "Ana".to_string(),
            },
        );
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Command::UpdateUI(_)));

        // Only the explicit confirmation issues the destructive command.
        let commands = update(
            &mut state,
            Message::ConfirmDelete {
                page: PageKind::Clients,
                id: 3,
            },
        );
        assert!(matches!(
            commands[0],
            Command::DeleteEntity {
                page: PageKind::Clients,
                id: 3
            }
        ));
    }

    #[test]
    fn unchanged_config_does_not_broadcast() {
        let mut state = AppState::new();
        let commands = update(
            &mut state,
            Message::ConfigLoaded(crate::models::UiConfig::default()),
        );
        assert!(commands.is_empty());

        let changed = crate::models::UiConfig {
            hide_scrollbars: true,
            default_page_size: 20,
        };
        let commands = update(&mut state, Message::ConfigLoaded(changed));
        assert!(matches!(commands[0], Command::BroadcastConfigUpdated));
    }
}
