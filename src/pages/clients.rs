//! Clients screen: master data plus the running-account balance.

use crate::components::data_table::{Align, Column};
use crate::pages::{row_text, EntitySpec, FieldSpec};
use crate::utils::format_money;

pub static SPEC: EntitySpec = EntitySpec {
    title: "Clientes",
    title_singular: "cliente",
    api_path: "/api/clientes/",
    search_placeholder: "Buscar por nombre o documento...",
    with_dates: false,
    empty_text: "No hay clientes cargados.",
    fields: &[
        FieldSpec {
            key: "nombre",
            label: "Nombre",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "documento",
            label: "Documento",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "localidad",
            label: "Localidad",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "telefono",
            label: "Teléfono",
            input_type: "text",
            required: false,
        },
    ],
    columns,
    row_label,
};

fn columns() -> Vec<Column> {
    vec![
        Column::new("nombre", "Nombre"),
        Column::new("documento", "Documento").with_width("140px"),
        Column::new("localidad", "Localidad"),
        Column::new("telefono", "Teléfono").not_sortable(),
        Column::new("saldo", "Saldo Cta. Cte.")
            .align(Align::Right)
            .with_width("140px")
            .with_render(|value, _row, _index| {
                let amount = value.as_f64().unwrap_or(0.0);
                let class = if amount < 0.0 { "saldo deudor" } else { "saldo" };
                format!("<span class=\"{}\">{}</span>", class, format_money(amount))
            }),
    ]
}

fn row_label(row: &crate::models::Row) -> String {
    row_text(row, "nombre")
}
