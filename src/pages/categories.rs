//! Product categories (rubros).

use crate::components::data_table::{Align, Column};
use crate::pages::{row_text, EntitySpec, FieldSpec};

pub static SPEC: EntitySpec = EntitySpec {
    title: "Rubros",
    title_singular: "rubro",
    api_path: "/api/rubros/",
    search_placeholder: "Buscar rubro...",
    with_dates: false,
    empty_text: "No hay rubros cargados.",
    fields: &[FieldSpec {
        key: "nombre",
        label: "Nombre",
        input_type: "text",
        required: true,
    }],
    columns,
    row_label,
};

fn columns() -> Vec<Column> {
    vec![
        Column::new("nombre", "Nombre"),
        Column::new("productos", "Productos")
            .align(Align::Right)
            .with_width("110px"),
    ]
}

fn row_label(row: &crate::models::Row) -> String {
    row_text(row, "nombre")
}
