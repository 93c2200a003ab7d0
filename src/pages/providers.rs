//! Providers screen.

use crate::components::data_table::Column;
use crate::pages::{row_text, EntitySpec, FieldSpec};

pub static SPEC: EntitySpec = EntitySpec {
    title: "Proveedores",
    title_singular: "proveedor",
    api_path: "/api/proveedores/",
    search_placeholder: "Buscar por nombre o CUIT...",
    with_dates: false,
    empty_text: "No hay proveedores cargados.",
    fields: &[
        FieldSpec {
            key: "nombre",
            label: "Nombre",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "cuit",
            label: "CUIT",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "telefono",
            label: "Teléfono",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "email",
            label: "Email",
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
        Column::new("cuit", "CUIT").with_width("150px"),
        Column::new("telefono", "Teléfono").not_sortable(),
        Column::new("email", "Email"),
    ]
}

fn row_label(row: &crate::models::Row) -> String {
    row_text(row, "nombre")
}
