//! Products screen: catalog with category/brand taxonomy, price and stock.

use crate::components::data_table::{Align, Column};
use crate::pages::{row_text, EntitySpec, FieldSpec};
use crate::utils::format_money;

pub static SPEC: EntitySpec = EntitySpec {
    title: "Productos",
    title_singular: "producto",
    api_path: "/api/productos/",
    search_placeholder: "Buscar por código o descripción...",
    with_dates: false,
    empty_text: "No hay productos cargados.",
    fields: &[
        FieldSpec {
            key: "codigo",
            label: "Código",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "descripcion",
            label: "Descripción",
            input_type: "text",
            required: true,
        },
        FieldSpec {
            key: "rubro",
            label: "Rubro",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "marca",
            label: "Marca",
            input_type: "text",
            required: false,
        },
        FieldSpec {
            key: "precio",
            label: "Precio de venta",
            input_type: "number",
            required: true,
        },
        FieldSpec {
            key: "stock",
            label: "Stock",
            input_type: "number",
            required: false,
        },
    ],
    columns,
    row_label,
};

fn columns() -> Vec<Column> {
    vec![
        Column::new("codigo", "Código").with_width("100px"),
        Column::new("descripcion", "Descripción"),
        Column::new("rubro", "Rubro").with_width("120px"),
        Column::new("marca", "Marca").with_width("120px"),
        Column::new("precio", "Precio")
            .align(Align::Right)
            .with_width("120px")
            .with_render(|value, _row, _index| format_money(value.as_f64().unwrap_or(0.0))),
        Column::new("stock", "Stock")
            .align(Align::Right)
            .with_width("90px")
            .with_render(|value, row, _index| {
                // Highlight shortages against the row's own minimum.
                let stock = value.as_f64().unwrap_or(0.0);
                let minimum = row
                    .get("stock_minimo")
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(0.0);
                if stock <= minimum {
                    format!("<span class=\"stock-low\">{}</span>", stock)
                } else {
                    stock.to_string()
                }
            }),
    ]
}

fn row_label(row: &crate::models::Row) -> String {
    row_text(row, "descripcion")
}
