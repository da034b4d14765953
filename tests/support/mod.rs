use stockroom::{Product, ProductDraft, VariationDraft};

/// Build a draft from `(color, stock, price)` rows.
pub fn draft(name: &str, rows: &[(&str, u32, f64)]) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        variations: rows
            .iter()
            .map(|(color, stock, price)| VariationDraft {
                color: color.to_string(),
                stock_quantity: *stock,
                price: *price,
            })
            .collect(),
    }
}

/// Build a ready-to-store record the way the create form would.
pub fn product(name: &str, rows: &[(&str, u32, f64)]) -> Product {
    draft(name, rows).into_product()
}
