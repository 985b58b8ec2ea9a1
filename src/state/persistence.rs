use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{OrderPayload, ProductRecord};

/// One row of a back-office stock sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct StockRow {
    pub ingredient_id: u32,
    pub current_stock: f64,

    #[serde(default)]
    pub base_portion_quantity: Option<f64>,

    #[serde(default)]
    pub stock_unit: Option<String>,
}

/// Load the menu JSON file (an array of product records, as the catalog API
/// ships them).
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<Vec<ProductRecord>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ProductRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Save an order draft as pretty JSON.
pub fn save_order<P: AsRef<Path>>(path: P, payload: &OrderPayload) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a previously saved order draft.
pub fn load_order<P: AsRef<Path>>(path: P) -> Result<OrderPayload> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a stock sheet CSV (headers: ingredient_id, current_stock,
/// base_portion_quantity, stock_unit).
///
/// Rows that fail to parse are skipped, matching the drop-don't-surface
/// policy applied to malformed catalog records.
pub fn load_stock_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<StockRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(_) => continue,
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseModification, ExtraEntry};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_menu_load() {
        let json = r#"[
            {
                "id": 3, "name": "Royal Classic", "price": 18.9,
                "ingredients": [
                    {"ingredientId": 1, "name": "Queijo", "additionalPrice": 1.0, "portions": 2, "maxQuantity": 4}
                ]
            }
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let records = load_menu(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product.name, "Royal Classic");
        assert_eq!(records[0].ingredients.len(), 1);
    }

    #[test]
    fn test_order_draft_roundtrip() {
        let payload = OrderPayload {
            product_id: 3,
            quantity: 2,
            extras: vec![ExtraEntry {
                ingredient_id: 9,
                quantity: 3,
            }],
            base_modifications: vec![BaseModification {
                ingredient_id: 1,
                delta: -2,
            }],
            notes: "extra crispy".to_string(),
        };

        let file = NamedTempFile::new().unwrap();
        save_order(file.path(), &payload).unwrap();
        let reloaded = load_order(file.path()).unwrap();
        assert_eq!(reloaded, payload);
    }

    #[test]
    fn test_stock_sheet_skips_bad_rows() {
        let csv = "ingredient_id,current_stock,base_portion_quantity,stock_unit\n\
                   9,6.0,1.0,portions\n\
                   oops,not-a-number,,\n\
                   1,4.5,0.5,kg\n";

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let rows = load_stock_sheet(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ingredient_id, 9);
        assert_eq!(rows[1].stock_unit.as_deref(), Some("kg"));
    }
}
