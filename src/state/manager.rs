use std::collections::BTreeMap;

use crate::models::{Ingredient, Product, ProductRecord, StockLimit};
use crate::state::persistence::StockRow;

/// The loaded menu: products and their normalized customization options.
pub struct MenuManager {
    products: BTreeMap<u32, Product>,
    /// Normalized ingredients per product id.
    ingredients: BTreeMap<u32, Vec<Ingredient>>,
    dropped: usize,
}

impl MenuManager {
    /// Build a manager from raw menu records, normalizing every ingredient
    /// once at this boundary. Malformed ingredient records and invalid
    /// products are dropped and counted, never surfaced to the customer.
    pub fn new(records: Vec<ProductRecord>) -> Self {
        let mut products = BTreeMap::new();
        let mut ingredients = BTreeMap::new();
        let mut dropped = 0;

        for record in records {
            if !record.product.is_valid() {
                dropped += 1;
                continue;
            }
            let mut normalized = Vec::with_capacity(record.ingredients.len());
            for raw in record.ingredients {
                match raw.normalize() {
                    Ok(ingredient) => normalized.push(ingredient),
                    Err(_) => dropped += 1,
                }
            }
            ingredients.insert(record.product.id, normalized);
            products.insert(record.product.id, record.product);
        }

        Self {
            products,
            ingredients,
            dropped,
        }
    }

    /// Get a product by id.
    pub fn get_product(&self, id: u32) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Get a product by name (case-insensitive exact match).
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        let key = name.to_lowercase();
        self.products.values().find(|p| p.key() == key)
    }

    /// Normalized customization options for a product.
    pub fn ingredients_for(&self, product_id: u32) -> &[Ingredient] {
        self.ingredients
            .get(&product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All products, in id order.
    pub fn all_products(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Records dropped during normalization.
    pub fn dropped_records(&self) -> usize {
        self.dropped
    }

    /// Overlay a back-office stock sheet onto the loaded menu.
    ///
    /// Every ingredient matching a row's id (across all products) gets its
    /// stock replaced with tracked inventory. Returns the number of
    /// ingredient entries updated; rows with non-finite or negative values
    /// are skipped.
    pub fn apply_stock_sheet(&mut self, rows: &[StockRow]) -> usize {
        let mut updated = 0;
        for row in rows {
            if !row.current_stock.is_finite() || row.current_stock < 0.0 {
                continue;
            }
            let base_portion_quantity = row.base_portion_quantity.unwrap_or(1.0);
            if !base_portion_quantity.is_finite() || base_portion_quantity <= 0.0 {
                continue;
            }
            for list in self.ingredients.values_mut() {
                for ingredient in list.iter_mut().filter(|i| i.id == row.ingredient_id) {
                    ingredient.stock = Some(StockLimit::Tracked {
                        current_stock: row.current_stock,
                        base_portion_quantity,
                        unit: row
                            .stock_unit
                            .clone()
                            .unwrap_or_else(|| "portions".to_string()),
                    });
                    updated += 1;
                }
            }
        }
        updated
    }

    /// Count of products on the menu.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the menu has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawIngredient;

    fn raw_ingredient(id: i64) -> RawIngredient {
        RawIngredient {
            ingredient_id: id,
            name: format!("Ing {}", id),
            additional_price: 1.0,
            portions: 0,
            min_quantity: None,
            max_quantity: None,
            current_stock: None,
            max_available: None,
            limited_by: None,
            base_portion_quantity: None,
            stock_unit: None,
        }
    }

    fn sample_records() -> Vec<ProductRecord> {
        vec![ProductRecord {
            product: Product {
                id: 3,
                name: "Royal Classic".to_string(),
                price: 18.0,
                description: String::new(),
                image_url: String::new(),
            },
            ingredients: vec![raw_ingredient(1), raw_ingredient(0), raw_ingredient(9)],
        }]
    }

    #[test]
    fn test_malformed_ingredients_dropped_and_counted() {
        let manager = MenuManager::new(sample_records());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.dropped_records(), 1);
        assert_eq!(manager.ingredients_for(3).len(), 2);
    }

    #[test]
    fn test_find_product_case_insensitive() {
        let manager = MenuManager::new(sample_records());
        assert!(manager.find_product("royal classic").is_some());
        assert!(manager.find_product("ROYAL CLASSIC").is_some());
        assert!(manager.find_product("whopper").is_none());
    }

    #[test]
    fn test_apply_stock_sheet() {
        let mut manager = MenuManager::new(sample_records());
        let rows = vec![
            StockRow {
                ingredient_id: 9,
                current_stock: 4.5,
                base_portion_quantity: Some(0.5),
                stock_unit: Some("kg".to_string()),
            },
            StockRow {
                ingredient_id: 9,
                current_stock: f64::NAN,
                base_portion_quantity: None,
                stock_unit: None,
            },
        ];

        assert_eq!(manager.apply_stock_sheet(&rows), 1);
        let ingredient = manager
            .ingredients_for(3)
            .iter()
            .find(|i| i.id == 9)
            .unwrap();
        assert_eq!(
            ingredient.stock,
            Some(StockLimit::Tracked {
                current_stock: 4.5,
                base_portion_quantity: 0.5,
                unit: "kg".to_string(),
            })
        );
    }
}
