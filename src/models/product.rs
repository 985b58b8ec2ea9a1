use serde::{Deserialize, Serialize};

use crate::models::ingredient::RawIngredient;

/// A sellable product with its base-recipe price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,
}

/// One entry of the menu file: a product plus its customization options,
/// exactly as the catalog API ships them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(flatten)]
    pub product: Product,

    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
}

impl Product {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Basic validation: positive id and a finite, non-negative price.
    pub fn is_valid(&self) -> bool {
        self.id > 0 && self.price.is_finite() && self.price >= 0.0
    }
}
