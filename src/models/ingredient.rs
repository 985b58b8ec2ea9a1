use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::pricing::constants::{DEFAULT_BASE_PORTION_QUANTITY, DEFAULT_MAX_PORTIONS};

/// An ingredient record as the catalog API sends it.
///
/// Everything beyond id and name is optional or loosely typed; the record is
/// converted into a typed [`Ingredient`] exactly once, at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIngredient {
    pub ingredient_id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub additional_price: f64,

    /// Portions already included in the base recipe; 0 means "pure extra."
    #[serde(default)]
    pub portions: i64,

    #[serde(default)]
    pub min_quantity: Option<i64>,

    #[serde(default)]
    pub max_quantity: Option<i64>,

    #[serde(default)]
    pub current_stock: Option<f64>,

    /// Legacy field: max extra portions at order quantity 1.
    #[serde(default)]
    pub max_available: Option<i64>,

    /// Informational only ("rule" or "stock"); the engine recomputes this.
    #[serde(default)]
    pub limited_by: Option<String>,

    #[serde(default)]
    pub base_portion_quantity: Option<f64>,

    #[serde(default)]
    pub stock_unit: Option<String>,
}

/// A validated ingredient ready for the pricing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub id: u32,
    pub name: String,
    /// Charged per extra portion.
    pub additional_price: f64,
    /// Portions included in the base recipe (0 = pure extra).
    pub base_portions: u32,
    /// Inclusive bounds on the effective quantity `base_portions + delta`.
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub stock: Option<StockLimit>,
}

/// How an ingredient's availability is capped beyond the min/max rule.
///
/// `Tracked` is the authoritative formula; `Legacy` is a best-effort ceiling
/// kept for older catalog responses and used only when `Tracked` fields are
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub enum StockLimit {
    Tracked {
        current_stock: f64,
        /// Stock consumed per portion.
        base_portion_quantity: f64,
        unit: String,
    },
    Legacy {
        /// Max extra portions per item at order quantity 1.
        max_available: u32,
    },
}

impl RawIngredient {
    /// Validate and convert into a typed [`Ingredient`].
    ///
    /// Absent bounds default to `[0, DEFAULT_MAX_PORTIONS]`. Records with a
    /// non-positive id, a bad price, inverted bounds, or base portions outside
    /// the bounds are rejected here and never reach the engine.
    pub fn normalize(self) -> Result<Ingredient, NormalizeError> {
        if self.ingredient_id <= 0 || self.ingredient_id > u32::MAX as i64 {
            return Err(NormalizeError::BadId);
        }
        if !self.additional_price.is_finite() || self.additional_price < 0.0 {
            return Err(NormalizeError::BadPrice);
        }

        let min_quantity = self.min_quantity.unwrap_or(0).max(0) as u32;
        let max_quantity = match self.max_quantity {
            None => DEFAULT_MAX_PORTIONS,
            Some(v) if v < 0 => {
                return Err(NormalizeError::InvertedBounds {
                    min: min_quantity,
                    max: 0,
                });
            }
            Some(v) => v.min(u32::MAX as i64) as u32,
        };
        if min_quantity > max_quantity {
            return Err(NormalizeError::InvertedBounds {
                min: min_quantity,
                max: max_quantity,
            });
        }

        if self.portions < min_quantity as i64 || self.portions > max_quantity as i64 {
            return Err(NormalizeError::BaseOutOfBounds {
                portions: self.portions.clamp(0, u32::MAX as i64) as u32,
                min: min_quantity,
                max: max_quantity,
            });
        }
        let base_portions = self.portions as u32;

        let stock = match self.current_stock {
            Some(current_stock) => {
                let base_portion_quantity = self
                    .base_portion_quantity
                    .unwrap_or(DEFAULT_BASE_PORTION_QUANTITY);
                if !current_stock.is_finite()
                    || current_stock < 0.0
                    || !base_portion_quantity.is_finite()
                    || base_portion_quantity <= 0.0
                {
                    return Err(NormalizeError::BadStock);
                }
                Some(StockLimit::Tracked {
                    current_stock,
                    base_portion_quantity,
                    unit: self.stock_unit.unwrap_or_else(|| "portions".to_string()),
                })
            }
            None => match self.max_available {
                Some(v) if v >= 0 => Some(StockLimit::Legacy {
                    max_available: v.min(u32::MAX as i64) as u32,
                }),
                // Negative legacy values come from a known back-office bug;
                // treat them as "no stock information."
                _ => None,
            },
        };

        Ok(Ingredient {
            id: self.ingredient_id as u32,
            name: self.name,
            additional_price: self.additional_price,
            base_portions,
            min_quantity,
            max_quantity,
            stock,
        })
    }
}

impl Ingredient {
    /// True for ingredients sold purely as add-ons.
    #[inline]
    pub fn is_extra(&self) -> bool {
        self.base_portions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i64) -> RawIngredient {
        RawIngredient {
            ingredient_id: id,
            name: "Bacon".to_string(),
            additional_price: 3.0,
            portions: 0,
            min_quantity: None,
            max_quantity: Some(3),
            current_stock: None,
            max_available: None,
            limited_by: None,
            base_portion_quantity: None,
            stock_unit: None,
        }
    }

    #[test]
    fn test_normalize_defaults_bounds() {
        let ing = RawIngredient {
            max_quantity: None,
            ..raw(7)
        }
        .normalize()
        .unwrap();
        assert_eq!(ing.min_quantity, 0);
        assert_eq!(ing.max_quantity, DEFAULT_MAX_PORTIONS);
        assert!(ing.is_extra());
        assert_eq!(ing.stock, None);
    }

    #[test]
    fn test_normalize_rejects_bad_id() {
        assert_eq!(raw(0).normalize().unwrap_err(), NormalizeError::BadId);
        assert_eq!(raw(-4).normalize().unwrap_err(), NormalizeError::BadId);
    }

    #[test]
    fn test_normalize_rejects_bad_price() {
        let mut r = raw(1);
        r.additional_price = -0.5;
        assert_eq!(r.normalize().unwrap_err(), NormalizeError::BadPrice);

        let mut r = raw(1);
        r.additional_price = f64::NAN;
        assert_eq!(r.normalize().unwrap_err(), NormalizeError::BadPrice);
    }

    #[test]
    fn test_normalize_rejects_inverted_bounds() {
        let mut r = raw(1);
        r.min_quantity = Some(5);
        r.max_quantity = Some(2);
        assert!(matches!(
            r.normalize(),
            Err(NormalizeError::InvertedBounds { min: 5, max: 2 })
        ));
    }

    #[test]
    fn test_normalize_rejects_base_out_of_bounds() {
        let mut r = raw(1);
        r.portions = 4;
        r.max_quantity = Some(3);
        assert!(matches!(
            r.normalize(),
            Err(NormalizeError::BaseOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_normalize_prefers_tracked_stock() {
        let mut r = raw(1);
        r.current_stock = Some(6.0);
        r.max_available = Some(2);
        r.stock_unit = Some("kg".to_string());
        let ing = r.normalize().unwrap();
        assert_eq!(
            ing.stock,
            Some(StockLimit::Tracked {
                current_stock: 6.0,
                base_portion_quantity: DEFAULT_BASE_PORTION_QUANTITY,
                unit: "kg".to_string(),
            })
        );
    }

    #[test]
    fn test_normalize_falls_back_to_legacy_stock() {
        let mut r = raw(1);
        r.max_available = Some(4);
        let ing = r.normalize().unwrap();
        assert_eq!(ing.stock, Some(StockLimit::Legacy { max_available: 4 }));

        let mut r = raw(1);
        r.max_available = Some(-1);
        assert_eq!(r.normalize().unwrap().stock, None);
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "ingredientId": 12,
            "name": "Queijo",
            "additionalPrice": 1.5,
            "portions": 2,
            "minQuantity": 0,
            "maxQuantity": 4,
            "currentStock": 10.0,
            "basePortionQuantity": 0.5,
            "stockUnit": "kg"
        }"#;
        let raw: RawIngredient = serde_json::from_str(json).unwrap();
        let ing = raw.normalize().unwrap();
        assert_eq!(ing.id, 12);
        assert_eq!(ing.base_portions, 2);
        assert!(matches!(ing.stock, Some(StockLimit::Tracked { .. })));
    }
}
