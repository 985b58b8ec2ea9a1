use std::fmt;

use crate::models::{Ingredient, StockLimit};

/// Why an increment/decrement step was refused.
///
/// Denials are notifications for the customer, not errors: the selection is
/// left untouched and the session keeps going.
#[derive(Debug, Clone, PartialEq)]
pub enum Denial {
    /// Effective quantity would exceed the business-rule maximum.
    MaxPortions { max: u32 },

    /// Effective quantity would drop below the business-rule minimum.
    /// The interface hides the control at the floor, so this stays silent.
    MinPortions { min: u32 },

    /// Projected consumption would exceed recorded inventory.
    Stock {
        /// Extra portions per item the remaining stock still supports.
        available_extras: u32,
        on_hand: f64,
        unit: String,
    },

    /// Same as `Stock`, from the legacy maxAvailable field (no inventory
    /// detail to show).
    StockLegacy { available_extras: u32 },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::MaxPortions { max } => write!(f, "Maximum allowed quantity: {}", max),
            Denial::MinPortions { min } => write!(f, "Minimum allowed quantity: {}", min),
            Denial::Stock {
                available_extras,
                on_hand,
                unit,
            } => write!(
                f,
                "Insufficient stock. Available: {} extra portions per item (stock: {} {})",
                available_extras, on_hand, unit
            ),
            Denial::StockLegacy { available_extras } => write!(
                f,
                "Insufficient stock. Available: {} extra portions per item",
                available_extras
            ),
        }
    }
}

/// Highest effective quantity the recorded stock allows at the given order
/// quantity, or `None` when the ingredient carries no stock information.
///
/// Tracked stock uses the precise consumption formula; the legacy field is a
/// best-effort ceiling scaled down by the order quantity.
pub fn stock_ceiling(ingredient: &Ingredient, order_quantity: u32) -> Option<u32> {
    let order_quantity = order_quantity.max(1);
    match ingredient.stock.as_ref()? {
        StockLimit::Tracked {
            current_stock,
            base_portion_quantity,
            ..
        } => {
            let per_portion = base_portion_quantity * order_quantity as f64;
            let units = (current_stock / per_portion).floor();
            Some(units.clamp(0.0, u32::MAX as f64) as u32)
        }
        StockLimit::Legacy { max_available } => Some(
            ingredient
                .base_portions
                .saturating_add(max_available / order_quantity),
        ),
    }
}

/// Tightest effective-quantity ceiling: business rule and stock combined.
pub fn effective_ceiling(ingredient: &Ingredient, order_quantity: u32) -> u32 {
    let stock = stock_ceiling(ingredient, order_quantity).unwrap_or(u32::MAX);
    ingredient.max_quantity.min(stock)
}

/// Guard an increment from `current_effective`. Guards run in order: the
/// business-rule maximum first, then the stock ceiling.
pub fn check_increment(
    ingredient: &Ingredient,
    current_effective: u32,
    order_quantity: u32,
) -> Option<Denial> {
    let proposed = current_effective.saturating_add(1);

    if proposed > ingredient.max_quantity {
        return Some(Denial::MaxPortions {
            max: ingredient.max_quantity,
        });
    }

    if let Some(ceiling) = stock_ceiling(ingredient, order_quantity) {
        if proposed > ceiling {
            let available_extras = ceiling.saturating_sub(ingredient.base_portions);
            return Some(match ingredient.stock.as_ref() {
                Some(StockLimit::Tracked {
                    current_stock,
                    unit,
                    ..
                }) => Denial::Stock {
                    available_extras,
                    on_hand: *current_stock,
                    unit: unit.clone(),
                },
                _ => Denial::StockLegacy { available_extras },
            });
        }
    }

    None
}

/// Guard a decrement from `current_effective` against the rule floor.
pub fn check_decrement(ingredient: &Ingredient, current_effective: u32) -> Option<Denial> {
    if current_effective == 0 || current_effective - 1 < ingredient.min_quantity {
        return Some(Denial::MinPortions {
            min: ingredient.min_quantity,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extra(max: u32, stock: Option<StockLimit>) -> Ingredient {
        Ingredient {
            id: 9,
            name: "Bacon".to_string(),
            additional_price: 3.0,
            base_portions: 0,
            min_quantity: 0,
            max_quantity: max,
            stock,
        }
    }

    fn tracked(current_stock: f64, base_portion_quantity: f64) -> Option<StockLimit> {
        Some(StockLimit::Tracked {
            current_stock,
            base_portion_quantity,
            unit: "kg".to_string(),
        })
    }

    #[test]
    fn test_stock_ceiling_scales_with_order_quantity() {
        let ing = extra(10, tracked(6.0, 1.0));
        assert_eq!(stock_ceiling(&ing, 1), Some(6));
        assert_eq!(stock_ceiling(&ing, 2), Some(3));
        assert_eq!(stock_ceiling(&ing, 4), Some(1));
        assert_eq!(stock_ceiling(&ing, 7), Some(0));
    }

    #[test]
    fn test_stock_ceiling_fractional_consumption() {
        // 0.3 kg per portion, 1 kg on hand: 3 portions fit, 4 do not.
        let ing = extra(10, tracked(1.0, 0.3));
        assert_eq!(stock_ceiling(&ing, 1), Some(3));
    }

    #[test]
    fn test_legacy_ceiling_divides_by_order_quantity() {
        let ing = extra(10, Some(StockLimit::Legacy { max_available: 5 }));
        assert_eq!(stock_ceiling(&ing, 1), Some(5));
        assert_eq!(stock_ceiling(&ing, 2), Some(2));
        assert_eq!(stock_ceiling(&ing, 6), Some(0));
    }

    #[test]
    fn test_rule_guard_runs_before_stock_guard() {
        // Both guards would fail; the rule denial must win.
        let ing = extra(2, tracked(0.0, 1.0));
        assert_eq!(
            check_increment(&ing, 2, 1),
            Some(Denial::MaxPortions { max: 2 })
        );
    }

    #[test]
    fn test_stock_guard_reports_remaining_extras() {
        let ing = extra(10, tracked(6.0, 1.0));
        assert_eq!(check_increment(&ing, 5, 1), None);
        assert_eq!(
            check_increment(&ing, 6, 1),
            Some(Denial::Stock {
                available_extras: 6,
                on_hand: 6.0,
                unit: "kg".to_string(),
            })
        );
    }

    #[test]
    fn test_decrement_denied_at_floor() {
        let mut ing = extra(5, None);
        ing.base_portions = 2;
        ing.min_quantity = 1;
        assert_eq!(check_decrement(&ing, 2), None);
        assert_eq!(
            check_decrement(&ing, 1),
            Some(Denial::MinPortions { min: 1 })
        );
        assert_eq!(
            check_decrement(&ing, 0),
            Some(Denial::MinPortions { min: 1 })
        );
    }

    #[test]
    fn test_effective_ceiling_combines_rule_and_stock() {
        let ing = extra(3, tracked(6.0, 1.0));
        assert_eq!(effective_ceiling(&ing, 1), 3); // rule binds
        assert_eq!(effective_ceiling(&ing, 4), 1); // stock binds
        assert_eq!(effective_ceiling(&extra(3, None), 1), 3);
    }

    #[test]
    fn test_denial_messages() {
        assert_eq!(
            Denial::MaxPortions { max: 4 }.to_string(),
            "Maximum allowed quantity: 4"
        );
        assert_eq!(
            Denial::Stock {
                available_extras: 3,
                on_hand: 6.0,
                unit: "kg".to_string()
            }
            .to_string(),
            "Insufficient stock. Available: 3 extra portions per item (stock: 6 kg)"
        );
    }
}
