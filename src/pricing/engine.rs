use std::collections::BTreeMap;

use crate::error::{OrderError, Result};
use crate::models::{BaseModification, ExtraEntry, Ingredient, OrderPayload, Product};
use crate::pricing::constants::{MAX_EXTRA_QUANTITY, MAX_EXTRAS_ENTRIES, MAX_NOTES_CHARS};
use crate::pricing::limits::{self, Denial};

/// Outcome of a single increment/decrement step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Applied { effective_quantity: u32 },
    Denied(Denial),
}

/// A selection clamped down after the order quantity changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub ingredient_id: u32,
    pub name: String,
    pub from: u32,
    pub to: u32,
}

/// Price recomputed from the current selection.
#[derive(Debug, Clone, Default)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub extras_total: f64,
    pub unit_total: f64,
    pub total: f64,
}

/// The customization state for one product instance.
///
/// Owns the per-ingredient delta map for the lifetime of a session; every
/// mutation is an immediate recomputation from current state, and a denied
/// step leaves the state untouched. Durable state lives only in the saved
/// order draft.
pub struct CustomizationEngine {
    product: Product,
    ingredients: BTreeMap<u32, Ingredient>,
    /// Signed delta from base portions, keyed by ingredient id; absent = 0.
    deltas: BTreeMap<u32, i32>,
    order_quantity: u32,
    notes: String,
}

impl CustomizationEngine {
    /// Create an empty selection for a product and its ingredient options.
    ///
    /// Ingredients are deduplicated by id (last occurrence wins).
    pub fn new(product: Product, ingredients: Vec<Ingredient>) -> Self {
        let mut map = BTreeMap::new();
        for ingredient in ingredients {
            map.insert(ingredient.id, ingredient);
        }
        Self {
            product,
            ingredients: map,
            deltas: BTreeMap::new(),
            order_quantity: 1,
            notes: String::new(),
        }
    }

    /// Rebuild a selection from a previously saved order draft (the "edit
    /// cart line" flow).
    ///
    /// Entries referencing ingredients no longer on the menu are dropped
    /// silently; surviving quantities are clamped back into today's rule and
    /// stock limits.
    pub fn from_payload(
        product: Product,
        ingredients: Vec<Ingredient>,
        payload: &OrderPayload,
    ) -> Self {
        let mut engine = Self::new(product, ingredients);
        engine.order_quantity = payload.quantity.max(1);
        engine.set_notes(&payload.notes);

        for extra in &payload.extras {
            engine.restore_effective(extra.ingredient_id, extra.quantity as i64, true);
        }
        for modification in &payload.base_modifications {
            if let Some(base) = engine
                .ingredients
                .get(&modification.ingredient_id)
                .map(|i| i.base_portions)
            {
                let target = base as i64 + modification.delta as i64;
                engine.restore_effective(modification.ingredient_id, target, false);
            }
        }
        engine
    }

    fn restore_effective(&mut self, id: u32, target: i64, extras_only: bool) {
        let Some(ingredient) = self.ingredients.get(&id) else {
            return;
        };
        if extras_only != ingredient.is_extra() {
            return;
        }
        let ceiling = limits::effective_ceiling(ingredient, self.order_quantity) as i64;
        let floor = ingredient.min_quantity as i64;
        let effective = target.clamp(floor.min(ceiling), ceiling);
        let delta = effective - ingredient.base_portions as i64;
        if delta == 0 {
            self.deltas.remove(&id);
        } else {
            self.deltas.insert(id, delta as i32);
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    pub fn order_quantity(&self) -> u32 {
        self.order_quantity
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Signed delta from base portions for an ingredient (0 when untouched).
    pub fn delta(&self, ingredient_id: u32) -> i32 {
        self.deltas.get(&ingredient_id).copied().unwrap_or(0)
    }

    /// Effective quantity (`base_portions + delta`) for an ingredient.
    pub fn effective_quantity(&self, ingredient_id: u32) -> Result<u32> {
        let ingredient = self.ingredient(ingredient_id)?;
        Ok(Self::effective(ingredient, self.delta(ingredient_id)))
    }

    fn ingredient(&self, id: u32) -> Result<&Ingredient> {
        self.ingredients
            .get(&id)
            .ok_or(OrderError::IngredientNotFound(id))
    }

    fn effective(ingredient: &Ingredient, delta: i32) -> u32 {
        (ingredient.base_portions as i64 + delta as i64).max(0) as u32
    }

    /// Add one portion, guarded by the rule maximum and the stock ceiling
    /// (in that order). A denial leaves the selection unchanged.
    pub fn increment_ingredient(&mut self, ingredient_id: u32) -> Result<StepOutcome> {
        let ingredient = self.ingredient(ingredient_id)?;
        let current = Self::effective(ingredient, self.delta(ingredient_id));

        if let Some(denial) = limits::check_increment(ingredient, current, self.order_quantity) {
            return Ok(StepOutcome::Denied(denial));
        }

        *self.deltas.entry(ingredient_id).or_insert(0) += 1;
        Ok(StepOutcome::Applied {
            effective_quantity: current + 1,
        })
    }

    /// Remove one portion; denied at the rule floor. Deltas may go negative
    /// for base-recipe ingredients (removal from the base recipe).
    pub fn decrement_ingredient(&mut self, ingredient_id: u32) -> Result<StepOutcome> {
        let ingredient = self.ingredient(ingredient_id)?;
        let current = Self::effective(ingredient, self.delta(ingredient_id));

        if let Some(denial) = limits::check_decrement(ingredient, current) {
            return Ok(StepOutcome::Denied(denial));
        }

        let entry = self.deltas.entry(ingredient_id).or_insert(0);
        *entry -= 1;
        if *entry == 0 {
            self.deltas.remove(&ingredient_id);
        }
        Ok(StepOutcome::Applied {
            effective_quantity: current - 1,
        })
    }

    /// Whether another portion of the ingredient can be added right now.
    pub fn can_increment(&self, ingredient_id: u32) -> bool {
        self.ingredients
            .get(&ingredient_id)
            .map(|i| {
                limits::check_increment(i, Self::effective(i, self.delta(ingredient_id)), self.order_quantity)
                    .is_none()
            })
            .unwrap_or(false)
    }

    /// Whether a portion can be removed; the interface hides the control
    /// when this is false.
    pub fn can_decrement(&self, ingredient_id: u32) -> bool {
        self.ingredients
            .get(&ingredient_id)
            .map(|i| limits::check_decrement(i, Self::effective(i, self.delta(ingredient_id))).is_none())
            .unwrap_or(false)
    }

    /// Change the order-line quantity (>= 1). Stock ceilings scale with the
    /// quantity, so selections that no longer fit are clamped down; the
    /// returned adjustments let the interface announce each one.
    pub fn set_order_quantity(&mut self, quantity: u32) -> Result<Vec<Adjustment>> {
        if quantity == 0 {
            return Err(OrderError::InvalidInput(
                "order quantity must be at least 1".to_string(),
            ));
        }
        self.order_quantity = quantity;

        let mut adjustments = Vec::new();
        for ingredient in self.ingredients.values() {
            let delta = self.deltas.get(&ingredient.id).copied().unwrap_or(0);
            let current = Self::effective(ingredient, delta);
            let Some(ceiling) = limits::stock_ceiling(ingredient, quantity) else {
                continue;
            };
            if current > ceiling {
                let new_delta = ceiling as i64 - ingredient.base_portions as i64;
                adjustments.push(Adjustment {
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    from: current,
                    to: ceiling,
                });
                self.deltas.insert(ingredient.id, new_delta as i32);
            }
        }
        for adjustment in &adjustments {
            if self.delta(adjustment.ingredient_id) == 0 {
                self.deltas.remove(&adjustment.ingredient_id);
            }
        }
        Ok(adjustments)
    }

    /// Store free-text notes, truncated to the payload limit.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.chars().take(MAX_NOTES_CHARS).collect();
    }

    /// Recompute the price from the current selection.
    ///
    /// Extras are billed for their full effective quantity; base-recipe
    /// modifications are billed only for the positive delta above the base.
    /// Removals are never a refund, so the total never drops below
    /// `base_price * order_quantity`.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        let mut extras_total = 0.0;
        for ingredient in self.ingredients.values() {
            let delta = self.delta(ingredient.id);
            let billed = if ingredient.is_extra() {
                Self::effective(ingredient, delta)
            } else {
                delta.max(0) as u32
            };
            extras_total += ingredient.additional_price * billed as f64;
        }

        let unit_total = self.product.price + extras_total;
        PriceBreakdown {
            base_price: self.product.price,
            extras_total,
            unit_total,
            total: unit_total * self.order_quantity as f64,
        }
    }

    pub fn compute_total(&self) -> f64 {
        self.price_breakdown().total
    }

    /// Serialize the selection into the cart payload.
    ///
    /// Extras carry only pure add-ons with a positive delta (quantity capped,
    /// list capped); base modifications carry every non-zero delta on a
    /// base-recipe ingredient. Entries with an invalid id are dropped rather
    /// than surfaced.
    pub fn build_payload(&self) -> OrderPayload {
        let extras = self
            .ingredients
            .values()
            .filter(|i| i.id > 0 && i.is_extra())
            .filter_map(|i| {
                let delta = self.delta(i.id);
                (delta > 0).then(|| ExtraEntry {
                    ingredient_id: i.id,
                    quantity: (delta as u32).min(MAX_EXTRA_QUANTITY),
                })
            })
            .take(MAX_EXTRAS_ENTRIES)
            .collect();

        let base_modifications = self
            .ingredients
            .values()
            .filter(|i| i.id > 0 && !i.is_extra())
            .filter_map(|i| {
                let delta = self.delta(i.id);
                (delta != 0).then_some(BaseModification {
                    ingredient_id: i.id,
                    delta,
                })
            })
            .collect();

        OrderPayload {
            product_id: self.product.id,
            quantity: self.order_quantity,
            extras,
            base_modifications,
            notes: self.notes.clone(),
        }
    }
}
