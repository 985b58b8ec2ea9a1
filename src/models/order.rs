use serde::{Deserialize, Serialize};

/// A billed extra on an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraEntry {
    pub ingredient_id: u32,
    pub quantity: u32,
}

/// A customer-requested change to a base-recipe ingredient's portion count.
/// Negative deltas remove portions and are never billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModification {
    pub ingredient_id: u32,
    pub delta: i32,
}

/// The order-line draft sent to the cart API (and saved as a draft file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub product_id: u32,
    pub quantity: u32,
    pub extras: Vec<ExtraEntry>,
    pub base_modifications: Vec<BaseModification>,

    #[serde(default)]
    pub notes: String,
}
