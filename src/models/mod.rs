mod ingredient;
mod order;
mod product;

pub use ingredient::{Ingredient, RawIngredient, StockLimit};
pub use order::{BaseModification, ExtraEntry, OrderPayload};
pub use product::{Product, ProductRecord};
