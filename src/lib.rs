pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;
pub mod state;

pub use error::{OrderError, Result};
pub use models::{Ingredient, OrderPayload, Product};
pub use pricing::{CustomizationEngine, Denial, StepOutcome};
