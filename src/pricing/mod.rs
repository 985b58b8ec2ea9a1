pub mod constants;
pub mod engine;
pub mod limits;

pub use constants::*;
pub use engine::{Adjustment, CustomizationEngine, PriceBreakdown, StepOutcome};
pub use limits::{check_decrement, check_increment, effective_ceiling, stock_ceiling, Denial};
