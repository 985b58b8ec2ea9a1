pub mod prompts;
pub mod render;

pub use prompts::{prompt_notes, prompt_order_quantity, prompt_product, prompt_yes_no, run_session};
pub use render::{display_adjustments, display_menu, display_notice, display_summary};
