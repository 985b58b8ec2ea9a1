use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{OrderError, Result};
use crate::interface::render;
use crate::models::Product;
use crate::pricing::{CustomizationEngine, StepOutcome};
use crate::state::MenuManager;

/// Prompt for a product, with fuzzy matching against the menu.
///
/// An empty answer falls back to picking from the full list.
pub fn prompt_product(manager: &MenuManager) -> Result<u32> {
    let products: Vec<&Product> = manager.all_products();

    loop {
        let input: String = Input::new()
            .with_prompt("Which product would you like to customize? (Enter to list)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
            let selection = Select::new()
                .with_prompt("Pick a product")
                .items(&names)
                .default(0)
                .interact()?;
            return Ok(products[selection].id);
        }

        // Try exact match first (case-insensitive)
        if let Some(product) = manager.find_product(input) {
            return Ok(product.id);
        }

        // Try fuzzy matching
        let mut candidates: Vec<(&Product, f64)> = products
            .iter()
            .map(|p| (*p, jaro_winkler(&p.key(), &input.to_lowercase())))
            .filter(|(_, score)| *score > 0.7)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching product found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let product = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", product.name))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(product.id);
            }
        } else {
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(p, _)| p.name.clone())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                return Ok(candidates[selection].0.id);
            }
        }
    }
}

/// Prompt for the order-line quantity (>= 1).
pub fn prompt_order_quantity(current: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("How many of this item?")
        .default(current.to_string())
        .interact_text()?;

    let quantity: u32 = input
        .parse()
        .map_err(|_| OrderError::InvalidInput("Invalid number".to_string()))?;

    if quantity == 0 {
        return Err(OrderError::InvalidInput(
            "Quantity must be at least 1".to_string(),
        ));
    }
    Ok(quantity)
}

/// Prompt for order notes.
pub fn prompt_notes(current: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt("Notes for the kitchen")
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()?)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[derive(Clone, Copy)]
enum SessionAction {
    Increment(u32),
    Decrement(u32),
    Quantity,
    Notes,
    Finish,
}

/// Run the interactive customization loop until the customer is done.
///
/// Increment controls are always offered and denials are shown as notices;
/// decrement controls disappear once an ingredient hits its floor, like the
/// hidden button in the storefront.
pub fn run_session(engine: &mut CustomizationEngine) -> Result<()> {
    let options: Vec<(u32, String, f64)> = engine
        .ingredients()
        .map(|i| (i.id, i.name.clone(), i.additional_price))
        .collect();

    loop {
        render::display_summary(engine);

        let mut labels = Vec::new();
        let mut actions = Vec::new();

        for (id, name, price) in &options {
            labels.push(format!("Add {} (+$ {:.2})", name, price));
            actions.push(SessionAction::Increment(*id));

            if engine.can_decrement(*id) {
                labels.push(format!("Remove {}", name));
                actions.push(SessionAction::Decrement(*id));
            }
        }
        labels.push(format!(
            "Change quantity (now {})",
            engine.order_quantity()
        ));
        actions.push(SessionAction::Quantity);
        labels.push("Edit notes".to_string());
        actions.push(SessionAction::Notes);
        labels.push("Finish".to_string());
        actions.push(SessionAction::Finish);

        let selection = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(labels.len() - 1)
            .interact()?;

        match actions[selection] {
            SessionAction::Increment(id) => {
                if let StepOutcome::Denied(denial) = engine.increment_ingredient(id)? {
                    render::display_notice(&denial);
                }
            }
            SessionAction::Decrement(id) => {
                // Denied decrements stay silent; the control is already
                // hidden at the floor.
                engine.decrement_ingredient(id)?;
            }
            SessionAction::Quantity => match prompt_order_quantity(engine.order_quantity()) {
                Ok(quantity) => {
                    let adjustments = engine.set_order_quantity(quantity)?;
                    render::display_adjustments(&adjustments);
                }
                Err(OrderError::InvalidInput(reason)) => println!("! {}", reason),
                Err(e) => return Err(e),
            },
            SessionAction::Notes => {
                let notes = prompt_notes(engine.notes())?;
                engine.set_notes(&notes);
            }
            SessionAction::Finish => return Ok(()),
        }
    }
}
