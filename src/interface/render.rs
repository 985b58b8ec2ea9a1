use crate::pricing::{Adjustment, CustomizationEngine, Denial};
use crate::state::MenuManager;

/// Print the live order summary for the current selection.
pub fn display_summary(engine: &CustomizationEngine) {
    let breakdown = engine.price_breakdown();

    println!();
    println!("=== {} ===", engine.product().name);

    let max_name_len = engine
        .ingredients()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    for ingredient in engine.ingredients() {
        let delta = engine.delta(ingredient.id);
        let effective = (ingredient.base_portions as i64 + delta as i64).max(0);
        let billed = if ingredient.is_extra() {
            effective
        } else {
            delta.max(0) as i64
        };

        let base_tag = if ingredient.base_portions > 0 {
            format!(" (base {})", ingredient.base_portions)
        } else {
            String::new()
        };
        let price_tag = if billed > 0 {
            format!("  +$ {:.2}", ingredient.additional_price * billed as f64)
        } else {
            String::new()
        };

        println!(
            "  {:<width$}  x{}{}{}",
            ingredient.name,
            effective,
            base_tag,
            price_tag,
            width = max_name_len
        );
    }

    println!();
    println!("  Base price:   $ {:>8.2}", breakdown.base_price);
    println!("  Extras total: $ {:>8.2}", breakdown.extras_total);
    println!("  Unit total:   $ {:>8.2}", breakdown.unit_total);
    println!(
        "  Quantity: {}  =>  Total: $ {:.2}",
        engine.order_quantity(),
        breakdown.total
    );
    if !engine.notes().is_empty() {
        println!("  Notes: {}", engine.notes());
    }
    println!();
}

/// Show a denied step as a transient notice (the toast analog).
pub fn display_notice(denial: &Denial) {
    println!("! {}", denial);
}

/// Announce selections clamped down by an order-quantity change.
pub fn display_adjustments(adjustments: &[Adjustment]) {
    for adjustment in adjustments {
        println!(
            "! {} reduced from {} to {} portions (stock limit at this quantity)",
            adjustment.name, adjustment.from, adjustment.to
        );
    }
}

/// Print the menu with each product's customization options.
pub fn display_menu(manager: &MenuManager) {
    let products = manager.all_products();
    if products.is_empty() {
        println!("Menu: (empty)");
        return;
    }

    println!();
    println!("=== Menu ({} products) ===", products.len());
    println!();

    for product in products {
        println!("  {} - $ {:.2}", product.name, product.price);
        if !product.description.is_empty() {
            println!("      {}", product.description);
        }

        for ingredient in manager.ingredients_for(product.id) {
            let kind = if ingredient.is_extra() {
                "extra".to_string()
            } else {
                format!("base x{}", ingredient.base_portions)
            };
            println!(
                "      {} ({}) +$ {:.2} [{}..{}]",
                ingredient.name,
                kind,
                ingredient.additional_price,
                ingredient.min_quantity,
                ingredient.max_quantity
            );
        }
        println!();
    }
}
