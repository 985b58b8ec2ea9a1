use clap::Parser;
use std::path::Path;

use royal_customizer_rs::cli::{Cli, Command};
use royal_customizer_rs::error::{OrderError, Result};
use royal_customizer_rs::interface::{display_menu, prompt_product, prompt_yes_no, run_session};
use royal_customizer_rs::pricing::CustomizationEngine;
use royal_customizer_rs::state::{
    load_menu, load_order, load_stock_sheet, save_order, MenuManager,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Customize {
            product,
            stock,
            out,
        } => cmd_customize(&cli.file, product.as_deref(), stock.as_deref(), &out),
        Command::Menu => cmd_menu(&cli.file),
        Command::Edit { draft, stock } => cmd_edit(&cli.file, &draft, stock.as_deref()),
    }
}

/// Load the menu and apply an optional stock sheet.
fn load_manager(menu_file: &str, stock_file: Option<&str>) -> Result<Option<MenuManager>> {
    let path = Path::new(menu_file);

    if !path.exists() {
        eprintln!("Menu file not found: {}", menu_file);
        eprintln!("Export it from the back office or point --file at it.");
        return Ok(None);
    }

    let records = load_menu(path)?;
    let mut manager = MenuManager::new(records);

    println!("Loaded {} products", manager.len());
    if manager.dropped_records() > 0 {
        println!(
            "Dropped {} malformed catalog records",
            manager.dropped_records()
        );
    }

    if let Some(stock_file) = stock_file {
        let rows = load_stock_sheet(stock_file)?;
        let updated = manager.apply_stock_sheet(&rows);
        println!("Stock sheet applied to {} ingredient entries", updated);
    }

    Ok(Some(manager))
}

/// Customize a product and save the order draft.
fn cmd_customize(
    menu_file: &str,
    product: Option<&str>,
    stock_file: Option<&str>,
    out: &str,
) -> Result<()> {
    let Some(manager) = load_manager(menu_file, stock_file)? else {
        return Ok(());
    };

    if manager.is_empty() {
        println!("The menu has no products to customize.");
        return Ok(());
    }

    let product_id = match product {
        Some(name) => {
            manager
                .find_product(name)
                .ok_or_else(|| OrderError::ProductNotFound(name.to_string()))?
                .id
        }
        None => prompt_product(&manager)?,
    };

    let product = manager
        .get_product(product_id)
        .ok_or_else(|| OrderError::ProductNotFound(product_id.to_string()))?
        .clone();
    let ingredients = manager.ingredients_for(product_id).to_vec();

    let mut engine = CustomizationEngine::new(product, ingredients);
    run_session(&mut engine)?;

    let payload = engine.build_payload();
    println!(
        "Order line: {} x{} for $ {:.2}",
        engine.product().name,
        payload.quantity,
        engine.compute_total()
    );

    if prompt_yes_no("Save order draft?", true)? {
        save_order(out, &payload)?;
        println!("Order draft saved to {}", out);
    }

    Ok(())
}

/// List products and their customization options.
fn cmd_menu(menu_file: &str) -> Result<()> {
    let Some(manager) = load_manager(menu_file, None)? else {
        return Ok(());
    };

    display_menu(&manager);
    Ok(())
}

/// Re-open a saved order draft against the current menu and edit it.
fn cmd_edit(menu_file: &str, draft_file: &str, stock_file: Option<&str>) -> Result<()> {
    let draft_path = Path::new(draft_file);
    if !draft_path.exists() {
        eprintln!("Order draft not found: {}", draft_file);
        return Ok(());
    }

    let payload = load_order(draft_path)?;

    let Some(manager) = load_manager(menu_file, stock_file)? else {
        return Ok(());
    };

    let product = manager
        .get_product(payload.product_id)
        .ok_or_else(|| OrderError::ProductNotFound(payload.product_id.to_string()))?
        .clone();
    let ingredients = manager.ingredients_for(payload.product_id).to_vec();

    let mut engine = CustomizationEngine::from_payload(product, ingredients, &payload);
    run_session(&mut engine)?;

    let updated = engine.build_payload();
    if prompt_yes_no("Save changes to the draft?", true)? {
        save_order(draft_path, &updated)?;
        println!("Order draft updated.");
    }

    Ok(())
}
