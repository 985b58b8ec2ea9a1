use clap::{Parser, Subcommand};

/// Royal Customizer — build and price a customized order line from the menu.
#[derive(Parser, Debug)]
#[command(name = "royal_customizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the menu JSON file.
    #[arg(short, long, default_value = "menu.json")]
    pub file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Customize a product and save the order draft.
    Customize {
        /// Product name (prompted when omitted).
        #[arg(short, long)]
        product: Option<String>,

        /// Back-office stock sheet (CSV) overlaid onto the menu.
        #[arg(long)]
        stock: Option<String>,

        /// Where to write the order draft JSON.
        #[arg(short, long, default_value = "order_draft.json")]
        out: String,
    },

    /// List products and their customization options.
    Menu,

    /// Re-open a saved order draft for editing.
    Edit {
        /// Path to the order draft JSON.
        draft: String,

        /// Back-office stock sheet (CSV) overlaid onto the menu.
        #[arg(long)]
        stock: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Customize {
            product: None,
            stock: None,
            out: "order_draft.json".to_string(),
        }
    }
}
