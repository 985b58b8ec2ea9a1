mod manager;
mod persistence;

pub use manager::MenuManager;
pub use persistence::{load_menu, load_order, load_stock_sheet, save_order, StockRow};
