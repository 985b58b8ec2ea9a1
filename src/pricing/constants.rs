/// Hard cap on a single extra's quantity in the cart payload.
pub const MAX_EXTRA_QUANTITY: u32 = 999;

/// Hard cap on the number of extras entries in the cart payload.
pub const MAX_EXTRAS_ENTRIES: usize = 10;

/// Order notes are truncated to this many characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// Effective-quantity ceiling applied when the catalog omits maxQuantity.
pub const DEFAULT_MAX_PORTIONS: u32 = 99;

/// Stock consumed per portion when the catalog omits basePortionQuantity.
pub const DEFAULT_BASE_PORTION_QUANTITY: f64 = 1.0;
