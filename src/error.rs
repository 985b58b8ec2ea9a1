use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty menu")]
    EmptyMenu,
}

/// Reasons an ingredient record is rejected at the API boundary.
///
/// Malformed records are never surfaced to the customer; they are dropped
/// during normalization and only counted.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("non-positive ingredient id")]
    BadId,

    #[error("negative or non-finite price")]
    BadPrice,

    #[error("min quantity {min} exceeds max quantity {max}")]
    InvertedBounds { min: u32, max: u32 },

    #[error("base portions {portions} outside [{min}, {max}]")]
    BaseOutOfBounds { portions: u32, min: u32, max: u32 },

    #[error("non-finite stock fields")]
    BadStock,
}

pub type Result<T> = std::result::Result<T, OrderError>;
