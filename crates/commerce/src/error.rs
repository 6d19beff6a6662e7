//! Commerce error types.

use std::fmt;
use thiserror::Error;

/// Product fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Id,
    Name,
    Price,
    Weight,
    Height,
    Width,
    Length,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Price => "price",
            ProductField::Weight => "weight",
            ProductField::Height => "height",
            ProductField::Width => "width",
            ProductField::Length => "length",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur in commerce operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A product field rejected the supplied value.
    #[error("invalid product {0}")]
    InvalidField(ProductField),

    /// Item not in cart.
    #[error("item not in cart: {0}")]
    ItemNotFound(i64),

    /// Invalid quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Arithmetic overflow accumulating a quantity.
    #[error("quantity overflow")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_the_field() {
        let err = CommerceError::InvalidField(ProductField::Height);
        assert_eq!(err.to_string(), "invalid product height");
    }

    #[test]
    fn test_not_found_error_names_the_id() {
        let err = CommerceError::ItemNotFound(123);
        assert_eq!(err.to_string(), "item not in cart: 123");
    }
}
