//! Product value type with field-level validation.

use crate::error::{CommerceError, ProductField};
use crate::scalar::Scalar;
use serde::Serialize;
use serde_json::Value;

/// A product held in a shopping cart.
///
/// Fields are validated on construction and on every mutation, so an
/// instance never holds an invalid value. Inputs arrive as untyped
/// [`serde_json::Value`]s; each field applies its own acceptance rule:
///
/// | Field | Accepted |
/// |---|---|
/// | id | integer only |
/// | name | any scalar (string, number, boolean) |
/// | price, weight, height, width | any number, including numeric strings |
/// | length | integer only |
///
/// The asymmetry is deliberate: `"30"` is a valid width but not a
/// valid length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: i64,
    name: Scalar,
    price: f64,
    weight: f64,
    height: f64,
    width: f64,
    length: i64,
}

impl Product {
    /// Create a product, validating each field.
    ///
    /// Fields are checked in the order id, name, price, weight,
    /// height, width, length; the first invalid one aborts
    /// construction with [`CommerceError::InvalidField`].
    pub fn new(
        id: &Value,
        name: &Value,
        price: &Value,
        weight: &Value,
        height: &Value,
        width: &Value,
        length: &Value,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            id: integer(id).ok_or(CommerceError::InvalidField(ProductField::Id))?,
            name: Scalar::from_value(name)
                .ok_or(CommerceError::InvalidField(ProductField::Name))?,
            price: numeric(price).ok_or(CommerceError::InvalidField(ProductField::Price))?,
            weight: numeric(weight).ok_or(CommerceError::InvalidField(ProductField::Weight))?,
            height: numeric(height).ok_or(CommerceError::InvalidField(ProductField::Height))?,
            width: numeric(width).ok_or(CommerceError::InvalidField(ProductField::Width))?,
            length: integer(length).ok_or(CommerceError::InvalidField(ProductField::Length))?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &Scalar {
        &self.name
    }

    /// Price, always a floating-point value regardless of the numeric
    /// type originally supplied.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Replace the id. Rejects anything but an integer.
    pub fn set_id(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.id = integer(value).ok_or(CommerceError::InvalidField(ProductField::Id))?;
        Ok(())
    }

    /// Replace the name. Rejects composite and null values.
    pub fn set_name(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.name =
            Scalar::from_value(value).ok_or(CommerceError::InvalidField(ProductField::Name))?;
        Ok(())
    }

    /// Replace the price. Accepts any number, including numeric strings.
    pub fn set_price(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.price = numeric(value).ok_or(CommerceError::InvalidField(ProductField::Price))?;
        Ok(())
    }

    /// Replace the weight. Accepts any number, including numeric strings.
    pub fn set_weight(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.weight = numeric(value).ok_or(CommerceError::InvalidField(ProductField::Weight))?;
        Ok(())
    }

    /// Replace the height. Accepts any number, including numeric strings.
    pub fn set_height(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.height = numeric(value).ok_or(CommerceError::InvalidField(ProductField::Height))?;
        Ok(())
    }

    /// Replace the width. Accepts any number, including numeric strings.
    pub fn set_width(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.width = numeric(value).ok_or(CommerceError::InvalidField(ProductField::Width))?;
        Ok(())
    }

    /// Replace the length. Rejects anything but an integer.
    pub fn set_length(&mut self, value: &Value) -> Result<(), CommerceError> {
        self.length = integer(value).ok_or(CommerceError::InvalidField(ProductField::Length))?;
        Ok(())
    }
}

/// Strict integer rule: floats, numeric strings, and everything else
/// are rejected.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64()
}

/// Loose numeric rule: any number, or a string parsing as a finite
/// number.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}
