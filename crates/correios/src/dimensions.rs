//! Package dimension aggregation.

use cesta_commerce::ShoppingCart;

/// Aggregated dimensions of a cart packed as a single parcel.
///
/// Weight and height accumulate across items (boxes stacked on top of
/// each other); width and length take the largest item. Built fresh
/// for every quote — accumulator state is never shared between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackageDimensions {
    pub weight: f64,
    pub height: f64,
    pub width: f64,
    pub length: i64,
}

impl PackageDimensions {
    /// Aggregate the dimensions of every item in `cart`, scaled by
    /// quantity where the dimension accumulates.
    pub fn from_cart(cart: &ShoppingCart) -> Self {
        let mut dimensions = Self::default();

        for (product_id, item) in cart {
            let quantity = f64::from(cart.item_quantity(product_id));

            dimensions.weight += quantity * item.weight();
            dimensions.height += quantity * item.height();

            if item.width() > dimensions.width {
                dimensions.width = item.width();
            }

            if item.length() > dimensions.length {
                dimensions.length = item.length();
            }
        }

        dimensions
    }
}
