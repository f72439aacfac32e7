use crate::model::{ProductId, ProductSummary};

/// A product in the cart together with how many units of it are there.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: ProductSummary,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: ProductSummary, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn price(&self) -> f64 {
        self.product.price
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// The whole cart as the remote service reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartContents {
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub total_quantity: u32,
}
