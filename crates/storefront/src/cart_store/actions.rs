//! Intents understood by the cart store and the payloads they settle with.

use crate::api::CartMutation;
use crate::model::{CartContents, CartItem, ProductId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    /// Replace the local cart with the remote one.
    Fetch,
    Add(ProductId),
    Minus(ProductId),
    Remove(ProductId),
    SetQuantity { id: ProductId, quantity: u32 },
    Clear,
}

impl CartIntent {
    /// The single-line mutation behind this intent, if it is one.
    pub fn mutation(&self) -> Option<CartMutation> {
        match self {
            CartIntent::Add(id) => Some(CartMutation::Add(id.clone())),
            CartIntent::Minus(id) => Some(CartMutation::Minus(id.clone())),
            CartIntent::Remove(id) => Some(CartMutation::Remove(id.clone())),
            CartIntent::SetQuantity { id, quantity } => Some(CartMutation::SetQuantity {
                id: id.clone(),
                quantity: *quantity,
            }),
            CartIntent::Fetch | CartIntent::Clear => None,
        }
    }
}

/// What a settled cart call carries back.
#[derive(Debug, Clone, PartialEq)]
pub enum CartPayload {
    Contents(CartContents),
    Line(CartItem),
    Cleared,
}

/// The remote call an intent turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCall {
    Fetch,
    Mutate(CartMutation),
    Clear,
}

impl From<&CartIntent> for CartCall {
    fn from(intent: &CartIntent) -> Self {
        match (intent, intent.mutation()) {
            (_, Some(mutation)) => CartCall::Mutate(mutation),
            (CartIntent::Clear, None) => CartCall::Clear,
            (_, None) => CartCall::Fetch,
        }
    }
}
