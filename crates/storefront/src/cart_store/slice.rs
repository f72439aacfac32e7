//! [`AsyncSlice`] implementation for the shopping cart.
//!
//! Mutations answer with the affected line only, so totals are maintained locally from the
//! line that came back rather than re-read from the service. A `Fetch` resynchronizes
//! everything.

use super::actions::{CartCall, CartIntent, CartPayload};
use crate::api::{ApiError, SharedApi};
use crate::model::{CartContents, CartItem, LoadStatus};
use async_trait::async_trait;
use store_framework::AsyncSlice;
use tracing::warn;

#[derive(Debug, Default)]
pub struct CartState {
    items: Vec<CartItem>,
    total_price: f64,
    total_quantity: u32,
    status: LoadStatus,
    last_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub total_quantity: u32,
    pub status: LoadStatus,
    /// Message of the most recent failed call, cleared by the next success.
    pub last_error: Option<String>,
}

impl CartSnapshot {
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.id().0 == id)
            .map_or(0, |item| item.quantity)
    }
}

impl CartState {
    fn position(&self, line: &CartItem) -> Option<usize> {
        self.items.iter().position(|item| item.id() == line.id())
    }

    fn replace(&mut self, contents: CartContents) {
        self.items = contents.items;
        self.total_price = contents.total_price;
        self.total_quantity = contents.total_quantity;
    }

    fn added(&mut self, line: CartItem) {
        self.total_price += line.price();
        self.total_quantity = self.total_quantity.saturating_add(1);
        match self.position(&line) {
            Some(i) => self.items[i].quantity = line.quantity,
            None => self.items.push(line),
        }
    }

    /// Totals drop by one unit even if the line is not in the local cart.
    fn decremented(&mut self, line: CartItem) {
        self.total_price -= line.price();
        self.total_quantity = self.total_quantity.saturating_sub(1);
        if let Some(i) = self.position(&line) {
            self.items[i].quantity = line.quantity;
        }
    }

    fn removed(&mut self, line: CartItem) {
        if let Some(i) = self.position(&line) {
            let gone = self.items.remove(i);
            self.total_price -= gone.subtotal();
            self.total_quantity = self.total_quantity.saturating_sub(gone.quantity);
        }
    }

    fn quantity_set(&mut self, line: CartItem) {
        match self.position(&line) {
            Some(i) => {
                let existing = &mut self.items[i];
                let difference = i64::from(line.quantity) - i64::from(existing.quantity);
                existing.quantity = line.quantity;
                self.total_price += existing.price() * difference as f64;
                self.total_quantity =
                    (i64::from(self.total_quantity) + difference).clamp(0, u32::MAX.into()) as u32;
            }
            None => {
                self.total_price += line.subtotal();
                self.total_quantity = self.total_quantity.saturating_add(line.quantity);
                self.items.push(line);
            }
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.total_price = 0.0;
        self.total_quantity = 0;
    }
}

#[async_trait]
impl AsyncSlice for CartState {
    type Intent = CartIntent;
    type Request = CartCall;
    type Payload = CartPayload;
    type Error = ApiError;
    type Context = SharedApi;
    type Snapshot = CartSnapshot;

    fn on_pending(&mut self, intent: &CartIntent) -> CartCall {
        self.status = LoadStatus::Loading;
        CartCall::from(intent)
    }

    async fn fetch(api: SharedApi, call: CartCall) -> Result<CartPayload, ApiError> {
        match call {
            CartCall::Fetch => api.fetch_cart().await.map(CartPayload::Contents),
            CartCall::Mutate(mutation) => api.mutate_cart(&mutation).await.map(CartPayload::Line),
            CartCall::Clear => api.clear_cart().await.map(|()| CartPayload::Cleared),
        }
    }

    fn on_fulfilled(&mut self, intent: &CartIntent, payload: CartPayload) {
        match (intent, payload) {
            (CartIntent::Fetch, CartPayload::Contents(contents)) => self.replace(contents),
            (CartIntent::Add(_), CartPayload::Line(line)) => self.added(line),
            (CartIntent::Minus(_), CartPayload::Line(line)) => self.decremented(line),
            (CartIntent::Remove(_), CartPayload::Line(line)) => self.removed(line),
            (CartIntent::SetQuantity { .. }, CartPayload::Line(line)) => self.quantity_set(line),
            (CartIntent::Clear, CartPayload::Cleared) => self.clear(),
            (intent, payload) => warn!(?intent, ?payload, "Payload does not match intent"),
        }
        self.status = LoadStatus::Succeeded;
        self.last_error = None;
    }

    fn on_rejected(&mut self, _intent: &CartIntent, error: &ApiError) {
        self.status = LoadStatus::Failed;
        self.last_error = Some(error.to_string());
    }

    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total_price: self.total_price,
            total_quantity: self.total_quantity,
            status: self.status,
            last_error: self.last_error.clone(),
        }
    }
}
