//! # Cart Client
//!
//! Gated access to the cart store: while the [`Session`] is logged out every operation fails
//! with [`CartError::Unauthenticated`] and nothing is dispatched.

use crate::auth::Session;
use crate::cart_store::{CartError, CartIntent, CartSnapshot, CartState};
use crate::model::ProductId;
use async_trait::async_trait;
use store_framework::{FrameworkError, SliceClient, StoreClient};
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct CartClient {
    inner: SliceClient<CartState>,
    session: Session,
}

impl CartClient {
    pub fn new(inner: SliceClient<CartState>, session: Session) -> Self {
        Self { inner, session }
    }

    async fn send(&self, intent: CartIntent) -> Result<CartSnapshot, CartError> {
        if !self.session.is_authenticated() {
            warn!(?intent, "Cart operation refused, not logged in");
            return Err(CartError::Unauthenticated);
        }
        debug!("Sending request");
        self.inner.dispatch(intent).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::Fetch).await
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, id: ProductId) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::Add(id)).await
    }

    /// One unit less. Keeping the quantity at 1 or more is up to the caller.
    #[instrument(skip(self))]
    pub async fn minus_from_cart(&self, id: ProductId) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::Minus(id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: ProductId) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::Remove(id)).await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::SetQuantity { id, quantity }).await
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<CartSnapshot, CartError> {
        self.send(CartIntent::Clear).await
    }
}

#[async_trait]
impl StoreClient<CartState> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &SliceClient<CartState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::ActorCommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use store_framework::mock::MockClient;

    #[tokio::test]
    async fn test_logged_out_session_dispatches_nothing() {
        let mock = MockClient::<CartState>::new(CartSnapshot::default());
        let cart = CartClient::new(mock.client(), Session::new());

        assert_eq!(
            cart.add_to_cart(ProductId::from("1")).await,
            Err(CartError::Unauthenticated)
        );
        assert_eq!(cart.fetch_cart().await, Err(CartError::Unauthenticated));
        // No expectations were set, so any dispatch would have failed verification.
        mock.verify();
    }

    #[tokio::test]
    async fn test_logged_in_session_dispatches() {
        let mut mock = MockClient::<CartState>::new(CartSnapshot::default());
        mock.expect_dispatch()
            .matching(|intent| *intent == CartIntent::SetQuantity { id: ProductId::from("7"), quantity: 3 })
            .return_ok(CartSnapshot::default());

        let session = Session::new();
        session.login_success(User::new("ada"), "t".to_string());
        let cart = CartClient::new(mock.client(), session);

        assert!(cart.set_quantity(ProductId::from("7"), 3).await.is_ok());
        mock.verify();
    }
}
