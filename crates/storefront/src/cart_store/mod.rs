//! # Cart Store
//!
//! The shopping cart: its lines, total price and total quantity, kept in step with the remote
//! cart endpoint.
//!
//! ## Structure
//!
//! - [`slice`] - [`AsyncSlice`](store_framework::AsyncSlice) implementation for [`CartState`]
//! - [`actions`] - [`CartIntent`] and the [`CartCall`]/[`CartPayload`] it travels as
//! - [`error`] - [`CartError`], including the login gate
//!
//! Access goes through [`CartClient`], which refuses every operation while the session is
//! logged out. The store itself does not know about sessions.

pub mod actions;
pub mod error;
pub mod slice;

pub use actions::*;
pub use error::*;
pub use slice::*;

use crate::auth::Session;
use crate::clients::CartClient;
use store_framework::SliceActor;

/// Creates a new cart store actor and a client gated by `session`.
pub fn new(session: Session, buffer_size: usize) -> (SliceActor<CartState>, CartClient) {
    let (actor, generic_client) = SliceActor::new(CartState::default(), buffer_size);
    (actor, CartClient::new(generic_client, session))
}
