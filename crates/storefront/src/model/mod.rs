//! Domain types shared by the stores, the API layer and the renderer.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::*;
pub use product::*;
pub use user::*;

/// Load status of a store that is driven by network calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}
