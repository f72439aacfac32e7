use crate::api::{ApiError, HttpStorefrontApi, SharedApi};
use crate::auth::Session;
use crate::clients::{CartClient, PageClient};
use crate::config::StorefrontConfig;
use crate::model::{Credentials, User};
use crate::search::{SearchCoordinator, ViewportObserver};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The storefront client with every store running.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the page, suggestion and cart stores
/// - **Dependency Wiring**: Handing every store the same API client as its context
/// - **Session Sharing**: One [`Session`] feeds both the bearer token and the cart gate
///
/// # Example
///
/// ```ignore
/// let system = Storefront::connect(&StorefrontConfig::default())?;
///
/// let first = system.search.set_keyword("lamp").await?;
/// let more = system.pages.append_next_page().await?;
/// system.login("ada", "secret").await?;
/// system.cart.add_to_cart(first.items[0].id.clone()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct Storefront {
    /// Navigation of the product list
    pub pages: PageClient,

    /// Keyword commits and debounced quick lookups
    pub search: SearchCoordinator,

    /// Cart operations, refused while logged out
    pub cart: CartClient,

    /// Throttled render-mode evaluation
    pub viewport: ViewportObserver,

    pub session: Session,

    api: SharedApi,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Starts every store against `api`. Must be called inside a Tokio runtime.
    pub fn new(config: &StorefrontConfig, api: SharedApi, session: Session) -> Self {
        // 1. Create stores (no dependencies yet)
        let (page_actor, pages) = crate::page_store::new(config.page_size(), config.channel_buffer);
        let (suggestion_actor, suggestions) = crate::suggestion_store::new(config.channel_buffer);
        let (cart_actor, cart) = crate::cart_store::new(session.clone(), config.channel_buffer);

        // 2. Start stores with the API client as context
        let handles = vec![
            tokio::spawn(page_actor.run(Arc::clone(&api))),
            tokio::spawn(suggestion_actor.run(Arc::clone(&api))),
            tokio::spawn(cart_actor.run(Arc::clone(&api))),
        ];

        let search = SearchCoordinator::new(
            pages.clone(),
            suggestions,
            config.quick_lookup_debounce(),
        );
        let viewport = ViewportObserver::new(
            config.initial_viewport_px,
            config.virtualize_below_px,
            config.resize_throttle(),
        );

        info!(page_size = config.page_size, "Storefront started");
        Self {
            pages,
            search,
            cart,
            viewport,
            session,
            api,
            handles,
        }
    }

    /// Starts every store against the HTTP API described by `config`.
    pub fn connect(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let session = Session::new();
        let api = HttpStorefrontApi::new(config, session.clone())?;
        Ok(Self::new(config, Arc::new(api), session))
    }

    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User, ApiError> {
        self.session
            .login(self.api.as_ref(), Credentials::new(username, password))
            .await
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    /// Gracefully shuts down every store.
    ///
    /// Dropping the clients closes the store channels. Each store finishes its in-flight
    /// fetches before its task ends.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all stores shut down cleanly
    /// - `Err(String)` if any store task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.pages);
        drop(self.search);
        drop(self.cart);
        drop(self.viewport);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
