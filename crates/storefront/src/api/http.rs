//! `reqwest` implementation of [`StorefrontApi`].
//!
//! Every request carries the bearer token of the [`Session`] it was built with, read at send
//! time so a login takes effect on the next call. Failed responses are logged by status class
//! before they are turned into an [`ApiError`].

use crate::api::wire::{
    CartItemBody, CartItemRecord, CartRecord, LoginRecord, ProductPageRecord, SuggestionRecord,
};
use crate::api::{ApiError, CartMutation, ListQuery, StorefrontApi};
use crate::auth::Session;
use crate::config::StorefrontConfig;
use crate::model::{
    CartContents, CartItem, Credentials, LoginGrant, ProductPage, ProductSummary,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl HttpStorefrontApi {
    pub fn new(config: &StorefrontConfig, session: Session) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url(&config.api_base_url)?,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Setup(format!("invalid path {path}: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(request).send().await.map_err(|e| {
            warn!(error = %e, "No response received");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log_failure(status, &body);
        Err(ApiError::Server {
            status: status.as_u16(),
            message: server_message(status, &body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::malformed(e.to_string()))
    }
}

/// Parses the configured base and makes sure relative paths are joined below it.
fn base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url =
        Url::parse(raw).map_err(|e| ApiError::Setup(format!("invalid base url {raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn log_failure(status: StatusCode, body: &str) {
    match status {
        StatusCode::UNAUTHORIZED => warn!("Unauthorized, login required"),
        StatusCode::BAD_REQUEST => warn!(body, "Bad request"),
        StatusCode::FORBIDDEN => warn!(body, "Forbidden"),
        StatusCode::NOT_FOUND => warn!(body, "Not found"),
        StatusCode::INTERNAL_SERVER_ERROR => warn!(body, "Internal server error"),
        other => warn!(status = other.as_u16(), body, "Request failed"),
    }
}

/// Prefers a `{"message": ...}` body, then the raw body, then the canonical reason.
fn server_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    #[instrument(skip(self))]
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ApiError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(keyword) = query.keyword() {
            params.push(("keyword", keyword.to_string()));
        }
        let request = self.client.get(self.url("products")?).query(&params);
        let record: ProductPageRecord = self.send_json(request).await?;
        debug!(
            count = record.products.len(),
            current_page = record.current_page,
            total_pages = record.total_pages,
            "Page received"
        );
        record.try_into()
    }

    #[instrument(skip(self))]
    async fn quick_search(&self, keyword: &str) -> Result<Vec<ProductSummary>, ApiError> {
        let request = self
            .client
            .get(self.url("products/search")?)
            .query(&[("keyword", keyword)]);
        let record: SuggestionRecord = self.send_json(request).await?;
        record.try_into()
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<CartContents, ApiError> {
        let request = self.client.get(self.url("cart")?);
        let record: CartRecord = self.send_json(request).await?;
        record.try_into()
    }

    #[instrument(skip(self))]
    async fn mutate_cart(&self, mutation: &CartMutation) -> Result<CartItem, ApiError> {
        let quantity = match mutation {
            CartMutation::SetQuantity { quantity, .. } => Some(*quantity),
            _ => None,
        };
        let body = CartItemBody {
            id: &mutation.id().0,
            quantity,
        };
        let request = self.client.post(self.url(mutation.path())?).json(&body);
        let record: CartItemRecord = self.send_json(request).await?;
        record.try_into()
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<(), ApiError> {
        let request = self.client.post(self.url("cart/clear")?);
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let request = self.client.post(self.url("api/login")?).json(credentials);
        let record: LoginRecord = self.send_json(request).await?;
        record.try_into()
    }
}
