//! JSON shapes exchanged with the remote service.
//!
//! Responses are decoded into these records first and then validated into the domain types of
//! [`crate::model`]. Nothing outside the API layer sees a record.

use crate::api::ApiError;
use crate::model::{
    CartContents, CartItem, LoginGrant, ProductId, ProductPage, ProductSummary, User,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TryFrom<ProductRecord> for ProductSummary {
    type Error = ApiError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(ApiError::malformed(format!(
                "product {} has invalid price {}",
                record.id, record.price
            )));
        }
        Ok(ProductSummary {
            id: ProductId(record.id),
            name: record.name,
            price: record.price,
            image: record.image_url,
            category: record.category,
            stock: record.stock,
            description: record.description,
        })
    }
}

impl From<&ProductSummary> for ProductRecord {
    fn from(product: &ProductSummary) -> Self {
        Self {
            id: product.id.0.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image.clone(),
            category: product.category.clone(),
            stock: product.stock,
            description: product.description.clone(),
        }
    }
}

fn products(records: Vec<ProductRecord>) -> Result<Vec<ProductSummary>, ApiError> {
    records.into_iter().map(ProductSummary::try_from).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageRecord {
    pub products: Vec<ProductRecord>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl TryFrom<ProductPageRecord> for ProductPage {
    type Error = ApiError;

    fn try_from(record: ProductPageRecord) -> Result<Self, Self::Error> {
        if record.total_pages == 0 {
            return Err(ApiError::malformed("totalPages must be at least 1"));
        }
        if record.current_page == 0 || record.current_page > record.total_pages {
            return Err(ApiError::malformed(format!(
                "currentPage {} outside 1..={}",
                record.current_page, record.total_pages
            )));
        }
        Ok(ProductPage {
            products: products(record.products)?,
            current_page: record.current_page,
            total_pages: record.total_pages,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRecord {
    pub products: Vec<ProductRecord>,
}

impl TryFrom<SuggestionRecord> for Vec<ProductSummary> {
    type Error = ApiError;

    fn try_from(record: SuggestionRecord) -> Result<Self, Self::Error> {
        products(record.products)
    }
}

/// A cart line is a product record flattened together with its quantity.
#[derive(Debug, Deserialize)]
pub struct CartItemRecord {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub quantity: u32,
}

impl TryFrom<CartItemRecord> for CartItem {
    type Error = ApiError;

    fn try_from(record: CartItemRecord) -> Result<Self, Self::Error> {
        Ok(CartItem::new(record.product.try_into()?, record.quantity))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub items: Vec<CartItemRecord>,
    pub total_price: f64,
    pub total_quantity: u32,
}

impl TryFrom<CartRecord> for CartContents {
    type Error = ApiError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        if !record.total_price.is_finite() || record.total_price < 0.0 {
            return Err(ApiError::malformed(format!(
                "invalid cart total {}",
                record.total_price
            )));
        }
        Ok(CartContents {
            items: record
                .items
                .into_iter()
                .map(CartItem::try_from)
                .collect::<Result<_, _>>()?,
            total_price: record.total_price,
            total_quantity: record.total_quantity,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRecord {
    pub user: User,
    pub token: String,
}

impl TryFrom<LoginRecord> for LoginGrant {
    type Error = ApiError;

    fn try_from(record: LoginRecord) -> Result<Self, Self::Error> {
        if record.token.is_empty() {
            return Err(ApiError::malformed("login answered with an empty token"));
        }
        Ok(LoginGrant {
            user: record.user,
            token: record.token,
        })
    }
}

/// Body of the single-product cart endpoints.
#[derive(Debug, Serialize)]
pub struct CartItemBody<'a> {
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json: &str) -> Result<ProductPage, ApiError> {
        let record: ProductPageRecord = serde_json::from_str(json).unwrap();
        record.try_into()
    }

    #[test]
    fn test_product_fields_map_from_camel_case() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id":"p1","name":"Lamp","price":12.5,"imageUrl":"http://img/1","category":"home","stock":3}"#,
        )
        .unwrap();
        let product = ProductSummary::try_from(record).unwrap();

        assert_eq!(product.id, ProductId::from("p1"));
        assert_eq!(product.image, "http://img/1");
        assert_eq!(product.stock, 3);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id":"p1","name":"Lamp","price":-1}"#).unwrap();
        assert!(matches!(
            ProductSummary::try_from(record),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_page_bounds_are_validated() {
        assert!(page(r#"{"products":[],"currentPage":1,"totalPages":1}"#).is_ok());
        assert!(matches!(
            page(r#"{"products":[],"currentPage":1,"totalPages":0}"#),
            Err(ApiError::Malformed(_))
        ));
        assert!(matches!(
            page(r#"{"products":[],"currentPage":0,"totalPages":3}"#),
            Err(ApiError::Malformed(_))
        ));
        assert!(matches!(
            page(r#"{"products":[],"currentPage":4,"totalPages":3}"#),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_cart_item_is_flattened() {
        let record: CartItemRecord = serde_json::from_str(
            r#"{"id":"p2","name":"Mug","price":4.0,"imageUrl":"","category":"kitchen","stock":9,"quantity":2}"#,
        )
        .unwrap();
        let item = CartItem::try_from(record).unwrap();

        assert_eq!(item.id(), &ProductId::from("p2"));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.subtotal(), 8.0);
    }

    #[test]
    fn test_set_quantity_body_shape() {
        let add = serde_json::to_value(CartItemBody { id: "p1", quantity: None }).unwrap();
        let set = serde_json::to_value(CartItemBody { id: "p1", quantity: Some(3) }).unwrap();

        assert_eq!(add, serde_json::json!({"id": "p1"}));
        assert_eq!(set, serde_json::json!({"id": "p1", "quantity": 3}));
    }
}
