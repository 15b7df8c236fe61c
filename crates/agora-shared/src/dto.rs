//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to list a new product.
///
/// Required fields are optional here so a missing one is reported as a
/// validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub end_date: Option<DateTime<Utc>>,
    pub product_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidRequest {
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub bidder_id: Uuid,
    pub bidder_name: String,
    pub bidder_avatar: Option<String>,
    pub price: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub user_id: Uuid,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Full product listing with its embedded bids, likes and comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub owner_avatar: Option<String>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub product_image: Option<String>,
    pub bids: Vec<BidResponse>,
    pub likes: Vec<LikeResponse>,
    pub comments: Vec<CommentResponse>,
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_camel_case() {
        let req: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "title": "Lamp",
            "description": "Brass",
            "price": 20,
            "productImage": "images/lamp.jpg",
            "endDate": "2026-12-01T00:00:00Z",
        }))
        .unwrap();

        assert_eq!(req.price, Some(20.0));
        assert_eq!(req.product_image.as_deref(), Some("images/lamp.jpg"));
        assert!(req.end_date.is_some());
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let req: CreateProductRequest = serde_json::from_str("{}").unwrap();

        assert!(req.title.is_none());
        assert!(req.price.is_none());
    }
}
