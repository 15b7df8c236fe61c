//! Entries embedded in a product: bids, likes and comments.
//!
//! None of these have a lifecycle outside their parent product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Actor;

/// A price offer recorded against a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder_id: Uuid,
    pub bidder_name: String,
    pub bidder_avatar: Option<String>,
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl Bid {
    pub fn new(bidder: &Actor, price: f64) -> Self {
        Self {
            bidder_id: bidder.user_id,
            bidder_name: bidder.name.clone(),
            bidder_avatar: bidder.avatar.clone(),
            price,
            date: Utc::now(),
        }
    }
}

/// A per-user endorsement marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: Uuid,
    pub user_name: String,
}

impl Like {
    pub fn new(user: &Actor) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &Actor, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author.user_id,
            author_name: author.name.clone(),
            author_avatar: author.avatar.clone(),
            text,
            date: Utc::now(),
        }
    }
}
