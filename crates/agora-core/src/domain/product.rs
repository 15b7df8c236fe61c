use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Actor, Bid, Comment, Like};
use crate::error::DomainError;

/// Input for listing a new product.
///
/// Required fields are optional here so that every missing one can be
/// reported at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub end_date: Option<DateTime<Utc>>,
    pub product_image: Option<String>,
}

/// Product aggregate - one auction-style listing and everything embedded in it.
///
/// Bids, likes and comments are kept newest first. All mutations go through
/// the methods below; a failed mutation leaves the aggregate untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Uuid,
    owner_id: Uuid,
    owner_name: String,
    owner_avatar: Option<String>,
    title: String,
    description: String,
    price: f64,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    product_image: Option<String>,
    bids: Vec<Bid>,
    likes: Vec<Like>,
    comments: Vec<Comment>,
    revision: u64,
}

/// Plain field-by-field view of a [`Product`], used by repositories to
/// persist and rehydrate aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductState {
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
    pub bids: Vec<Bid>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub revision: u64,
}

fn required_text(value: Option<String>, message: &str, errors: &mut Vec<String>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            errors.push(message.to_string());
            String::new()
        }
    }
}

impl Product {
    /// List a new product owned by `owner`.
    pub fn create(owner: &Actor, draft: NewProduct) -> Result<Self, DomainError> {
        let mut errors = Vec::new();

        let title = required_text(draft.title, "Title is required", &mut errors);
        let description = required_text(draft.description, "Description is required", &mut errors);
        let price = match draft.price {
            Some(price) if price.is_finite() => price,
            Some(_) => {
                errors.push("Price must be a finite number".to_string());
                0.0
            }
            None => {
                errors.push("Price is required".to_string());
                0.0
            }
        };

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            owner_id: owner.user_id,
            owner_name: owner.name.clone(),
            owner_avatar: owner.avatar.clone(),
            title,
            description,
            price,
            start_date: Utc::now(),
            end_date: draft.end_date,
            product_image: draft.product_image,
            bids: Vec::new(),
            likes: Vec::new(),
            comments: Vec::new(),
            revision: 0,
        })
    }

    pub fn add_like(&mut self, actor: &Actor) -> Result<&[Like], DomainError> {
        if self.likes.iter().any(|like| like.user_id == actor.user_id) {
            return Err(DomainError::AlreadyLiked);
        }

        self.likes.insert(0, Like::new(actor));
        Ok(&self.likes)
    }

    pub fn remove_like(&mut self, user_id: Uuid) -> Result<&[Like], DomainError> {
        let index = self
            .likes
            .iter()
            .position(|like| like.user_id == user_id)
            .ok_or(DomainError::NotLiked)?;

        self.likes.remove(index);
        Ok(&self.likes)
    }

    pub fn add_comment(&mut self, author: &Actor, text: String) -> Result<&[Comment], DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("Text is required"));
        }

        self.comments.insert(0, Comment::new(author, text));
        Ok(&self.comments)
    }

    /// Remove the comment identified by `comment_id`. Only its author may do so.
    pub fn remove_comment(
        &mut self,
        comment_id: Uuid,
        requester_id: Uuid,
    ) -> Result<&[Comment], DomainError> {
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or_else(|| DomainError::comment_not_found(comment_id))?;

        if self.comments[index].author_id != requester_id {
            return Err(DomainError::NotAuthorized);
        }

        self.comments.remove(index);
        Ok(&self.comments)
    }

    /// Record a bid. It must beat both the listing price and every earlier bid.
    pub fn place_bid(&mut self, bidder: &Actor, price: f64) -> Result<&[Bid], DomainError> {
        if !price.is_finite() {
            return Err(DomainError::validation("Price must be a finite number"));
        }

        if price <= self.price {
            return Err(DomainError::BidTooLow {
                offered: price,
                minimum: self.price,
            });
        }

        if let Some(highest) = self.highest_bid() {
            if price <= highest {
                return Err(DomainError::BidNotHighest {
                    offered: price,
                    highest,
                });
            }
        }

        self.bids.insert(0, Bid::new(bidder, price));
        Ok(&self.bids)
    }

    /// Highest price among recorded bids, if any.
    pub fn highest_bid(&self) -> Option<f64> {
        self.bids.iter().map(|bid| bid.price).reduce(f64::max)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn owner_avatar(&self) -> Option<&str> {
        self.owner_avatar.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn product_image(&self) -> Option<&str> {
        self.product_image.as_deref()
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Persisted revision; `0` until the first save.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl From<ProductState> for Product {
    fn from(state: ProductState) -> Self {
        Self {
            id: state.id,
            owner_id: state.owner_id,
            owner_name: state.owner_name,
            owner_avatar: state.owner_avatar,
            title: state.title,
            description: state.description,
            price: state.price,
            start_date: state.start_date,
            end_date: state.end_date,
            product_image: state.product_image,
            bids: state.bids,
            likes: state.likes,
            comments: state.comments,
            revision: state.revision,
        }
    }
}

impl From<Product> for ProductState {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            owner_id: product.owner_id,
            owner_name: product.owner_name,
            owner_avatar: product.owner_avatar,
            title: product.title,
            description: product.description,
            price: product.price,
            start_date: product.start_date,
            end_date: product.end_date,
            product_image: product.product_image,
            bids: product.bids,
            likes: product.likes,
            comments: product.comments,
            revision: product.revision,
        }
    }
}
