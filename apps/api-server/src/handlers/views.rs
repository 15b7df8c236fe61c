//! Domain to wire conversions.

use agora_core::domain::{Bid, Comment, Like, Product};
use agora_shared::dto::{BidResponse, CommentResponse, LikeResponse, ProductResponse};

pub fn bids(bids: &[Bid]) -> Vec<BidResponse> {
    bids.iter()
        .map(|bid| BidResponse {
            bidder_id: bid.bidder_id,
            bidder_name: bid.bidder_name.clone(),
            bidder_avatar: bid.bidder_avatar.clone(),
            price: bid.price,
            date: bid.date,
        })
        .collect()
}

pub fn likes(likes: &[Like]) -> Vec<LikeResponse> {
    likes
        .iter()
        .map(|like| LikeResponse {
            user_id: like.user_id,
            user_name: like.user_name.clone(),
        })
        .collect()
}

pub fn comments(comments: &[Comment]) -> Vec<CommentResponse> {
    comments
        .iter()
        .map(|comment| CommentResponse {
            id: comment.id,
            author_id: comment.author_id,
            author_name: comment.author_name.clone(),
            author_avatar: comment.author_avatar.clone(),
            text: comment.text.clone(),
            date: comment.date,
        })
        .collect()
}

pub fn product(product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id(),
        owner_id: product.owner_id(),
        owner_name: product.owner_name().to_string(),
        owner_avatar: product.owner_avatar().map(str::to_string),
        title: product.title().to_string(),
        description: product.description().to_string(),
        price: product.price(),
        start_date: product.start_date(),
        end_date: product.end_date(),
        product_image: product.product_image().map(str::to_string),
        bids: bids(product.bids()),
        likes: likes(product.likes()),
        comments: comments(product.comments()),
        revision: product.revision(),
    }
}
