//! Product listing handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::DomainError;
use agora_core::domain::NewProduct;
use agora_shared::dto::{BidRequest, CommentRequest, CreateProductRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/products
pub async fn create(
    state: web::Data<AppState>,
    Identity(owner): Identity,
    body: web::Json<CreateProductRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = NewProduct {
        title: req.title,
        description: req.description,
        price: req.price,
        end_date: req.end_date,
        product_image: req.product_image,
    };

    let product = state.products.create(&owner, draft).await?;
    Ok(HttpResponse::Created().json(views::product(&product)))
}

/// GET /api/products/all
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let products = state.products.list().await?;
    let body: Vec<_> = products.iter().map(views::product).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products/{id} - public
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let product = state.products.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::product(&product)))
}

/// PUT /api/products/like/{id}
pub async fn like(
    state: web::Data<AppState>,
    Identity(actor): Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let product = state.products.like(path.into_inner(), &actor).await?;
    Ok(HttpResponse::Ok().json(views::likes(product.likes())))
}

/// PUT /api/products/unlike/{id}
pub async fn unlike(
    state: web::Data<AppState>,
    Identity(actor): Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let product = state.products.unlike(path.into_inner(), &actor).await?;
    Ok(HttpResponse::Ok().json(views::likes(product.likes())))
}

/// POST /api/products/comment/{id}
pub async fn comment(
    state: web::Data<AppState>,
    Identity(actor): Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let text = body.into_inner().text.unwrap_or_default();
    let product = state
        .products
        .comment(path.into_inner(), &actor, text)
        .await?;
    Ok(HttpResponse::Ok().json(views::comments(product.comments())))
}

/// DELETE /api/products/comment/{id}/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    Identity(actor): Identity,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    let (id, comment_id) = path.into_inner();
    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| AppError::NotFound("Comment does not exist".to_string()))?;
    let product = state
        .products
        .delete_comment(id, comment_id, &actor)
        .await?;
    Ok(HttpResponse::Ok().json(views::comments(product.comments())))
}

/// POST /api/products/bid/{id}
pub async fn bid(
    state: web::Data<AppState>,
    Identity(actor): Identity,
    path: web::Path<Uuid>,
    body: web::Json<BidRequest>,
) -> AppResult<HttpResponse> {
    let price = body
        .into_inner()
        .price
        .ok_or_else(|| DomainError::validation("Price is required"))?;
    let product = state.products.bid(path.into_inner(), &actor, price).await?;
    Ok(HttpResponse::Ok().json(views::bids(product.bids())))
}
