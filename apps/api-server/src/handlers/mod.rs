//! HTTP handlers and route configuration.

mod health;
mod products;
mod views;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes and extractor error handling.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| {
        AppError::NotFound("Product not found".to_string()).into()
    }))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/products")
                    .route("", web::post().to(products::create))
                    .route("/all", web::get().to(products::list))
                    .route("/like/{id}", web::put().to(products::like))
                    .route("/unlike/{id}", web::put().to(products::unlike))
                    .route("/comment/{id}", web::post().to(products::comment))
                    .route(
                        "/comment/{id}/{comment_id}",
                        web::delete().to(products::delete_comment),
                    )
                    .route("/bid/{id}", web::post().to(products::bid))
                    .route("/{id}", web::get().to(products::get)),
            ),
    );
}
