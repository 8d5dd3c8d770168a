pub mod admin;
pub mod admin_auth;
pub mod cart;
pub mod game;
pub mod inventory;
pub mod product;
pub mod reservations;
pub mod sales;
pub mod wishlist;

pub use admin::admin_config;
pub use cart::cart_config;
pub use game::game_config;
pub use product::product_config;
pub use wishlist::wishlist_config;

use crate::error::AppError;
use actix_web::{error, web};

/// Malformed JSON bodies get the regular error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let message = match &err {
                error::JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
                other => format!("Invalid request body: {other}"),
            };
            AppError::ValidationError(message).into()
        })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(format!("Invalid path: {err}")).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {err}")).into()
    })
}

/// Everything under `/api`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(product_config)
        .configure(cart_config)
        .configure(wishlist_config)
        .configure(game_config)
        .configure(admin_config);
}
