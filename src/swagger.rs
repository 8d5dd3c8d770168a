use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::RewardType;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::product::list_products,
        handlers::product::featured_products,
        handlers::product::search_products,
        handlers::product::products_by_category,
        handlers::product::get_product,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::update_cart_item,
        handlers::cart::remove_cart_item,
        handlers::cart::clear_cart,
        handlers::wishlist::get_wishlist,
        handlers::wishlist::add_to_wishlist,
        handlers::wishlist::remove_from_wishlist,
        handlers::wishlist::check_wishlist,
        handlers::game::get_profile,
        handlers::game::update_profile,
        handlers::game::submit_score,
        handlers::game::get_user_scores,
        handlers::game::get_leaderboard,
        handlers::game::get_rewards,
        handlers::game::redeem_reward,
        handlers::game::get_user_rewards,
        handlers::admin_auth::login,
        handlers::admin_auth::refresh,
        handlers::admin_auth::me,
        handlers::admin::list_all_rewards,
        handlers::admin::set_reward_active,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::create_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::reservations::list_reservations,
        handlers::reservations::get_reservation,
        handlers::reservations::create_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::delete_reservation,
        handlers::inventory::list_inventory,
        handlers::inventory::get_inventory_item,
        handlers::inventory::create_inventory_item,
        handlers::inventory::update_inventory_item,
        handlers::inventory::delete_inventory_item,
    ),
    components(
        schemas(
            ApiError,
            MessageResponse,
            ProductResponse,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartItemResponse,
            CartLineResponse,
            CartResponse,
            AddToWishlistRequest,
            WishlistItemResponse,
            WishlistEntryResponse,
            WishlistCheckResponse,
            UserProfileResponse,
            UpdateProfileRequest,
            SubmitScoreRequest,
            GameScoreResponse,
            ScoreSubmissionResponse,
            RewardType,
            GameRewardResponse,
            UserRewardResponse,
            RedeemRefusal,
            SetRewardActiveRequest,
            AdminLoginRequest,
            RefreshTokenRequest,
            AdminUserResponse,
            AdminAuthResponse,
            SaleResponse,
            CreateSaleRequest,
            UpdateSaleRequest,
            ReservationResponse,
            CreateReservationRequest,
            UpdateReservationRequest,
            InventoryItemResponse,
            CreateInventoryItemRequest,
            UpdateInventoryItemRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "cart", description = "Session shopping cart"),
        (name = "wishlist", description = "Session wishlist"),
        (name = "game", description = "Mini-game profile and scores"),
        (name = "rewards", description = "Point rewards"),
        (name = "admin-auth", description = "Back-office sign-in"),
        (name = "admin-sales", description = "Sales sheet"),
        (name = "admin-reservations", description = "Reservations sheet"),
        (name = "admin-inventory", description = "Inventory sheet"),
        (name = "admin-rewards", description = "Reward administration"),
    ),
    info(
        title = "Squishy Shop API",
        version = "0.1.0",
        description = "Storefront, mini-game and back-office REST API"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
