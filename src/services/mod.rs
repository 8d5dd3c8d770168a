pub mod admin_auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod game_service;
pub mod inventory_service;
pub mod reservation_service;
pub mod reward_service;
pub mod sale_service;
pub mod wishlist_service;

pub use admin_auth_service::*;
pub use cart_service::*;
pub use catalog_service::*;
pub use game_service::*;
pub use inventory_service::*;
pub use reservation_service::*;
pub use reward_service::*;
pub use sale_service::*;
pub use wishlist_service::*;

use crate::utils::{JwtService, SessionLocks};
use actix_web::web;
use sea_orm::DatabaseConnection;

/// Every service the HTTP layer needs, built once and cloned into each worker.
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
    pub cart: CartService,
    pub wishlist: WishlistService,
    pub game: GameService,
    pub rewards: RewardService,
    pub sales: SaleService,
    pub reservations: ReservationService,
    pub inventory: InventoryService,
    pub admin_auth: AdminAuthService,
}

impl Services {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        let locks = SessionLocks::new();
        Self {
            catalog: CatalogService::new(pool.clone()),
            cart: CartService::new(pool.clone(), locks.clone()),
            wishlist: WishlistService::new(pool.clone(), locks.clone()),
            game: GameService::new(pool.clone(), locks.clone()),
            rewards: RewardService::new(pool.clone(), locks),
            sales: SaleService::new(pool.clone()),
            reservations: ReservationService::new(pool.clone()),
            inventory: InventoryService::new(pool.clone()),
            admin_auth: AdminAuthService::new(pool, jwt_service),
        }
    }

    /// Register each service as `web::Data` app data.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.catalog.clone()))
            .app_data(web::Data::new(self.cart.clone()))
            .app_data(web::Data::new(self.wishlist.clone()))
            .app_data(web::Data::new(self.game.clone()))
            .app_data(web::Data::new(self.rewards.clone()))
            .app_data(web::Data::new(self.sales.clone()))
            .app_data(web::Data::new(self.reservations.clone()))
            .app_data(web::Data::new(self.inventory.clone()))
            .app_data(web::Data::new(self.admin_auth.clone()));
    }
}
