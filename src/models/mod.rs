pub mod admin_auth;
pub mod cart;
pub mod common;
pub mod game;
pub mod inventory;
pub mod product;
pub mod reservation;
pub mod reward;
pub mod sale;
pub mod wishlist;

pub use admin_auth::*;
pub use cart::*;
pub use common::*;
pub use game::*;
pub use inventory::*;
pub use product::*;
pub use reservation::*;
pub use reward::*;
pub use sale::*;
pub use wishlist::*;
