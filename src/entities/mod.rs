pub mod admin_users;
pub mod cart_items;
pub mod game_rewards;
pub mod game_scores;
pub mod inventory_items;
pub mod products;
pub mod reservations;
pub mod sales;
pub mod user_profiles;
pub mod user_rewards;
pub mod wishlist_items;

pub use admin_users as admin_user_entity;
pub use cart_items as cart_item_entity;
pub use game_rewards as game_reward_entity;
pub use game_rewards::RewardType;
pub use game_scores as game_score_entity;
pub use inventory_items as inventory_item_entity;
pub use products as product_entity;
pub use reservations as reservation_entity;
pub use sales as sale_entity;
pub use user_profiles as user_profile_entity;
pub use user_rewards as user_reward_entity;
pub use wishlist_items as wishlist_item_entity;
