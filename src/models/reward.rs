use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{RewardType, game_reward_entity, user_reward_entity};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameRewardResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub points_cost: i32,
    pub reward_type: RewardType,
    pub reward_value: Option<String>,
    pub is_active: bool,
    pub max_redemptions: Option<i32>,
    pub current_redemptions: i32,
    pub created_at: DateTime<Utc>,
}

impl From<game_reward_entity::Model> for GameRewardResponse {
    fn from(m: game_reward_entity::Model) -> Self {
        GameRewardResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            points_cost: m.points_cost,
            reward_type: m.reward_type,
            reward_value: m.reward_value,
            is_active: m.is_active,
            max_redemptions: m.max_redemptions,
            current_redemptions: m.current_redemptions,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRewardResponse {
    pub id: i32,
    pub session_id: String,
    pub reward_id: i32,
    pub redeemed_at: DateTime<Utc>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub reward: GameRewardResponse,
}

impl UserRewardResponse {
    pub fn new(m: user_reward_entity::Model, reward: game_reward_entity::Model) -> Self {
        UserRewardResponse {
            id: m.id,
            session_id: m.session_id,
            reward_id: m.reward_id,
            redeemed_at: m.redeemed_at,
            is_used: m.is_used,
            used_at: m.used_at,
            reward: reward.into(),
        }
    }
}

/// Why a redemption did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RedeemRefusal {
    RewardNotFound,
    ProfileNotFound,
    Inactive,
    SoldOut,
    InsufficientPoints,
}

impl RedeemRefusal {
    pub fn message(&self) -> &'static str {
        match self {
            RedeemRefusal::RewardNotFound => "Reward not found",
            RedeemRefusal::ProfileNotFound => "No game profile for this session",
            RedeemRefusal::Inactive => "Reward is not active",
            RedeemRefusal::SoldOut => "Reward has reached its redemption limit",
            RedeemRefusal::InsufficientPoints => "Not enough points",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    Redeemed(UserRewardResponse),
    Unable(RedeemRefusal),
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRewardActiveRequest {
    pub is_active: bool,
}
