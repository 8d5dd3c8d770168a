use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    #[sea_orm(string_value = "discount")]
    Discount,
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "badge")]
    Badge,
}

/// Redeemable reward. `max_redemptions = None` means unlimited.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub points_cost: i32,
    pub reward_type: RewardType,
    pub reward_value: Option<String>,
    pub is_active: bool,
    pub max_redemptions: Option<i32>,
    pub current_redemptions: i32,
    pub created_at: DateTime<Utc>,
}

impl Model {
    /// Active and not yet at its redemption cap
    pub fn is_available(&self) -> bool {
        self.is_active && !self.is_sold_out()
    }

    pub fn is_sold_out(&self) -> bool {
        match self.max_redemptions {
            None => false,
            Some(max) => self.current_redemptions >= max,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_rewards::Entity")]
    UserRewards,
}

impl Related<super::user_rewards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRewards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
