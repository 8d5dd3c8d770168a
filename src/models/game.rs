use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{game_score_entity, user_profile_entity};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: i32,
    pub session_id: String,
    pub username: Option<String>,
    pub total_points: i32,
    pub level: i32,
    pub games_played: i32,
    pub high_score: i32,
    pub last_played_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<user_profile_entity::Model> for UserProfileResponse {
    fn from(m: user_profile_entity::Model) -> Self {
        UserProfileResponse {
            id: m.id,
            session_id: m.session_id,
            username: m.username,
            total_points: m.total_points,
            level: m.level,
            games_played: m.games_played,
            high_score: m.high_score,
            last_played_at: m.last_played_at,
            created_at: m.created_at,
        }
    }
}

/// Only the display name is client-editable
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// blank or null clears it
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub game_type: String,
    pub score: i64,
    pub points_earned: i64,
    /// seconds
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameScoreResponse {
    pub id: i32,
    pub session_id: String,
    pub game_type: String,
    pub score: i32,
    pub points_earned: i32,
    pub duration: Option<i32>,
    pub played_at: DateTime<Utc>,
}

impl From<game_score_entity::Model> for GameScoreResponse {
    fn from(m: game_score_entity::Model) -> Self {
        GameScoreResponse {
            id: m.id,
            session_id: m.session_id,
            game_type: m.game_type,
            score: m.score,
            points_earned: m.points_earned,
            duration: m.duration,
            played_at: m.played_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmissionResponse {
    pub score: GameScoreResponse,
    pub profile: UserProfileResponse,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoresQuery {
    pub game_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeaderboardQuery {
    /// 1..=100, default 10
    pub limit: Option<i64>,
}
