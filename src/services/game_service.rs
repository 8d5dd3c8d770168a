use crate::entities::{game_score_entity as scores, user_profile_entity as profiles};
use crate::error::{AppError, AppResult};
use crate::models::{
    GameScoreResponse, ScoreSubmissionResponse, SubmitScoreRequest, UpdateProfileRequest,
    UserProfileResponse,
};
use crate::scoring::{self, ProfileTally};
use crate::utils::{SessionLocks, int_in_range, optional_text, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

const MAX_GAME_TYPE_LEN: usize = 50;
const MAX_USERNAME_LEN: usize = 50;
const MAX_SCORE: i64 = 1_000_000;
const MAX_DURATION_SECONDS: i64 = 3600;
const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
const MAX_LEADERBOARD_LIMIT: i64 = 100;
const USER_SCORES_LIMIT: u64 = 10;

/// Game profiles and the score log.
#[derive(Clone)]
pub struct GameService {
    pool: DatabaseConnection,
    locks: SessionLocks,
}

impl GameService {
    pub fn new(pool: DatabaseConnection, locks: SessionLocks) -> Self {
        Self { pool, locks }
    }

    pub async fn get_or_create_profile(&self, session_id: &str) -> AppResult<UserProfileResponse> {
        let _guard = self.locks.acquire(session_id).await;
        let profile = ensure_profile(&self.pool, session_id).await?;
        Ok(profile.into())
    }

    /// Counters are server-owned; only the display name can change here.
    pub async fn update_profile(
        &self,
        session_id: &str,
        req: UpdateProfileRequest,
    ) -> AppResult<UserProfileResponse> {
        let username = optional_text("username", req.username.as_deref(), MAX_USERNAME_LEN)?;

        let _guard = self.locks.acquire(session_id).await;
        let profile = find_profile(&self.pool, session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        let mut am = profile.into_active_model();
        am.username = Set(username);
        Ok(am.update(&self.pool).await?.into())
    }

    /// Append a score and credit the profile, atomically.
    pub async fn record_score(
        &self,
        session_id: &str,
        req: SubmitScoreRequest,
    ) -> AppResult<ScoreSubmissionResponse> {
        let game_type = required_text("gameType", &req.game_type, MAX_GAME_TYPE_LEN)?;
        let score = int_in_range("score", req.score, 0, MAX_SCORE)?;
        let points_earned = int_in_range("pointsEarned", req.points_earned, 0, MAX_SCORE)?;
        let duration = req
            .duration
            .map(|d| int_in_range("duration", d, 0, MAX_DURATION_SECONDS))
            .transpose()?;

        if game_type == scoring::SQUISHY_CLICKER {
            check_clicker_submission(score, points_earned, duration)?;
        }

        let _guard = self.locks.acquire(session_id).await;
        let txn = self.pool.begin().await?;
        let now = Utc::now();

        let saved_score = scores::ActiveModel {
            session_id: Set(session_id.to_string()),
            game_type: Set(game_type),
            score: Set(score),
            points_earned: Set(points_earned),
            duration: Set(duration),
            played_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let profile = ensure_profile(&txn, session_id).await?;
        let before = ProfileTally {
            total_points: profile.total_points,
            level: profile.level,
            games_played: profile.games_played,
            high_score: profile.high_score,
        };
        let after = before.apply(score, points_earned);

        let mut am = profile.into_active_model();
        am.total_points = Set(after.total_points);
        am.level = Set(after.level);
        am.games_played = Set(after.games_played);
        am.high_score = Set(after.high_score);
        am.last_played_at = Set(Some(now));
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        if after.level > before.level {
            log::info!("session {session_id} reached level {}", after.level);
        }

        Ok(ScoreSubmissionResponse {
            score: saved_score.into(),
            profile: updated.into(),
            leveled_up: after.level > before.level,
        })
    }

    /// Best scores for a game: score desc, then earliest, then lowest id.
    pub async fn leaderboard(
        &self,
        game_type: &str,
        limit: Option<i64>,
    ) -> AppResult<Vec<GameScoreResponse>> {
        let game_type = required_text("gameType", game_type, MAX_GAME_TYPE_LEN)?;
        let limit = int_in_range(
            "limit",
            limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
            1,
            MAX_LEADERBOARD_LIMIT,
        )?;

        let list = ranked(scores::Entity::find().filter(scores::Column::GameType.eq(game_type)))
            .limit(limit as u64)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn user_high_scores(
        &self,
        session_id: &str,
        game_type: Option<&str>,
    ) -> AppResult<Vec<GameScoreResponse>> {
        let mut query = scores::Entity::find().filter(scores::Column::SessionId.eq(session_id));
        if let Some(game_type) = game_type.map(str::trim).filter(|g| !g.is_empty()) {
            let game_type = required_text("gameType", game_type, MAX_GAME_TYPE_LEN)?;
            query = query.filter(scores::Column::GameType.eq(game_type));
        }

        let list = ranked(query)
            .limit(USER_SCORES_LIMIT)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

fn ranked(query: sea_orm::Select<scores::Entity>) -> sea_orm::Select<scores::Entity> {
    query
        .order_by_desc(scores::Column::Score)
        .order_by_asc(scores::Column::PlayedAt)
        .order_by_asc(scores::Column::Id)
}

/// Reject clicker rounds whose numbers cannot come out of a real 30s round.
fn check_clicker_submission(score: i32, points_earned: i32, duration: Option<i32>) -> AppResult<()> {
    if points_earned > scoring::max_points_for_score(score) {
        return Err(AppError::ValidationError(
            "pointsEarned is not attainable with this score".to_string(),
        ));
    }
    if duration.is_some_and(|d| d > scoring::ROUND_SECONDS) {
        return Err(AppError::ValidationError(format!(
            "duration cannot exceed {} seconds",
            scoring::ROUND_SECONDS
        )));
    }
    Ok(())
}

async fn find_profile<C: ConnectionTrait>(
    conn: &C,
    session_id: &str,
) -> AppResult<Option<profiles::Model>> {
    Ok(profiles::Entity::find()
        .filter(profiles::Column::SessionId.eq(session_id))
        .one(conn)
        .await?)
}

pub(crate) async fn ensure_profile<C: ConnectionTrait>(
    conn: &C,
    session_id: &str,
) -> AppResult<profiles::Model> {
    if let Some(profile) = find_profile(conn, session_id).await? {
        return Ok(profile);
    }
    let tally = ProfileTally::default();
    let created = profiles::ActiveModel {
        session_id: Set(session_id.to_string()),
        username: Set(None),
        total_points: Set(tally.total_points),
        level: Set(tally.level),
        games_played: Set(tally.games_played),
        high_score: Set(tally.high_score),
        last_played_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{shared_test_pool, test_pool};

    async fn service() -> GameService {
        GameService::new(test_pool().await, SessionLocks::new())
    }

    fn submission(game_type: &str, score: i64, points: i64) -> SubmitScoreRequest {
        SubmitScoreRequest {
            game_type: game_type.to_string(),
            score,
            points_earned: points,
            duration: Some(30),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let game = service().await;
        let first = game.get_or_create_profile("s1").await.unwrap();
        let second = game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.level, 1);
        assert_eq!(first.total_points, 0);
    }

    #[tokio::test]
    async fn test_level_two_only_after_third_game() {
        let game = service().await;
        let first = game.record_score("s1", submission("memory", 1000, 200)).await.unwrap();
        assert_eq!(first.profile.level, 1);
        assert!(!first.leveled_up);

        let second = game.record_score("s1", submission("memory", 800, 200)).await.unwrap();
        assert_eq!(second.profile.total_points, 400);
        assert_eq!(second.profile.level, 1);

        let third = game.record_score("s1", submission("memory", 900, 150)).await.unwrap();
        assert_eq!(third.profile.total_points, 550);
        assert_eq!(third.profile.level, 2);
        assert!(third.leveled_up);
        assert_eq!(third.profile.games_played, 3);
        assert_eq!(third.profile.high_score, 1000);
        assert!(third.profile.last_played_at.is_some());
    }

    #[tokio::test]
    async fn test_points_credited_once() {
        let game = service().await;
        game.record_score("s1", submission("memory", 10, 7)).await.unwrap();
        let profile = game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.total_points, 7);
    }

    #[tokio::test]
    async fn test_clicker_plausibility() {
        let game = service().await;
        // 100 / 10 + 100 / 5 = 30
        assert!(game
            .record_score("s1", submission(scoring::SQUISHY_CLICKER, 100, 30))
            .await
            .is_ok());
        assert!(matches!(
            game.record_score("s1", submission(scoring::SQUISHY_CLICKER, 100, 31))
                .await,
            Err(AppError::ValidationError(_))
        ));

        let mut too_long = submission(scoring::SQUISHY_CLICKER, 100, 10);
        too_long.duration = Some(45);
        assert!(game.record_score("s1", too_long).await.is_err());

        let profile = game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.games_played, 1);
    }

    #[tokio::test]
    async fn test_rejects_bad_submissions() {
        let game = service().await;
        assert!(game.record_score("s1", submission("", 1, 1)).await.is_err());
        assert!(game.record_score("s1", submission("memory", -1, 0)).await.is_err());
        assert!(game.record_score("s1", submission(&"g".repeat(51), 1, 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_leaderboard_order_and_limit() {
        let game = service().await;
        let a = game.record_score("a", submission("memory", 50, 5)).await.unwrap();
        let b = game.record_score("b", submission("memory", 80, 8)).await.unwrap();
        let c = game.record_score("c", submission("memory", 50, 5)).await.unwrap();
        game.record_score("d", submission("other", 999, 9)).await.unwrap();

        let board = game.leaderboard("memory", None).await.unwrap();
        let ids: Vec<i32> = board.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.score.id, a.score.id, c.score.id]);

        let top = game.leaderboard("memory", Some(1)).await.unwrap();
        assert_eq!(top.len(), 1);
        assert!(game.leaderboard("memory", Some(0)).await.is_err());
        assert!(game.leaderboard("memory", Some(101)).await.is_err());
    }

    #[tokio::test]
    async fn test_user_high_scores_capped_and_filtered() {
        let game = service().await;
        for i in 0..12 {
            game.record_score("s1", submission("memory", i * 10, 0)).await.unwrap();
        }
        game.record_score("s1", submission("other", 5, 0)).await.unwrap();

        let mine = game.user_high_scores("s1", Some("memory")).await.unwrap();
        assert_eq!(mine.len(), 10);
        assert_eq!(mine[0].score, 110);
        assert!(mine.iter().all(|s| s.game_type == "memory"));

        let other = game.user_high_scores("s1", Some("other")).await.unwrap();
        assert_eq!(other.len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_username_only() {
        let game = service().await;
        assert!(matches!(
            game.update_profile("s1", UpdateProfileRequest { username: Some("x".into()) })
                .await,
            Err(AppError::NotFound(_))
        ));

        game.get_or_create_profile("s1").await.unwrap();
        let updated = game
            .update_profile("s1", UpdateProfileRequest { username: Some(" Mochi ".into()) })
            .await
            .unwrap();
        assert_eq!(updated.username.as_deref(), Some("Mochi"));

        assert!(game
            .update_profile("s1", UpdateProfileRequest { username: Some("n".repeat(51)) })
            .await
            .is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_scores_lose_no_updates() {
        let dir = tempfile::tempdir().unwrap();
        let game = GameService::new(shared_test_pool(dir.path(), 4).await, SessionLocks::new());

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let game = game.clone();
                tokio::spawn(async move {
                    game.record_score("s1", submission("memory", 100 + i, 100))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let profile = game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.total_points, 2000);
        assert_eq!(profile.games_played, 20);
        assert_eq!(profile.high_score, 119);
        assert_eq!(profile.level, 5);
        assert_eq!(game.user_high_scores("s1", None).await.unwrap().len(), 10);
    }
}
