use crate::entities::{
    game_reward_entity as rewards, user_profile_entity as profiles,
    user_reward_entity as user_rewards,
};
use crate::error::{AppError, AppResult};
use crate::models::{GameRewardResponse, RedeemOutcome, RedeemRefusal, UserRewardResponse};
use crate::utils::SessionLocks;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Reward catalogue and point redemptions.
#[derive(Clone)]
pub struct RewardService {
    pool: DatabaseConnection,
    locks: SessionLocks,
}

impl RewardService {
    pub fn new(pool: DatabaseConnection, locks: SessionLocks) -> Self {
        Self { pool, locks }
    }

    /// Active rewards that still have redemptions left, cheapest first.
    pub async fn list_available(&self) -> AppResult<Vec<GameRewardResponse>> {
        let list = rewards::Entity::find()
            .filter(rewards::Column::IsActive.eq(true))
            .filter(under_cap())
            .order_by_asc(rewards::Column::PointsCost)
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Spend points on a reward.
    ///
    /// Business refusals come back as `RedeemOutcome::Unable`; the debit, the
    /// counter bump and the ledger row either all land or none do.
    pub async fn redeem(&self, session_id: &str, reward_id: i64) -> AppResult<RedeemOutcome> {
        let Ok(reward_id) = i32::try_from(reward_id) else {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::RewardNotFound));
        };

        let _guard = self.locks.acquire(session_id).await;
        let txn = self.pool.begin().await?;

        let Some(reward) = rewards::Entity::find_by_id(reward_id).one(&txn).await? else {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::RewardNotFound));
        };
        if !reward.is_active {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::Inactive));
        }
        if reward.is_sold_out() {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::SoldOut));
        }

        let Some(profile) = profiles::Entity::find()
            .filter(profiles::Column::SessionId.eq(session_id))
            .one(&txn)
            .await?
        else {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::ProfileNotFound));
        };
        if profile.total_points < reward.points_cost {
            return Ok(RedeemOutcome::Unable(RedeemRefusal::InsufficientPoints));
        }

        // debit only if the balance still covers the cost
        let debit = profiles::Entity::update_many()
            .col_expr(
                profiles::Column::TotalPoints,
                Expr::col(profiles::Column::TotalPoints).sub(reward.points_cost),
            )
            .filter(profiles::Column::Id.eq(profile.id))
            .filter(profiles::Column::TotalPoints.gte(reward.points_cost))
            .exec(&txn)
            .await?;
        if debit.rows_affected != 1 {
            txn.rollback().await?;
            return Ok(RedeemOutcome::Unable(RedeemRefusal::InsufficientPoints));
        }

        // bump the counter only while under the cap
        let claim = rewards::Entity::update_many()
            .col_expr(
                rewards::Column::CurrentRedemptions,
                Expr::col(rewards::Column::CurrentRedemptions).add(1),
            )
            .filter(rewards::Column::Id.eq(reward.id))
            .filter(rewards::Column::IsActive.eq(true))
            .filter(under_cap())
            .exec(&txn)
            .await?;
        if claim.rows_affected != 1 {
            txn.rollback().await?;
            return Ok(RedeemOutcome::Unable(RedeemRefusal::SoldOut));
        }

        let entry = user_rewards::ActiveModel {
            session_id: Set(session_id.to_string()),
            reward_id: Set(reward.id),
            redeemed_at: Set(Utc::now()),
            is_used: Set(false),
            used_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let reward = rewards::Entity::find_by_id(reward.id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::InternalError("reward vanished mid-redemption".into()))?;

        txn.commit().await?;

        log::info!(
            "session {session_id} redeemed reward {} for {} points",
            reward.id,
            reward.points_cost
        );
        Ok(RedeemOutcome::Redeemed(UserRewardResponse::new(entry, reward)))
    }

    /// Redemptions for a session, newest first.
    pub async fn list_user_rewards(&self, session_id: &str) -> AppResult<Vec<UserRewardResponse>> {
        let rows = user_rewards::Entity::find()
            .filter(user_rewards::Column::SessionId.eq(session_id))
            .find_also_related(rewards::Entity)
            .order_by_desc(user_rewards::Column::RedeemedAt)
            .order_by_desc(user_rewards::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, reward)| reward.map(|r| UserRewardResponse::new(entry, r)))
            .collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<GameRewardResponse>> {
        let list = rewards::Entity::find()
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn set_active(&self, reward_id: i64, is_active: bool) -> AppResult<GameRewardResponse> {
        let not_found = || AppError::NotFound("Reward not found".to_string());
        let reward_id = i32::try_from(reward_id).map_err(|_| not_found())?;
        let reward = rewards::Entity::find_by_id(reward_id)
            .one(&self.pool)
            .await?
            .ok_or_else(not_found)?;

        let mut am = reward.into_active_model();
        am.is_active = Set(is_active);
        let updated = am.update(&self.pool).await?;
        log::info!("reward {} active={}", updated.id, updated.is_active);
        Ok(updated.into())
    }
}

fn under_cap() -> Condition {
    Condition::any()
        .add(rewards::Column::MaxRedemptions.is_null())
        .add(
            Expr::col(rewards::Column::CurrentRedemptions)
                .lt(Expr::col(rewards::Column::MaxRedemptions)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{shared_test_pool, test_pool};
    use crate::models::SubmitScoreRequest;
    use crate::services::GameService;

    struct Fixture {
        rewards: RewardService,
        game: GameService,
        pool: DatabaseConnection,
    }

    async fn fixture() -> Fixture {
        fixture_on(test_pool().await)
    }

    fn fixture_on(pool: DatabaseConnection) -> Fixture {
        let locks = SessionLocks::new();
        Fixture {
            rewards: RewardService::new(pool.clone(), locks.clone()),
            game: GameService::new(pool.clone(), locks),
            pool,
        }
    }

    async fn earn(game: &GameService, session_id: &str, points: i64) {
        game.record_score(
            session_id,
            SubmitScoreRequest {
                game_type: "memory".to_string(),
                score: points,
                points_earned: points,
                duration: None,
            },
        )
        .await
        .unwrap();
    }

    async fn reward_named(pool: &DatabaseConnection, name: &str) -> rewards::Model {
        rewards::Entity::find()
            .filter(rewards::Column::Name.eq(name))
            .one(pool)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_available_sorted_by_cost() {
        let f = fixture().await;
        let list = f.rewards.list_available().await.unwrap();
        assert_eq!(list.len(), 5);
        assert!(list.windows(2).all(|w| w[0].points_cost <= w[1].points_cost));
        assert_eq!(list[0].points_cost, 100);
    }

    #[tokio::test]
    async fn test_redeem_debits_and_records() {
        let f = fixture().await;
        earn(&f.game, "s1", 300).await;
        let reward = reward_named(&f.pool, "10% Discount").await;

        let outcome = f.rewards.redeem("s1", i64::from(reward.id)).await.unwrap();
        let RedeemOutcome::Redeemed(entry) = outcome else {
            panic!("expected redemption");
        };
        assert_eq!(entry.reward.current_redemptions, 1);
        assert!(!entry.is_used);

        let profile = f.game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.total_points, 50);
        assert_eq!(f.rewards.list_user_rewards("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_points_changes_nothing() {
        let f = fixture().await;
        earn(&f.game, "s1", 99).await;
        let reward = reward_named(&f.pool, "5% Discount").await;

        let outcome = f.rewards.redeem("s1", i64::from(reward.id)).await.unwrap();
        assert!(matches!(
            outcome,
            RedeemOutcome::Unable(RedeemRefusal::InsufficientPoints)
        ));

        let profile = f.game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.total_points, 99);
        assert_eq!(reward_named(&f.pool, "5% Discount").await.current_redemptions, 0);
        assert!(f.rewards.list_user_rewards("s1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cap_is_exact() {
        let f = fixture().await;
        let capped = reward_named(&f.pool, "20% Mega Discount").await;
        assert_eq!(capped.max_redemptions, Some(10));

        for i in 0..10 {
            let session = format!("player-{i}");
            earn(&f.game, &session, 1000).await;
            let outcome = f.rewards.redeem(&session, i64::from(capped.id)).await.unwrap();
            assert!(matches!(outcome, RedeemOutcome::Redeemed(_)));
        }

        earn(&f.game, "late", 1000).await;
        let outcome = f.rewards.redeem("late", i64::from(capped.id)).await.unwrap();
        assert!(matches!(outcome, RedeemOutcome::Unable(RedeemRefusal::SoldOut)));
        assert_eq!(
            f.game.get_or_create_profile("late").await.unwrap().total_points,
            1000
        );
        assert_eq!(
            reward_named(&f.pool, "20% Mega Discount").await.current_redemptions,
            10
        );
        assert!(
            !f.rewards
                .list_available()
                .await
                .unwrap()
                .iter()
                .any(|r| r.id == capped.id)
        );
    }

    #[tokio::test]
    async fn test_refusals() {
        let f = fixture().await;
        assert!(matches!(
            f.rewards.redeem("s1", 9999).await.unwrap(),
            RedeemOutcome::Unable(RedeemRefusal::RewardNotFound)
        ));

        let reward = reward_named(&f.pool, "5% Discount").await;
        assert!(matches!(
            f.rewards.redeem("nobody", i64::from(reward.id)).await.unwrap(),
            RedeemOutcome::Unable(RedeemRefusal::ProfileNotFound)
        ));

        f.rewards.set_active(i64::from(reward.id), false).await.unwrap();
        earn(&f.game, "s1", 500).await;
        assert!(matches!(
            f.rewards.redeem("s1", i64::from(reward.id)).await.unwrap(),
            RedeemOutcome::Unable(RedeemRefusal::Inactive)
        ));
        assert_eq!(f.rewards.list_available().await.unwrap().len(), 4);
        assert_eq!(f.rewards.list_all().await.unwrap().len(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_redeems_never_overspend() {
        let dir = tempfile::tempdir().unwrap();
        let f = fixture_on(shared_test_pool(dir.path(), 4).await);
        earn(&f.game, "s1", 2000).await;
        let reward_id = i64::from(reward_named(&f.pool, "5% Discount").await.id);

        let tasks: Vec<_> = (0..30)
            .map(|_| {
                let rewards = f.rewards.clone();
                tokio::spawn(async move { rewards.redeem("s1", reward_id).await })
            })
            .collect();
        let mut redeemed = 0;
        for task in tasks {
            match task.await.unwrap().unwrap() {
                RedeemOutcome::Redeemed(_) => redeemed += 1,
                RedeemOutcome::Unable(reason) => {
                    assert_eq!(reason, RedeemRefusal::InsufficientPoints)
                }
            }
        }

        assert_eq!(redeemed, 20);
        let profile = f.game.get_or_create_profile("s1").await.unwrap();
        assert_eq!(profile.total_points, 0);
        assert_eq!(f.rewards.list_user_rewards("s1").await.unwrap().len(), 20);
        assert_eq!(
            reward_named(&f.pool, "5% Discount").await.current_redemptions,
            20
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_redeems_across_sessions_keep_cap_and_balances() {
        let dir = tempfile::tempdir().unwrap();
        let f = fixture_on(shared_test_pool(dir.path(), 4).await);
        let capped_id = i64::from(reward_named(&f.pool, "20% Mega Discount").await.id);
        let sessions: Vec<String> = (0..15).map(|i| format!("player-{i}")).collect();
        for session in &sessions {
            earn(&f.game, session, 1000).await;
        }

        let tasks: Vec<_> = sessions
            .iter()
            .cloned()
            .map(|session| {
                let rewards = f.rewards.clone();
                tokio::spawn(async move { rewards.redeem(&session, capped_id).await })
            })
            .collect();
        // sqlite may refuse a conflicting writer outright; a refused attempt must leave no trace
        let mut redeemed = 0;
        for task in tasks {
            if let Ok(RedeemOutcome::Redeemed(_)) = task.await.unwrap() {
                redeemed += 1;
            }
        }
        assert!((1..=10).contains(&redeemed));

        let mut holders = 0;
        for session in &sessions {
            let held = f.rewards.list_user_rewards(session).await.unwrap().len() as i32;
            let points = f.game.get_or_create_profile(session).await.unwrap().total_points;
            assert!(held <= 1);
            assert_eq!(points, 1000 - 1000 * held);
            holders += held;
        }
        assert_eq!(holders, redeemed);
        assert_eq!(
            reward_named(&f.pool, "20% Mega Discount").await.current_redemptions,
            redeemed
        );
    }
}
