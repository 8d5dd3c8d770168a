use sea_orm_migration::prelude::*;

/// Per-session game profile (created lazily on first access)
#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    Id,
    SessionId,
    Username,
    TotalPoints,
    Level,
    GamesPlayed,
    HighScore,
    LastPlayedAt,
    CreatedAt,
}

/// Append-only score log
#[derive(DeriveIden)]
enum GameScores {
    Table,
    Id,
    SessionId,
    GameType,
    Score,
    PointsEarned,
    Duration,
    PlayedAt,
}

/// Reward catalogue
#[derive(DeriveIden)]
enum GameRewards {
    Table,
    Id,
    Name,
    Description,
    PointsCost,
    RewardType,
    RewardValue,
    IsActive,
    MaxRedemptions,
    CurrentRedemptions,
    CreatedAt,
}

/// Redemptions
#[derive(DeriveIden)]
enum UserRewards {
    Table,
    Id,
    SessionId,
    RewardId,
    RedeemedAt,
    IsUsed,
    UsedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// name, description, points cost, type, value, max redemptions
const SEED_REWARDS: &[(&str, &str, i32, &str, &str, Option<i32>)] = &[
    ("5% Discount", "Get 5% off your next purchase", 100, "discount", "5", None),
    ("10% Discount", "Get 10% off your next purchase", 250, "discount", "10", None),
    (
        "Free Shipping",
        "Free shipping on your next order",
        150,
        "discount",
        "free_shipping",
        None,
    ),
    (
        "Kawaii Champion Badge",
        "Exclusive kawaii champion badge for your profile",
        500,
        "badge",
        "kawaii_champion",
        None,
    ),
    (
        "20% Mega Discount",
        "Massive 20% discount for dedicated players",
        1000,
        "discount",
        "20",
        Some(10),
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::SessionId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserProfiles::Username).string_len(50).null())
                    .col(
                        ColumnDef::new(UserProfiles::TotalPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::Level)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::GamesPlayed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::HighScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::LastPlayedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_profiles_session_unique")
                    .table(UserProfiles::Table)
                    .col(UserProfiles::SessionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameScores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameScores::SessionId).string_len(255).not_null())
                    .col(ColumnDef::new(GameScores::GameType).string_len(50).not_null())
                    .col(ColumnDef::new(GameScores::Score).integer().not_null())
                    .col(ColumnDef::new(GameScores::PointsEarned).integer().not_null())
                    .col(ColumnDef::new(GameScores::Duration).integer().null())
                    .col(
                        ColumnDef::new(GameScores::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // leaderboard lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_scores_type_score")
                    .table(GameScores::Table)
                    .col(GameScores::GameType)
                    .col(GameScores::Score)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_scores_session")
                    .table(GameScores::Table)
                    .col(GameScores::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameRewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRewards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameRewards::Name).string_len(100).not_null())
                    .col(ColumnDef::new(GameRewards::Description).text().null())
                    .col(ColumnDef::new(GameRewards::PointsCost).integer().not_null())
                    .col(ColumnDef::new(GameRewards::RewardType).string_len(50).not_null())
                    .col(ColumnDef::new(GameRewards::RewardValue).string_len(255).null())
                    .col(
                        ColumnDef::new(GameRewards::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(GameRewards::MaxRedemptions).integer().null())
                    .col(
                        ColumnDef::new(GameRewards::CurrentRedemptions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameRewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRewards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserRewards::SessionId).string_len(255).not_null())
                    .col(ColumnDef::new(UserRewards::RewardId).integer().not_null())
                    .col(
                        ColumnDef::new(UserRewards::RedeemedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserRewards::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserRewards::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_rewards_reward")
                            .from(UserRewards::Table, UserRewards::RewardId)
                            .to(GameRewards::Table, GameRewards::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_rewards_session")
                    .table(UserRewards::Table)
                    .col(UserRewards::SessionId)
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(GameRewards::Table).columns([
            GameRewards::Name,
            GameRewards::Description,
            GameRewards::PointsCost,
            GameRewards::RewardType,
            GameRewards::RewardValue,
            GameRewards::MaxRedemptions,
        ]);
        for (name, description, cost, reward_type, value, max) in SEED_REWARDS {
            insert
                .values([
                    (*name).into(),
                    (*description).into(),
                    (*cost).into(),
                    (*reward_type).into(),
                    (*value).into(),
                    (*max).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("invalid reward seed row: {e}")))?;
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // dependents first
        manager
            .drop_table(Table::drop().if_exists().table(UserRewards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(GameRewards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(GameScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(UserProfiles::Table).to_owned())
            .await?;
        Ok(())
    }
}
