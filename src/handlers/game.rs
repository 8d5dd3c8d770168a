use crate::middlewares::SessionId;
use crate::models::*;
use crate::services::{GameService, RewardService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/game/profile",
    tag = "game",
    responses(
        (status = 200, description = "Profile for this session, created on first access", body = UserProfileResponse)
    )
)]
pub async fn get_profile(
    service: web::Data<GameService>,
    session: SessionId,
) -> Result<HttpResponse> {
    match service.get_or_create_profile(session.as_str()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": profile }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/game/profile",
    tag = "game",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfileResponse),
        (status = 400, description = "Username too long", body = ApiError),
        (status = 404, description = "No profile yet", body = ApiError)
    )
)]
pub async fn update_profile(
    service: web::Data<GameService>,
    session: SessionId,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    match service
        .update_profile(session.as_str(), payload.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": profile }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/game/score",
    tag = "game",
    request_body = SubmitScoreRequest,
    responses(
        (status = 201, description = "Score stored and profile credited", body = ScoreSubmissionResponse),
        (status = 400, description = "Invalid or implausible submission", body = ApiError)
    )
)]
pub async fn submit_score(
    service: web::Data<GameService>,
    session: SessionId,
    payload: web::Json<SubmitScoreRequest>,
) -> Result<HttpResponse> {
    match service
        .record_score(session.as_str(), payload.into_inner())
        .await
    {
        Ok(result) => Ok(HttpResponse::Created().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/game/scores",
    tag = "game",
    params(
        ("gameType" = Option<String>, Query, description = "Restrict to one game")
    ),
    responses(
        (status = 200, description = "This session's ten best scores", body = [GameScoreResponse])
    )
)]
pub async fn get_user_scores(
    service: web::Data<GameService>,
    session: SessionId,
    query: web::Query<ScoresQuery>,
) -> Result<HttpResponse> {
    match service
        .user_high_scores(session.as_str(), query.game_type.as_deref())
        .await
    {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/game/leaderboard/{gameType}",
    tag = "game",
    params(
        ("gameType" = String, Path, description = "Game identifier, 1-50 characters"),
        ("limit" = Option<i64>, Query, description = "1-100, default 10")
    ),
    responses(
        (status = 200, description = "Top scores: score desc, then earliest", body = [GameScoreResponse]),
        (status = 400, description = "Invalid game type or limit", body = ApiError)
    )
)]
pub async fn get_leaderboard(
    service: web::Data<GameService>,
    path: web::Path<String>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse> {
    match service.leaderboard(&path.into_inner(), query.limit).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/game/rewards",
    tag = "rewards",
    responses(
        (status = 200, description = "Redeemable rewards, cheapest first", body = [GameRewardResponse])
    )
)]
pub async fn get_rewards(service: web::Data<RewardService>) -> Result<HttpResponse> {
    match service.list_available().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/game/rewards/{id}/redeem",
    tag = "rewards",
    params(
        ("id" = i64, Path, description = "Reward id")
    ),
    responses(
        (status = 201, description = "Redeemed", body = UserRewardResponse),
        (status = 400, description = "UNABLE_TO_REDEEM with the reason", body = ApiError)
    )
)]
/// Spend points on a reward. Refusals (unknown reward, no profile, inactive,
/// sold out, not enough points) leave every balance untouched.
pub async fn redeem_reward(
    service: web::Data<RewardService>,
    session: SessionId,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.redeem(session.as_str(), path.into_inner()).await {
        Ok(RedeemOutcome::Redeemed(entry)) => {
            Ok(HttpResponse::Created().json(json!({ "success": true, "data": entry })))
        }
        Ok(RedeemOutcome::Unable(reason)) => Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": {
                "code": "UNABLE_TO_REDEEM",
                "message": reason.message(),
                "reason": reason
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/game/user-rewards",
    tag = "rewards",
    responses(
        (status = 200, description = "This session's redemptions, newest first", body = [UserRewardResponse])
    )
)]
pub async fn get_user_rewards(
    service: web::Data<RewardService>,
    session: SessionId,
) -> Result<HttpResponse> {
    match service.list_user_rewards(session.as_str()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn game_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/game")
            .route("/profile", web::get().to(get_profile))
            .route("/profile", web::patch().to(update_profile))
            .route("/score", web::post().to(submit_score))
            .route("/scores", web::get().to(get_user_scores))
            .route("/leaderboard/{game_type}", web::get().to(get_leaderboard))
            .route("/rewards", web::get().to(get_rewards))
            .route("/rewards/{id}/redeem", web::post().to(redeem_reward))
            .route("/user-rewards", web::get().to(get_user_rewards)),
    );
}
