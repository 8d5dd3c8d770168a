use crate::config::AdminConfig;
use crate::entities::admin_user_entity as admin_users;
use crate::error::{AppError, AppResult};
use crate::models::{AdminAuthResponse, AdminLoginRequest, AdminUserResponse};
use crate::utils::{JwtService, hash_password, validate_password, verify_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 50;

#[derive(Clone)]
pub struct AdminAuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AdminAuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, req: AdminLoginRequest) -> AppResult<AdminAuthResponse> {
        let username = req.username.trim();
        let len = username.chars().count();
        if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
            return Err(AppError::ValidationError(format!(
                "username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters"
            )));
        }
        validate_password(&req.password)?;

        let invalid = || AppError::AuthError("Invalid credentials".to_string());
        let admin = admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(username))
            .filter(admin_users::Column::IsActive.eq(true))
            .one(&self.pool)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&req.password, &admin.password_hash)? {
            log::warn!("failed admin login for {username}");
            return Err(invalid());
        }

        let mut am = admin.into_active_model();
        am.last_login = Set(Some(Utc::now()));
        let admin = am.update(&self.pool).await?;

        log::info!("admin {} logged in", admin.username);
        self.issue_tokens(admin)
    }

    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AdminAuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let admin = self.find_active(claims.admin_id()?).await?;
        self.issue_tokens(admin)
    }

    pub async fn current_admin(&self, admin_id: i32) -> AppResult<AdminUserResponse> {
        Ok(self.find_active(admin_id).await?.into())
    }

    /// Create the configured bootstrap admin unless that username already exists.
    pub async fn ensure_default_admin(&self, config: &AdminConfig) -> AppResult<()> {
        let exists = admin_users::Entity::find()
            .filter(admin_users::Column::Username.eq(config.username.as_str()))
            .one(&self.pool)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        let email_taken = admin_users::Entity::find()
            .filter(admin_users::Column::Email.eq(config.email.as_str()))
            .one(&self.pool)
            .await?;
        if let Some(other) = email_taken {
            return Err(AppError::Conflict(format!(
                "email {} already belongs to admin {}",
                config.email, other.username
            )));
        }

        validate_password(&config.password)?;
        let now = Utc::now();
        admin_users::ActiveModel {
            username: Set(config.username.clone()),
            email: Set(config.email.clone()),
            password_hash: Set(hash_password(&config.password)?),
            role: Set("admin".to_string()),
            is_active: Set(true),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("created default admin account {}", config.username);
        Ok(())
    }

    /// A valid token for a disabled account is forbidden, not unauthenticated.
    async fn find_active(&self, admin_id: i32) -> AppResult<admin_users::Model> {
        let admin = admin_users::Entity::find_by_id(admin_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Admin account not available".to_string()))?;
        if !admin.is_active {
            log::warn!("disabled admin {} presented a valid token", admin.username);
            return Err(AppError::Forbidden);
        }
        Ok(admin)
    }

    fn issue_tokens(&self, admin: admin_users::Model) -> AppResult<AdminAuthResponse> {
        let access_token =
            self.jwt_service
                .generate_access_token(admin.id, &admin.username, &admin.role)?;
        let refresh_token =
            self.jwt_service
                .generate_refresh_token(admin.id, &admin.username, &admin.role)?;
        Ok(AdminAuthResponse {
            user: admin.into(),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
