use super::dto::{AuthResponse, LoginRequest, RegisterRequest, TokenClaims, UserResponse};
use super::model::{User, UserRole};
use super::repository::AuthRepository;
use crate::common::response::ApiError;
use crate::common::security;
use crate::config::settings::{AdminSeed, AppConfig};
use crate::infrastructure::db::pool::DbPool;
use crate::state::AppState;
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation};
use tracing::info;

pub struct AuthService;

impl AuthService {
    pub async fn register(state: AppState, req: RegisterRequest) -> Result<AuthResponse, ApiError> {
        if AuthRepository::find_user_by_username(&state.db, &req.username)
            .await?
            .is_some()
        {
            return Err(ApiError::validation("Username already exists"));
        }

        if AuthRepository::find_user_by_email(&state.db, &req.email)
            .await?
            .is_some()
        {
            return Err(ApiError::validation("Email already exists"));
        }

        let password_hash = security::hash_password(&req.password)?;

        // Self-registration never grants anything above `user`
        let user = AuthRepository::create_user(
            &state.db,
            &req.username,
            &req.email,
            &password_hash,
            UserRole::User,
        )
        .await?;

        info!(user_id = user.id, username = %user.username, "User registered");

        let token = Self::create_access_token(&state.config, user.id)?;
        Ok(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.into(),
        })
    }

    pub async fn login(state: AppState, req: LoginRequest) -> Result<AuthResponse, ApiError> {
        let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

        let user = AuthRepository::find_user_by_username(&state.db, &req.username)
            .await?
            .ok_or_else(invalid)?;

        security::verify_password(&req.password, &user.password_hash).map_err(|_| invalid())?;

        info!(user_id = user.id, username = %user.username, "Login successful");

        let token = Self::create_access_token(&state.config, user.id)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: user.into(),
        })
    }

    pub async fn me(state: AppState, user_id: i64) -> Result<UserResponse, ApiError> {
        AuthRepository::find_user_by_id(&state.db, user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ApiError::not_found("User"))
    }

    /// Creates the configured admin account unless that username is taken.
    pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> Result<Option<User>> {
        if AuthRepository::find_user_by_username(pool, &seed.username)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let password_hash = security::hash_password(&seed.password)?;
        let user = AuthRepository::create_user(
            pool,
            &seed.username,
            &seed.email,
            &password_hash,
            UserRole::Admin,
        )
        .await?;

        info!(user_id = user.id, username = %user.username, "Seeded admin account");
        Ok(Some(user))
    }

    pub fn create_access_token(config: &AppConfig, user_id: i64) -> Result<String> {
        let now = get_current_timestamp() as usize;
        let ttl = config.jwt_ttl_hours.max(1) as usize * 60 * 60;

        let claims = TokenClaims {
            sub: user_id,
            exp: now + ttl,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| anyhow!("Failed to sign token: {}", e))
    }

    pub fn verify_access_token(config: &AppConfig, token: &str) -> Result<TokenClaims> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| anyhow!("Invalid token: {}", e))
    }
}
