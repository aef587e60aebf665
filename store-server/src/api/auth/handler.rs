//! Authentication Handlers
//!
//! Handles registration, login, logout and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{self, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::AppError;
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::User;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
        is_active: user.is_active,
        created_at: user.created_at,
    }
}

/// POST /api/auth/register - 注册新账号
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::validation("a valid email is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }

    let password_hash = auth::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let created = user::create(&state.pool, req.name.trim(), req.email.trim(), &password_hash)
        .await?;

    let token = state
        .get_jwt_service()
        .generate_token(&created)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %created.id, email = %created.email, "Account registered");

    Ok(Json(LoginResponse {
        token,
        user: user_info(&created),
    }))
}

/// POST /api/auth/login - 登录
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = user::find_by_email(&state.pool, req.email.trim()).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent
    // email enumeration
    let account = match account {
        Some(u) => {
            // User found - check active status
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            // Verify password
            let password_valid = auth::verify_password(&req.password, &u.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    user::touch_last_login(&state.pool, account.id).await?;

    // Generate JWT token
    let token = state
        .get_jwt_service()
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %account.id,
        email = %account.email,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user_info(&account),
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    // Query fresh user data so a disabled account is reflected immediately
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?;

    Ok(Json(user_info(&account)))
}

/// POST /api/auth/logout - 登出
///
/// Token invalidation is client-side (drop the token); this endpoint
/// exists for the audit trail.
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<()>, AppError> {
    tracing::info!(
        user_id = %current_user.id,
        email = %current_user.email,
        "User logged out"
    );

    Ok(Json(()))
}
