//! Profile API Handlers

use axum::{Extension, Json, extract::State};

use crate::auth::{self, CurrentUser};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};
use shared::client::{ProfileUpdate, UserInfo};

/// GET /api/profile - 获取个人资料
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?;

    Ok(Json(UserInfo {
        id: account.id,
        name: account.name,
        email: account.email,
        is_admin: account.is_admin,
        is_active: account.is_active,
        created_at: account.created_at,
    }))
}

/// PUT /api/profile - 更新个人资料（姓名、密码）
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<UserInfo>> {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("name cannot be empty"));
    }

    let password_hash = match &payload.password {
        Some(password) => {
            if password.len() < 8 {
                return Err(AppError::validation(
                    "password must be at least 8 characters",
                ));
            }
            let hash = auth::hash_password(password)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
            Some(hash)
        }
        None => None,
    };

    let updated = user::update_profile(
        &state.pool,
        current_user.id,
        payload.name.map(|n| n.trim().to_string()),
        password_hash,
    )
    .await?;

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(UserInfo {
        id: updated.id,
        name: updated.name,
        email: updated.email,
        is_admin: updated.is_admin,
        is_active: updated.is_active,
        created_at: updated.created_at,
    }))
}
