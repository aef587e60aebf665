//! User Repository

use super::{RepoError, RepoResult};
use shared::models::User;
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT id, name, email, password_hash, is_admin, is_active, last_login_at, created_at FROM users";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{} WHERE id = ?", USER_SELECT);
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{} WHERE email = ?", USER_SELECT);
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<User> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Account '{}' already exists",
            email
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, is_admin, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 0, 1, ?5)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Partial profile update (COALESCE keeps unset fields)
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    name: Option<String>,
    password_hash: Option<String>,
) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE users SET name = COALESCE(?1, name), password_hash = COALESCE(?2, password_hash) WHERE id = ?3 AND is_active = 1",
    )
    .bind(name)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE users SET last_login_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Startup admin bootstrap: create (or promote) the configured admin
/// account if no admin exists yet. Idempotent across restarts.
pub async fn ensure_admin(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> RepoResult<Option<User>> {
    let existing_admin: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM users WHERE is_admin = 1 LIMIT 1")
            .fetch_optional(pool)
            .await?;
    if existing_admin.is_some() {
        return Ok(None);
    }

    if let Some(user) = find_by_email(pool, email).await? {
        sqlx::query("UPDATE users SET is_admin = 1 WHERE id = ?")
            .bind(user.id)
            .execute(pool)
            .await?;
        tracing::info!(email = %email, "Promoted existing account to admin");
        return Ok(find_by_id(pool, user.id).await?);
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, is_admin, is_active, created_at) VALUES (?1, 'Administrator', ?2, ?3, 1, 1, ?4)",
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await?;
    tracing::info!(email = %email, "Bootstrapped admin account");

    Ok(find_by_id(pool, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn create_and_find_by_email() {
        let db = DbService::open_in_memory().await.unwrap();
        let user = create(&db.pool, "Asha", "asha@example.com", "hash")
            .await
            .unwrap();
        assert!(!user.is_admin);
        assert!(user.is_active);

        let found = find_by_email(&db.pool, "asha@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        let err = create(&db.pool, "Asha 2", "asha@example.com", "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let db = DbService::open_in_memory().await.unwrap();

        let admin = ensure_admin(&db.pool, "admin@yala.test", "hash")
            .await
            .unwrap()
            .expect("first call creates the admin");
        assert!(admin.is_admin);

        // Second call is a no-op once an admin exists
        let again = ensure_admin(&db.pool, "other@yala.test", "hash")
            .await
            .unwrap();
        assert!(again.is_none());
        assert!(
            find_by_email(&db.pool, "other@yala.test")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn ensure_admin_promotes_existing_account() {
        let db = DbService::open_in_memory().await.unwrap();
        let user = create(&db.pool, "Asha", "asha@example.com", "hash")
            .await
            .unwrap();

        let promoted = ensure_admin(&db.pool, "asha@example.com", "unused")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(promoted.id, user.id);
        assert!(promoted.is_admin);
        // Password is untouched on promotion
        assert_eq!(promoted.password_hash, "hash");
    }

    #[tokio::test]
    async fn update_profile_coalesces_unset_fields() {
        let db = DbService::open_in_memory().await.unwrap();
        let user = create(&db.pool, "Asha", "asha@example.com", "hash")
            .await
            .unwrap();

        let updated = update_profile(&db.pool, user.id, Some("Asha K".into()), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Asha K");
        assert_eq!(updated.password_hash, "hash");

        let err = update_profile(&db.pool, 999, None, None).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
