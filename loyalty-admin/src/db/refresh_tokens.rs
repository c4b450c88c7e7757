//! Refresh token storage

use shared::util::now_millis;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::auth::session::SubjectKind;

const REFRESH_TOKEN_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000; // 30 days

/// Issue a new opaque refresh token for a subject
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    kind: SubjectKind,
    subject_id: i64,
) -> Result<String, sqlx::Error> {
    let token_id = uuid::Uuid::new_v4().to_string();
    let expires_at = now_millis() + REFRESH_TOKEN_TTL_MS;

    sqlx::query(
        "INSERT INTO refresh_tokens (id, subject_kind, subject_id, expires_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(&token_id)
    .bind(kind.as_str())
    .bind(subject_id)
    .bind(expires_at)
    .execute(executor)
    .await?;

    Ok(token_id)
}

/// Validate and rotate a refresh token. Returns the subject and the new token.
///
/// Revocation and reissue commit together; if either fails the old token
/// stays valid.
pub async fn rotate(
    pool: &PgPool,
    refresh_token: &str,
) -> Result<Option<(SubjectKind, i64, String)>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let rotated = rotate_in(&mut *tx, refresh_token).await?;
    if rotated.is_some() {
        tx.commit().await?;
    }
    Ok(rotated)
}

async fn rotate_in(
    conn: &mut PgConnection,
    refresh_token: &str,
) -> Result<Option<(SubjectKind, i64, String)>, sqlx::Error> {
    // Row lock from the UPDATE: a token can be rotated at most once
    let row: Option<RefreshTokenRow> = sqlx::query_as(
        "UPDATE refresh_tokens SET revoked = TRUE
         WHERE id = $1 AND NOT revoked AND expires_at >= $2
         RETURNING subject_kind, subject_id",
    )
    .bind(refresh_token)
    .bind(now_millis())
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let Some(kind) = SubjectKind::from_db(&row.subject_kind) else {
        return Ok(None);
    };

    let new_token = create(&mut *conn, kind, row.subject_id).await?;
    Ok(Some((kind, row.subject_id, new_token)))
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    subject_kind: String,
    subject_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_rotation_rolled_back_keeps_old_token() {
        let pool = pool().await;
        let old = create(&pool, SubjectKind::Admin, 1).await.unwrap();

        {
            let mut tx = pool.begin().await.unwrap();
            let rotated = rotate_in(&mut *tx, &old).await.unwrap();
            assert!(rotated.is_some());
            // dropped without commit
        }

        let (kind, subject_id, new_token) = rotate(&pool, &old).await.unwrap().unwrap();
        assert_eq!(kind, SubjectKind::Admin);
        assert_eq!(subject_id, 1);
        assert_ne!(new_token, old);

        assert!(rotate(&pool, &old).await.unwrap().is_none());
        assert!(rotate(&pool, &new_token).await.unwrap().is_some());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_token_is_not_rotated() {
        let pool = pool().await;
        assert!(rotate(&pool, "no-such-token").await.unwrap().is_none());
    }
}
