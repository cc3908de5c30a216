use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::error::ApiError;
use super::validation;
use crate::db::{DbPool, LoginRequest, Session, SignupRequest, User, UserResponse};
use crate::AppState;

/// Session token cookie name
pub const SESSION_COOKIE: &str = "recipebin_session";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random session token
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Hash a token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Create a session row for a user and return the opaque token that the
/// client holds in its cookie. Only the token's hash is stored.
async fn create_session(state: &AppState, user_id: i64) -> Result<String, ApiError> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    let expires_at =
        (chrono::Utc::now() + chrono::Duration::days(state.config.auth.session_ttl_days))
            .to_rfc3339();
    let now = chrono::Utc::now().to_rfc3339();

    let session_id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&session_id)
    .bind(user_id)
    .bind(&token_hash)
    .bind(&expires_at)
    .bind(&now)
    .execute(&state.db)
    .await?;

    Ok(token)
}

/// Resolve a session token to its live user.
///
/// Expired tokens, unknown tokens, and sessions whose user no longer exists
/// all resolve to 401.
pub async fn session_user(pool: &DbPool, token: &str) -> Result<User, ApiError> {
    let token_hash = hash_token(token);

    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT u.* FROM users u
        JOIN sessions s ON s.user_id = u.id
        WHERE s.token_hash = ? AND s.expires_at > datetime('now')
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(pool)
    .await?;

    user.ok_or_else(ApiError::unauthorized)
}

/// The authenticated user resolved from the session cookie
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(ApiError::unauthorized)?;

        let user = session_user(&state.db, &token).await?;
        Ok(CurrentUser(user))
    }
}

/// Signup endpoint - create a user and establish a session
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<UserResponse>), ApiError> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    validation::validate_username(&username).map_err(|e| {
        tracing::debug!("Rejected signup: {}", e);
        ApiError::unprocessable()
    })?;
    validation::validate_password(&password).map_err(|e| {
        tracing::debug!("Rejected signup: {}", e);
        ApiError::unprocessable()
    })?;

    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal()
    })?;

    let now = chrono::Utc::now().to_rfc3339();

    // A duplicate username trips the UNIQUE constraint and maps to 422;
    // the single INSERT leaves nothing behind on failure.
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, image_url, bio, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&username)
    .bind(&password_hash)
    .bind(&req.image_url)
    .bind(&req.bio)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(&state.db)
        .await?;

    tracing::info!("Created user {}", user.username);

    let token = create_session(&state, user.id).await?;
    let jar = jar.add(session_cookie(token));

    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(user))))
}

/// Check session endpoint - return the session's user, if any
pub async fn check_session(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Login endpoint - credential check, establish a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(&req.username)
        .fetch_optional(&state.db)
        .await?;

    // Same 401 whether the user is unknown or the password is wrong
    let user = user.ok_or_else(ApiError::unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized());
    }

    let token = create_session(&state, user.id).await?;
    let jar = jar.add(session_cookie(token));

    Ok((jar, Json(UserResponse::from(user))))
}

/// Logout endpoint - tear down the session
///
/// Deleting the row server-side means a replayed cookie is dead, and a
/// second logout on the same cookie gets 401.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(ApiError::unauthorized)?;

    let token_hash = hash_token(&token);
    let session: Option<Session> = sqlx::query_as(
        "SELECT * FROM sessions WHERE token_hash = ? AND expires_at > datetime('now')",
    )
    .bind(&token_hash)
    .fetch_optional(&state.db)
    .await?;

    let session = session.ok_or_else(ApiError::unauthorized)?;

    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(&session.id)
        .execute(&state.db)
        .await?;

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    Ok((StatusCode::NO_CONTENT, jar))
}
