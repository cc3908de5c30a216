use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::validation;
use crate::db::{CreateRecipeRequest, Recipe, RecipeResponse, RecipeWithOwner, UserResponse};
use crate::AppState;

/// List every recipe with its owner embedded (all users, not just the caller)
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let rows: Vec<RecipeWithOwner> = sqlx::query_as(
        r#"
        SELECT r.id, r.title, r.instructions, r.minutes_to_complete, r.user_id,
               u.username, u.image_url, u.bio
        FROM recipes r
        JOIN users u ON r.user_id = u.id
        ORDER BY r.id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

/// Create a recipe owned by the session user
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let title = req.title.unwrap_or_default();
    let instructions = req.instructions.unwrap_or_default();

    validation::validate_title(&title).map_err(|e| {
        tracing::debug!("Rejected recipe: {}", e);
        ApiError::unprocessable()
    })?;
    validation::validate_instructions(&instructions).map_err(|e| {
        tracing::debug!("Rejected recipe: {}", e);
        ApiError::unprocessable()
    })?;

    let now = chrono::Utc::now().to_rfc3339();

    // Ownership comes from the session, never from the request body
    let result = sqlx::query(
        "INSERT INTO recipes (title, instructions, minutes_to_complete, user_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&title)
    .bind(&instructions)
    .bind(req.minutes_to_complete)
    .bind(user.id)
    .bind(&now)
    .execute(&state.db)
    .await?;

    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(&state.db)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::from_parts(recipe, UserResponse::from(user))),
    ))
}
