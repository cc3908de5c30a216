//! Recipe models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub user_id: i64,
    pub created_at: String,
}

/// A recipe row joined with its owner, as produced by the list query.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeWithOwner {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub user_id: i64,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// Public projection of a recipe with its owning user embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub user: UserResponse,
}

impl From<RecipeWithOwner> for RecipeResponse {
    fn from(row: RecipeWithOwner) -> Self {
        Self {
            id: row.id,
            title: row.title,
            instructions: row.instructions,
            minutes_to_complete: row.minutes_to_complete,
            user: UserResponse {
                id: row.user_id,
                username: row.username,
                image_url: row.image_url,
                bio: row.bio,
            },
        }
    }
}

impl RecipeResponse {
    pub fn from_parts(recipe: Recipe, user: UserResponse) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            instructions: recipe.instructions,
            minutes_to_complete: recipe.minutes_to_complete,
            user,
        }
    }
}

/// Request body for creating a recipe. A client-supplied `user_id` is not
/// part of the schema; ownership always comes from the session.
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<i64>,
}
