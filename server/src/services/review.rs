//! Destination review storage — CRUD with owner checks.
//!
//! Reviews join their author's public fields (username, avatar) so list
//! endpoints can render attribution without a second query.

use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Review not found")]
    NotFound,
    #[error("Not authorized to modify this review")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ReviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub visit_date: Option<String>,
    pub photos: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub username: String,
    pub avatar: String,
}

/// Fields accepted when creating a review.
#[derive(Debug, serde::Deserialize)]
pub struct NewReview {
    pub destination: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub visit_date: Option<String>,
    pub photos: Option<Vec<String>>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ReviewUpdate {
    pub destination: Option<String>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub visit_date: Option<String>,
    pub photos: Option<Vec<String>>,
}

pub(crate) fn validate_rating(rating: i32) -> Result<(), ReviewError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::Validation(
            "Rating must be between 1 and 5".to_owned(),
        ))
    }
}

const SELECT: &str = r"SELECT r.id, r.user_id, r.destination, r.rating, r.title, r.comment,
           to_char(r.visit_date, 'YYYY-MM-DD')           AS visit_date,
           r.photos,
           to_char(r.created_at, 'YYYY-MM-DD HH24:MI')   AS created_at,
           to_char(r.updated_at, 'YYYY-MM-DD HH24:MI')   AS updated_at,
           u.username, u.avatar
      FROM reviews r
      JOIN users u ON u.id = r.user_id";

fn row_to_review(r: &sqlx::postgres::PgRow) -> ReviewRow {
    ReviewRow {
        id: r.get("id"),
        user_id: r.get("user_id"),
        destination: r.get("destination"),
        rating: r.get("rating"),
        title: r.get("title"),
        comment: r.get("comment"),
        visit_date: r.get("visit_date"),
        photos: r.get("photos"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        username: r.get("username"),
        avatar: r.get("avatar"),
    }
}

/// All reviews, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<ReviewRow>, ReviewError> {
    let rows = sqlx::query(&format!("{SELECT} ORDER BY r.created_at DESC"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_review).collect())
}

/// Reviews for one destination, newest first.
pub async fn list_by_destination(
    pool: &PgPool,
    destination: &str,
) -> Result<Vec<ReviewRow>, ReviewError> {
    let rows = sqlx::query(&format!(
        "{SELECT} WHERE r.destination = $1 ORDER BY r.created_at DESC"
    ))
    .bind(destination)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_review).collect())
}

/// Reviews written by one user, newest first.
pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ReviewRow>, ReviewError> {
    let rows = sqlx::query(&format!(
        "{SELECT} WHERE r.user_id = $1 ORDER BY r.created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_review).collect())
}

pub async fn get_by_id(pool: &PgPool, review_id: Uuid) -> Result<ReviewRow, ReviewError> {
    let row = sqlx::query(&format!("{SELECT} WHERE r.id = $1"))
        .bind(review_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ReviewError::NotFound)?;
    Ok(row_to_review(&row))
}

/// Create a review for the given author.
pub async fn create(pool: &PgPool, user_id: Uuid, review: &NewReview) -> Result<ReviewRow, ReviewError> {
    validate_rating(review.rating)?;

    let row = sqlx::query(
        r"INSERT INTO reviews (user_id, destination, rating, title, comment, visit_date, photos)
          VALUES ($1, $2, $3, $4, $5, COALESCE($6::date, CURRENT_DATE), COALESCE($7, '{}'))
          RETURNING id",
    )
    .bind(user_id)
    .bind(&review.destination)
    .bind(review.rating)
    .bind(&review.title)
    .bind(&review.comment)
    .bind(review.visit_date.as_deref())
    .bind(review.photos.as_deref())
    .fetch_one(pool)
    .await?;

    get_by_id(pool, row.get("id")).await
}

/// Update a review; only its author may do so.
pub async fn update(
    pool: &PgPool,
    review_id: Uuid,
    user_id: Uuid,
    update: &ReviewUpdate,
) -> Result<ReviewRow, ReviewError> {
    if let Some(rating) = update.rating {
        validate_rating(rating)?;
    }

    let owner: Uuid = sqlx::query_scalar("SELECT user_id FROM reviews WHERE id = $1")
        .bind(review_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ReviewError::NotFound)?;
    if owner != user_id {
        return Err(ReviewError::Forbidden);
    }

    sqlx::query(
        r"UPDATE reviews SET
              destination = COALESCE($2, destination),
              rating      = COALESCE($3, rating),
              title       = COALESCE($4, title),
              comment     = COALESCE($5, comment),
              visit_date  = COALESCE($6::date, visit_date),
              photos      = COALESCE($7, photos),
              updated_at  = now()
          WHERE id = $1",
    )
    .bind(review_id)
    .bind(update.destination.as_deref())
    .bind(update.rating)
    .bind(update.title.as_deref())
    .bind(update.comment.as_deref())
    .bind(update.visit_date.as_deref())
    .bind(update.photos.as_deref())
    .execute(pool)
    .await?;

    get_by_id(pool, review_id).await
}

/// Delete a review; only its author may do so.
pub async fn delete(pool: &PgPool, review_id: Uuid, user_id: Uuid) -> Result<(), ReviewError> {
    let owner: Uuid = sqlx::query_scalar("SELECT user_id FROM reviews WHERE id = $1")
        .bind(review_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ReviewError::NotFound)?;
    if owner != user_id {
        return Err(ReviewError::Forbidden);
    }

    sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(review_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "review_test.rs"]
mod tests;
