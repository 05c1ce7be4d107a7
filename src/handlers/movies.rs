//! Movie CRUD handlers.
//!
//! Every datastore query issued here is scoped by the authenticated user's
//! id, taken from the [`AuthUser`] extension the auth middleware injects.
//! The owner id is never read from client input.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::{Movie, MovieChanges, NewMovie};

const MOVIE_NOT_FOUND: &str = "Película no encontrada";

/// Request body for creating or replacing a movie. All fields optional at
/// the serde level so validation can report every missing field at once.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
}

/// Validated movie payload
#[derive(Debug)]
struct ValidMovie {
    title: String,
    director: String,
    year: i32,
    poster_url: Option<String>,
}

impl MovieInput {
    /// Check required fields, collecting one message per offending field.
    fn validate(self) -> Result<ValidMovie, ApiError> {
        let mut field_errors = HashMap::new();

        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Some(t.to_string()),
            _ => {
                field_errors.insert("title".to_string(), "El título es obligatorio".to_string());
                None
            }
        };
        let director = match self.director.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => Some(d.to_string()),
            _ => {
                field_errors.insert("director".to_string(), "El director es obligatorio".to_string());
                None
            }
        };
        let year = match self.year {
            Some(y) => Some(y),
            None => {
                field_errors.insert("year".to_string(), "El año es obligatorio".to_string());
                None
            }
        };

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error(
                "Título, director y año son obligatorios",
                field_errors,
            ));
        }

        Ok(ValidMovie {
            title: title.unwrap(),
            director: director.unwrap(),
            year: year.unwrap(),
            poster_url: self.poster_url,
        })
    }
}

/// Path ids are opaque to clients; anything that is not a stored id is a
/// plain miss, so a malformed UUID maps to 404 rather than 400.
fn parse_movie_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(MOVIE_NOT_FOUND))
}

/// GET /api/movies - All movies owned by the caller, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.store.list_movies(user.user_id).await?;
    Ok(Json(movies))
}

/// GET /api/movies/:id - One movie, only if the caller owns it
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_movie_id(&id)?;

    match state.store.find_movie(id, user.user_id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(ApiError::not_found(MOVIE_NOT_FOUND)),
    }
}

/// POST /api/movies - Create a movie owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<MovieInput>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let input = payload.validate()?;

    // ownerId always comes from the credential, whatever the payload said
    let created = state
        .store
        .create_movie(NewMovie {
            title: input.title,
            director: input.director,
            year: input.year,
            poster_url: input.poster_url,
            owner_id: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/movies/:id - Replace a movie, only if the caller owns it
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<MovieInput>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_movie_id(&id)?;
    let input = payload.validate()?;

    let count = state
        .store
        .update_movie(
            id,
            user.user_id,
            MovieChanges {
                title: input.title,
                director: input.director,
                year: input.year,
                poster_url: input.poster_url,
            },
        )
        .await?;

    if count == 0 {
        return Err(ApiError::not_found(MOVIE_NOT_FOUND));
    }

    // The conditional update proved ownership; re-fetch by id for the body
    match state.store.fetch_movie(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(ApiError::not_found(MOVIE_NOT_FOUND)),
    }
}

/// DELETE /api/movies/:id - Delete a movie, only if the caller owns it
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_movie_id(&id)?;

    let count = state.store.delete_movie(id, user.user_id).await?;
    if count == 0 {
        return Err(ApiError::not_found(MOVIE_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: Option<&str>, director: Option<&str>, year: Option<i32>) -> MovieInput {
        MovieInput {
            title: title.map(String::from),
            director: director.map(String::from),
            year,
            poster_url: None,
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let valid = input(Some("Dunkirk"), Some("Christopher Nolan"), Some(2017))
            .validate()
            .unwrap();
        assert_eq!(valid.title, "Dunkirk");
        assert_eq!(valid.year, 2017);
        assert!(valid.poster_url.is_none());
    }

    #[test]
    fn reports_every_missing_field() {
        let err = input(None, None, None).validate().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors, .. } => {
                assert_eq!(field_errors.len(), 3);
                assert!(field_errors.contains_key("title"));
                assert!(field_errors.contains_key("director"));
                assert!(field_errors.contains_key("year"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn blank_title_is_missing() {
        let err = input(Some("   "), Some("Alguien"), Some(2000)).validate().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors, .. } => {
                assert_eq!(field_errors.len(), 1);
                assert!(field_errors.contains_key("title"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_id_is_a_not_found() {
        let err = parse_movie_id("no-existe").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
