use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;

use super::{Datastore, Movie, MovieChanges, NewMovie, NewUser, StoreError, User};

/// SQLx/PostgreSQL implementation of [`Datastore`]
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a pool using the configured URL and size.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.url.is_empty() {
            return Err(StoreError::Connection("DATABASE_URL not set".to_string()));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        info!("connected database pool (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Datastore for PgStore {
    async fn list_movies(&self, owner_id: Uuid) -> Result<Vec<Movie>, StoreError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn find_movie(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Movie>, StoreError> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn fetch_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        let movie = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let created = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (id, title, director, year, poster_url, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(movie.year)
        .bind(&movie.poster_url)
        .bind(movie.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_movie(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: MovieChanges,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE movies \
             SET title = $1, director = $2, year = $3, poster_url = $4, updated_at = now() \
             WHERE id = $5 AND owner_id = $6",
        )
        .bind(&changes.title)
        .bind(&changes.director)
        .bind(changes.year)
        .bind(&changes.poster_url)
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_movie(&self, id: Uuid, owner_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_movies(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match created {
            Ok(u) => Ok(u),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate("email".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
