//! Datastore adapter.
//!
//! `Datastore` is the only seam between the handlers and the relational
//! store. The production implementation is [`postgres::PgStore`];
//! integration tests substitute an in-memory double through the same trait.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod models;
pub mod postgres;

pub use models::{Movie, MovieChanges, NewMovie, NewUser, User};
pub use postgres::PgStore;

/// Errors surfaced by datastore implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {0}")]
    Duplicate(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Record CRUD contract over the relational store.
///
/// Conditional operations (`update_movie`, `delete_movie`) match on id AND
/// owner and report how many rows they touched; a count of zero is how the
/// handlers learn that the record does not exist or belongs to someone else.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// All movies owned by `owner_id`, newest first.
    async fn list_movies(&self, owner_id: Uuid) -> Result<Vec<Movie>, StoreError>;

    /// Single movie matching both id and owner.
    async fn find_movie(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Movie>, StoreError>;

    /// Single movie by primary key, regardless of owner. Used to re-fetch
    /// after a conditional update has already proven ownership.
    async fn fetch_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError>;

    async fn create_movie(&self, movie: NewMovie) -> Result<Movie, StoreError>;

    /// Conditional update on id AND owner; returns the modified-row count.
    async fn update_movie(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: MovieChanges,
    ) -> Result<u64, StoreError>;

    /// Conditional delete on id AND owner; returns the deleted-row count.
    async fn delete_movie(&self, id: Uuid, owner_id: Uuid) -> Result<u64, StoreError>;

    /// Total movie count across all users (public diagnostic endpoint).
    async fn count_movies(&self) -> Result<i64, StoreError>;

    /// Persist a new user; a taken email yields `StoreError::Duplicate`.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
