#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use mivideoteca_api::auth::{self, password, Claims};
use mivideoteca_api::config::{
    AppConfig, DatabaseConfig, Environment, SecurityConfig, ServerConfig,
};
use mivideoteca_api::state::AppState;
use mivideoteca_api::store::{
    Datastore, Movie, MovieChanges, NewMovie, NewUser, StoreError, User,
};

pub const TEST_SECRET: &str = "test-secret";

/// In-memory datastore double, substituted through the `Datastore` seam
#[derive(Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    pub fn movie_count(&self) -> usize {
        self.movies.lock().unwrap().len()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn list_movies(&self, owner_id: Uuid) -> Result<Vec<Movie>, StoreError> {
        let mut movies: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.owner_id == owner_id)
            .cloned()
            .collect();
        movies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(movies)
    }

    async fn find_movie(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Movie>, StoreError> {
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id && m.owner_id == owner_id)
            .cloned())
    }

    async fn fetch_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        Ok(self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn create_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let now = Utc::now();
        let created = Movie {
            id: Uuid::new_v4(),
            title: movie.title,
            director: movie.director,
            year: movie.year,
            poster_url: movie.poster_url,
            owner_id: movie.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.movies.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_movie(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: MovieChanges,
    ) -> Result<u64, StoreError> {
        let mut movies = self.movies.lock().unwrap();
        match movies.iter_mut().find(|m| m.id == id && m.owner_id == owner_id) {
            Some(movie) => {
                movie.title = changes.title;
                movie.director = changes.director;
                movie.year = changes.year;
                movie.poster_url = changes.poster_url;
                movie.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_movie(&self, id: Uuid, owner_id: Uuid) -> Result<u64, StoreError> {
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| !(m.id == id && m.owner_id == owner_id));
        Ok((before - movies.len()) as u64)
    }

    async fn count_movies(&self) -> Result<i64, StoreError> {
        Ok(self.movies.lock().unwrap().len() as i64)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Test,
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 2,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_hours: 1,
        },
    }
}

/// Build the router over a fresh in-memory store; the store handle is
/// returned for direct seeding and inspection.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), test_config());
    (mivideoteca_api::app(state), store)
}

/// Mint a valid bearer token for an arbitrary user identity
pub fn token_for(user_id: Uuid, email: &str) -> String {
    let claims = Claims::new(user_id, email.to_string(), 1);
    auth::generate_jwt(claims, TEST_SECRET).expect("token generation")
}

/// Seed a user with a real Argon2id hash so login can verify it
pub async fn seed_user(store: &MemoryStore, email: &str, raw_password: &str) -> User {
    let password_hash = password::hash_password(raw_password).expect("hash");
    store
        .create_user(NewUser {
            email: email.to_string(),
            password_hash,
        })
        .await
        .expect("seed user")
}

pub async fn seed_movie(store: &MemoryStore, owner_id: Uuid, title: &str, year: i32) -> Movie {
    store
        .create_movie(NewMovie {
            title: title.to_string(),
            director: "Christopher Nolan".to_string(),
            year,
            poster_url: None,
            owner_id,
        })
        .await
        .expect("seed movie")
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Drive one request through the router and decode the JSON body (Null for
/// empty bodies such as 204 responses)
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
