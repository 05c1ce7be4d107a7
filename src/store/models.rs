use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A movie in a user's collection. Serialized camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub poster_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields persisted when creating a movie. The owner id is always the
/// authenticated caller, never client input.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub poster_url: Option<String>,
    pub owner_id: Uuid,
}

/// Full-replace update payload for a movie (PUT semantics: an absent
/// poster clears the column).
#[derive(Debug, Clone)]
pub struct MovieChanges {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_camel_case() {
        let movie = Movie {
            id: Uuid::new_v4(),
            title: "Inception".to_string(),
            director: "Christopher Nolan".to_string(),
            year: 2010,
            poster_url: None,
            owner_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let v = serde_json::to_value(&movie).unwrap();
        assert!(v.get("posterUrl").is_some());
        assert!(v.get("ownerId").is_some());
        assert!(v.get("createdAt").is_some());
        assert!(v.get("poster_url").is_none());
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };

        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(v["email"], "ana@example.com");
        assert!(v.get("passwordHash").is_none());
        assert!(v.get("password_hash").is_none());
    }
}
