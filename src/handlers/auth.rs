//! Registration and login: the only places that issue credentials.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::{self, password, Claims};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{NewUser, StoreError, User};

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct CredentialsInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl CredentialsInput {
    fn validate(self) -> Result<(String, String), ApiError> {
        let mut field_errors = HashMap::new();

        let email = match self.email.as_deref().map(str::trim) {
            Some(e) if e.contains('@') => Some(e.to_lowercase()),
            Some(_) => {
                field_errors.insert("email".to_string(), "El email no es válido".to_string());
                None
            }
            None => {
                field_errors.insert("email".to_string(), "El email es obligatorio".to_string());
                None
            }
        };
        let password = match self.password {
            Some(p) if p.len() >= MIN_PASSWORD_LEN => Some(p),
            Some(_) => {
                field_errors.insert(
                    "password".to_string(),
                    format!("La contraseña debe tener al menos {} caracteres", MIN_PASSWORD_LEN),
                );
                None
            }
            None => {
                field_errors.insert("password".to_string(), "La contraseña es obligatoria".to_string());
                None
            }
        };

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error(
                "Email y contraseña son obligatorios",
                field_errors,
            ));
        }

        Ok((email.unwrap(), password.unwrap()))
    }
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let claims = Claims::new(
        user.id,
        user.email.clone(),
        state.config.security.jwt_expiry_hours,
    );

    auth::generate_jwt(claims, &state.config.security.jwt_secret).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Error interno del servidor")
    })
}

/// POST /api/auth/register - Create an account and issue a credential
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsInput>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (email, raw_password) = payload.validate()?;

    let password_hash = password::hash_password(&raw_password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Error interno del servidor")
    })?;

    let user = match state.store.create_user(NewUser { email, password_hash }).await {
        Ok(user) => user,
        Err(StoreError::Duplicate(_)) => {
            return Err(ApiError::conflict("El email ya está registrado"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

/// POST /api/auth/login - Verify credentials and issue a token
///
/// Unknown email and wrong password produce the same 401 so the endpoint
/// does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsInput>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, raw_password) = payload.validate()?;

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let verified = password::verify_password(&raw_password, &user.password_hash).map_err(|e| {
        tracing::error!("stored hash for {} is unreadable: {}", user.id, e);
        ApiError::internal_server_error("Error interno del servidor")
    })?;

    if !verified {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(&state, &user)?;

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
    }))
}
