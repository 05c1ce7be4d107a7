use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// JWT authentication middleware that validates bearer tokens and injects
/// the user context for downstream handlers. Requests without a valid
/// credential never reach a handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::verify_jwt(&token, &state.config.security.jwt_secret)
        .map_err(|e| {
            tracing::debug!("rejected credential: {}", e);
            ApiError::unauthorized("Token inválido o expirado")
        })?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Token de autenticación requerido".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Cabecera Authorization inválida".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Token de autenticación requerido".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("La cabecera Authorization debe usar el formato Bearer".to_string())
    }
}
