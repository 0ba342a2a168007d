//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use classroom_core::error::CoreError;
use classroom_core::roles::{is_known_role, ROLE_TEACHER};
use classroom_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The caller identified by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// One of the roles in `classroom_core::roles`.
    pub role: String,
}

impl AuthUser {
    pub fn is_teacher(&self) -> bool {
        self.role == ROLE_TEACHER
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Expected a Bearer token".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = state.config.jwt.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "Bearer token rejected");
            CoreError::Unauthorized("Invalid or expired token".into())
        })?;

        if !is_known_role(&claims.role) {
            return Err(CoreError::Unauthorized(format!("Unknown role '{}'", claims.role)).into());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
