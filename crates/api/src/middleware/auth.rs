//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use brickfund_core::error::CoreError;
use brickfund_core::principal::Principal;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// The role claim is resolved into a typed [`Principal`] here, once, so
/// handlers never re-derive role-dependent ids from strings:
///
/// ```ignore
/// async fn my_handler(AuthPrincipal(principal): AuthPrincipal) -> AppResult<Json<()>> {
///     let investor_id = principal
///         .investor_id()
///         .ok_or(CoreError::Forbidden("investors only".into()))?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let principal = Principal::from_role(&claims.role, claims.sub).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Unknown role: {}",
                claims.role
            )))
        })?;

        Ok(AuthPrincipal(principal))
    }
}
