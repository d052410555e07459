use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

/// Authenticated caller, taken from the claims left by [`jwt_auth_middleware`](super::jwt_auth_middleware).
///
/// Only usable on routes behind that middleware; elsewhere it rejects with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}

impl TryFrom<&JwtClaims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Malformed subject claim".to_string()))?;

        Ok(Self {
            id,
            email: claims.email.clone(),
            role: claims.role,
        })
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        AuthUser::try_from(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "lee@example.com".to_string(),
            role: UserRole::User,
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_auth_user_from_claims() {
        let user = AuthUser::try_from(&claims("12")).unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.email, "lee@example.com");
        assert_eq!(user.role, UserRole::User);
    }

    #[test]
    fn test_auth_user_rejects_non_numeric_subject() {
        assert!(matches!(
            AuthUser::try_from(&claims("abc")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), "ADMIN");
        assert_eq!(UserRole::User.as_str(), "USER");
    }
}
