//! Bearer-token authorization.
//!
//! Requests carry `Authorization: Bearer <jwt>`, signed HS256 with
//! `SECRET_KEY`. A missing or invalid token makes the caller anonymous; it is
//! never an error on its own. Routes that mutate data extract [`AdminUser`].

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: i64,
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Claims from the request's bearer token, if it carries a valid one.
fn claims_from_parts(parts: &Parts, secret: &str) -> Option<Claims> {
    let token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))?;

    match decode_token(token.trim(), secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!("Ignoring invalid bearer token: {e}");
            None
        }
    }
}

/// Caller that presented a valid admin token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        match claims_from_parts(parts, &state.config.secret_key) {
            None => Err(AppError::Unauthorized),
            Some(claims) if claims.is_admin => Ok(AdminUser(claims)),
            Some(claims) => {
                debug!("Rejected non-admin user {}", claims.username);
                Err(AppError::Forbidden)
            }
        }
    }
}

/// Signs a token for tests; issuing tokens is not this service's job.
#[cfg(test)]
pub fn create_token(username: &str, is_admin: bool, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        username: username.to_string(),
        is_admin,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const SECRET: &str = "test-secret";

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/companies");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_round_trip_claims() {
        let token = create_token("admin", true, SECRET);
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin);
    }

    #[test]
    fn test_wrong_secret_is_anonymous() {
        let token = create_token("u1", false, "other-secret");
        let parts = parts_with(Some(format!("Bearer {token}").as_str()));
        assert!(claims_from_parts(&parts, SECRET).is_none());
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        assert!(claims_from_parts(&parts_with(None), SECRET).is_none());
    }

    #[test]
    fn test_non_bearer_scheme_is_anonymous() {
        let token = create_token("u1", false, SECRET);
        let parts = parts_with(Some(format!("Basic {token}").as_str()));
        assert!(claims_from_parts(&parts, SECRET).is_none());
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let claims = Claims {
            username: "u1".into(),
            is_admin: true,
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_valid_user_token() {
        let token = create_token("u1", false, SECRET);
        let parts = parts_with(Some(format!("Bearer {token}").as_str()));
        let claims = claims_from_parts(&parts, SECRET).unwrap();
        assert_eq!(claims.username, "u1");
        assert!(!claims.is_admin);
    }
}
