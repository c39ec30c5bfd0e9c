use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use kernel::prelude::entity::{Caller, UserId, UserRole};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Caller identity forwarded by the identity provider in front of this service.
#[derive(Debug, Clone)]
pub struct Identity(pub Caller);

#[derive(Debug, PartialEq, Eq)]
pub struct MissingIdentity(&'static str);

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": self.0 }))).into_response()
    }
}

impl Identity {
    fn from_headers(headers: &HeaderMap) -> Result<Self, MissingIdentity> {
        let id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or(MissingIdentity("Missing or malformed X-User-Id"))?;
        let role = headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().to_uppercase().parse::<UserRole>().ok())
            .ok_or(MissingIdentity("Missing or malformed X-User-Role"))?;
        Ok(Self(Caller::new(UserId::new(id), role)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let identity = Self::from_headers(&parts.headers);
        if let Err(rejection) = &identity {
            tracing::debug!(reason = rejection.0, "Rejected request without identity");
        }
        identity
    }
}
