use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::error::{ServerError, ServerResult};

/// Header carrying the caller's user name, set by an upstream gateway.
pub const USER_HEADER: &str = "x-tessera-user";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn user(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    User(String),
    Anonymous,
}

impl Credentials {
    /// Extract credentials from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self::User(v.to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

/// Resolves request credentials to the identity that authors versions.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
}

/// Trusts the user header set by the fronting gateway. Requests without it
/// are rejected.
pub struct TrustedHeaderAuth;

#[async_trait]
impl AuthProvider for TrustedHeaderAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::User(name) => Ok(Identity::user(name.clone())),
            Credentials::Anonymous => Err(ServerError::Unauthenticated(format!(
                "missing {USER_HEADER} header"
            ))),
        }
    }
}
