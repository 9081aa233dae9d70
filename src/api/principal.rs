//! The authenticated caller of a request.
//!
//! Credentials are verified upstream; the auth collaborator forwards the
//! outcome as `x-principal-id` and `x-principal-role` headers. The
//! [`Principal`] extractor reads them once per request and handlers receive
//! it as an ordinary argument.

use std::fmt;
use std::str::FromStr;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use serde::{Deserialize, Serialize};

use super::response::ApiErrorResponse;

/// Header carrying the principal identifier.
pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";

/// Header carrying the principal role.
pub const PRINCIPAL_ROLE_HEADER: &str = "x-principal-role";

const MAX_ID_LEN: usize = 128;

/// What a principal may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access.
    Admin,
    /// Reads and ledger writes.
    Accountant,
    /// Reads only.
    Viewer,
}

impl Role {
    /// Returns true if the role may change the ledger.
    pub fn can_write(self) -> bool {
        matches!(self, Role::Admin | Role::Accountant)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "accountant" => Ok(Role::Accountant),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Accountant => "accountant",
            Role::Viewer => "viewer",
        };
        f.write_str(name)
    }
}

/// The identity a request runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Identifier assigned by the auth collaborator.
    pub id: String,
    /// Granted role.
    pub role: Role,
}

impl Principal {
    /// Reads a principal from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiErrorResponse> {
        let id = header_value(headers, PRINCIPAL_ID_HEADER, MAX_ID_LEN).ok_or_else(|| {
            ApiErrorResponse::unauthenticated(format!("missing {} header", PRINCIPAL_ID_HEADER))
        })?;
        let role = header_value(headers, PRINCIPAL_ROLE_HEADER, 32)
            .ok_or_else(|| {
                ApiErrorResponse::unauthenticated(format!(
                    "missing {} header",
                    PRINCIPAL_ROLE_HEADER
                ))
            })?
            .parse::<Role>()
            .map_err(ApiErrorResponse::unauthenticated)?;

        Ok(Self { id, role })
    }

    /// Fails with 403 unless the principal may change the ledger.
    pub fn require_write(&self) -> Result<(), ApiErrorResponse> {
        if self.role.can_write() {
            Ok(())
        } else {
            Err(ApiErrorResponse::forbidden(format!(
                "role '{}' cannot modify the ledger",
                self.role
            )))
        }
    }
}

fn header_value(headers: &HeaderMap, key: &str, max_len: usize) -> Option<String> {
    let raw = headers.get(key)?.to_str().ok()?.trim();
    if raw.is_empty() || raw.len() > max_len {
        return None;
    }
    Some(raw.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Principal::from_headers(&parts.headers)
    }
}
