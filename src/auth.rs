//! # Identity Context
//!
//! Derives the caller's tenant and user from the `x-tenant-id` and
//! `x-user-id` headers set by the upstream gateway. Values are opaque tokens
//! from a trusted boundary: they are passed through verbatim and never
//! parsed. Handlers receive the result as an explicit value and decide which
//! fields their operation requires.

use std::convert::Infallible;
use std::fmt;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, request::Parts},
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::{ApiError, unauthorized};

pub const TENANT_HEADER: HeaderName = HeaderName::from_static("x-tenant-id");
pub const USER_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Tenant ID wrapper for type safety
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TenantId(pub String);

/// User ID wrapper for type safety
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity derived from request metadata; `None` marks a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    pub tenant_id: Option<TenantId>,
    pub user_id: Option<UserId>,
}

impl IdentityContext {
    /// Reads both identity headers. Absent, empty and non-UTF-8 values are
    /// all treated as missing.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            tenant_id: header_value(headers, &TENANT_HEADER).map(TenantId),
            user_id: header_value(headers, &USER_HEADER).map(UserId),
        }
    }

    /// Tenant scope, required by every notification operation.
    pub fn require_tenant(&self) -> Result<TenantId, ApiError> {
        self.tenant_id.clone().ok_or_else(unauthorized_identity)
    }

    /// Tenant and recipient scope, required by list, mark-read and unread-count.
    pub fn require_recipient(&self) -> Result<(TenantId, UserId), ApiError> {
        match (&self.tenant_id, &self.user_id) {
            (Some(tenant), Some(user)) => Ok((tenant.clone(), user.clone())),
            _ => Err(unauthorized_identity()),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

// Missing and mismatched identity are reported identically.
fn unauthorized_identity() -> ApiError {
    unauthorized(Some("Unauthorized"))
}

impl<S> FromRequestParts<S> for IdentityContext
where
    S: Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// OpenAPI header parameters for the identity context
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct IdentityHeaders {
    /// Tenant identifier that scopes the request
    #[serde(rename = "x-tenant-id")]
    #[param(rename = "x-tenant-id", value_type = String)]
    pub tenant_id: String,
    /// User identifier of the caller; required for recipient-scoped operations
    #[serde(rename = "x-user-id")]
    #[param(rename = "x-user-id", value_type = Option<String>)]
    pub user_id: Option<String>,
}
