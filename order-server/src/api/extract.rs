//! Credential extractor
//!
//! Callers identify their tenant with a `Token` header. A missing or
//! unreadable header yields an empty credential, which the engine rejects
//! before doing any work.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

pub const TOKEN_HEADER: &str = "Token";

/// Raw `Token` header value
#[derive(Debug, Clone, Default)]
pub struct Credential(pub String);

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        Ok(Credential(token))
    }
}
