//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use super::types::{RequestContext, RequestId};

/// Header carrying the requesting practitioner's ID, set by the upstream gateway.
pub const REQUESTER_HEADER: &str = "x-user-id";

fn header_uuid(headers: &HeaderMap, name: &str) -> Option<Uuid> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    header_uuid(headers, "x-request-id")
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_requester(headers: &HeaderMap) -> Option<Uuid> {
    header_uuid(headers, REQUESTER_HEADER)
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            requester: extract_requester(&parts.headers),
            request_id: extract_request_id(&parts.headers),
        })
    }
}
