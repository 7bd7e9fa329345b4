//! Caller identity extraction.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use precis_core::defaults;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Identity used to key the per-client usage table.
///
/// The raw `x-forwarded-for` value is taken as-is (no splitting on commas),
/// then the peer IP, then `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Resolve the caller identity from request headers and the peer address.
pub fn client_id_from(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClientId {
    // Opaque (non-ASCII) bytes are kept rather than skipped.
    let forwarded = headers
        .get(FORWARDED_FOR)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|v| !v.is_empty());

    if let Some(value) = forwarded {
        return ClientId(value);
    }
    match peer {
        Some(addr) => ClientId(addr.ip().to_string()),
        None => ClientId(defaults::UNKNOWN_CLIENT.to_string()),
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(client_id_from(&parts.headers, peer))
    }
}
