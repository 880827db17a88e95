//! Client address and user agent, as seen through proxies.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use std::convert::Infallible;

use crate::domain::engagement::ClientMetadata;

/// Extractor for [`ClientMetadata`].
///
/// The address is the first `x-forwarded-for` entry, else `x-real-ip`,
/// else the loopback default.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientMetadata);

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = header_str(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| header_str(headers, "x-real-ip").map(str::trim).filter(|v| !v.is_empty()))
            .map(str::to_string);

        let user_agent = header_str(headers, header::USER_AGENT.as_str()).map(str::to_string);

        let mut client = ClientMetadata::default();
        if let Some(ip_address) = ip_address {
            client.ip_address = ip_address;
        }
        client.user_agent = user_agent;
        Self(client)
    }

    pub fn into_inner(self) -> ClientMetadata {
        self.0
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
