//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the request's correlation id
//! - [`ClientIp`]: best-effort client address for logs
//!
//! # Examples
//!
//! ```ignore
//! use supperclub_web::extractors::{ClientIp, CorrelationId};
//!
//! async fn handler(correlation_id: CorrelationId, client_ip: ClientIp) -> &'static str {
//!     tracing::info!(correlation_id = %correlation_id, client_ip = %client_ip.0, "Handling request");
//!     "ok"
//! }
//! ```

use crate::middleware::correlation_id_from_headers;
use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Correlation ID for request tracing.
///
/// Taken from the request extensions when the correlation middleware ran,
/// otherwise read from the `X-Correlation-ID` header or generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Self>()
            .cloned()
            .unwrap_or_else(|| correlation_id_from_headers(&parts.headers)))
    }
}

/// Client IP address.
///
/// # Priority
///
/// 1. `X-Forwarded-For` (first IP in the list)
/// 2. `X-Real-IP`
/// 3. Connection IP, when the server was started with connect info
/// 4. `127.0.0.1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let connect_info = parts.extensions.get::<ConnectInfo<SocketAddr>>();
        Ok(Self(extract_client_ip(&parts.headers, connect_info)))
    }
}

fn extract_client_ip(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> IpAddr {
    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    let real_ip = || {
        headers
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    forwarded
        .or_else(real_ip)
        .or_else(|| connect_info.map(|info| info.0.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract<T: FromRequestParts<(), Rejection = std::convert::Infallible>>(
        req: Request<()>,
    ) -> T {
        let (mut parts, ()) = req.into_parts();
        match T::from_request_parts(&mut parts, &()).await {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let req = Request::builder()
            .header("X-Correlation-ID", "abc-123")
            .body(())
            .expect("Valid request");

        let id: CorrelationId = extract(req).await;

        assert_eq!(id.as_str(), "abc-123");
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let mut req = Request::builder()
            .header("X-Correlation-ID", "from-header")
            .body(())
            .expect("Valid request");
        req.extensions_mut()
            .insert(CorrelationId("from-middleware".to_string()));

        let id: CorrelationId = extract(req).await;

        assert_eq!(id.to_string(), "from-middleware");
    }

    #[tokio::test]
    async fn test_client_ip_from_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(())
            .expect("Valid request");

        let ip: ClientIp = extract(req).await;

        assert_eq!(ip.0, "203.0.113.7".parse::<IpAddr>().expect("valid ip"));
    }

    #[tokio::test]
    async fn test_client_ip_from_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "198.51.100.2")
            .body(())
            .expect("Valid request");

        let ip: ClientIp = extract(req).await;

        assert_eq!(ip.0, "198.51.100.2".parse::<IpAddr>().expect("valid ip"));
    }

    #[tokio::test]
    async fn test_client_ip_defaults_to_localhost() {
        let req = Request::builder().body(()).expect("Valid request");

        let ip: ClientIp = extract(req).await;

        assert_eq!(ip.0, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
