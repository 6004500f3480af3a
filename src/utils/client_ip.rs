//! Client IP extraction from the socket address and proxy headers.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Resolves the client IP for click attribution.
///
/// When `behind_proxy` is false the peer socket address is authoritative.
/// When true, forwarded headers are consulted first, in order:
///
/// 1. `X-Forwarded-For` (first entry, the originating client)
/// 2. `X-Real-IP`
/// 3. The peer socket address as a fallback
///
/// Forwarded headers are trivially spoofable, so they are only trusted
/// when the deployment explicitly opts in via `BEHIND_PROXY`.
pub fn client_ip(headers: &HeaderMap, addr: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }

        if let Some(real_ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return real_ip.to_string();
        }
    }

    addr.ip().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn addr() -> SocketAddr {
        "10.0.0.7:51234".parse().unwrap()
    }

    #[test]
    fn test_socket_addr_when_not_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));

        assert_eq!(client_ip(&headers, addr(), false), "10.0.0.7");
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 198.51.100.2"),
        );

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.9");
    }

    #[test]
    fn test_forwarded_for_trims_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("  203.0.113.9 , 198.51.100.2"),
        );

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.9");
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.44"));

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.44");
    }

    #[test]
    fn test_forwarded_for_takes_precedence_over_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.44"));

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.9");
    }

    #[test]
    fn test_socket_fallback_when_headers_absent() {
        let headers = HeaderMap::new();

        assert_eq!(client_ip(&headers, addr(), true), "10.0.0.7");
    }

    #[test]
    fn test_empty_forwarded_header_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(client_ip(&headers, addr(), true), "10.0.0.7");
    }
}
