//! Client address resolution.

use axum::extract::ConnectInfo;
use axum::http::{header::HeaderName, HeaderMap, Request};
use std::net::SocketAddr;

/// Proxy-supplied client chain; the first entry is the original client.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Proxy-supplied single client address.
pub const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Address reported when nothing better is known.
pub const FALLBACK_ADDRESS: &str = "0.0.0.0";

/// Resolves the address to report for a request.
///
/// First present wins: `x-forwarded-for`, `x-real-ip`, the peer address from
/// `ConnectInfo`, then [`FALLBACK_ADDRESS`]. Never fails.
pub fn client_address<B>(req: &Request<B>) -> String {
    forwarded_for(req.headers())
        .or_else(|| header_value(req.headers(), &X_REAL_IP))
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| FALLBACK_ADDRESS.to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    header_value(headers, &X_FORWARDED_FOR)?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn request() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[test]
    fn test_forwarded_for_wins() {
        let mut req = request();
        req.headers_mut().insert(X_FORWARDED_FOR, HeaderValue::from_static("1.2.3.4"));
        req.headers_mut().insert(X_REAL_IP, HeaderValue::from_static("5.6.7.8"));
        req.extensions_mut().insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));
        assert_eq!(client_address(&req), "1.2.3.4");
    }

    #[test]
    fn test_forwarded_for_without_real_ip() {
        let mut req = request();
        req.headers_mut().insert(X_FORWARDED_FOR, HeaderValue::from_static("1.2.3.4"));
        assert_eq!(client_address(&req), "1.2.3.4");
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut req = request();
        req.headers_mut().insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.2, 10.0.0.3"),
        );
        assert_eq!(client_address(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_when_no_forwarded_for() {
        let mut req = request();
        req.headers_mut().insert(X_REAL_IP, HeaderValue::from_static("5.6.7.8"));
        assert_eq!(client_address(&req), "5.6.7.8");
    }

    #[test]
    fn test_empty_headers_are_skipped() {
        let mut req = request();
        req.headers_mut().insert(X_FORWARDED_FOR, HeaderValue::from_static(""));
        req.headers_mut().insert(X_REAL_IP, HeaderValue::from_static("  "));
        req.extensions_mut().insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 9], 50000))));
        assert_eq!(client_address(&req), "192.168.1.9");
    }

    #[test]
    fn test_peer_address() {
        let mut req = request();
        req.extensions_mut().insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 8080))));
        assert_eq!(client_address(&req), "127.0.0.1");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(client_address(&request()), "0.0.0.0");
    }

    #[test]
    fn test_non_utf8_header_falls_through() {
        let mut req = request();
        req.headers_mut()
            .insert(X_FORWARDED_FOR, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(client_address(&req), FALLBACK_ADDRESS);
    }
}
