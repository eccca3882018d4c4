//! IP del cliente
//!
//! Sin proxies de confianza (`TRUSTED_PROXY_HOPS=0`) solo cuenta la dirección
//! del socket. Con `n` proxies delante se toma la entrada `n` empezando por la
//! derecha de `x-forwarded-for` (la que añadió el proxy más externo), o
//! `x-real-ip` si no hay cabecera. Las entradas que no son una IP válida se
//! ignoran y se usa el socket. Se elimina el prefijo IPv4-mapped `::ffff:`.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::state::AppState;

pub const UNKNOWN_IP: &str = "unknown";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn normalize_ip(ip: &str) -> Option<String> {
    let ip = ip.trim();
    let ip = ip.strip_prefix("::ffff:").unwrap_or(ip);
    ip.parse::<IpAddr>().ok().map(|addr| addr.to_string())
}

/// IP añadida por el proxy de confianza más externo
fn forwarded_ip(headers: &HeaderMap, trusted_hops: usize) -> Option<String> {
    if trusted_hops == 0 {
        return None;
    }

    if let Some(forwarded) = header_value(headers, "x-forwarded-for") {
        let entries: Vec<&str> = forwarded.split(',').map(str::trim).collect();
        let index = entries.len().checked_sub(trusted_hops)?;
        return entries.get(index).and_then(|entry| normalize_ip(entry));
    }

    header_value(headers, "x-real-ip").and_then(normalize_ip)
}

pub fn extract_client_ip(headers: &HeaderMap, socket: Option<SocketAddr>, trusted_hops: usize) -> String {
    forwarded_ip(headers, trusted_hops)
        .or_else(|| socket.and_then(|addr| normalize_ip(&addr.ip().to_string())))
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Extractor con la IP del cliente ya resuelta
#[derive(Debug, Clone, PartialEq)]
pub struct ClientIp(pub String);

#[async_trait]
impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let socket = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientIp(extract_client_ip(
            &parts.headers,
            socket,
            state.config.trusted_proxy_hops,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn socket(addr: &str) -> Option<SocketAddr> {
        Some(addr.parse().unwrap())
    }

    #[test]
    fn test_headers_ignored_without_trusted_proxies() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("127.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("127.0.0.1"));
        assert_eq!(extract_client_ip(&headers, socket("203.0.113.7:4000"), 0), "203.0.113.7");
        assert_eq!(extract_client_ip(&headers, None, 0), UNKNOWN_IP);
    }

    #[test]
    fn test_rightmost_trusted_entry_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("127.0.0.1, 85.105.10.1"));
        let proxy = socket("10.0.0.1:4000");
        assert_eq!(extract_client_ip(&headers, proxy, 1), "85.105.10.1");
        assert_eq!(extract_client_ip(&headers, proxy, 2), "127.0.0.1");
        // Menos entradas que proxies: la cabecera no es fiable
        assert_eq!(extract_client_ip(&headers, proxy, 3), "10.0.0.1");
    }

    #[test]
    fn test_invalid_entries_fall_back_to_socket() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("no-es-ip/../x"));
        assert_eq!(extract_client_ip(&headers, socket("192.168.1.5:4000"), 1), "192.168.1.5");

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("::ffff:10.0.0.2"));
        assert_eq!(extract_client_ip(&headers, None, 1), "10.0.0.2");
        assert_eq!(extract_client_ip(&HeaderMap::new(), socket("[::ffff:10.0.0.3]:80"), 0), "10.0.0.3");
    }
}
