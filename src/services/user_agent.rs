//! Clasificación básica de User-Agent
//!
//! Se comparan subcadenas en minúsculas. Los sistemas móviles se revisan antes
//! que los de escritorio porque sus User-Agent también contienen "Mac OS" o "Linux".

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub device: &'static str,
    pub browser: &'static str,
    pub os: &'static str,
}

const OTHER: &str = "Other";

fn detect_device(ua: &str) -> &'static str {
    if ua.contains("ipad") || ua.contains("tablet") || (ua.contains("android") && !ua.contains("mobile")) {
        "Tablet"
    } else if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        "Mobile"
    } else {
        "Desktop"
    }
}

fn detect_os(ua: &str) -> &'static str {
    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        "iOS"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("windows") {
        "Windows"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "MacOS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        OTHER
    }
}

fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("edg/") || ua.contains("edge/") || ua.contains("edga/") || ua.contains("edgios/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("firefox/") || ua.contains("fxios/") {
        "Firefox"
    } else if ua.contains("chrome/") || ua.contains("crios/") {
        "Chrome"
    } else if ua.contains("safari/") {
        "Safari"
    } else {
        OTHER
    }
}

/// Clasifica un User-Agent en dispositivo, navegador y sistema operativo
pub fn parse_user_agent(user_agent: Option<&str>) -> ClientInfo {
    let ua = match user_agent {
        Some(ua) if !ua.trim().is_empty() => ua.to_lowercase(),
        _ => {
            return ClientInfo {
                device: "Desktop",
                browser: OTHER,
                os: OTHER,
            }
        }
    };

    ClientInfo {
        device: detect_device(&ua),
        browser: detect_browser(&ua),
        os: detect_os(&ua),
    }
}
