use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

use url::{Host, Url};

use crate::error::{AppResult, HttpError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }

    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    #[must_use]
    pub const fn is_tls(self) -> bool {
        matches!(self, Scheme::Https)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

/// A validated target URL, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    pub scheme: Scheme,
    /// Bare host name or IP literal, used for lookup and as the TLS server name.
    pub host: String,
    pub port: u16,
    /// Value of the `Host` header: the URL's host plus any explicit port.
    pub host_header: String,
    /// Request target: path plus query string.
    pub path: String,
}

/// Everything a worker needs to open connections to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub url: TargetUrl,
    pub addr: SocketAddr,
}

/// Validates `raw` as an http(s) URL and derives the request line parts.
///
/// # Errors
///
/// Returns an error when the URL cannot be parsed, has no host, or uses a
/// scheme other than http/https.
pub fn parse_target(raw: &str) -> AppResult<TargetUrl> {
    let url = Url::parse(raw).map_err(|source| ValidationError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })?;
    let scheme = Scheme::parse(url.scheme()).ok_or_else(|| ValidationError::UnsupportedScheme {
        scheme: url.scheme().to_owned(),
    })?;

    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_owned(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => return Err(ValidationError::UrlMissingHost.into()),
    };
    if host.is_empty() {
        return Err(ValidationError::UrlMissingHost.into());
    }

    let port = url.port().unwrap_or_else(|| scheme.default_port());
    let host_str = url.host_str().unwrap_or(host.as_str());
    let host_header = match url.port() {
        Some(explicit) => format!("{}:{}", host_str, explicit),
        None => host_str.to_owned(),
    };

    let path = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_owned(),
    };
    let path = if path.is_empty() {
        "/".to_owned()
    } else {
        path
    };

    Ok(TargetUrl {
        scheme,
        host,
        port,
        host_header,
        path,
    })
}

/// Parses `raw` and resolves its host once; every connection reuses the
/// first resolved address.
///
/// # Errors
///
/// Returns an error when the URL is invalid or the host does not resolve.
pub fn resolve_target(raw: &str) -> AppResult<ResolvedTarget> {
    let url = parse_target(raw)?;
    let mut addrs = (url.host.as_str(), url.port)
        .to_socket_addrs()
        .map_err(|source| HttpError::ResolveHost {
            host: url.host.clone(),
            port: url.port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| HttpError::NoAddressesResolved {
        host: url.host.clone(),
    })?;
    Ok(ResolvedTarget { url, addr })
}
