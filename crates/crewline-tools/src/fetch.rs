//! Page fetching for the scrape tools
//!
//! [`HttpFetcher`] refuses non-http(s) schemes, internal hosts and private
//! addresses, and re-checks the resolved addresses right before the request.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 80;

/// User-Agent sent with page requests
const USER_AGENT: &str = concat!("crewline/", env!("CARGO_PKG_VERSION"));

/// Blocked hosts for SSRF protection
static BLOCKED_HOSTS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "localhost",
        "127.0.0.1",
        "0.0.0.0",
        "::1",
        "[::1]",
        "metadata.google.internal",
        "169.254.169.254",
        "metadata.internal",
    ])
});

static DROP_BLOCKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>|<!--.*?-->")
        .expect("block regex")
});

static BREAK_TAGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</?(p|div|li|ul|ol|tr|h[1-6]|section|article|header|footer|pre|blockquote)\b[^>]*>")
        .expect("break regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\f]+").expect("space regex"));

/// Something that can fetch the raw body of a web page
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher with SSRF checks
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::NotConfigured(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let validated = validate_url(url)?;
        validate_resolved_ips(&validated).await?;

        debug!(url = %validated, "Fetching page");

        let response = self
            .client
            .get(validated.as_str())
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "GET {} returned {}",
                validated,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

/// Validate a URL for scheme and host before fetching
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)
        .map_err(|e| Error::Validation(format!("invalid URL '{url_str}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            warn!(scheme = %scheme, url = %url_str, "Blocked non-HTTP URL scheme");
            return Err(Error::PermissionDenied(format!(
                "URL scheme '{scheme}' is not allowed. Only http/https are permitted."
            )));
        }
    }

    let host = url
        .host_str()
        .ok_or_else(|| Error::Validation(format!("URL '{url_str}' has no host")))?;
    let host_lower = host.to_lowercase();

    if BLOCKED_HOSTS.contains(host_lower.as_str()) {
        warn!(host = %host, "Blocked request to internal host");
        return Err(Error::PermissionDenied(format!(
            "Requests to '{host}' are blocked"
        )));
    }

    if let Ok(ip) = host_lower.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
        if is_private_ip(&ip) {
            warn!(ip = %ip, "Blocked request to private IP");
            return Err(Error::PermissionDenied(
                "Requests to private/internal IP addresses are not allowed".to_string(),
            ));
        }
    }

    if host_lower.ends_with(".internal")
        || host_lower.ends_with(".local")
        || host_lower.ends_with(".localhost")
    {
        warn!(host = %host, "Blocked request to internal domain");
        return Err(Error::PermissionDenied(format!(
            "Requests to internal domains like '{host}' are not allowed"
        )));
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_loopback()
                || ipv4.is_private()
                || ipv4.is_link_local()
                || ipv4.is_broadcast()
                || ipv4.is_documentation()
                || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => ipv6.is_loopback() || ipv6.is_unspecified(),
    }
}

/// Resolve the host and reject private addresses (DNS rebinding)
async fn validate_resolved_ips(url: &Url) -> Result<()> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::Validation("URL has no host".to_string()))?;

    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    let port = url.port_or_known_default().unwrap_or(DEFAULT_HTTP_PORT);
    let resolved: Vec<_> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| Error::Network(format!("DNS resolution failed for '{host}': {e}")))?
        .collect();

    if resolved.is_empty() {
        return Err(Error::Network(format!(
            "DNS resolution returned no addresses for '{host}'"
        )));
    }

    if let Some(addr) = resolved.iter().find(|a| is_private_ip(&a.ip())) {
        warn!(host = %host, resolved_ip = %addr.ip(), "Hostname resolved to private IP");
        return Err(Error::PermissionDenied(format!(
            "hostname '{host}' resolved to private IP address {}",
            addr.ip()
        )));
    }

    Ok(())
}

/// Reduce an HTML document to readable text
///
/// Scripts, styles and comments are dropped, block-level tags become line
/// breaks, remaining tags are stripped, common entities decoded, and blank
/// lines collapsed.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let without_blocks = DROP_BLOCKS_RE.replace_all(html, " ");
    let with_breaks = BREAK_TAGS_RE.replace_all(&without_blocks, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| SPACES_RE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
