use std::time::Duration;

pub const LOCAL_API_ROOT: &str = "http://127.0.0.1:8000/api";
pub const DEPLOYED_API_ROOT: &str = "https://deafabilitywebservicedeploy.onrender.com/api";

/// Name of the `<meta>` tag the server uses to inject an API root.
pub const API_URL_META: &str = "deafability:api-url";
/// Environment variable read by the server to fill [`API_URL_META`].
pub const API_URL_ENV: &str = "DEAFABILITY_API_URL";

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOOPBACK_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", "[::1]"];

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_root: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Picks the API root for the page host. An explicit override (from the
    /// server-injected meta tag) always wins.
    pub fn resolve(host: &str, api_override: Option<&str>) -> Self {
        let api_root = match api_override.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None if is_loopback(host) => LOCAL_API_ROOT.to_string(),
            None => DEPLOYED_API_ROOT.to_string(),
        };

        Self {
            api_root,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Reads host and override from the running page.
    #[cfg(feature = "hydrate")]
    pub fn from_browser() -> Self {
        let host = crate::browser::hostname().unwrap_or_default();
        let api_override = crate::browser::meta_content(API_URL_META);
        let config = Self::resolve(&host, api_override.as_deref());
        log::debug!("Resolved api root {} for host {host:?}", config.api_root);
        config
    }

    #[cfg(not(feature = "hydrate"))]
    pub fn from_browser() -> Self {
        Self::resolve("localhost", None)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Absolute URLs pass through, anything else hangs off the API root.
    pub fn media_url(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            None
        } else if url.starts_with("http") {
            Some(url.to_string())
        } else {
            Some(self.endpoint(url))
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve("", None)
    }
}

fn is_loopback(host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    LOOPBACK_HOSTS.contains(&host.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_hosts_use_local_backend() {
        for host in ["localhost", "127.0.0.1", "LOCALHOST", "[::1]"] {
            assert_eq!(ClientConfig::resolve(host, None).api_root, LOCAL_API_ROOT);
        }
    }

    #[test]
    fn other_hosts_use_deployed_backend() {
        let config = ClientConfig::resolve("deafability.example.org", None);
        assert_eq!(config.api_root, DEPLOYED_API_ROOT);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn override_wins_and_is_normalized() {
        let config = ClientConfig::resolve("localhost", Some(" https://api.test/api/ "));
        assert_eq!(config.api_root, "https://api.test/api");

        let blank = ClientConfig::resolve("localhost", Some("  "));
        assert_eq!(blank.api_root, LOCAL_API_ROOT);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::resolve("localhost", None);
        assert_eq!(
            config.endpoint("/courses/1/"),
            "http://127.0.0.1:8000/api/courses/1/"
        );
    }

    #[test]
    fn media_urls() {
        let config = ClientConfig::resolve("localhost", None);
        assert_eq!(config.media_url(""), None);
        assert_eq!(
            config.media_url("https://cdn/x.png").as_deref(),
            Some("https://cdn/x.png")
        );
        assert_eq!(
            config.media_url("media/x.png").as_deref(),
            Some("http://127.0.0.1:8000/api/media/x.png")
        );
    }
}
