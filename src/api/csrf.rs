/// Finds `name` in a `document.cookie` style string and percent-decodes it.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

/// Where the transport reads the anti-forgery token from on every request.
#[derive(Debug, Clone, Default)]
pub enum CsrfSource {
    /// Read `document.cookie` at send time.
    #[default]
    Document,
    /// A fixed cookie string, for non-browser targets.
    Fixed(String),
}

impl CsrfSource {
    pub fn token(&self) -> Option<String> {
        match self {
            CsrfSource::Document => document_cookies()
                .and_then(|c| cookie_value(&c, crate::config::CSRF_COOKIE)),
            CsrfSource::Fixed(cookies) => cookie_value(cookies, crate::config::CSRF_COOKIE),
        }
    }
}

#[cfg(feature = "hydrate")]
fn document_cookies() -> Option<String> {
    crate::browser::cookies()
}

#[cfg(not(feature = "hydrate"))]
fn document_cookies() -> Option<String> {
    None
}
