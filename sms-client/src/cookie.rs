//! Cookie lookup for the CSRF token.

/// Name of the cookie holding the server's anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Source of the page's `Cookie` header.
///
/// The server owns the cookies; this layer only reads them.
pub trait CookieSource: Send + Sync {
    /// The raw `name=value; name2=value2` cookie string.
    fn cookie_header(&self) -> String;
}

/// A cookie source with a fixed cookie string.
#[derive(Debug, Clone, Default)]
pub struct StaticCookies {
    header: String,
}

impl StaticCookies {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl CookieSource for StaticCookies {
    fn cookie_header(&self) -> String {
        self.header.clone()
    }
}

/// Returns the percent-decoded value of the first cookie called `name`.
///
/// A value that does not decode to UTF-8 is treated as absent.
pub fn get_cookie(header: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    let raw = header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))?;

    match urlencoding::decode(raw) {
        Ok(value) => Some(value.into_owned()),
        Err(e) => {
            log::warn!("Cookie {name} is not valid UTF-8 after decoding: {e}");
            None
        }
    }
}

/// The CSRF token from `source`, if the cookie is set.
pub fn csrf_token(source: &dyn CookieSource) -> Option<String> {
    get_cookie(&source.cookie_header(), CSRF_COOKIE)
}
