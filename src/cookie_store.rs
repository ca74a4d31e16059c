use cookie::time::Duration;
use cookie::{Cookie, CookieJar, SameSite};

use crate::theme::{RootClassList, StorageError, ThemeController, ThemeStore};

const MAX_AGE_DAYS: i64 = 365;

/// Older clients stored the value JSON encoded, e.g. `"dark"`.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value)
}

/// Theme store backed by the request's `Cookie` header. Writes land in the jar
/// delta and are turned into `Set-Cookie` headers for the response.
pub struct CookieStore {
    jar: CookieJar,
}

impl CookieStore {
    /// Pairs are parsed one by one, so a malformed or non UTF-8 pair only
    /// loses itself.
    pub fn from_header(header: Option<&[u8]>) -> Self {
        let mut jar = CookieJar::new();
        if let Some(raw) = header {
            let text = String::from_utf8_lossy(raw).into_owned();
            Cookie::split_parse_encoded(text)
                .filter_map(Result::ok)
                .for_each(|c| jar.add_original(c.into_owned()));
        }

        CookieStore { jar }
    }

    /// Cookies written during this request, percent-encoded
    /// (`azagatti:theme` goes out as `azagatti%3Atheme`).
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.jar.delta()
            .map(|c| c.encoded().to_string())
            .collect()
    }
}

impl ThemeStore for CookieStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.jar.get(key).map(|c| unquote(c.value()).to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .max_age(Duration::days(MAX_AGE_DAYS))
            .same_site(SameSite::Lax);
        self.jar.add(cookie);
        Ok(())
    }
}

pub type RequestTheme = ThemeController<CookieStore, RootClassList>;

/// Reads the `Sec-CH-Prefers-Color-Scheme` client hint, the server side
/// counterpart of the `prefers-color-scheme` media query.
pub fn prefers_dark_hint(hint: Option<&str>) -> bool {
    hint.map(|h| unquote(h).eq_ignore_ascii_case("dark")).unwrap_or(false)
}

/// Theme of one request, already resolved. Writes made while resolving (first
/// visit) or toggling end up in `store().set_cookie_headers()`.
pub fn request_theme(key: &str, cookie_header: Option<&[u8]>, hint: Option<&str>) -> RequestTheme {
    let mut theme = ThemeController::new(
        key,
        CookieStore::from_header(cookie_header),
        RootClassList::new(),
        prefers_dark_hint(hint),
    );
    theme.resolve();
    theme
}
