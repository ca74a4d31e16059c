use lazy_static::lazy_static;
use regex::Regex;

use crate::locale::Locale;

lazy_static! {
    static ref LOCALE_PREFIX: Regex = Regex::new(r"^/[a-z]{2}(?:/|$)").unwrap();
}

/// Makes sure the path starts with exactly one slash. An empty path becomes `/`.
fn normalize(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Returns the path after a leading two-letter locale segment, if there is one.
/// Any two lowercase letters count, supported or not.
fn strip_locale_prefix(path: &str) -> Option<&str> {
    if LOCALE_PREFIX.is_match(path) {
        Some(&path[3..])
    } else {
        None
    }
}

/// Computes the path to follow when switching from `current` to `target`.
/// The default locale lives at the root, every other one under `/<code>`.
/// Without a path, the site root is used.
pub fn language_url(target: Locale, current: Locale, path: Option<&str>) -> String {
    let path = normalize(path.unwrap_or("/"));

    if target.is_default() {
        return match strip_locale_prefix(&path) {
            Some("") => "/".to_string(),
            Some(rest) => rest.to_string(),
            None => path,
        };
    }

    if current.is_default() {
        return format!("/{}{}", target.code(), path);
    }

    match strip_locale_prefix(&path) {
        Some(rest) => format!("/{}{}", target.code(), rest),
        // A non-default page without prefix is malformed, treat it as unprefixed
        None => format!("/{}{}", target.code(), path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_default_strips_prefix() {
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/en/blog/post")), "/blog/post");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/en/")), "/");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/en")), "/");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/blog")), "/blog");
    }

    #[test]
    fn test_from_default_prepends() {
        assert_eq!(language_url(Locale::En, Locale::Pt, Some("/blog/post")), "/en/blog/post");
        assert_eq!(language_url(Locale::En, Locale::Pt, Some("/")), "/en/");
    }

    #[test]
    fn test_only_leading_segment_is_inspected() {
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/en/blog/en/x")), "/blog/en/x");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("/english/post")), "/english/post");
    }

    #[test]
    fn test_malformed_paths() {
        assert_eq!(language_url(Locale::En, Locale::Pt, Some("blog")), "/en/blog");
        assert_eq!(language_url(Locale::En, Locale::Pt, Some("")), "/en/");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("")), "/");
        assert_eq!(language_url(Locale::Pt, Locale::En, Some("//en/x")), "/x");
        assert_eq!(language_url(Locale::En, Locale::Pt, None), "/en/");
        assert_eq!(language_url(Locale::Pt, Locale::En, None), "/");
    }

    #[test]
    fn test_round_trip() {
        for path in ["/", "/blog", "/blog/post/", "/about"] {
            let there = language_url(Locale::En, Locale::Pt, Some(path));
            let back = language_url(Locale::Pt, Locale::En, Some(&there));
            assert_eq!(back, path);
        }

        for path in ["/en/", "/en/blog/post"] {
            let there = language_url(Locale::Pt, Locale::En, Some(path));
            let back = language_url(Locale::En, Locale::Pt, Some(&there));
            assert_eq!(back, path);
        }
    }
}
