use crate::config::Site;
use crate::locale::Locale;
use crate::theme::Theme;
use crate::view::language_selector::{LanguageSelector, ViewLanguage};

/// Fields shared by every page template: the root element class, the theme
/// button and the language dropdown.
#[derive(ramhorns::Content)]
pub struct Layout {
    pub site_title: String,
    pub canonical_url: String,
    pub lang: String,
    pub root_class: String,
    pub theme: String,
    pub is_dark: bool,
    pub toggle_url: String,
    pub toggle_label: String,
    pub current_language: ViewLanguage,
    pub languages: Vec<ViewLanguage>,
}

pub fn toggle_url(back: &str) -> String {
    let query = serde_urlencoded::to_string([("back", back)]).unwrap_or_default();
    format!("/theme/toggle?{}", query)
}

impl Layout {
    /// `uri` is the request path with its query, if any. The query only
    /// survives in the theme toggle's way back.
    pub fn new(site: &Site, locale: Locale, uri: &str, theme: Theme, root_class: String) -> Layout {
        let path = uri.split_once('?').map_or(uri, |(path, _)| path);
        let LanguageSelector { current, others } = LanguageSelector::new(locale, path);
        Layout {
            site_title: site.title.clone(),
            canonical_url: format!("{}{}", site.url.trim_end_matches('/'), path),
            lang: locale.code().to_string(),
            root_class,
            theme: theme.to_string(),
            is_dark: theme == Theme::Dark,
            toggle_url: toggle_url(uri),
            toggle_label: "Toggle theme".to_string(),
            current_language: current,
            languages: others,
        }
    }
}
