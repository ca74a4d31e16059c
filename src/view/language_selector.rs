use crate::lang_url::language_url;
use crate::locale::Locale;

#[derive(ramhorns::Content, Debug, Clone, PartialEq)]
pub struct ViewLanguage {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub url: String,
    pub aria_label: String,
}

/// Data behind the language dropdown: the active language and a switch link
/// for each of the others.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSelector {
    pub current: ViewLanguage,
    pub others: Vec<ViewLanguage>,
}

impl LanguageSelector {
    pub fn new(current: Locale, path: &str) -> Self {
        let info = current.info();
        let current_view = ViewLanguage {
            code: info.code.to_string(),
            name: info.name.to_string(),
            flag: info.flag.to_string(),
            url: path.to_string(),
            aria_label: format!("Current language: {}. Click to change language.", info.name),
        };

        let others = Locale::ALL.into_iter()
            .filter(|l| *l != current)
            .map(|target| {
                let info = target.info();
                ViewLanguage {
                    code: info.code.to_string(),
                    name: info.name.to_string(),
                    flag: info.flag.to_string(),
                    url: language_url(target, current, Some(path)),
                    aria_label: format!("Switch to {}", info.name),
                }
            })
            .collect();

        LanguageSelector {
            current: current_view,
            others,
        }
    }
}
