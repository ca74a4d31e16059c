use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("unsupported locale: {0:?}")]
    Unsupported(String),
}

/// Languages the site is published in. `Pt` is the default and carries no
/// URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Pt,
    En,
}

pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

static PT_INFO: LanguageInfo = LanguageInfo { code: "pt", name: "Português", flag: "🇧🇷" };
static EN_INFO: LanguageInfo = LanguageInfo { code: "en", name: "English", flag: "🇺🇸" };

impl Locale {
    pub const DEFAULT: Locale = Locale::Pt;
    pub const ALL: [Locale; 2] = [Locale::Pt, Locale::En];

    pub fn info(&self) -> &'static LanguageInfo {
        match self {
            Locale::Pt => &PT_INFO,
            Locale::En => &EN_INFO,
        }
    }

    pub fn code(&self) -> &'static str {
        self.info().code
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        Self::ALL.into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| LocaleError::Unsupported(code.to_string()))
    }

    /// Path prefix used by routes of this locale, empty for the default.
    pub fn route_prefix(&self) -> String {
        if self.is_default() {
            String::new()
        } else {
            format!("/{}", self.code())
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
