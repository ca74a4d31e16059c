use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use spdlog::{debug, warn};
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "azagatti:theme";
/// Class token on the document root that switches every dark-mode style on.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            x => Err(UnknownTheme(x.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
}

/// Persistent key-value store living on the visitor's side: local storage in a
/// browser, the cookie jar for a server-rendered page.
pub trait ThemeStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The single boolean marker on the document root.
pub trait PresentationFlag {
    fn set_dark(&mut self, dark: bool);
    fn is_dark(&self) -> bool;
}

/// Class list of the `<html>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootClassList {
    tokens: Vec<String>,
}

impl RootClassList {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn add(&mut self, token: &str) {
        if !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    pub fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    /// Value for the `class` attribute.
    pub fn to_attr(&self) -> String {
        self.tokens.join(" ")
    }
}

impl PresentationFlag for RootClassList {
    fn set_dark(&mut self, dark: bool) {
        if dark {
            self.add(DARK_CLASS);
        } else {
            self.remove(DARK_CLASS);
        }
    }

    fn is_dark(&self) -> bool {
        self.contains(DARK_CLASS)
    }
}

type ThemeListener = Box<dyn FnMut(Theme)>;

/// Owns the theme of one page. Every change goes through `apply`, which keeps
/// the root flag and the listeners in step, followed by a write to the store.
pub struct ThemeController<S: ThemeStore, R: PresentationFlag> {
    key: String,
    store: S,
    root: R,
    prefers_dark: bool,
    current: Theme,
    listeners: Vec<ThemeListener>,
}

impl<S: ThemeStore, R: PresentationFlag> ThemeController<S, R> {
    pub fn new(key: &str, store: S, root: R, prefers_dark: bool) -> Self {
        ThemeController {
            key: key.to_string(),
            store,
            root,
            prefers_dark,
            current: Theme::Light,
            listeners: vec![],
        }
    }

    /// Registers a callback invoked after every applied theme, so that
    /// secondary toggles can mirror the primary one.
    pub fn on_change<F: FnMut(Theme) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    pub fn resolve(&mut self) -> Theme {
        let stored = match self.store.read(&self.key) {
            Ok(value) => value.and_then(|v| match v.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    debug!("Ignoring stored theme. Desc={}", e);
                    None
                }
            }),
            Err(e) => {
                warn!("Could not read theme from storage, using defaults. Desc={}", e);
                None
            }
        };

        let theme = stored.unwrap_or(if self.prefers_dark { Theme::Dark } else { Theme::Light });
        self.apply(theme);
        if stored.is_none() {
            self.persist();
        }

        theme
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.apply(next);
        self.persist();
        next
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn apply(&mut self, theme: Theme) {
        self.current = theme;
        self.root.set_dark(theme == Theme::Dark);
        for listener in self.listeners.iter_mut() {
            listener(theme);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.write(&self.key, self.current.as_str()) {
            warn!("Could not persist theme {}, keeping it in memory. Desc={}", self.current, e);
        }
    }
}
