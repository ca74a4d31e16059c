use chrono::NaiveDate;
use serde::Deserialize;

use crate::locale::Locale;
use crate::util::toml_date::TomlDate;

pub mod front_matter;
pub mod markdown_renderer;
pub mod post_loader;

/// Metadata block at the top of every post.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub pub_date: TomlDate,
    #[serde(default)]
    pub description: String,
    pub hero_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub locale: Locale,
    pub meta: PostMeta,
    pub minutes_read: String,
    /// Markdown source, front matter excluded.
    pub body: String,
}

impl Post {
    pub fn pub_date(&self) -> NaiveDate {
        self.meta.pub_date.0
    }

    /// Link to the detail page, under the locale prefix.
    pub fn link(&self) -> String {
        format!("{}/blog/{}/", self.locale.route_prefix(), self.slug)
    }
}
