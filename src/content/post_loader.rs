use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::{info, warn};

use crate::content::front_matter::split_front_matter;
use crate::content::Post;
use crate::locale::Locale;
use crate::reading_time::minutes_read;

/// Posts of every locale live in `posts_dir/<code>/<slug>.md`.
pub struct PostLoader {
    pub posts_dir: PathBuf,
    pub words_per_minute: u32,
}

impl PostLoader {
    pub fn new(posts_dir: PathBuf, words_per_minute: u32) -> Self {
        PostLoader { posts_dir, words_per_minute }
    }

    fn locale_dir(&self, locale: Locale) -> PathBuf {
        self.posts_dir.join(locale.code())
    }

    fn retrieve_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(posts),
            Err(e) => return Err(e),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                posts.push(path);
            }
        }
        Ok(posts)
    }

    pub fn parse(&self, slug: &str, locale: Locale, raw: &str) -> io::Result<Post> {
        let (meta, body) = split_front_matter(raw)?;
        Ok(Post {
            slug: slug.to_string(),
            locale,
            meta,
            minutes_read: minutes_read(body, self.words_per_minute),
            body: body.to_string(),
        })
    }

    pub fn load_file(&self, path: &Path, locale: Locale) -> io::Result<Post> {
        let slug = match path.file_stem().and_then(|s| s.to_str()) {
            Some(slug) => slug.to_string(),
            None => return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid post path {}", path.display()))),
        };
        let raw = fs::read_to_string(path)?;
        self.parse(&slug, locale, &raw)
            .map_err(|e| io::Error::new(e.kind(), format!("{} - file={}", e, path.display())))
    }

    /// Every post of the locale, newest first. Broken files are logged and skipped.
    pub fn load_all(&self, locale: Locale) -> io::Result<Vec<Post>> {
        let mut posts = vec![];
        for path in Self::retrieve_files(&self.locale_dir(locale))? {
            match self.load_file(&path, locale) {
                Ok(post) => posts.push(post),
                Err(e) => warn!("Skipping post. Desc={}", e),
            }
        }

        posts.sort_by(|a, b| b.pub_date().cmp(&a.pub_date()).then_with(|| a.slug.cmp(&b.slug)));
        info!("Loaded {} posts for locale {}", posts.len(), locale);
        Ok(posts)
    }

    pub fn find(&self, locale: Locale, slug: &str) -> io::Result<Post> {
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
            return Err(io::Error::new(ErrorKind::PermissionDenied, "Access forbidden"));
        }
        let path = self.locale_dir(locale).join(format!("{}.md", slug));
        self.load_file(&path, locale)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::test_data::posts_fixture;

    use super::*;

    #[test]
    fn test_load_all_sorted_newest_first() -> io::Result<()> {
        let tmp = posts_fixture();
        let loader = PostLoader::new(tmp.path().to_path_buf(), 200);

        let posts = loader.load_all(Locale::En)?;
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["typing-the-web", "older"]);
        assert_eq!(posts[0].minutes_read, "1 min read");
        assert_eq!(posts[0].link(), "/en/blog/typing-the-web/");

        let posts = loader.load_all(Locale::Pt)?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].link(), "/blog/tipando-a-web/");
        Ok(())
    }

    #[test]
    fn test_missing_locale_dir_is_empty() -> io::Result<()> {
        let tmp = TempDir::new()?;
        let loader = PostLoader::new(tmp.path().join("does-not-exist"), 200);
        assert!(loader.load_all(Locale::En)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_find() -> io::Result<()> {
        let tmp = posts_fixture();
        let loader = PostLoader::new(tmp.path().to_path_buf(), 200);

        let post = loader.find(Locale::Pt, "tipando-a-web")?;
        assert_eq!(post.meta.title, "Tipando a web");
        assert_eq!(loader.find(Locale::En, "nope").err().unwrap().kind(), ErrorKind::NotFound);
        assert_eq!(loader.find(Locale::En, "../pt/tipando-a-web").err().unwrap().kind(), ErrorKind::PermissionDenied);
        Ok(())
    }
}
