use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use folio::locale::Locale;

use crate::NewPostArgs;

fn render_front_matter(title: &str, date: &NaiveDate) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = {}", toml::Value::String(title.to_string()));
    let _ = writeln!(&mut buf, "pub_date = {}", date.format("%Y-%m-%d"));
    let _ = writeln!(&mut buf, "description = \"\"");
    let _ = writeln!(&mut buf, "# hero_image = \"/public/cover.png\"");
    let _ = writeln!(&mut buf, "+++");
    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "<!-- more -->");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "And this is the rest of your post");

    buf
}

fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);
    let mut slug = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}

pub(crate) fn new_post_cmd(args: NewPostArgs) -> Result<()> {
    let locale = Locale::from_code(&args.lang)?;
    let slug = slug_from_title(&args.title);
    if slug.is_empty() {
        bail!("Could not derive a file name from the title {:?}", args.title);
    }

    let dir = PathBuf::from(&args.out_dir).join(locale.code());
    let path = dir.join(format!("{}.md", slug));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let date = Utc::now().date_naive();
    fs::create_dir_all(&dir)?;
    fs::write(&path, render_front_matter(&args.title, &date) + &render_body())?;
    println!("Creating post {}", path.display());

    Ok(())
}
