#[cfg(test)]
use crate::config::Site;

#[cfg(test)]
pub fn site() -> Site {
    Site {
        title: "Azagatti".to_string(),
        url: "https://azagatti.dev/".to_string(),
    }
}

#[cfg(test)]
pub const POST_EN: &str = r#"+++
title = "Typing the web"
pub_date = 2024-01-05
description = "Notes on strong types for small sites"
hero_image = "/public/typing.png"
+++
Small sites deserve types too.

Even a portfolio has a state machine hiding in the theme button.
<!-- more -->

## The toggle

Two states, one flag on the root element and one key in storage.
"#;

#[cfg(test)]
pub const POST_PT: &str = r#"+++
title = "Tipando a web"
pub_date = 2024-01-05
description = "Notas sobre tipos fortes em sites pequenos"
hero_image = "/public/typing.png"
+++
Sites pequenos também merecem tipos.
<!-- more -->

## O botão

Dois estados, uma flag na raiz do documento.
"#;

#[cfg(test)]
pub const LIST_TPL: &str = concat!(
    r#"<html class="{{root_class}}" lang="{{lang}}">"#,
    "{{#post_list}}[{{title}}|{{date}} — {{minutes_read}}|{{link}}|{{hero_image}}]{{/post_list}}",
    "{{#page_list}}({{number}}{{#current}}*{{/current}}){{/page_list}}",
    "{{#languages}}<{{name}}:{{url}}>{{/languages}}",
    "</html>",
);

#[cfg(test)]
pub const VIEW_TPL: &str = concat!(
    r#"<html class="{{root_class}}" lang="{{lang}}">"#,
    "<h2>{{title}}</h2><p>{{date}} — {{minutes_read}}</p>",
    "{{{content}}}",
    r#"<a href="{{toggle_url}}">{{toggle_label}}</a>"#,
    "</html>",
);

/// Posts directory with two English posts, one Portuguese post and files the
/// loader has to skip. Removed when the returned dir is dropped.
#[cfg(test)]
pub fn posts_fixture() -> tempfile::TempDir {
    use std::fs;

    let tmp = tempfile::TempDir::new().unwrap();
    let en = tmp.path().join("en");
    let pt = tmp.path().join("pt");
    fs::create_dir_all(&en).unwrap();
    fs::create_dir_all(&pt).unwrap();
    fs::write(en.join("typing-the-web.md"), POST_EN).unwrap();
    fs::write(en.join("older.md"), "+++\ntitle = \"Older\"\npub_date = 2020-05-22\n+++\nOld news\n").unwrap();
    fs::write(en.join("broken.md"), "no front matter").unwrap();
    fs::write(en.join("notes.txt"), "ignored").unwrap();
    fs::write(pt.join("tipando-a-web.md"), POST_PT).unwrap();
    tmp
}
