use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::markdown_renderer::render_markdown;
use crate::content::Post;
use crate::date_format::format_date;
use crate::view::layout::Layout;

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    #[ramhorns(flatten)]
    layout: Layout,
    title: &'a str,
    date: String,
    minutes_read: &'a str,
    description: &'a str,
    hero_image: &'a str,
    content: String,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, layout: Layout, post: &Post) -> io::Result<String> {
        let content = render_markdown(&post.body)?;
        let rendered_page = self.template.render(&ViewItem {
            layout,
            title: &post.meta.title,
            date: format_date(&post.pub_date(), post.locale),
            minutes_read: &post.minutes_read,
            description: &post.meta.description,
            hero_image: post.meta.hero_image.as_deref().unwrap_or(""),
            content,
        });

        Ok(rendered_page)
    }
}

#[cfg(test)]
mod tests {
    use crate::content::post_loader::PostLoader;
    use crate::locale::Locale;
    use crate::test_data::{site, POST_PT, VIEW_TPL};
    use crate::theme::Theme;

    use super::*;

    #[test]
    fn render_view() {
        let loader = PostLoader::new("posts".into(), 200);
        let post = loader.parse("tipando-a-web", Locale::Pt, POST_PT).unwrap();
        let renderer = PostRenderer::new(VIEW_TPL).unwrap();
        let layout = Layout::new(&site(), Locale::Pt, "/blog/tipando-a-web/", Theme::Light, String::new());

        let res = renderer.render(layout, &post).unwrap();
        assert!(res.starts_with(r#"<html class="" lang="pt"><h2>Tipando a web</h2><p>5 de janeiro, 2024 — 1 min read</p>"#), "{}", res);
        assert!(res.contains("<h2>O botão</h2>"), "{}", res);
        assert!(!res.contains("more"), "{}", res);
        assert!(res.contains("<a href=\"/theme/toggle?back=%2Fblog%2Ftipando-a-web%2F\">Toggle theme</a>"), "{}", res);
    }
}
