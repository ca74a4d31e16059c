use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::markdown_renderer::{render_markdown, summary};
use crate::content::Post;
use crate::date_format::format_date;
use crate::view::layout::Layout;

#[derive(ramhorns::Content)]
struct ListPage {
    #[ramhorns(flatten)]
    layout: Layout,
    post_list: Vec<PostItem>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct PostItem {
    title: String,
    date: String,
    minutes_read: String,
    link: String,
    description: String,
    hero_image: String,
    summary: String,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
    pub summary_tag: String,
}

impl ListRenderer<'_> {
    pub fn new<'a>(list_tpl_src: &'a str, summary_tag: &str) -> io::Result<ListRenderer<'a>> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
            summary_tag: summary_tag.to_string(),
        })
    }

    pub fn render(&self, layout: Layout, posts: &[Post], cur_page: u32, page_count: u32) -> io::Result<String> {
        let mut post_list = Vec::with_capacity(posts.len());
        for post in posts {
            post_list.push(PostItem {
                title: post.meta.title.clone(),
                date: format_date(&post.pub_date(), post.locale),
                minutes_read: post.minutes_read.clone(),
                link: post.link(),
                description: post.meta.description.clone(),
                hero_image: post.meta.hero_image.clone().unwrap_or_default(),
                summary: render_markdown(summary(&post.body, &self.summary_tag))?,
            });
        }

        let page_list = (1..=page_count)
            .map(|number| ViewPagination { current: number == cur_page, number })
            .collect();

        let rendered = self.template.render(&ListPage {
            layout,
            post_list,
            page_list,
            show_pagination: page_count > 1,
        });

        Ok(rendered)
    }
}
