use std::io;
use std::io::ErrorKind;

use markdown::Options;

/// Drops every `<!-- ... -->` block. An unterminated comment is an error.
pub fn remove_comments(md_post: &str) -> io::Result<String> {
    let mut res = String::with_capacity(md_post.len());
    let mut block = md_post;

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(start) = block.find(start_comment) {
        res.push_str(&block[..start]);
        let next = &block[(start + start_comment.len())..];
        match next.find(end_comment) {
            Some(end) => block = &next[(end + end_comment.len())..],
            None => return Err(io::Error::new(ErrorKind::InvalidData, "Error finding end of comment")),
        }
    }
    res.push_str(block);

    Ok(res)
}

/// Part of the post shown in listings: everything before the summary tag, or
/// the whole post when the tag is absent.
pub fn summary<'a>(md_post: &'a str, summary_tag: &str) -> &'a str {
    match md_post.find(summary_tag) {
        Some(pos) => &md_post[..pos],
        None => md_post,
    }
}

pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let buf = remove_comments(md_text)?;
    match markdown::to_html_with_options(buf.as_str(), &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.to_string())),
    }
}
