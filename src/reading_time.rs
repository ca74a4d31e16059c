use markdown::mdast::Node;
use markdown::ParseOptions;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Nodes whose text never runs into a neighbor's.
fn breaks_words(node: &Node) -> bool {
    matches!(node,
        Node::Paragraph(_) | Node::Heading(_) | Node::Code(_) | Node::Blockquote(_)
        | Node::List(_) | Node::ListItem(_) | Node::Table(_) | Node::TableRow(_)
        | Node::TableCell(_) | Node::FootnoteDefinition(_) | Node::Break(_)
        | Node::ThematicBreak(_))
}

/// Collects the readable text of a markdown tree. Image alt text is left out.
/// Inline siblings are joined as they are, so `un*believ*able` stays one word.
fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Image(_) | Node::ImageReference(_) => return,
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        Node::Code(code) => out.push_str(&code.value),
        _ => {}
    }

    if let Some(children) = node.children() {
        for child in children {
            let block = breaks_words(child);
            if block {
                out.push(' ');
            }
            collect_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

pub fn count_words(md_text: &str) -> usize {
    let mut text = String::new();
    match markdown::to_mdast(md_text, &ParseOptions::gfm()) {
        Ok(tree) => collect_text(&tree, &mut text),
        // Unparseable input is counted as plain text
        Err(_) => text.push_str(md_text),
    }
    text.split_whitespace().count()
}

/// Friendly reading time, e.g. "3 min read".
pub fn minutes_read(md_text: &str, words_per_minute: u32) -> String {
    let wpm = words_per_minute.max(1) as usize;
    let minutes = count_words(md_text).div_ceil(wpm);
    format!("{} min read", minutes)
}
