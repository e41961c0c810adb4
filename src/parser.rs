use crate::block::BlockType;
use crate::error::Result;
use crate::html::{HtmlNode, span_to_node};
use crate::inline::parse_inline;

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 6;

/// Split markdown into blocks separated by blank lines.
///
/// `\r\n` line endings are treated as `\n`. Each block and each of its lines
/// is trimmed, and blocks left empty are dropped.
pub fn parse_blocks(markdown: &str) -> Vec<String> {
    let markdown = markdown.replace("\r\n", "\n");
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| block.lines().map(str::trim).collect::<Vec<_>>().join("\n"))
        .collect()
}

/// Classify a block. Anything unrecognised is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading(level);
    }

    if block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    let ordered = lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)));
    if ordered {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Leading `#` count when it is 1..=6 and followed by a space.
fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=MAX_HEADING_LEVEL).contains(&hashes) && block[hashes..].starts_with(' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}

/// Build the `<div>` tree for a markdown document, one child per block.
pub fn build_document(markdown: &str) -> Result<HtmlNode> {
    let mut root = HtmlNode::parent("div", Vec::new());

    for block in parse_blocks(markdown) {
        let node = match classify(&block) {
            BlockType::Paragraph => text_to_node("p", &join_lines(block.split('\n')))?,
            BlockType::Heading(level) => heading_to_node(&block, level)?,
            BlockType::Code => code_to_node(&block),
            BlockType::Quote => quote_to_node(&block)?,
            BlockType::UnorderedList => list_to_node("ul", &block, strip_bullet)?,
            BlockType::OrderedList => list_to_node("ol", &block, strip_number)?,
        };
        root.push_child(node);
    }

    Ok(root)
}

/// Inline-parse `text` into an element with the given tag.
///
/// A lone plain span becomes the element's value instead of a child.
fn text_to_node(tag: &str, text: &str) -> Result<HtmlNode> {
    let spans = parse_inline(text)?;
    if let [span] = spans.as_slice() {
        if span.is_plain() {
            return Ok(HtmlNode::leaf(tag, span.text()));
        }
    }
    let children = spans.iter().map(span_to_node).collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent(tag, children))
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join(" ")
}

fn heading_to_node(block: &str, level: u8) -> Result<HtmlNode> {
    let tag = format!("h{level}");
    let text = join_lines(block.split('\n'));
    let content = text[usize::from(level)..].trim();
    if content.is_empty() {
        return Ok(HtmlNode::leaf(tag, ""));
    }
    text_to_node(&tag, content)
}

// Code content is literal and never inline-parsed.
fn code_to_node(block: &str) -> HtmlNode {
    let lines: Vec<&str> = block.split('\n').collect();
    let inner = if lines.len() > 2 {
        &lines[1..lines.len() - 1]
    } else {
        &[][..]
    };

    let mut content = inner.join("\n");
    if !content.ends_with('\n') {
        content.push('\n');
    }

    let code = HtmlNode::parent("code", vec![HtmlNode::text(content)]);
    HtmlNode::parent("pre", vec![code])
}

fn quote_to_node(block: &str) -> Result<HtmlNode> {
    let lines = block.split('\n').map(|line| {
        line.strip_prefix('>')
            .map(str::trim_start)
            .unwrap_or(line)
    });
    text_to_node("blockquote", &join_lines(lines))
}

fn list_to_node(tag: &str, block: &str, strip_marker: fn(&str) -> &str) -> Result<HtmlNode> {
    let mut items = Vec::new();
    for line in block.split('\n').map(str::trim) {
        if line.is_empty() {
            continue;
        }
        items.push(text_to_node("li", strip_marker(line))?);
    }
    Ok(HtmlNode::parent(tag, items))
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
}

/// Strip a leading `{n}.` marker and the single space after it.
fn strip_number(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(markdown: &str) -> String {
        build_document(markdown).unwrap().to_html().unwrap()
    }

    #[test]
    fn blocks_are_trimmed_and_separated() {
        let md = "
    This is **bolded** paragraph

    This is another paragraph with _italic_ text and `code` here
This is the same paragraph on a new line

    - This is a list
    - with items
    ";
        assert_eq!(
            parse_blocks(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
                "- This is a list\n- with items",
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("  \n\n  ")]
    #[case("\n\n\n\n")]
    fn blank_input_has_no_blocks(#[case] md: &str) {
        assert!(parse_blocks(md).is_empty());
    }

    #[test]
    fn internal_lines_are_trimmed() {
        assert_eq!(
            parse_blocks("This is text with\n            internal newlines"),
            vec!["This is text with\ninternal newlines"]
        );
    }

    #[test]
    fn crlf_line_endings_separate_blocks() {
        assert_eq!(
            parse_blocks("# Title\r\n\r\nSecond paragraph\r\nsame block"),
            vec!["# Title", "Second paragraph\nsame block"]
        );
        assert_eq!(
            render("# Title\r\n\r\nSecond paragraph"),
            "<div><h1>Title</h1><p>Second paragraph</p></div>"
        );
    }

    #[test]
    fn extra_blank_lines_between_blocks() {
        assert_eq!(parse_blocks("one\n\n\n\ntwo"), vec!["one", "two"]);
    }

    #[rstest]
    #[case("# h", 1)]
    #[case("## h", 2)]
    #[case("### h", 3)]
    #[case("#### h", 4)]
    #[case("##### h", 5)]
    #[case("###### h", 6)]
    fn heading_levels(#[case] block: &str, #[case] level: u8) {
        assert_eq!(classify(block), BlockType::Heading(level));
    }

    #[rstest]
    #[case("####### too many")]
    #[case("#no space")]
    #[case("this is a paragraph\n# with a heading")]
    #[case("")]
    #[case("-no space")]
    #[case("1.no space")]
    #[case("2. a\n3. b")]
    #[case("1. a\n3. b")]
    #[case("> line 1\nline 2")]
    fn falls_back_to_paragraph(#[case] block: &str) {
        assert_eq!(classify(block), BlockType::Paragraph);
    }

    #[rstest]
    #[case("```this is a code block```", BlockType::Code)]
    #[case("```\nfn main() {}\n```", BlockType::Code)]
    #[case("> this is a quote", BlockType::Quote)]
    #[case("> line 1\n>line 2", BlockType::Quote)]
    #[case("- one\n- two", BlockType::UnorderedList)]
    #[case("1. a\n2. b\n3. c", BlockType::OrderedList)]
    fn block_types(#[case] block: &str, #[case] expected: BlockType) {
        assert_eq!(classify(block), expected);
    }

    #[test]
    fn headings_with_inline_markup() {
        assert_eq!(
            render("# Heading 1\n\n## Heading 2\n\n### Heading 3 with **bold**"),
            "<div><h1>Heading 1</h1><h2>Heading 2</h2><h3>Heading 3 with <b>bold</b></h3></div>"
        );
    }

    #[test]
    fn empty_heading_text() {
        let node = heading_to_node("## ", 2).unwrap();
        assert_eq!(node.to_html().unwrap(), "<h2></h2>");
    }

    #[test]
    fn heading_extra_spaces_are_trimmed() {
        assert_eq!(render("#   spaced out"), "<div><h1>spaced out</h1></div>");
    }

    #[test]
    fn paragraph_lines_join_with_spaces() {
        let md = "
This is **bolded** paragraph
text in a p
tag here

This is another paragraph with _italic_ text and `code` here
";
        assert_eq!(
            render(md),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p>\
             <p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn code_block_is_literal() {
        let md = "```\nThis is text that _should_ remain\nthe **same** even with inline stuff\n```";
        assert_eq!(
            render(md),
            "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn code_block_drops_language_line() {
        assert_eq!(
            render("```rust\nlet x = 1;\n```"),
            "<div><pre><code>let x = 1;\n</code></pre></div>"
        );
    }

    #[test]
    fn quote_lines_are_joined() {
        assert_eq!(
            render("> first line\n> with **bold**\n>tight"),
            "<div><blockquote>first line with <b>bold</b> tight</blockquote></div>"
        );
    }

    #[test]
    fn unordered_list_items() {
        assert_eq!(
            render("- plain item\n- [a link](https://x.dev)"),
            r#"<div><ul><li>plain item</li><li><a href="https://x.dev">a link</a></li></ul></div>"#
        );
    }

    #[test]
    fn ordered_list_items() {
        assert_eq!(
            render("1. first\n2. _second_\n3. third"),
            "<div><ol><li>first</li><li><i>second</i></li><li>third</li></ol></div>"
        );
    }

    #[rstest]
    #[case("12. twelve", "twelve")]
    #[case("3.tight", "tight")]
    #[case("no marker", "no marker")]
    #[case("7 no dot", "7 no dot")]
    fn number_markers(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(strip_number(line), expected);
    }

    #[rstest]
    #[case("- dash", "dash")]
    #[case("* star", "star")]
    fn bullet_markers(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(strip_bullet(line), expected);
    }

    #[test]
    fn single_plain_span_becomes_a_value() {
        let node = build_document("just text").unwrap();
        assert_eq!(node, HtmlNode::parent("div", vec![HtmlNode::leaf("p", "just text")]));
    }

    #[test]
    fn inline_errors_propagate() {
        assert!(build_document("fine\n\nbroken **bold").is_err());
    }
}
