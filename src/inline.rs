//! Inline span parsing.
//!
//! Text is split into [`TextSpan`]s by a fixed sequence of passes:
//! images, links, then the `**`, `_` and `` ` `` delimiters. Each pass only
//! rewrites spans that are still plain, so a `_` inside an image URL is never
//! read as italic.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Delimiter passes in the order they must run.
const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Parse inline markdown into an ordered list of spans.
///
/// An empty input yields a single empty plain span.
pub fn parse_inline(text: &str) -> Result<Vec<TextSpan>> {
    if text.is_empty() {
        return Ok(vec![TextSpan::plain("")]);
    }

    let mut spans = vec![TextSpan::plain(text)];
    spans = split_images(spans);
    spans = split_links(spans);
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, kind)?;
    }
    Ok(spans)
}

/// `(alt, url)` pairs for every `![alt](url)` in `text`.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
    image_matches(text)
        .into_iter()
        .map(|m| (m.text.to_string(), m.url.to_string()))
        .collect()
}

/// `(anchor, url)` pairs for every `[anchor](url)` in `text` not preceded by `!`.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
    link_matches(text)
        .into_iter()
        .map(|m| (m.text.to_string(), m.url.to_string()))
        .collect()
}

/// Split plain spans around image syntax.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, image_matches, |alt, url| TextSpan::image(alt, url))
}

/// Split plain spans around link syntax.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, link_matches, |text, url| TextSpan::link(text, url))
}

/// Split plain spans on `delimiter`, alternating plain and `kind` segments.
///
/// Empty segments are dropped. An odd number of delimiters in any one span is
/// an [`Error::UnterminatedDelimiter`].
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let sections: Vec<&str> = span.text().split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(Error::UnterminatedDelimiter { delimiter });
        }

        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            let section_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(TextSpan::styled(section_kind, section));
        }
    }

    Ok(out)
}

/// A `[text](url)` match and the byte range it covers.
struct MarkupMatch<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    url: &'a str,
}

fn image_matches(text: &str) -> Vec<MarkupMatch<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .map(|caps| markup_match(&caps))
        .collect()
}

// The regex crate has no look-behind, so the preceding byte is checked here.
fn link_matches(text: &str) -> Vec<MarkupMatch<'_>> {
    LINK_RE
        .captures_iter(text)
        .map(|caps| markup_match(&caps))
        .filter(|m| !text[..m.start].ends_with('!'))
        .collect()
}

fn markup_match<'a>(caps: &Captures<'a>) -> MarkupMatch<'a> {
    let whole = caps.get_match();
    MarkupMatch {
        start: whole.start(),
        end: whole.end(),
        text: caps.get(1).map_or("", |m| m.as_str()),
        url: caps.get(2).map_or("", |m| m.as_str()),
    }
}

fn split_matches(
    spans: Vec<TextSpan>,
    find: fn(&str) -> Vec<MarkupMatch<'_>>,
    make: fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.text();
        let matches = find(text);
        if matches.is_empty() {
            out.push(TextSpan::plain(text));
            continue;
        }

        let mut cursor = 0;
        for m in matches {
            if m.start > cursor {
                out.push(TextSpan::plain(&text[cursor..m.start]));
            }
            out.push(make(m.text, m.url));
            cursor = m.end;
        }
        if cursor < text.len() {
            out.push(TextSpan::plain(&text[cursor..]));
        }
    }

    out
}
