/// The kind of an inline text span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A typed run of inline content.
///
/// `url` is only ever set for [`SpanKind::Link`] and [`SpanKind::Image`];
/// an absent URL and an empty one compare differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    kind: SpanKind,
    text: String,
    url: Option<String>,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(SpanKind::Plain, text)
    }

    /// A span without a URL. Use [`TextSpan::link`] or [`TextSpan::image`]
    /// for the kinds that carry one.
    pub fn styled(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Image,
            text: alt.into(),
            url: Some(url.into()),
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Block-level structure of a Markdown chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    /// Level is always within 1..=6
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}
