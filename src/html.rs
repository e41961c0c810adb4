use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

/// Attribute name/value pairs, rendered in insertion order
pub type Attributes = Vec<(String, String)>;

/// A node of the output HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Raw text with no wrapping element
    Text(String),
    /// An element whose content is a literal value
    Leaf {
        tag: String,
        value: String,
        attributes: Attributes,
    },
    /// An element whose content is its children
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attributes: Attributes,
    },
}

impl HtmlNode {
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Text(value.into())
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: tag.into(),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute to a [`HtmlNode::Leaf`] or [`HtmlNode::Parent`].
    ///
    /// Raw text has nowhere to carry attributes, so a [`HtmlNode::Text`] is
    /// returned unchanged.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Text(_) => {}
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => {
                attributes.push((name.into(), value.into()));
            }
        }
        self
    }

    /// Append a child to a [`HtmlNode::Parent`].
    ///
    /// Leaves and raw text cannot hold children; for them this does nothing.
    /// Build a parent with [`HtmlNode::parent`] when children are expected.
    pub fn push_child(&mut self, child: HtmlNode) {
        if let HtmlNode::Parent { children, .. } = self {
            children.push(child);
        }
    }

    /// Serialize this node and its descendants.
    ///
    /// A parent element with no children is an [`Error::MalformedElement`].
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Text(value) => out.push_str(value),
            HtmlNode::Leaf {
                tag,
                value,
                attributes,
            } => {
                open_tag(tag, attributes, out);
                out.push_str(value);
                close_tag(tag, out);
            }
            HtmlNode::Parent {
                tag,
                children,
                attributes,
            } => {
                if children.is_empty() {
                    return Err(Error::MalformedElement {
                        tag: tag.clone(),
                        reason: "neither a value nor children",
                    });
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Convert an inline span into its leaf node.
///
/// A link or image span without a URL is an [`Error::MalformedElement`].
pub fn span_to_node(span: &TextSpan) -> Result<HtmlNode> {
    let text = span.text();
    let node = match span.kind() {
        SpanKind::Plain => HtmlNode::text(text),
        SpanKind::Bold => HtmlNode::leaf("b", text),
        SpanKind::Italic => HtmlNode::leaf("i", text),
        SpanKind::Code => HtmlNode::leaf("code", text),
        SpanKind::Link => {
            HtmlNode::leaf("a", text).with_attribute("href", required_url(span, "a")?)
        }
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attribute("src", required_url(span, "img")?)
            .with_attribute("alt", text),
    };
    Ok(node)
}

fn required_url<'a>(span: &'a TextSpan, tag: &str) -> Result<&'a str> {
    span.url().ok_or_else(|| Error::MalformedElement {
        tag: tag.to_string(),
        reason: "link or image span has no url",
    })
}
