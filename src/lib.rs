mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
pub mod site;

pub use block::{BlockType, SpanKind, TextSpan};
pub use config::{Config, PathsConfig, SiteConfig};
pub use error::{Error, Result};
pub use html::{Attributes, HtmlNode, span_to_node};
pub use inline::{
    extract_markdown_images, extract_markdown_links, parse_inline, split_delimiter, split_images,
    split_links,
};
pub use parser::{build_document, classify, parse_blocks};

/// Convert markdown into a `<div>` node holding one child per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    parser::build_document(markdown)
}

/// Convert markdown straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_node(markdown)?.to_html()
}
