mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod site;

pub use block::{
    BlockType, classify, heading_level, is_code, is_heading, is_ordered_list, is_quote,
    is_unordered_list,
};
pub use config::{Config, SiteConfig, TemplateConfig};
pub use error::{ConvertError, Error, Result};
pub use html::{Attributes, ElementNode, serialize_attributes};
pub use inline::{
    SpanKind, TextSpan, extract_images, extract_links, split_by_delimiter, split_images,
    split_links, text_to_spans,
};
pub use parser::{block_to_node, build_document, markdown_to_blocks};
pub use site::{
    build_site, copy_dir_recursive, generate_page, generate_pages_recursive, prepare_output_dir,
    render_page,
};

/// Parse markdown into an element tree.
pub fn parse(markdown: &str) -> std::result::Result<ElementNode, ConvertError> {
    build_document(markdown)
}

/// Convert markdown to an HTML fragment wrapped in a `div`.
pub fn markdown_to_html(markdown: &str) -> std::result::Result<String, ConvertError> {
    parse(markdown)?.serialize()
}

/// Page title from the first level-1 heading.
///
/// Every generated page needs a title, so callers should treat
/// [`ConvertError::MissingTitle`] as fatal.
pub fn extract_title(markdown: &str) -> std::result::Result<String, ConvertError> {
    parser::extract_title(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_document() {
        assert_eq!(
            markdown_to_html("# Heading\n\nText with **bold** and _ital_ and `code`").unwrap(),
            "<div><h1>Heading</h1><p>Text with <b>bold</b> and <i>ital</i> and <code>code</code></p></div>"
        );
    }

    #[test]
    fn empty_document_fails() {
        assert_eq!(markdown_to_html(""), Err(ConvertError::MissingChildren));
    }

    #[test]
    fn title_of_document() {
        assert_eq!(extract_title("# Hello\n\nbody").unwrap(), "Hello");
        assert_eq!(extract_title("plain text only"), Err(ConvertError::MissingTitle));
    }
}
