use crate::block::{self, BlockType};
use crate::error::ConvertError;
use crate::html::ElementNode;
use crate::inline::{self, TextSpan};

/// Split markdown into trimmed, non-empty blocks separated by blank lines
pub fn markdown_to_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Parse markdown into a `div` holding one node per block.
///
/// A document with no blocks still builds; serializing it fails with
/// [`ConvertError::MissingChildren`].
pub fn build_document(markdown: &str) -> Result<ElementNode, ConvertError> {
    let children = markdown_to_blocks(markdown)
        .into_iter()
        .map(block_to_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ElementNode::container("div", children))
}

/// Build the element subtree for a single block
pub fn block_to_node(block: &str) -> Result<ElementNode, ConvertError> {
    let block_type = block::classify(block);
    log::debug!("Classified block as {block_type}: {:?}", first_line(block));

    match block_type {
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Heading => heading_to_node(block),
        BlockType::Code => Ok(code_to_node(block)),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, "ul"),
        BlockType::OrderedList => list_to_node(block, "ol"),
    }
}

/// Text of the first level-1 heading block, with the `# ` marker removed.
pub fn extract_title(markdown: &str) -> Result<String, ConvertError> {
    markdown_to_blocks(markdown)
        .into_iter()
        .filter(|block| block::classify(block) == BlockType::Heading)
        .find_map(|block| block.strip_prefix("# "))
        .map(str::to_string)
        .ok_or(ConvertError::MissingTitle)
}

fn text_to_children(text: &str) -> Result<Vec<ElementNode>, ConvertError> {
    inline::text_to_spans(text)?
        .iter()
        .map(TextSpan::to_node)
        .collect()
}

fn paragraph_to_node(block: &str) -> Result<ElementNode, ConvertError> {
    let text = block.replace('\n', " ");
    Ok(ElementNode::container("p", text_to_children(&text)?))
}

fn heading_to_node(block: &str) -> Result<ElementNode, ConvertError> {
    // The level comes from the first heading line, wherever it is, but the
    // marker is always cut from the start of the block.
    let level = block
        .split('\n')
        .find_map(block::heading_level)
        .unwrap_or(1);
    let text = skip_chars(block, level + 1);
    Ok(ElementNode::container(
        format!("h{level}"),
        text_to_children(text)?,
    ))
}

fn code_to_node(block: &str) -> ElementNode {
    // Drop the opening fence plus its newline and the closing fence. The
    // body is kept verbatim, without inline parsing.
    let body = trim_chars(block, 4, 3);
    let code = ElementNode::container("code", vec![ElementNode::text(body)]);
    ElementNode::container("pre", vec![code])
}

fn quote_to_node(block: &str) -> Result<ElementNode, ConvertError> {
    let mut text = String::new();
    for line in block.split('\n') {
        text.push_str(skip_chars(line, 1));
        text.push(' ');
    }
    Ok(ElementNode::container(
        "blockquote",
        text_to_children(text.trim())?,
    ))
}

fn list_to_node(block: &str, tag: &str) -> Result<ElementNode, ConvertError> {
    let items = block
        .split('\n')
        .map(|line| -> Result<ElementNode, ConvertError> {
            let content = line.split_once(' ').map_or(line, |(_, rest)| rest);
            Ok(ElementNode::container("li", text_to_children(content)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ElementNode::container(tag, items))
}

fn first_line(block: &str) -> &str {
    block.split('\n').next().unwrap_or_default()
}

/// `s` without its first `n` characters.
fn skip_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or("", |(i, _)| &s[i..])
}

/// `s` without its first `head` and last `tail` characters, or empty if
/// those overlap.
fn trim_chars(s: &str, head: usize, tail: usize) -> &str {
    let len = s.chars().count();
    if head + tail >= len {
        return "";
    }
    let start = s.char_indices().nth(head).map_or(s.len(), |(i, _)| i);
    let end = s.char_indices().nth(len - tail).map_or(s.len(), |(i, _)| i);
    &s[start..end]
}
