use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// Block-level structure of a blank-line separated chunk of Markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered list",
            BlockType::OrderedList => "ordered list",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(BlockType::Paragraph),
            "heading" => Ok(BlockType::Heading),
            "code" => Ok(BlockType::Code),
            "quote" => Ok(BlockType::Quote),
            "unordered list" => Ok(BlockType::UnorderedList),
            "ordered list" => Ok(BlockType::OrderedList),
            _ => Err(ConvertError::InvalidBlockType {
                name: s.to_string(),
            }),
        }
    }
}

const CODE_FENCE: &str = "```";

/// Classify a trimmed block. The first matching rule wins, in the order
/// heading, code, quote, unordered list, ordered list.
pub fn classify(block: &str) -> BlockType {
    if is_heading(block) {
        BlockType::Heading
    } else if is_code(block) {
        BlockType::Code
    } else if is_quote(block) {
        BlockType::Quote
    } else if is_unordered_list(block) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Number of leading `#` on `line` if it opens a heading: one to six
/// hashes followed by a space.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

/// True if any line of the block opens a heading.
///
/// Known defect kept for compatibility: a paragraph with `# word` on a later
/// line is treated as a heading.
pub fn is_heading(block: &str) -> bool {
    block.split('\n').any(|line| heading_level(line).is_some())
}

pub fn is_code(block: &str) -> bool {
    let lines: Vec<&str> = block.split('\n').collect();
    match lines.as_slice() {
        [only] => only.starts_with(CODE_FENCE) && only.ends_with(CODE_FENCE),
        [first, .., last] => first.starts_with(CODE_FENCE) && last.starts_with(CODE_FENCE),
        [] => false,
    }
}

pub fn is_quote(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with('>'))
}

pub fn is_unordered_list(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with("- "))
}

/// Lines must be numbered `1. `, `2. `, ... with no gaps.
pub fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("# h1", Some(1))]
    #[case("###### h6", Some(6))]
    #[case("####### seven", None)]
    #[case("#no space", None)]
    #[case("#", None)]
    #[case("plain", None)]
    fn heading_levels(#[case] line: &str, #[case] expected: Option<usize>) {
        assert_eq!(heading_level(line), expected);
    }

    #[rstest]
    #[case("# This is a heading", BlockType::Heading)]
    #[case("### Third level", BlockType::Heading)]
    #[case("#This is a bad heading", BlockType::Paragraph)]
    #[case("```This is a code block```", BlockType::Code)]
    #[case("```\nThis is a code block\n```", BlockType::Code)]
    #[case("```This is a bad code block", BlockType::Paragraph)]
    #[case(">This is a quote", BlockType::Quote)]
    #[case(">This is a quote\n>More quoting\n>Even more quote", BlockType::Quote)]
    #[case(">This is a quote\n>More quoting\nNot a quote?\n>So much", BlockType::Paragraph)]
    #[case("- This is an unordered list", BlockType::UnorderedList)]
    #[case("- one\n- two\n- three", BlockType::UnorderedList)]
    #[case("-This is not an unordered list", BlockType::Paragraph)]
    #[case("- one\n- two\n-Oops, bad list\n- four", BlockType::Paragraph)]
    #[case("1. a\n2. b\n3. c", BlockType::OrderedList)]
    #[case("1. a\n2. b\n4. c", BlockType::Paragraph)]
    #[case("10. a\n11. b\n12. c", BlockType::Paragraph)]
    #[case("This is a normal paragraph", BlockType::Paragraph)]
    fn classify_blocks(#[case] block: &str, #[case] expected: BlockType) {
        assert_eq!(classify(block), expected);
    }

    #[test]
    fn long_ordered_list() {
        let block = (1..=11)
            .map(|n| format!("{n}. item {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(classify(&block), BlockType::OrderedList);
    }

    #[test]
    fn heading_on_later_line_wins() {
        // Compatibility: any heading line makes the whole block a heading.
        assert_eq!(classify("some text\n## later heading"), BlockType::Heading);
    }

    #[test]
    fn heading_takes_precedence_over_list() {
        assert_eq!(classify("- item\n# heading"), BlockType::Heading);
    }

    #[test]
    fn bare_fence_is_code() {
        assert_eq!(classify("```"), BlockType::Code);
    }

    #[test]
    fn code_fence_precedes_quote() {
        assert_eq!(classify("```\n> quoted\n```"), BlockType::Code);
    }

    #[test]
    fn classification_is_idempotent() {
        let block = "- a\n- b\n- c";
        assert_eq!(classify(block), classify(block));
    }

    #[test]
    fn block_type_names_round_trip() {
        for block_type in [
            BlockType::Paragraph,
            BlockType::Heading,
            BlockType::Code,
            BlockType::Quote,
            BlockType::UnorderedList,
            BlockType::OrderedList,
        ] {
            assert_eq!(block_type.to_string().parse::<BlockType>(), Ok(block_type));
        }
    }

    #[test]
    fn unknown_block_type_name() {
        assert_eq!(
            "table".parse::<BlockType>(),
            Err(ConvertError::InvalidBlockType {
                name: "table".to_string()
            })
        );
    }
}
