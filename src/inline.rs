use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::html::ElementNode;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

// The regex crate has no lookbehind, so matches preceded by `!` are
// filtered out in `extract_links`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Inline formatting of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpanKind::Plain => "plain",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// A run of inline text with a single kind of formatting.
///
/// `target` carries the URL of links and images and is `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub content: String,
    pub kind: SpanKind,
    pub target: Option<String>,
}

impl TextSpan {
    pub fn new(content: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, SpanKind::Plain)
    }

    pub fn with_target(content: impl Into<String>, kind: SpanKind, target: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind,
            target: Some(target.into()),
        }
    }

    /// Convert this span into an element tree leaf.
    pub fn to_node(&self) -> Result<ElementNode, ConvertError> {
        let node = match self.kind {
            SpanKind::Plain => ElementNode::text(&self.content),
            SpanKind::Bold => ElementNode::leaf("b", &self.content),
            SpanKind::Italic => ElementNode::leaf("i", &self.content),
            SpanKind::Code => ElementNode::leaf("code", &self.content),
            SpanKind::Link => {
                ElementNode::leaf("a", &self.content).with_attribute("href", self.require_target()?)
            }
            SpanKind::Image => ElementNode::leaf("img", "")
                .with_attribute("src", self.require_target()?)
                .with_attribute("alt", &self.content),
        };
        Ok(node)
    }

    fn require_target(&self) -> Result<&str, ConvertError> {
        self.target
            .as_deref()
            .ok_or(ConvertError::MissingTarget { kind: self.kind })
    }
}

/// Split the plain spans in `spans` on `delimiter`, marking every other
/// fragment as `kind`. Non-plain spans pass through untouched.
///
/// Empty fragments are dropped, so `**` around nothing yields no span.
pub fn split_by_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>, ConvertError> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let fragments: Vec<&str> = span.content.split(delimiter).collect();
        if fragments.len() % 2 == 0 {
            return Err(ConvertError::UnbalancedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }
        for (i, fragment) in fragments.into_iter().enumerate() {
            if fragment.is_empty() {
                continue;
            }
            let fragment_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(TextSpan::new(fragment, fragment_kind));
        }
    }
    Ok(out)
}

/// Find every `![alt](url)` in `text`, returning `(alt, url)` pairs.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// Find every `[text](url)` in `text` that is not an image.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| !text[..m.start()].ends_with('!'))
        })
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// Pull images out of plain spans.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_targets(spans, SpanKind::Image, extract_images, |alt, url| {
        format!("![{alt}]({url})")
    })
}

/// Pull links out of plain spans.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_targets(spans, SpanKind::Link, extract_links, |text, url| {
        format!("[{text}]({url})")
    })
}

fn split_targets(
    spans: Vec<TextSpan>,
    kind: SpanKind,
    extract: fn(&str) -> Vec<(&str, &str)>,
    markup: fn(&str, &str) -> String,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.kind != SpanKind::Plain {
            out.push(span);
            continue;
        }
        let mut rest = span.content.as_str();
        for (label, url) in extract(&span.content) {
            let Some((before, after)) = rest.split_once(markup(label, url).as_str()) else {
                continue;
            };
            if !before.is_empty() {
                out.push(TextSpan::plain(before));
            }
            out.push(TextSpan::with_target(label, kind, url));
            rest = after;
        }
        if !rest.is_empty() {
            out.push(TextSpan::plain(rest));
        }
    }
    out
}

/// Lex a line of Markdown into inline spans.
///
/// Stages run in a fixed order: bold, italic, code, images, links. Images
/// are extracted before links so `![a](u)` is never read as a link.
pub fn text_to_spans(text: &str) -> Result<Vec<TextSpan>, ConvertError> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_by_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_by_delimiter(spans, "_", SpanKind::Italic)?;
    let spans = split_by_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}
