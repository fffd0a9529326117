use crate::error::ConvertError;

/// HTML attributes, serialized in insertion order.
pub type Attributes = Vec<(String, String)>;

/// A node of the output element tree.
///
/// Structural problems (a leaf without text, a container without a tag or
/// children) are not rejected on construction. They surface as errors from
/// [`ElementNode::serialize`], so partially built trees can still be
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementNode {
    /// Terminal node. Without a tag the text is emitted as-is.
    Leaf {
        tag: Option<String>,
        text: Option<String>,
        attributes: Attributes,
    },
    /// Nesting node wrapping its children in `tag`.
    Container {
        tag: Option<String>,
        children: Vec<ElementNode>,
        attributes: Attributes,
    },
}

impl ElementNode {
    /// Raw text with no wrapping element.
    pub fn text(text: impl Into<String>) -> Self {
        ElementNode::Leaf {
            tag: None,
            text: Some(text.into()),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        ElementNode::Leaf {
            tag: Some(tag.into()),
            text: Some(text.into()),
            attributes: Vec::new(),
        }
    }

    pub fn container(tag: impl Into<String>, children: Vec<ElementNode>) -> Self {
        ElementNode::Container {
            tag: Some(tag.into()),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping earlier ones first.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            ElementNode::Leaf { attributes, .. } | ElementNode::Container { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            ElementNode::Leaf { tag, .. } | ElementNode::Container { tag, .. } => tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            ElementNode::Leaf { attributes, .. } | ElementNode::Container { attributes, .. } => {
                attributes
            }
        }
    }

    /// Render this node and its descendants to an HTML string.
    pub fn serialize(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), ConvertError> {
        match self {
            ElementNode::Leaf {
                tag,
                text,
                attributes,
            } => {
                let text = text.as_deref().ok_or(ConvertError::MissingValue)?;
                match tag {
                    None => out.push_str(text),
                    Some(tag) => {
                        open_tag(tag, attributes, out);
                        out.push_str(text);
                        close_tag(tag, out);
                    }
                }
            }
            ElementNode::Container {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_deref().ok_or(ConvertError::MissingTag)?;
                if children.is_empty() {
                    return Err(ConvertError::MissingChildren);
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

/// Render attributes as ` key="value"` pairs. Values are not escaped.
pub fn serialize_attributes(attributes: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&serialize_attributes(attributes));
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
