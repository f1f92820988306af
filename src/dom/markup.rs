//! logos-based tokenizer, parser and serializer for a small HTML subset.
//!
//! Enough HTML to describe a host page: elements, quoted / unquoted / boolean
//! attributes, text, comments, void elements and `/>` self-closing tags.
//! Whitespace-only text is dropped. The parsed tree hangs off a synthetic
//! `#document` node, which is also the [`Dom`] root.

use logos::Logos;

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::error::MarkupError;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Top-level markup token.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum MarkupToken {
    /// `<!-- ... -->`
    #[regex(r"<!--([^-]|-[^-])*-->")]
    Comment,

    /// Opening tag with its attributes: `<a href="" class="x">`.
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9-]*([^>"']|"[^"]*"|'[^']*')*>"#)]
    OpenTag,

    /// Closing tag: `</a>`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n]*>")]
    CloseTag,

    /// Character data between tags.
    #[regex(r"[^<]+")]
    Text,
}

/// Token inside an opening tag, after the tag name.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum AttrToken {
    #[regex(r#"[^ \t\n\r\f"'<>/=]+"#)]
    Name,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[token("/")]
    Slash,
}

/// Tokenize markup into `(token, text)` pairs.
///
/// Unlexable input yields an error carrying its byte offset.
pub fn tokenize(input: &str) -> Result<Vec<(MarkupToken, &str, usize)>, MarkupError> {
    let mut out = Vec::new();
    for (result, span) in MarkupToken::lexer(input).spanned() {
        match result {
            Ok(token) => out.push((token, &input[span.clone()], span.start)),
            Err(()) => {
                return Err(MarkupError::UnexpectedInput {
                    offset: span.start,
                    snippet: snippet(input, span.start),
                })
            }
        }
    }
    Ok(out)
}

/// Parse markup into a fresh [`Dom`]. Returns the DOM and its document node.
pub fn parse(input: &str) -> Result<(Dom, NodeId), MarkupError> {
    let mut dom = Dom::new();
    let document = dom.insert(NodeData::document());
    let mut open: Vec<NodeId> = vec![document];

    for (token, text, offset) in tokenize(input)? {
        match token {
            MarkupToken::Comment => {}
            MarkupToken::Text => {
                if text.trim().is_empty() {
                    continue;
                }
                let parent = current(&open, document);
                dom.insert_child(parent, NodeData::text(decode_entities(text)));
            }
            MarkupToken::OpenTag => {
                let (data, self_closing) = parse_open_tag(text, offset)?;
                let is_void = VOID_ELEMENTS.contains(&data.tag.as_str());
                let parent = current(&open, document);
                let node = dom.insert_child(parent, data);
                if !self_closing && !is_void {
                    open.push(node);
                }
            }
            MarkupToken::CloseTag => {
                let name = text[2..text.len() - 1].trim().to_ascii_lowercase();
                if VOID_ELEMENTS.contains(&name.as_str()) {
                    continue;
                }
                if open.len() == 1 {
                    return Err(MarkupError::StrayCloseTag { found: name, offset });
                }
                let top = current(&open, document);
                let expected = dom.get(top).map(|data| data.tag.clone()).unwrap_or_default();
                if expected != name {
                    return Err(MarkupError::UnexpectedCloseTag {
                        expected,
                        found: name,
                        offset,
                    });
                }
                open.pop();
            }
        }
    }

    if open.len() > 1 {
        let top = current(&open, document);
        let tag = dom.get(top).map(|data| data.tag.clone()).unwrap_or_default();
        return Err(MarkupError::UnclosedTag(tag));
    }
    Ok((dom, document))
}

/// Serialize the subtree at `node` to indented markup, two spaces per level.
///
/// An element whose only child is text is written on one line. The document
/// node itself is not written, only its children.
pub fn serialize(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    match dom.get(node) {
        Some(data) if !data.is_element() && !data.is_text() => {
            for &child in dom.children(node) {
                write_node(dom, child, 0, &mut out);
            }
        }
        Some(_) => write_node(dom, node, 0, &mut out),
        None => {}
    }
    out.truncate(out.trim_end().len());
    out
}

fn write_node(dom: &Dom, node: NodeId, depth: usize, out: &mut String) {
    let Some(data) = dom.get(node) else {
        return;
    };
    let indent = "  ".repeat(depth);
    if data.is_text() {
        let text = data.text.as_deref().unwrap_or_default();
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        out.push_str(&indent);
        out.push_str(&escape_text(&collapsed));
        out.push('\n');
        return;
    }

    out.push_str(&indent);
    out.push_str(&open_tag(data));
    if VOID_ELEMENTS.contains(&data.tag.as_str()) {
        out.push('\n');
        return;
    }

    let children = dom.children(node);
    let inline_text = match children {
        [] => Some(String::new()),
        [only] => dom
            .get(*only)
            .filter(|child| child.is_text())
            .map(|_| dom.text_content(node)),
        _ => None,
    };
    match inline_text {
        Some(text) => {
            out.push_str(&escape_text(&text));
        }
        None => {
            out.push('\n');
            for &child in children {
                write_node(dom, child, depth + 1, out);
            }
            out.push_str(&indent);
        }
    }
    out.push_str("</");
    out.push_str(&data.tag);
    out.push_str(">\n");
}

fn open_tag(data: &NodeData) -> String {
    let mut tag = format!("<{}", data.tag);
    if !data.classes.is_empty() {
        tag.push_str(&format!(" class=\"{}\"", escape_attr(&data.classes.join(" "))));
    }
    for (name, value) in &data.attributes {
        tag.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
    tag.push('>');
    tag
}

fn parse_open_tag(text: &str, offset: usize) -> Result<(NodeData, bool), MarkupError> {
    let inner = &text[1..text.len() - 1];
    let name_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(inner.len());
    let mut data = NodeData::new(&inner[..name_end]);
    let body = &inner[name_end..];
    let body_offset = offset + 1 + name_end;

    let mut self_closing = false;
    let mut pending: Option<String> = None;
    let mut awaiting_value = false;
    let mut lexer = AttrToken::lexer(body).spanned().peekable();

    while let Some((result, span)) = lexer.next() {
        let token = result.map_err(|()| MarkupError::UnexpectedInput {
            offset: body_offset + span.start,
            snippet: snippet(body, span.start),
        })?;
        let slice = &body[span.clone()];
        match token {
            AttrToken::Name if awaiting_value => {
                if let Some(name) = pending.take() {
                    data.set_attr(&name, decode_entities(slice));
                }
                awaiting_value = false;
            }
            AttrToken::Name => {
                if let Some(name) = pending.replace(slice.to_ascii_lowercase()) {
                    data.set_attr(&name, "");
                }
            }
            AttrToken::Equals if pending.is_some() && !awaiting_value => {
                awaiting_value = true;
            }
            AttrToken::DoubleQuoted | AttrToken::SingleQuoted if awaiting_value => {
                if let Some(name) = pending.take() {
                    data.set_attr(&name, decode_entities(&slice[1..slice.len() - 1]));
                }
                awaiting_value = false;
            }
            AttrToken::Slash if lexer.peek().is_none() && !awaiting_value => {
                self_closing = true;
            }
            _ => {
                return Err(MarkupError::UnexpectedInput {
                    offset: body_offset + span.start,
                    snippet: snippet(body, span.start),
                })
            }
        }
    }

    if awaiting_value {
        return Err(MarkupError::UnexpectedInput {
            offset: offset + text.len() - 1,
            snippet: ">".to_owned(),
        });
    }
    if let Some(name) = pending {
        data.set_attr(&name, "");
    }
    Ok((data, self_closing))
}

fn current(open: &[NodeId], document: NodeId) -> NodeId {
    open.last().copied().unwrap_or(document)
}

fn snippet(input: &str, start: usize) -> String {
    input[start..].chars().take(16).collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
