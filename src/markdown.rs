//! Markdown node tree consumed by the issue parser.
//!
//! The parser only needs a small view of a markdown document: a kind tag per
//! node, optional inline text, ordered children, and the destination of links.
//! [`parse_markdown`] builds that view with `pulldown-cmark` (strikethrough,
//! tables and task lists enabled); trees from other converters can be built
//! directly with the [`Node`] constructors.
//!
//! Consecutive inline text is merged into one [`NodeKind::Text`] node, with
//! soft line breaks kept as `\n`, so a text node covers a whole run of prose
//! between links, code spans and other inline markup.

use pulldown_cmark::{Event, Options, Parser, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Text,
    Link,
    Image,
    LineBreak,
    ThematicBreak,
    TaskListMarker,
    /// Inline code span.
    CodeSpan,
    /// Raw inline HTML.
    InlineHtml,
    /// Fenced or indented code block.
    BlockCode,
    /// Raw HTML block.
    BlockHtml,
    /// Anything else; treated as a plain container.
    Other,
}

impl NodeKind {
    /// Verbatim content that must never be scanned or descended into.
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            Self::CodeSpan | Self::InlineHtml | Self::BlockCode | Self::BlockHtml
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub children: Vec<Node>,
    /// Destination of link and image nodes.
    pub link: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
            link: None,
        }
    }

    /// A plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_text(NodeKind::Text, text)
    }

    /// A link node whose visible label is `children`.
    pub fn link(target: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            link: Some(target.into()),
            children,
            ..Self::new(NodeKind::Link)
        }
    }

    pub fn with_text(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(kind)
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    /// Append inline text, extending the previous text node if there is one.
    fn push_text(&mut self, text: &str) {
        if self.kind.is_opaque() {
            self.text.get_or_insert_with(String::new).push_str(text);
            return;
        }

        if let Some(last) = self.children.last_mut()
            && last.kind == NodeKind::Text
        {
            last.text.get_or_insert_with(String::new).push_str(text);
            return;
        }

        self.children.push(Node::text(text));
    }
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn node_for_tag(tag: Tag<'_>) -> Node {
    let kind = match tag {
        Tag::Link { dest_url, .. } => return Node::link(dest_url.to_string(), Vec::new()),
        Tag::Image { dest_url, .. } => {
            return Node {
                link: Some(dest_url.to_string()),
                ..Node::new(NodeKind::Image)
            };
        }
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { .. } => NodeKind::Heading,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(_) => NodeKind::BlockCode,
        Tag::HtmlBlock => NodeKind::BlockHtml,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        _ => NodeKind::Other,
    };
    Node::new(kind)
}

/// Attach a finished node to its parent.
fn close_node(stack: &mut Vec<Node>) {
    if stack.len() < 2 {
        return;
    }
    let Some(mut node) = stack.pop() else {
        return;
    };
    // Alt text is never a reference source.
    if node.kind == NodeKind::Image {
        node.children.clear();
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Convert a markdown document into its top-level nodes.
pub fn parse_markdown(body: &str) -> Vec<Node> {
    let mut stack = vec![Node::new(NodeKind::Other)];

    for event in Parser::new_ext(body, options()) {
        match event {
            Event::Start(tag) => stack.push(node_for_tag(tag)),
            Event::End(_) => close_node(&mut stack),
            event => {
                let Some(top) = stack.last_mut() else {
                    continue;
                };
                match event {
                    Event::Text(text) => top.push_text(&text),
                    Event::SoftBreak => top.push_text("\n"),
                    Event::Html(html) if top.kind == NodeKind::BlockHtml => top.push_text(&html),
                    Event::Html(html) => top
                        .children
                        .push(Node::with_text(NodeKind::BlockHtml, html.to_string())),
                    Event::Code(code) => top
                        .children
                        .push(Node::with_text(NodeKind::CodeSpan, code.to_string())),
                    Event::InlineHtml(html) => top
                        .children
                        .push(Node::with_text(NodeKind::InlineHtml, html.to_string())),
                    Event::HardBreak => top.children.push(Node::new(NodeKind::LineBreak)),
                    Event::Rule => top.children.push(Node::new(NodeKind::ThematicBreak)),
                    Event::TaskListMarker(_) => {
                        top.children.push(Node::new(NodeKind::TaskListMarker))
                    }
                    _ => {}
                }
            }
        }
    }

    while stack.len() > 1 {
        close_node(&mut stack);
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}
