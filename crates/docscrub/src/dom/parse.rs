// ABOUTME: Builds the owned Document tree from markup using scraper's html5ever parser.
// ABOUTME: Rejects trees nested deeper than MAX_DEPTH, then converts ego_tree nodes into typed nodes.

use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use scraper::Html;

use super::node::{Document, Doctype, Element, Node};

/// Deepest node nesting accepted when building a Document.
pub const MAX_DEPTH: usize = 512;

/// Markup whose nesting exceeds [`MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("markup nested {depth} levels deep, limit is {limit}")]
pub struct NestingTooDeep {
    pub depth: usize,
    pub limit: usize,
}

impl Document {
    /// Parses a complete HTML document.
    pub fn parse(html: &str) -> Result<Self, NestingTooDeep> {
        let parsed = Html::parse_document(html);
        check_depth(parsed.tree.root())?;
        let nodes = parsed.tree.root().children().filter_map(convert).collect();
        Ok(Document { nodes })
    }

    /// Parses a standalone fragment. Only the fragment's own top-level nodes
    /// are kept; html5ever's synthetic `<html>` context element is dropped.
    pub fn parse_fragment(html: &str) -> Result<Self, NestingTooDeep> {
        let parsed = Html::parse_fragment(html);
        let root = parsed.root_element();
        check_depth(*root)?;
        let nodes = root.children().filter_map(convert).collect();
        Ok(Document { nodes })
    }
}

/// Deepest nesting below `root`, counting `root` as level 1.
pub fn nesting_depth(root: NodeRef<'_, scraper::Node>) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for edge in root.traverse() {
        match edge {
            Edge::Open(_) => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            Edge::Close(_) => depth -= 1,
        }
    }
    deepest
}

fn check_depth(root: NodeRef<'_, scraper::Node>) -> Result<(), NestingTooDeep> {
    let depth = nesting_depth(root);
    if depth > MAX_DEPTH {
        return Err(NestingTooDeep {
            depth,
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}

fn convert(node: NodeRef<'_, scraper::Node>) -> Option<Node> {
    match node.value() {
        scraper::Node::Text(text) => Some(Node::Text(String::from(&**text))),
        scraper::Node::Comment(comment) => Some(Node::Comment(String::from(&**comment))),
        scraper::Node::Doctype(doctype) => Some(Node::Doctype(Doctype {
            name: doctype.name().to_string(),
            public_id: doctype.public_id().to_string(),
            system_id: doctype.system_id().to_string(),
        })),
        scraper::Node::Element(el) => Some(Node::Element(Element {
            name: el.name().to_string(),
            attrs: el
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: node.children().filter_map(convert).collect(),
        })),
        _ => None,
    }
}
