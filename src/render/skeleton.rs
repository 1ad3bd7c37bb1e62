//! Loading placeholders shown while a document is in flight.

use super::markup::{Element, Node};

pub fn title() -> Node {
    Element::new("div").class("skeleton skeleton-title").into()
}

pub fn text_line() -> Node {
    Element::new("div").class("skeleton skeleton-text").into()
}

pub fn text_line_width(width: &str) -> Node {
    Element::new("div")
        .class("skeleton skeleton-text")
        .style("width", width)
        .into()
}

pub fn card() -> Element {
    Element::new("div").class("skeleton skeleton-card")
}

/// `count` placeholder lines of text.
pub fn text_lines(count: usize) -> Vec<Node> {
    (0..count).map(|_| text_line()).collect()
}

pub fn is_skeleton(node: &Node) -> bool {
    match node {
        Node::Element(element) => element.has_class("skeleton"),
        _ => false,
    }
}
