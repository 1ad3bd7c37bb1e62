use super::markup::{Element, Node};
use super::skeleton;
use super::{Mount, Patch};
use crate::data::Teaching;

/// Role label placed above the course list in the current document shape.
pub const ROLE_LABEL: &str = "Instructor";

pub fn skeleton() -> Vec<Patch> {
    vec![Patch::replace(Mount::TeachingList, skeleton::text_lines(3))]
}

pub fn render(teaching: &Teaching) -> Vec<Patch> {
    let mut nodes: Vec<Node> = Vec::new();
    let list = Element::new("ul").style("list-style", "none");

    let list = match teaching {
        Teaching::Instructor(courses) => {
            nodes.push(
                Element::new("div")
                    .class("fade-in")
                    .style("margin-bottom", "0.5rem")
                    .child(
                        Element::new("strong")
                            .style("color", "var(--text-primary)")
                            .text(ROLE_LABEL),
                    )
                    .into(),
            );
            list.children(courses.iter().map(|course| {
                Element::new("li")
                    .class("fade-in")
                    .style("margin-bottom", "0.5rem")
                    .style("margin-left", "1rem")
                    .style("color", "var(--text-secondary)")
                    .text(course)
            }))
        }
        // Legacy entries may carry markup.
        Teaching::Legacy(courses) => {
            list.children(courses.iter().map(|course| Element::new("li").raw(course)))
        }
    };

    nodes.push(list.into());
    vec![Patch::replace(Mount::TeachingList, nodes)]
}
