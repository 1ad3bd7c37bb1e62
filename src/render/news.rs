use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::{Element, Node};
use super::{Mount, Patch};
use crate::data::NewsItem;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid markdown link regex"));

/// Turn every `[text](url)` into an anchor opening in a new tab.
pub fn linkify(content: &str) -> String {
    MARKDOWN_LINK
        .replace_all(content, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned()
}

/// One dated block per item, in the given order. Callers only invoke this for
/// pages with a news list.
pub fn render(items: &[NewsItem]) -> Vec<Patch> {
    let blocks: Vec<Node> = items
        .iter()
        .map(|item| {
            Element::new("div")
                .class("news-item fade-in")
                .child(Element::new("div").class("news-date").raw(&item.date))
                .child(
                    Element::new("div")
                        .class("news-content")
                        .raw(linkify(&item.content)),
                )
                .into()
        })
        .collect();

    vec![Patch::append(Mount::NewsList, blocks)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkify() {
        assert_eq!(
            linkify("Paper accepted at [OSDI](https://osdi.example) and [SOSP](https://sosp.example)!"),
            "Paper accepted at <a href=\"https://osdi.example\" target=\"_blank\">OSDI</a> and \
             <a href=\"https://sosp.example\" target=\"_blank\">SOSP</a>!"
        );
        assert_eq!(linkify("No links [here]"), "No links [here]");
        assert_eq!(linkify("[](empty)"), "[](empty)");
    }

    #[test]
    fn test_render_keeps_order() {
        let items = vec![
            NewsItem {
                date: "2026-09".into(),
                content: "Newest".into(),
            },
            NewsItem {
                date: "2026-01".into(),
                content: "Older".into(),
            },
        ];
        let patches = render(&items);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].mount(), Mount::NewsList);

        let html = crate::render::markup::to_html(patches[0].nodes());
        assert!(html.find("Newest").unwrap() < html.find("Older").unwrap());
        assert_eq!(html.matches("class=\"news-item fade-in\"").count(), 2);
        assert!(html.contains("<div class=\"news-date\">2026-09</div>"));
    }
}
