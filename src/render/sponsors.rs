use super::markup::{Element, Node};
use super::{Mount, Patch};
use crate::data::{Sponsor, Sponsors};

pub fn skeleton() -> Vec<Patch> {
    vec![Patch::replace(
        Mount::SponsorsList,
        vec![Element::new("div")
            .class("skeleton skeleton-text")
            .style("height", "100px")
            .style("width", "100%")
            .into()],
    )]
}

pub fn render(sponsors: &Sponsors) -> Vec<Patch> {
    let mut nodes: Vec<Node> = vec![Element::new("div")
        .class("sponsors-grid")
        .children(sponsors.items.iter().map(sponsor_card))
        .into()];

    if let Some(note) = &sponsors.note {
        nodes.push(
            Element::new("div")
                .class("fade-in")
                .style("margin-top", "2rem")
                .style("text-align", "center")
                .style("color", "var(--text-secondary)")
                .text(note)
                .into(),
        );
    }

    vec![Patch::replace(Mount::SponsorsList, nodes)]
}

/// Logo or bordered name card. Without a URL the card neither navigates nor
/// shows a pointer.
pub fn sponsor_card(sponsor: &Sponsor) -> Element {
    let card = Element::new("a").attr("href", sponsor.url().unwrap_or("#"));
    let card = match sponsor.url() {
        Some(_) => card.attr("target", "_blank"),
        None => card,
    };
    let card = card.class("sponsor-item fade-in");
    let card = if sponsor.url().is_none() {
        card.style("cursor", "default")
    } else {
        card
    };

    match sponsor.image() {
        Some(image) => card.child(
            Element::new("img")
                .attr("src", image)
                .attr("alt", &sponsor.name)
                .class("sponsor-logo"),
        ),
        None => card
            .style("display", "block")
            .style("padding", "1rem")
            .style("border", "1px solid var(--card-border)")
            .style("border-radius", "8px")
            .style("text-align", "center")
            .style("color", "var(--text-primary)")
            .text(&sponsor.name),
    }
}

/// True when the card leads somewhere when clicked.
pub fn is_clickable(card: &Element) -> bool {
    card.get_attr("target").is_some() && card.get_attr("href").is_some_and(|h| h != "#")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SponsorSet;
    use crate::render::markup::to_html;

    #[test]
    fn test_url_controls_clickability() {
        let with_url = sponsor_card(&Sponsor {
            name: "NSF".into(),
            url: Some("https://nsf.gov".into()),
            image: Some("img/nsf.png".into()),
        });
        assert!(is_clickable(&with_url));
        assert!(!with_url.to_html().contains("cursor"));

        let without_url = sponsor_card(&Sponsor {
            name: "Anonymous Donor".into(),
            url: None,
            image: None,
        });
        assert!(!is_clickable(&without_url));
        let html = without_url.to_html();
        assert!(html.starts_with("<a href=\"#\" class=\"sponsor-item fade-in\""));
        assert!(html.contains("cursor: default;"));
        assert!(html.ends_with(">Anonymous Donor</a>"));
    }

    #[test]
    fn test_render_grid_and_note() {
        let set: SponsorSet = serde_json::from_str(
            r#"{"items": [{"name": "NSF", "url": "https://nsf.gov", "image": "nsf.png"}, {"name": "DARPA"}], "note": "Thank you!"}"#,
        )
        .unwrap();
        let patches = render(&set.normalize());
        assert_eq!(patches[0].mount(), Mount::SponsorsList);

        let nodes = patches[0].nodes();
        assert_eq!(nodes.len(), 2);
        let html = to_html(nodes);
        assert!(html.starts_with("<div class=\"sponsors-grid\">"));
        assert!(html.contains("<img src=\"nsf.png\" alt=\"NSF\" class=\"sponsor-logo\">"));
        assert!(html.ends_with(">Thank you!</div>"));
    }

    #[test]
    fn test_legacy_shape_has_no_note() {
        let set: SponsorSet = serde_json::from_str(r#"[{"name": "NSF"}]"#).unwrap();
        let patches = render(&set.normalize());
        assert_eq!(patches[0].nodes().len(), 1);
    }
}
