use super::markup::{Element, Node};
use super::skeleton;
use super::{Mount, Patch};
use crate::data::{Member, TeamNote, TeamRoster};

pub fn skeleton() -> Vec<Patch> {
    vec![Patch::replace(
        Mount::TeamList,
        vec![Element::new("div")
            .class("card-grid")
            .children([skeleton::card(), skeleton::card(), skeleton::card()])
            .into()],
    )]
}

pub fn render(roster: &TeamRoster) -> Vec<Patch> {
    let mut nodes = Vec::new();

    if let Some(photo) = roster.group_photo() {
        nodes.push(
            Element::new("div")
                .class("fade-in")
                .style("margin-bottom", "3rem")
                .style("text-align", "center")
                .child(
                    Element::new("img")
                        .attr("src", photo)
                        .attr("alt", "Lab Group Photo")
                        .style("max-width", "80%")
                        .style("border-radius", "12px")
                        .style("border", "1px solid var(--card-border)"),
                )
                .into(),
        );
    }

    for (title, members) in roster.categories() {
        if members.is_empty() {
            continue;
        }
        nodes.push(Element::new("h3").text(title).into());
        nodes.push(
            Element::new("div")
                .class("card-grid")
                .children(members.iter().map(member_card))
                .into(),
        );
    }

    if let Some(note) = roster.note.as_ref().and_then(note_block) {
        nodes.push(note.into());
    }

    vec![Patch::replace(Mount::TeamList, nodes)]
}

/// Outbound card for a member; members without a link get an inert card.
pub fn member_card(member: &Member) -> Element {
    let avatar = match member.image() {
        Some(image) => Element::new("div").class("team-avatar").child(
            Element::new("img")
                .attr("src", image)
                .attr("alt", &member.name)
                .class("team-avatar-img"),
        ),
        None => Element::new("div")
            .class("team-avatar")
            .text(member.initials()),
    };

    let card = Element::new("a")
        .attr("href", member.link().unwrap_or("#"))
        .class("card team-member fade-in")
        .style("color", "inherit")
        .style("text-decoration", "none");
    let card = match member.link() {
        Some(_) => card.attr("target", "_blank"),
        None => card.style("cursor", "default"),
    };

    card.child(avatar).child(
        Element::new("div")
            .class("team-info")
            .child(Element::new("h4").raw(&member.name))
            .child(Element::new("p").raw(&member.info)),
    )
}

fn note_block(note: &TeamNote) -> Option<Element> {
    let block = Element::new("div")
        .class("fade-in")
        .style("margin-top", "2rem")
        .style("text-align", "center")
        .style("color", "#d73a49")
        .style("font-style", "italic");

    match note {
        TeamNote::Text(text) if text.is_empty() => None,
        TeamNote::Text(text) => Some(block.child(Node::text(text))),
        TeamNote::Link(link) => Some(
            block.child(
                Element::new("a")
                    .attr("href", link.href())
                    .attr("target", "_blank")
                    .style("text-decoration", "underline")
                    .style("color", "var(--accent-color)")
                    .raw(link.text()),
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::to_html;

    fn roster(json: &str) -> TeamRoster {
        serde_json::from_str(json).unwrap()
    }

    fn rendered(json: &str) -> String {
        let patches = render(&roster(json));
        assert_eq!(patches.len(), 1);
        to_html(patches[0].nodes())
    }

    #[test]
    fn test_fixed_category_order() {
        let html = rendered(
            r#"{
                "alumni": [{"name": "Old Timer", "info": "Now at X"}],
                "intern": [{"name": "Summer Intern", "info": ""}],
                "PI": [{"name": "Ada Lovelace", "info": "Professor"}],
                "phd": [{"name": "Grace", "info": "Year 2"}]
            }"#,
        );
        let pi = html.find("Principal Investigator (PI)").unwrap();
        let phd = html.find("PhD Students").unwrap();
        let interns = html.find("Interns").unwrap();
        let alumni = html.find("Alumni").unwrap();
        assert!(pi < phd && phd < interns && interns < alumni);
        assert!(!html.contains("MS Students"));
        assert!(!html.contains("Undergraduate Students"));
        assert_eq!(html.matches("<h3>").count(), 4);
        assert_eq!(html.matches("class=\"card-grid\"").count(), 4);
    }

    #[test]
    fn test_empty_categories_render_nothing() {
        let html = rendered(r#"{"PI": [], "phd": null}"#);
        assert_eq!(html, "");
    }

    #[test]
    fn test_avatar_initials_and_image() {
        let card = member_card(&Member {
            name: "Ada Lovelace".into(),
            info: "PI".into(),
            image: None,
            link: None,
        })
        .to_html();
        assert!(card.contains("<div class=\"team-avatar\">AL</div>"));
        assert!(card.contains("href=\"#\""));
        assert!(card.contains("cursor: default;"));
        assert!(!card.contains("target"));

        let card = member_card(&Member {
            name: "Grace".into(),
            info: String::new(),
            image: Some("img/grace.jpg".into()),
            link: Some("https://grace.example".into()),
        })
        .to_html();
        assert!(card.contains("<img src=\"img/grace.jpg\" alt=\"Grace\" class=\"team-avatar-img\">"));
        assert!(card.contains("href=\"https://grace.example\""));
        assert!(card.contains("target=\"_blank\""));
    }

    #[test]
    fn test_group_photo_and_notes() {
        let html = rendered(
            r#"{"group_photo": "img/lab.jpg", "PI": [{"name": "P"}], "note": "We are hiring"}"#,
        );
        assert!(html.starts_with("<div class=\"fade-in\""));
        assert!(html.contains("alt=\"Lab Group Photo\""));
        assert!(html.ends_with("We are hiring</div>"));

        let html = rendered(r#"{"note": {"link": "https://apply.example"}}"#);
        assert!(html.contains("<a href=\"https://apply.example\" target=\"_blank\""));
        assert!(html.ends_with("</a></div>"));

        let html = rendered(r#"{"note": {}}"#);
        assert!(html.contains("<a href=\"#\""));
    }
}
