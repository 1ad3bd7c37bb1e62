use super::markup::{Element, Node};
use super::skeleton;
use super::{Mount, MountSet, Patch};
use crate::data::{Bio, Profile, ResearchSummary};

/// Label highlighted in the biography; only its first occurrence is wrapped.
pub const GOALS_LABEL: &str = "Goals:";

pub fn skeleton() -> Vec<Patch> {
    vec![
        Patch::replace(Mount::ProfileName, vec![skeleton::title()]),
        Patch::replace(
            Mount::ProfileBio,
            vec![
                skeleton::text_line(),
                skeleton::text_line(),
                skeleton::text_line_width("80%"),
            ],
        ),
    ]
}

/// Name, biography, link buttons and, when the profile advertises openings and
/// the page has a hero area, a hiring callout appended to it.
pub fn render(profile: &Profile, mounts: &MountSet) -> Vec<Patch> {
    let mut patches = vec![
        Patch::replace(Mount::ProfileName, vec![Node::text(&profile.name)]),
        Patch::replace(
            Mount::ProfileBio,
            vec![Node::raw(highlight_goals(&bio_html(&profile.bio)))],
        ),
    ];

    let links: Vec<Node> = profile
        .links
        .iter()
        .map(|link| {
            Element::new("a")
                .attr("href", &link.url)
                .class("btn")
                .attr("target", "_blank")
                .text(&link.text)
                .into()
        })
        .collect();
    if !links.is_empty() {
        patches.push(Patch::append(Mount::ProfileLinks, links));
    }

    if let Some(callout) = openings_callout(profile) {
        if mounts.contains(Mount::HeroText) {
            patches.push(Patch::append(Mount::HeroText, vec![callout.into()]));
        }
    }

    patches
}

pub fn render_research(summary: &ResearchSummary) -> Vec<Patch> {
    vec![Patch::replace(
        Mount::ResearchDesc,
        vec![Node::text(&summary.description)],
    )]
}

/// Biography markup: one paragraph per entry, or the single string as is.
pub fn bio_html(bio: &Bio) -> String {
    match bio {
        Bio::Paragraphs(paragraphs) => paragraphs
            .iter()
            .map(|p| format!("<p style=\"margin-bottom: 1rem;\">{}</p>", p))
            .collect(),
        Bio::Text(text) => text.clone(),
    }
}

/// Wrap the first `Goals:` in a highlight span. Case sensitive.
pub fn highlight_goals(html: &str) -> String {
    html.replacen(
        GOALS_LABEL,
        &format!("<span class=\"highlight-label\">{}</span>", GOALS_LABEL),
        1,
    )
}

fn openings_callout(profile: &Profile) -> Option<Element> {
    let openings = profile.openings.as_deref().filter(|o| !o.is_empty())?;
    Some(
        Element::new("p")
            .class("fade-in")
            .style("margin-top", "1.5rem")
            .style("border-left", "3px solid var(--accent-color)")
            .style("padding-left", "1rem")
            .style("font-style", "italic")
            .style("color", "#d73a49")
            .child(Element::new("strong").text("Hiring:"))
            .raw(format!(" {}", openings)),
    )
}
