//! Publication list with a year filter bar.
//!
//! [`PublicationBoard`] owns the filter state: the full item list, the distinct
//! years offered as buttons and the active selection. Every change goes
//! through [`PublicationBoard::set_filter`], which returns the patches that
//! bring the filter bar and the list up to date.

use super::markup::{Element, Node};
use super::skeleton;
use super::{Mount, MountSet, Patch};
use crate::data::{LinkNote, Publication, Publications, Year};

/// Filter key of the "All" button.
pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All,
    Year(Year),
}

impl Selection {
    /// `"all"` selects everything; any other label selects a year. `kind` is
    /// the button's `data-year-type`, so a numeric button selects the numeric
    /// year even when a text year has the same label.
    pub fn parse(label: &str, kind: Option<&str>) -> Self {
        if label == ALL_FILTER {
            Selection::All
        } else {
            Selection::Year(Year::from_label(label, kind))
        }
    }
}

pub fn skeleton() -> Vec<Patch> {
    vec![Patch::replace(
        Mount::PublicationsList,
        vec![
            skeleton::card().style("margin-bottom", "2rem").into(),
            skeleton::card().style("margin-bottom", "2rem").into(),
            skeleton::card().into(),
        ],
    )]
}

#[derive(Debug, Clone)]
pub struct PublicationBoard {
    items: Vec<Publication>,
    years: Vec<Year>,
    note: Option<LinkNote>,
    active: Selection,
}

impl PublicationBoard {
    pub fn new(publications: Publications) -> Self {
        let years = Year::distinct_descending(publications.items.iter().map(|p| p.year.as_ref()));
        PublicationBoard {
            items: publications.items,
            years,
            note: publications.note,
            active: Selection::All,
        }
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn active(&self) -> &Selection {
        &self.active
    }

    /// Items matching the active selection, in their original order. A year
    /// selection matches with loose equality.
    pub fn visible(&self) -> Vec<&Publication> {
        match &self.active {
            Selection::All => self.items.iter().collect(),
            Selection::Year(year) => self
                .items
                .iter()
                .filter(|p| p.year.as_ref().is_some_and(|y| y.loose_eq(year)))
                .collect(),
        }
    }

    /// Select `selection` and re-render the filter bar and the list.
    pub fn set_filter(&mut self, selection: Selection) -> Vec<Patch> {
        self.active = selection;

        let mut patches = Vec::new();
        if let Some(bar) = self.filter_bar() {
            patches.push(Patch::replace(Mount::PublicationsFilters, bar));
        }
        patches.push(Patch::replace(Mount::PublicationsList, self.list()));
        patches
    }

    /// Initial render: list, filter bar (when there are years and the page has
    /// a filter container) and the note, placed before the filter bar or,
    /// without one, before the list.
    pub fn render(&self, mounts: &MountSet) -> Vec<Patch> {
        let has_filters = mounts.contains(Mount::PublicationsFilters);

        let mut patches = vec![Patch::replace(Mount::PublicationsList, self.list())];
        if has_filters {
            if let Some(bar) = self.filter_bar() {
                patches.push(Patch::replace(Mount::PublicationsFilters, bar));
            }
        }

        if let Some(note) = &self.note {
            let anchor = if has_filters {
                Mount::PublicationsFilters
            } else {
                Mount::PublicationsList
            };
            patches.push(Patch::insert_before(anchor, vec![note_block(note)]));
        }

        patches
    }

    /// Index of the active button in [`Self::filter_bar`]: 0 for "All", then one
    /// per year. A year selection prefers a strictly equal year and falls back
    /// to a loosely equal one.
    pub fn active_index(&self) -> Option<usize> {
        match &self.active {
            Selection::All => Some(0),
            Selection::Year(year) => self
                .years
                .iter()
                .position(|y| y == year)
                .or_else(|| self.years.iter().position(|y| y.loose_eq(year)))
                .map(|i| i + 1),
        }
    }

    /// The "All" button followed by one button per year, newest first. `None`
    /// when no publication has a year.
    pub fn filter_bar(&self) -> Option<Vec<Node>> {
        if self.years.is_empty() {
            return None;
        }

        let active = self.active_index();
        let class = |i: usize| {
            if active == Some(i) {
                "filter-btn active"
            } else {
                "filter-btn"
            }
        };

        let all = Element::new("button")
            .class(class(0))
            .attr("data-filter", ALL_FILTER)
            .text("All");
        let years = self.years.iter().enumerate().map(|(i, year)| {
            Element::new("button")
                .class(class(i + 1))
                .attr("data-filter", year.label())
                .attr("data-year-type", year.kind())
                .text(year.label())
        });

        Some(std::iter::once(all).chain(years).map(Node::from).collect())
    }

    pub fn list(&self) -> Vec<Node> {
        self.visible().into_iter().map(publication_item).collect()
    }
}

fn publication_item(publication: &Publication) -> Node {
    let venue_line = Element::new("div")
        .child(Element::new("span").class("pub-venue").raw(&publication.venue))
        .children(publication.links.iter().map(|link| {
            Element::new("a")
                .attr("href", &link.url)
                .class("btn")
                .style("font-size", "0.8rem")
                .style("padding", "0.3rem 0.8rem")
                .style("margin-right", "0.5rem")
                .attr("target", "_blank")
                .raw(&link.text)
        }));

    let mut item = Element::new("div").class("pub-item fade-in");
    if let Some(year) = &publication.year {
        item = item
            .attr("data-year", year.label())
            .attr("data-year-type", year.kind());
    }

    item.child(Element::new("div").class("pub-title").raw(&publication.title))
        .child(Element::new("div").class("pub-authors").raw(&publication.authors))
        .child(venue_line)
        .into()
}

fn note_block(note: &LinkNote) -> Node {
    Element::new("div")
        .class("fade-in")
        .style("margin-bottom", "1.5rem")
        .style("text-align", "center")
        .style("color", "var(--text-secondary)")
        .child(
            Element::new("a")
                .attr("href", note.href())
                .attr("target", "_blank")
                .style("text-decoration", "underline")
                .style("color", "var(--accent-color)")
                .raw(note.text()),
        )
        .into()
}
