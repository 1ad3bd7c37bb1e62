//! Section renderers.
//!
//! Every renderer is a pure function from a decoded document (and the set of
//! mount points the page offers) to a list of [`Patch`]es. Applying patches to
//! an actual page is the job of [`crate::page::Document`].

pub mod markup;
pub mod news;
pub mod profile;
pub mod publications;
pub mod skeleton;
pub mod sponsors;
pub mod teaching;
pub mod team;

use std::collections::HashSet;

use self::markup::Node;

/// How a mount point is found in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Id(&'static str),
    Class(&'static str),
    Tag(&'static str),
}

/// A container in the page that renderers write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mount {
    DocumentRoot,
    Body,
    ProfileName,
    ProfileBio,
    ProfileLinks,
    HeroText,
    ResearchDesc,
    NewsList,
    PublicationsList,
    PublicationsFilters,
    TeamList,
    TeachingList,
    SponsorsList,
    ThemeToggle,
    BackToTop,
}

impl Mount {
    pub const ALL: [Mount; 15] = [
        Mount::DocumentRoot,
        Mount::Body,
        Mount::ProfileName,
        Mount::ProfileBio,
        Mount::ProfileLinks,
        Mount::HeroText,
        Mount::ResearchDesc,
        Mount::NewsList,
        Mount::PublicationsList,
        Mount::PublicationsFilters,
        Mount::TeamList,
        Mount::TeachingList,
        Mount::SponsorsList,
        Mount::ThemeToggle,
        Mount::BackToTop,
    ];

    pub fn selector(&self) -> Selector {
        match self {
            Mount::DocumentRoot => Selector::Tag("html"),
            Mount::Body => Selector::Tag("body"),
            Mount::ProfileName => Selector::Id("profile-name"),
            Mount::ProfileBio => Selector::Id("profile-bio"),
            Mount::ProfileLinks => Selector::Id("profile-links"),
            Mount::HeroText => Selector::Class("hero-text"),
            Mount::ResearchDesc => Selector::Id("research-desc"),
            Mount::NewsList => Selector::Id("news-list"),
            Mount::PublicationsList => Selector::Id("publications-list"),
            Mount::PublicationsFilters => Selector::Id("publications-filters"),
            Mount::TeamList => Selector::Id("team-list"),
            Mount::TeachingList => Selector::Id("teaching-list"),
            Mount::SponsorsList => Selector::Id("sponsors-list"),
            Mount::ThemeToggle => Selector::Id("theme-toggle"),
            Mount::BackToTop => Selector::Id("back-to-top"),
        }
    }
}

/// The mount points present in a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountSet(HashSet<Mount>);

impl MountSet {
    /// Every mount point; what a complete page offers.
    pub fn all() -> Self {
        Mount::ALL.into_iter().collect()
    }

    pub fn contains(&self, mount: Mount) -> bool {
        self.0.contains(&mount)
    }

    pub fn insert(&mut self, mount: Mount) {
        self.0.insert(mount);
    }

    pub fn remove(&mut self, mount: Mount) {
        self.0.remove(&mount);
    }
}

impl FromIterator<Mount> for MountSet {
    fn from_iter<I: IntoIterator<Item = Mount>>(iter: I) -> Self {
        MountSet(iter.into_iter().collect())
    }
}

/// One change to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Replace the children of the mount.
    Replace { mount: Mount, nodes: Vec<Node> },
    /// Add nodes after the existing children of the mount.
    Append { mount: Mount, nodes: Vec<Node> },
    /// Insert nodes as siblings directly before the mount.
    InsertBefore { mount: Mount, nodes: Vec<Node> },
    SetAttribute {
        mount: Mount,
        name: String,
        value: String,
    },
}

impl Patch {
    pub fn replace(mount: Mount, nodes: Vec<Node>) -> Self {
        Patch::Replace { mount, nodes }
    }

    pub fn append(mount: Mount, nodes: Vec<Node>) -> Self {
        Patch::Append { mount, nodes }
    }

    pub fn insert_before(mount: Mount, nodes: Vec<Node>) -> Self {
        Patch::InsertBefore { mount, nodes }
    }

    pub fn set_attribute(mount: Mount, name: &str, value: impl Into<String>) -> Self {
        Patch::SetAttribute {
            mount,
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn mount(&self) -> Mount {
        match self {
            Patch::Replace { mount, .. }
            | Patch::Append { mount, .. }
            | Patch::InsertBefore { mount, .. }
            | Patch::SetAttribute { mount, .. } => *mount,
        }
    }

    /// Nodes carried by the patch; empty for attribute changes.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Patch::Replace { nodes, .. }
            | Patch::Append { nodes, .. }
            | Patch::InsertBefore { nodes, .. } => nodes,
            Patch::SetAttribute { .. } => &[],
        }
    }
}

/// Patches targeting `mount`, in order.
pub fn patches_for(patches: &[Patch], mount: Mount) -> Vec<&Patch> {
    patches.iter().filter(|p| p.mount() == mount).collect()
}
