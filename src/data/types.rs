//! Document types for the homepage JSON files.
//!
//! Documents that exist in a legacy and a current shape are untagged enums;
//! each has a `normalize` step producing the single shape renderers consume.

use serde::{Deserialize, Deserializer, Serialize};

use super::year::Year;

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An outbound link rendered as a button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// `profile.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: Bio,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(default)]
    pub openings: Option<String>,
}

/// Biography text: one string of markup, or one string per paragraph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Bio {
    Paragraphs(Vec<String>),
    Text(String),
}

impl Default for Bio {
    fn default() -> Self {
        Bio::Text(String::new())
    }
}

/// `research.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// One entry of `news.json`, which is a bare array of these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// May embed `[text](url)` links.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Publication {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub venue: String,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

/// A note rendered as a single link, with fields that may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkNote {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl LinkNote {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Falls back to the fragment link when the link is missing or empty.
    pub fn href(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => "#",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NoteField {
    Many(Vec<LinkNote>),
    One(LinkNote),
}

impl NoteField {
    /// A sequence of notes contributes only its first entry.
    pub fn first(self) -> Option<LinkNote> {
        match self {
            NoteField::Many(notes) => notes.into_iter().next(),
            NoteField::One(note) => Some(note),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Publication>,
    #[serde(default)]
    pub note: Option<NoteField>,
}

/// `publications.json`: a bare array (legacy) or `{items, note}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PublicationSet {
    Legacy(Vec<Publication>),
    Current(PublicationDocument),
}

/// Canonical publications shape.
#[derive(Debug, Clone, Default)]
pub struct Publications {
    pub items: Vec<Publication>,
    pub note: Option<LinkNote>,
}

impl PublicationSet {
    pub fn normalize(self) -> Publications {
        match self {
            PublicationSet::Legacy(items) => Publications { items, note: None },
            PublicationSet::Current(doc) => Publications {
                items: doc.items,
                note: doc.note.and_then(NoteField::first),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Member {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.is_empty())
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty())
    }

    /// First letters of the space-separated words of the name, at most two,
    /// case kept as written.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TeamNote {
    Text(String),
    Link(LinkNote),
}

/// `team.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRoster {
    #[serde(default)]
    pub group_photo: Option<String>,
    #[serde(default, rename = "PI")]
    pub pi: Option<Vec<Member>>,
    #[serde(default)]
    pub phd: Option<Vec<Member>>,
    #[serde(default)]
    pub master: Option<Vec<Member>>,
    #[serde(default)]
    pub undergrad: Option<Vec<Member>>,
    #[serde(default)]
    pub intern: Option<Vec<Member>>,
    #[serde(default)]
    pub alumni: Option<Vec<Member>>,
    #[serde(default)]
    pub note: Option<TeamNote>,
}

impl TeamRoster {
    /// Categories in display order with their headings. Key order in the JSON
    /// has no influence on this order.
    pub fn categories(&self) -> [(&'static str, &[Member]); 6] {
        fn members(list: &Option<Vec<Member>>) -> &[Member] {
            list.as_deref().unwrap_or(&[])
        }
        [
            ("Principal Investigator (PI)", members(&self.pi)),
            ("PhD Students", members(&self.phd)),
            ("MS Students", members(&self.master)),
            ("Undergraduate Students", members(&self.undergrad)),
            ("Interns", members(&self.intern)),
            ("Alumni", members(&self.alumni)),
        ]
    }

    pub fn group_photo(&self) -> Option<&str> {
        self.group_photo.as_deref().filter(|p| !p.is_empty())
    }

    pub fn member_count(&self) -> usize {
        self.categories().iter().map(|(_, m)| m.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyTeaching {
    #[serde(default)]
    pub courses: Option<Vec<CourseEntry>>,
}

/// `teaching.json`: a bare array of course labels or the legacy `{courses}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TeachingList {
    Courses(Vec<String>),
    Legacy(LegacyTeaching),
}

/// Canonical teaching shape. Only the current shape carries the role label.
#[derive(Debug, Clone, PartialEq)]
pub enum Teaching {
    Instructor(Vec<String>),
    Legacy(Vec<String>),
}

impl TeachingList {
    pub fn normalize(self) -> Teaching {
        match self {
            TeachingList::Courses(courses) => Teaching::Instructor(courses),
            TeachingList::Legacy(legacy) => Teaching::Legacy(
                legacy
                    .courses
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| c.course)
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sponsor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Sponsor {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SponsorDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Sponsor>,
    #[serde(default)]
    pub note: Option<String>,
}

/// `sponsors.json`: a bare array or `{items, note}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SponsorSet {
    Legacy(Vec<Sponsor>),
    Current(SponsorDocument),
}

#[derive(Debug, Clone, Default)]
pub struct Sponsors {
    pub items: Vec<Sponsor>,
    pub note: Option<String>,
}

impl SponsorSet {
    pub fn normalize(self) -> Sponsors {
        match self {
            SponsorSet::Legacy(items) => Sponsors { items, note: None },
            SponsorSet::Current(doc) => Sponsors {
                items: doc.items,
                note: doc.note.filter(|n| !n.is_empty()),
            },
        }
    }
}
