//! Applies patches to the page template.
//!
//! Mount points are located textually: the opening tag is matched by id,
//! class or tag name and its closing tag is found by counting nested tags
//! with the same name. Comments and script elements are blanked out before
//! matching, so markup inside them is never taken for a container. Templates
//! are trusted input with well-formed containers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::ops::Range;
use thiserror::Error;

use crate::render::markup::{escape_attr, to_html};
use crate::render::{Mount, MountSet, Patch, Selector};

static HIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>")
        .expect("Invalid hidden span pattern")
});

#[derive(Debug, Error, PartialEq)]
pub enum PageError {
    #[error("mount point {0:?} not found in page")]
    MissingMount(Mount),

    #[error("mount point {0:?} has no closing tag")]
    Unclosed(Mount),
}

/// Position of a mount's element in the page text.
#[derive(Debug, Clone, PartialEq)]
struct Located {
    open: Range<usize>,
    close: Range<usize>,
}

#[derive(Debug, Clone)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Document { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn has(&self, mount: Mount) -> bool {
        locate_open(&searchable(&self.html), mount).is_some()
    }

    /// All mount points present in the page.
    pub fn mounts(&self) -> MountSet {
        Mount::ALL.into_iter().filter(|m| self.has(*m)).collect()
    }

    /// Current markup inside a mount.
    pub fn inner_html(&self, mount: Mount) -> Result<&str, PageError> {
        let located = self.locate(mount)?;
        Ok(&self.html[located.open.end..located.close.start])
    }

    /// Value of an attribute on the mount's opening tag.
    pub fn attribute(&self, mount: Mount, name: &str) -> Option<String> {
        let (_, open) = locate_open(&searchable(&self.html), mount)?;
        let tag = &self.html[open];
        attribute_regex(name)
            .captures(tag)
            .and_then(|c| c.get(1))
            .map(|m| unquote(m.as_str()).to_string())
    }

    pub fn apply(&mut self, patch: &Patch) -> Result<(), PageError> {
        match patch {
            Patch::Replace { mount, nodes } => {
                let located = self.locate(*mount)?;
                self.html
                    .replace_range(located.open.end..located.close.start, &to_html(nodes));
            }
            Patch::Append { mount, nodes } => {
                let located = self.locate(*mount)?;
                self.html.insert_str(located.close.start, &to_html(nodes));
            }
            Patch::InsertBefore { mount, nodes } => {
                let (_, open) = locate_open(&searchable(&self.html), *mount)
                    .ok_or(PageError::MissingMount(*mount))?;
                self.html.insert_str(open.start, &to_html(nodes));
            }
            Patch::SetAttribute { mount, name, value } => {
                let (_, open) = locate_open(&searchable(&self.html), *mount)
                    .ok_or(PageError::MissingMount(*mount))?;
                let tag = set_attribute(&self.html[open.clone()], name, value);
                self.html.replace_range(open, &tag);
            }
        }
        Ok(())
    }

    /// Apply patches in order, stopping at the first failure.
    pub fn apply_all<'a, I>(&mut self, patches: I) -> Result<(), PageError>
    where
        I: IntoIterator<Item = &'a Patch>,
    {
        for patch in patches {
            self.apply(patch)?;
        }
        Ok(())
    }

    fn locate(&self, mount: Mount) -> Result<Located, PageError> {
        let text = searchable(&self.html);
        let (tag, open) = locate_open(&text, mount).ok_or(PageError::MissingMount(mount))?;
        let close = find_close(&text, &tag, open.end).ok_or(PageError::Unclosed(mount))?;
        Ok(Located { open, close })
    }
}

/// The page with comments and script elements replaced by spaces of the same
/// byte length, so ranges found in it are valid in the original.
fn searchable(html: &str) -> Cow<'_, str> {
    HIDDEN.replace_all(html, |caps: &Captures| " ".repeat(caps[0].len()))
}

fn open_tag_regex(selector: Selector) -> Regex {
    let pattern = match selector {
        Selector::Id(id) => format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*?\sid\s*=\s*["']{}["'][^>]*>"#,
            regex::escape(id)
        ),
        Selector::Class(class) => format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*?\sclass\s*=\s*["'](?:[^"']*\s)?{}(?:\s[^"']*)?["'][^>]*>"#,
            regex::escape(class)
        ),
        Selector::Tag(tag) => format!(r"(?i)<({})\b[^>]*>", regex::escape(tag)),
    };
    // Patterns are built from fixed mount selectors.
    Regex::new(&pattern).expect("Invalid mount selector pattern")
}

fn attribute_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"\s{}\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#,
        regex::escape(name)
    ))
    .expect("Invalid attribute pattern")
}

/// Tag name and byte range of the mount's opening tag.
fn locate_open(html: &str, mount: Mount) -> Option<(String, Range<usize>)> {
    let captures = open_tag_regex(mount.selector()).captures(html)?;
    let whole = captures.get(0)?;
    let tag = captures.get(1)?.as_str().to_ascii_lowercase();
    Some((tag, whole.range()))
}

/// Byte range of the closing tag matching an element opened just before `from`.
fn find_close(html: &str, tag: &str, from: usize) -> Option<Range<usize>> {
    let pattern = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag)))
        .expect("Invalid closing tag pattern");

    let mut depth = 1usize;
    for captures in pattern.captures_iter(&html[from..]) {
        let whole = captures.get(0)?;
        let closing = captures.get(1).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(from + whole.start()..from + whole.end());
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    None
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

/// Opening tag with `name` set to `value`, replacing an existing value.
fn set_attribute(tag: &str, name: &str, value: &str) -> String {
    let attribute = format!(" {}=\"{}\"", name, escape_attr(value));
    let regex = attribute_regex(name);
    if regex.is_match(tag) {
        return regex.replace(tag, regex::NoExpand(&attribute)).into_owned();
    }

    let insert_at = if tag.ends_with("/>") {
        tag.len() - 2
    } else {
        tag.len() - 1
    };
    let mut updated = tag.to_string();
    updated.insert_str(insert_at, &attribute);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::{Element, Node};

    const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<body>
  <nav><a href="#publications">Publications</a></nav>
  <div class="hero"><div class="hero-text intro"><h1 id="profile-name"></h1><div id="profile-bio"><div>old</div></div></div></div>
  <section id="publications">
    <div id="publications-filters"></div>
    <div id="publications-list"><div class="pub-item"><div>nested</div></div></div>
  </section>
  <button id="theme-toggle" aria-label="Toggle theme"></button>
</body>
</html>"##;

    #[test]
    fn test_mounts_present() {
        let doc = Document::new(PAGE);
        let mounts = doc.mounts();
        assert!(mounts.contains(Mount::DocumentRoot));
        assert!(mounts.contains(Mount::Body));
        assert!(mounts.contains(Mount::HeroText));
        assert!(mounts.contains(Mount::PublicationsList));
        assert!(!mounts.contains(Mount::NewsList));
        assert!(!mounts.contains(Mount::TeamList));
    }

    #[test]
    fn test_replace_nested_content() {
        let mut doc = Document::new(PAGE);
        doc.apply(&Patch::replace(
            Mount::PublicationsList,
            vec![Element::new("p").text("new").into()],
        ))
        .unwrap();
        assert_eq!(doc.inner_html(Mount::PublicationsList).unwrap(), "<p>new</p>");
        // Siblings after the mount are untouched.
        assert!(doc.html().contains("</section>\n  <button id=\"theme-toggle\""));
    }

    #[test]
    fn test_append_and_insert_before() {
        let mut doc = Document::new(PAGE);
        doc.apply(&Patch::append(Mount::HeroText, vec![Node::raw("<p>hiring</p>")]))
            .unwrap();
        assert!(doc
            .inner_html(Mount::HeroText)
            .unwrap()
            .ends_with("<div>old</div></div><p>hiring</p>"));

        doc.apply(&Patch::insert_before(
            Mount::PublicationsFilters,
            vec![Node::raw("<div class=\"note\"></div>")],
        ))
        .unwrap();
        assert!(doc
            .html()
            .contains("<div class=\"note\"></div><div id=\"publications-filters\">"));
    }

    #[test]
    fn test_set_attribute() {
        let mut doc = Document::new(PAGE);
        doc.apply(&Patch::set_attribute(Mount::DocumentRoot, "data-theme", "light"))
            .unwrap();
        assert!(doc.html().contains("<html lang=\"en\" data-theme=\"light\">"));

        doc.apply(&Patch::set_attribute(Mount::DocumentRoot, "data-theme", "dark"))
            .unwrap();
        assert_eq!(doc.attribute(Mount::DocumentRoot, "data-theme").as_deref(), Some("dark"));
        assert_eq!(doc.html().matches("data-theme").count(), 1);

        doc.apply(&Patch::set_attribute(
            Mount::ThemeToggle,
            "aria-label",
            "Switch to light mode",
        ))
        .unwrap();
        assert_eq!(
            doc.attribute(Mount::ThemeToggle, "aria-label").as_deref(),
            Some("Switch to light mode")
        );
    }

    #[test]
    fn test_missing_mount() {
        let mut doc = Document::new(PAGE);
        let err = doc
            .apply(&Patch::replace(Mount::TeamList, Vec::new()))
            .unwrap_err();
        assert_eq!(err, PageError::MissingMount(Mount::TeamList));
    }

    #[test]
    fn test_commented_out_container_is_ignored() {
        let mut doc = Document::new(
            r#"<!-- old <div id="teaching-list"></div> --><section><div id="teaching-list"></div></section>"#,
        );
        doc.apply(&Patch::replace(
            Mount::TeachingList,
            vec![Node::raw("<li>CS101</li>")],
        ))
        .unwrap();
        assert_eq!(
            doc.html(),
            r#"<!-- old <div id="teaching-list"></div> --><section><div id="teaching-list"><li>CS101</li></div></section>"#
        );
    }

    #[test]
    fn test_comments_and_scripts_do_not_count() {
        let doc = Document::new(
            r#"<body><script>var s = '<div id="news-list">';</script><!-- <div id="team-list"> --></body>"#,
        );
        assert!(doc.has(Mount::Body));
        assert!(!doc.has(Mount::NewsList));
        assert!(!doc.has(Mount::TeamList));

        // A stray closing tag inside a comment does not end the container.
        let mut doc = Document::new(r#"<div id="team-list"><!-- </div> -->old</div><p>after</p>"#);
        doc.apply(&Patch::replace(Mount::TeamList, vec![Node::text("new")]))
            .unwrap();
        assert_eq!(doc.html(), r#"<div id="team-list">new</div><p>after</p>"#);
    }

    #[test]
    fn test_data_id_is_not_an_id() {
        let doc = Document::new(r#"<div data-id="team-list"></div>"#);
        assert!(!doc.has(Mount::TeamList));
    }
}
