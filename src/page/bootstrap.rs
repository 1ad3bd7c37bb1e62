//! Page bootstrap: theme first, then every section as its own task.

use anyhow::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::document::Document;
use super::wiring;
use crate::data::{
    Fetcher, NewsItem, Profile, PublicationSet, ResearchSummary, SponsorSet, TeachingList,
    TeamRoster,
};
use crate::render::publications::PublicationBoard;
use crate::render::{news, profile, publications, sponsors, teaching, team};
use crate::render::{Mount, MountSet, Patch};
use crate::theme::{self, Theme};
use crate::TARGET_RENDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Profile,
    News,
    Publications,
    Team,
    Teaching,
    Sponsors,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Profile,
        Section::News,
        Section::Publications,
        Section::Team,
        Section::Teaching,
        Section::Sponsors,
    ];

    /// The mount whose presence decides whether the section is rendered.
    pub fn mount(&self) -> Mount {
        match self {
            Section::Profile => Mount::ProfileName,
            Section::News => Mount::NewsList,
            Section::Publications => Mount::PublicationsList,
            Section::Team => Mount::TeamList,
            Section::Teaching => Mount::TeachingList,
            Section::Sponsors => Mount::SponsorsList,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub theme: Theme,
    /// Served pages get server-backed filter and theme controls.
    pub live: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BootstrapReport {
    pub rendered: Vec<Section>,
    pub failed: Vec<(Section, String)>,
    pub skipped: Vec<Section>,
}

type PatchSender = mpsc::UnboundedSender<Patch>;

fn send_all(tx: &PatchSender, patches: Vec<Patch>) {
    for patch in patches {
        // The receiver only goes away once bootstrap is done with the page.
        let _ = tx.send(patch);
    }
}

/// Fetch one section's document(s) and stream its patches: placeholder
/// first, content once the document arrives. An error leaves the
/// placeholder in place.
pub async fn load_section(
    section: Section,
    fetcher: &Fetcher,
    mounts: &MountSet,
    tx: &PatchSender,
) -> Result<()> {
    match section {
        Section::Profile => {
            send_all(tx, profile::skeleton());
            let doc: Profile = fetcher.fetch_document("profile.json").await?;
            send_all(tx, profile::render(&doc, mounts));

            let research: ResearchSummary = fetcher.fetch_document("research.json").await?;
            send_all(tx, profile::render_research(&research));
        }
        Section::News => {
            let items: Vec<NewsItem> = fetcher.fetch_document("news.json").await?;
            send_all(tx, news::render(&items));
        }
        Section::Publications => {
            send_all(tx, publications::skeleton());
            let set: PublicationSet = fetcher.fetch_document("publications.json").await?;
            let board = PublicationBoard::new(set.normalize());
            send_all(tx, board.render(mounts));
        }
        Section::Team => {
            send_all(tx, team::skeleton());
            let roster: TeamRoster = fetcher.fetch_document("team.json").await?;
            send_all(tx, team::render(&roster));
        }
        Section::Teaching => {
            send_all(tx, teaching::skeleton());
            let list: TeachingList = fetcher.fetch_document("teaching.json").await?;
            send_all(tx, teaching::render(&list.normalize()));
        }
        Section::Sponsors => {
            send_all(tx, sponsors::skeleton());
            let set: SponsorSet = fetcher.fetch_document("sponsors.json").await?;
            send_all(tx, sponsors::render(&set.normalize()));
        }
    }
    Ok(())
}

/// Apply a patch, logging instead of failing when the page lacks a container
/// the renderer wanted.
fn apply_logged(document: &mut Document, patch: &Patch) {
    if let Err(err) = document.apply(patch) {
        warn!(target: TARGET_RENDER, "Skipping patch: {}", err);
    }
}

/// Render the page: apply the theme, run every section that has a mount in
/// the page concurrently and append the behaviour script.
pub async fn bootstrap(
    document: &mut Document,
    fetcher: &Fetcher,
    options: &BootstrapOptions,
) -> BootstrapReport {
    let mounts = document.mounts();
    let mut report = BootstrapReport::default();

    for patch in theme::apply(options.theme) {
        if mounts.contains(patch.mount()) {
            apply_logged(document, &patch);
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut handles = Vec::new();
    for section in Section::ALL {
        if !mounts.contains(section.mount()) {
            debug!(target: TARGET_RENDER, "No mount for {:?}, skipping", section);
            report.skipped.push(section);
            continue;
        }

        let fetcher = fetcher.clone();
        let mounts = mounts.clone();
        let tx = tx.clone();
        let handle =
            tokio::spawn(async move { load_section(section, &fetcher, &mounts, &tx).await });
        handles.push((section, handle));
    }
    drop(tx);

    // Patches arrive in whatever order the sections make progress.
    while let Some(patch) = rx.recv().await {
        apply_logged(document, &patch);
    }

    for (section, handle) in handles {
        match handle.await {
            Ok(Ok(())) => report.rendered.push(section),
            Ok(Err(err)) => {
                error!(target: TARGET_RENDER, "Failed to render {:?}: {}", section, err);
                report.failed.push((section, err.to_string()));
            }
            Err(err) => {
                error!(target: TARGET_RENDER, "Render task for {:?} panicked: {}", section, err);
                report.failed.push((section, err.to_string()));
            }
        }
    }

    if mounts.contains(Mount::Body) {
        apply_logged(
            document,
            &Patch::append(Mount::Body, vec![wiring::script(options.live)]),
        );
    }

    info!(
        target: TARGET_RENDER,
        "Rendered {} sections ({} failed, {} skipped)",
        report.rendered.len(),
        report.failed.len(),
        report.skipped.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use std::fs;
    use std::path::Path;

    const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<body>
  <nav><a href="#team">Team</a></nav>
  <button id="theme-toggle"></button>
  <div class="hero-text"><h1 id="profile-name"></h1><div id="profile-bio"></div><div id="profile-links"></div></div>
  <p id="research-desc"></p>
  <div id="publications-filters"></div><div id="publications-list"></div>
  <div id="team-list"></div>
  <div id="teaching-list"></div>
  <div id="sponsors-list"></div>
  <button id="back-to-top"></button>
</body>
</html>"##;

    fn write_data(dir: &Path) {
        fs::write(
            dir.join("profile.json"),
            r#"{"name": "Ada Lovelace", "bio": ["Goals: engines.", "Second"], "links": [{"url": "https://a.example", "text": "CV"}], "openings": "Hiring PhD students"}"#,
        )
        .unwrap();
        fs::write(dir.join("research.json"), r#"{"description": "Analytical engines"}"#).unwrap();
        fs::write(
            dir.join("publications.json"),
            r#"{"items": [{"title": "Notes", "authors": "A. Lovelace", "venue": "Memoirs", "year": 1843}], "note": {"text": "More", "link": "https://more.example"}}"#,
        )
        .unwrap();
        fs::write(dir.join("teaching.json"), r#"["CS101"]"#).unwrap();
        fs::write(dir.join("sponsors.json"), r#"[{"name": "Royal Society"}]"#).unwrap();
        // team.json is missing on purpose.
    }

    async fn render(options: BootstrapOptions) -> (Document, BootstrapReport) {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path());
        let fetcher = Fetcher::new(DataSource::Directory(dir.path().to_path_buf())).unwrap();
        let mut document = Document::new(TEMPLATE);
        let report = bootstrap(&mut document, &fetcher, &options).await;
        (document, report)
    }

    #[tokio::test]
    async fn test_bootstrap_renders_present_sections() {
        let (doc, report) = render(BootstrapOptions {
            theme: Theme::Light,
            live: false,
        })
        .await;

        assert_eq!(report.skipped, vec![Section::News]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, Section::Team);
        assert!(report.rendered.contains(&Section::Profile));
        assert!(report.rendered.contains(&Section::Sponsors));

        assert_eq!(doc.inner_html(Mount::ProfileName).unwrap(), "Ada Lovelace");
        let bio = doc.inner_html(Mount::ProfileBio).unwrap();
        assert_eq!(bio.matches("<p ").count(), 2);
        assert!(bio.contains("<span class=\"highlight-label\">Goals:</span>"));
        assert!(doc.inner_html(Mount::HeroText).unwrap().contains("Hiring PhD students"));
        assert_eq!(doc.inner_html(Mount::ResearchDesc).unwrap(), "Analytical engines");

        assert!(doc.html().contains("<div class=\"fade-in\" style=\"margin-bottom: 1.5rem; text-align: center; color: var(--text-secondary);\"><a href=\"https://more.example\""));
        assert!(doc
            .inner_html(Mount::PublicationsFilters)
            .unwrap()
            .contains("data-filter=\"1843\""));
        // The static page filters in the browser using the item years.
        assert!(doc
            .inner_html(Mount::PublicationsList)
            .unwrap()
            .contains("<div class=\"pub-item fade-in\" data-year=\"1843\" data-year-type=\"number\">"));
        assert!(doc.html().contains("getElementById('publications-filters')"));

        // The failed section keeps its placeholder.
        assert!(doc.inner_html(Mount::TeamList).unwrap().contains("skeleton skeleton-card"));

        assert_eq!(doc.attribute(Mount::DocumentRoot, "data-theme").as_deref(), Some("light"));
        assert_eq!(
            doc.attribute(Mount::ThemeToggle, "aria-label").as_deref(),
            Some("Switch to dark mode")
        );
        assert!(doc.html().contains("localStorage"));
    }

    #[tokio::test]
    async fn test_demo_site_renders_every_section() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
        let template = fs::read_to_string(root.join("index.html")).unwrap();
        let fetcher = Fetcher::new(DataSource::Directory(root.join("data"))).unwrap();

        let mut document = Document::new(template);
        let options = BootstrapOptions {
            theme: Theme::Dark,
            live: false,
        };
        let report = bootstrap(&mut document, &fetcher, &options).await;

        assert!(report.failed.is_empty(), "{:?}", report.failed);
        assert_eq!(report.rendered.len(), Section::ALL.len());
        assert!(!document.html().contains("skeleton"));
        assert!(document
            .inner_html(Mount::TeamList)
            .unwrap()
            .contains("Principal Investigator (PI)"));
    }

    #[tokio::test]
    async fn test_live_pages_use_server_controls() {
        let (doc, _) = render(BootstrapOptions {
            theme: Theme::Dark,
            live: true,
        })
        .await;
        assert!(doc.html().contains("/theme/toggle"));
        assert_eq!(doc.attribute(Mount::DocumentRoot, "data-theme").as_deref(), Some("dark"));
    }
}
