//! Document diagnostics for verifying a data source before publishing.

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::FetchError;
use super::fetcher::Fetcher;
use super::types::{
    NewsItem, Profile, PublicationSet, ResearchSummary, SponsorSet, Teaching, TeachingList,
    TeamRoster,
};
use crate::TARGET_WEB_REQUEST;

/// Outcome of checking one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentStatus {
    Ok,
    Unreachable,
    HttpError,
    InvalidJson,
    UnexpectedShape,
    Unknown,
}

/// Detailed results for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub file: String,
    pub location: String,
    pub status: DocumentStatus,
    /// "legacy" or "current" for documents with two shapes, "object" or
    /// "array" otherwise.
    pub shape: Option<&'static str>,
    pub entries: Option<usize>,
    pub errors: Vec<String>,
}

/// Fetch and decode one document, recording how far it got.
pub async fn check_document(fetcher: &Fetcher, file: &str) -> DocumentReport {
    let mut report = DocumentReport {
        file: file.to_string(),
        location: fetcher.source().location(file),
        status: DocumentStatus::Ok,
        shape: None,
        entries: None,
        errors: Vec::new(),
    };

    let value = match fetcher.fetch_json(file).await {
        Ok(value) => value,
        Err(err) => {
            report.status = match &err {
                FetchError::Status { .. } => DocumentStatus::HttpError,
                FetchError::Malformed { .. } => DocumentStatus::InvalidJson,
                _ => DocumentStatus::Unreachable,
            };
            report.errors.push(err.to_string());
            return report;
        }
    };

    debug!(target: TARGET_WEB_REQUEST, "Checking shape of {}", report.location);
    match inspect(file, value) {
        Ok(Some((shape, entries))) => {
            report.shape = Some(shape);
            report.entries = Some(entries);
        }
        Ok(None) => {
            report.status = DocumentStatus::Unknown;
            report
                .errors
                .push(format!("{} is not a document the homepage reads", file));
        }
        Err(err) => {
            report.status = DocumentStatus::UnexpectedShape;
            report.errors.push(err.to_string());
        }
    }

    report
}

/// Check several documents concurrently, reporting in the given order.
pub async fn check_documents(fetcher: &Fetcher, files: &[&str]) -> Vec<DocumentReport> {
    join_all(files.iter().map(|file| check_document(fetcher, file))).await
}

fn shape_of(value: &Value) -> &'static str {
    if value.is_array() {
        "legacy"
    } else {
        "current"
    }
}

/// Decode a document into its type and count its entries.
fn inspect(file: &str, value: Value) -> Result<Option<(&'static str, usize)>, serde_json::Error> {
    let result = match file {
        "profile.json" => {
            let profile: Profile = serde_json::from_value(value)?;
            ("object", profile.links.len())
        }
        "research.json" => {
            let _: ResearchSummary = serde_json::from_value(value)?;
            ("object", 1)
        }
        "news.json" => {
            let news: Vec<NewsItem> = serde_json::from_value(value)?;
            ("array", news.len())
        }
        "publications.json" => {
            let shape = shape_of(&value);
            let set: PublicationSet = serde_json::from_value(value)?;
            (shape, set.normalize().items.len())
        }
        "team.json" => {
            let roster: TeamRoster = serde_json::from_value(value)?;
            ("object", roster.member_count())
        }
        "teaching.json" => {
            // The bare array is the current shape here; the object is legacy.
            let shape = if value.is_array() { "current" } else { "legacy" };
            let list: TeachingList = serde_json::from_value(value)?;
            let entries = match list.normalize() {
                Teaching::Instructor(courses) | Teaching::Legacy(courses) => courses.len(),
            };
            (shape, entries)
        }
        "sponsors.json" => {
            let shape = shape_of(&value);
            let set: SponsorSet = serde_json::from_value(value)?;
            (shape, set.normalize().items.len())
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}
