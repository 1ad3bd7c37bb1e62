pub mod data;
pub mod environment;
pub mod logging;
pub mod page;
pub mod render;
pub mod theme;
pub mod web;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_RENDER: &str = "render";

/// Documents the homepage is assembled from, in the order `check` reports them.
pub const DOCUMENTS: [&str; 7] = [
    "profile.json",
    "research.json",
    "news.json",
    "publications.json",
    "team.json",
    "teaching.json",
    "sponsors.json",
];
