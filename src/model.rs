use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A single commit as reported by `git log`, reduced to the fields the
/// estimation pipeline needs. Identity is `sha`.
#[derive(Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
}

/// One row of the report: either an author (keyed by canonical email in
/// [`Report`]) or the trailing `total` row, which carries no name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorWork {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub hours: u32,
    pub commits: usize,
}

/// Insertion order is the output order: authors ascending by hours, then
/// the `total` key last.
pub type Report = IndexMap<String, AuthorWork>;
