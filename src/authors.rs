use crate::model::Commit;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Grouping key for commits that carry no author email.
const UNKNOWN_EMAIL: &str = "unknown";

/// Partition commits by canonical author email, preserving the incoming
/// (chronological) order inside each group and first-seen order between
/// groups.
///
/// An empty email becomes the literal `"unknown"` before the alias map is
/// applied, so `unknown=someone` aliases work too.
pub fn group_by_author(
    commits: Vec<Commit>,
    aliases: &HashMap<String, String>,
) -> IndexMap<String, Vec<Commit>> {
    let mut groups: IndexMap<String, Vec<Commit>> = IndexMap::new();

    for commit in commits {
        let email = if commit.author_email.is_empty() {
            UNKNOWN_EMAIL
        } else {
            commit.author_email.as_str()
        };
        let canonical = aliases.get(email).map(String::as_str).unwrap_or(email);
        groups.entry(canonical.to_string()).or_default().push(commit);
    }

    groups
}
