use crate::config::Config;
use crate::hours::estimate_hours;
use crate::model::{AuthorWork, Commit, Report};
use indexmap::IndexMap;

/// Reserved key for the grand-total row, always emitted last.
pub const TOTAL_KEY: &str = "total";

/// Assemble the final report from the per-author commit groups.
///
/// Authors are sorted ascending by estimated hours; the sort is stable,
/// so authors with equal hours keep their first-seen order. The trailing
/// `total` row sums the already-rounded author hours and counts every
/// normalized commit.
pub fn build(grouped: &IndexMap<String, Vec<Commit>>, config: &Config) -> Report {
    let mut works: Vec<(String, AuthorWork)> = grouped
        .iter()
        .map(|(email, commits)| {
            let timestamps: Vec<_> = commits.iter().map(|c| c.timestamp).collect();
            let work = AuthorWork {
                name: commits.first().map(|c| c.author_name.clone()),
                hours: estimate_hours(&timestamps, config.max_commit_diff, config.first_commit_add),
                commits: commits.len(),
            };
            (email.clone(), work)
        })
        .collect();

    works.sort_by_key(|(_, work)| work.hours);

    let total_hours: u32 = works.iter().map(|(_, work)| work.hours).sum();
    let total_commits: usize = grouped.values().map(Vec::len).sum();

    let mut report: Report = works.into_iter().collect();
    report.insert(
        TOTAL_KEY.to_string(),
        AuthorWork {
            name: None,
            hours: total_hours,
            commits: total_commits,
        },
    );
    report
}
