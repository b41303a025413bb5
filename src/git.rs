use crate::config::Config;
use crate::error::{HoursError, Result};
use crate::model::Commit;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::path::Path;
use std::process::{Command, Output};

/// One record per line: sha, date, author name, author email, subject.
/// The free-text subject goes last so an embedded separator cannot shift
/// the fixed fields.
const LOG_FORMAT: &str = "%H%x09%ad%x09%an%x09%ae%x09%s";

/// `--date=iso-local` timestamp layout, e.g. `2016-04-03 15:12:33 +0300`.
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Whether the repository at `repo` is a shallow clone. Shallow history is
/// truncated, which makes gap-based estimation meaningless, so callers
/// abort before any other processing.
pub fn is_shallow(repo: &Path) -> Result<bool> {
    let output = run_git(repo, &["rev-parse", "--is-shallow-repository"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim() == "true")
}

/// Retrieve the raw commit stream by invoking `git log` with the
/// configured filters. Output is oldest-first; merge commits may appear
/// once per parent when `-m` is in effect (see [`normalize`]).
pub fn fetch_commits(config: &Config) -> Result<Vec<Commit>> {
    let args = log_args(config);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = run_git(&config.repo_path, &arg_refs)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Build the `git log` argument list. Mirrors the filters the estimation
/// needs: merge expansion, branch restriction, inclusive day bounds, and
/// a machine-parsable one-line record format.
pub fn log_args(config: &Config) -> Vec<String> {
    let mut args = vec!["--no-pager".to_string(), "log".to_string()];

    if config.merge_request {
        args.push("-m".to_string());
    }
    if let Some(branch) = &config.branch {
        args.push(branch.clone());
    }

    args.push("--date=iso-local".to_string());
    args.push("--reverse".to_string());

    if let Some(since) = config.since.as_git_arg() {
        args.push(format!("--since={since}"));
    }
    if let Some(until) = config.until.as_git_arg() {
        args.push(format!("--until={until}"));
    }

    args.push(format!("--pretty=format:{LOG_FORMAT}"));
    args
}

fn run_git(repo: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| HoursError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(HoursError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(output)
}

fn parse_line(line: &str) -> Result<Commit> {
    let fields: Vec<&str> = line.splitn(5, '\t').collect();
    let [sha, date, name, email, message] = fields[..] else {
        return Err(HoursError::Parse(format!("malformed log record: {line}")));
    };

    let timestamp = DateTime::parse_from_str(date, GIT_DATE_FORMAT)
        .map_err(|e| HoursError::Parse(format!("bad timestamp '{date}': {e}")))?
        .with_timezone(&Utc);

    Ok(Commit {
        sha: sha.to_string(),
        timestamp,
        message: message.to_string(),
        author_name: name.to_string(),
        author_email: email.to_string(),
    })
}

/// Deduplicate and filter the raw commit stream.
///
/// Multiple branches can share history and `-m` repeats a merge once per
/// parent, so exactly one commit per sha is kept: the position of the
/// first occurrence, the value of the last (map-overwrite semantics).
/// When merges are excluded, commits whose subject starts with the exact
/// prefix `"Merge "` are dropped.
pub fn normalize(raw: Vec<Commit>, include_merges: bool) -> Vec<Commit> {
    let mut unique: IndexMap<String, Commit> = IndexMap::new();
    for commit in raw {
        unique.insert(commit.sha.clone(), commit);
    }

    unique
        .into_values()
        .filter(|commit| include_merges || !commit.message.starts_with("Merge "))
        .collect()
}
