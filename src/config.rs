use crate::cli::Cli;
use crate::error::{HoursError, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use console::style;
use std::collections::HashMap;
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A lower or upper bound on commit dates. `Always` is the sentinel for
/// "no bound" and produces no filter argument at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    Always,
    Day(NaiveDate),
}

impl DateSpec {
    pub fn as_git_arg(&self) -> Option<String> {
        match self {
            DateSpec::Always => None,
            DateSpec::Day(day) => Some(day.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Immutable run configuration, built once from the CLI and passed by
/// reference into each pipeline stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum gap in minutes between two commits of the same session.
    pub max_commit_diff: u32,
    /// Minutes credited for the unseen work before each session's first commit.
    pub first_commit_add: u32,
    pub since: DateSpec,
    pub until: DateSpec,
    pub merge_request: bool,
    pub repo_path: PathBuf,
    pub branch: Option<String>,
    pub email_aliases: HashMap<String, String>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            max_commit_diff: cli.max_commit_diff,
            first_commit_add: cli.first_commit_add,
            since: parse_date_spec(&cli.since)?,
            until: parse_date_spec(&cli.until)?,
            merge_request: cli.merge_request,
            repo_path: cli.path.clone(),
            branch: cli.branch.clone(),
            email_aliases: parse_email_aliases(&cli.email),
        })
    }
}

/// Resolve a `--since`/`--until` value. Keywords resolve against the local
/// date, with weeks starting on Monday; anything else must be a literal
/// `yyyy-mm-dd`. Validated here, before git is ever invoked.
pub fn parse_date_spec(input: &str) -> Result<DateSpec> {
    parse_date_spec_at(input, Local::now().date_naive())
}

fn parse_date_spec_at(input: &str, today: NaiveDate) -> Result<DateSpec> {
    match input {
        "always" => Ok(DateSpec::Always),
        "today" => Ok(DateSpec::Day(today)),
        "yesterday" => Ok(DateSpec::Day(today - Duration::days(1))),
        "thisweek" => Ok(DateSpec::Day(start_of_week(today))),
        "lastweek" => Ok(DateSpec::Day(start_of_week(today) - Duration::days(7))),
        other => NaiveDate::parse_from_str(other, DATE_FORMAT)
            .map(DateSpec::Day)
            .map_err(|_| HoursError::InvalidDate(other.to_string())),
    }
}

fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Fold repeated `--email other=canonical` values into a lookup map.
/// Malformed entries are reported and skipped; the run continues.
pub fn parse_email_aliases(values: &[String]) -> HashMap<String, String> {
    let mut aliases = HashMap::new();
    for value in values {
        match value.split_once('=') {
            Some((other, canonical)) if !other.trim().is_empty() => {
                aliases.insert(other.trim().to_string(), canonical.trim().to_string());
            }
            _ => {
                eprintln!(
                    "{} invalid alias '{}', expected other=canonical; skipping",
                    style("warning:").yellow().bold(),
                    value
                );
            }
        }
    }
    aliases
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn always_is_the_no_bound_sentinel() {
        assert_eq!(parse_date_spec("always").unwrap(), DateSpec::Always);
        assert_eq!(DateSpec::Always.as_git_arg(), None);
    }

    #[test]
    fn keywords_resolve_against_the_given_day() {
        // 2024-05-15 was a Wednesday
        let today = day(2024, 5, 15);
        assert_eq!(parse_date_spec_at("today", today).unwrap(), DateSpec::Day(today));
        assert_eq!(
            parse_date_spec_at("yesterday", today).unwrap(),
            DateSpec::Day(day(2024, 5, 14))
        );
        assert_eq!(
            parse_date_spec_at("thisweek", today).unwrap(),
            DateSpec::Day(day(2024, 5, 13))
        );
        assert_eq!(
            parse_date_spec_at("lastweek", today).unwrap(),
            DateSpec::Day(day(2024, 5, 6))
        );
    }

    #[test]
    fn week_keywords_land_on_monday() {
        for offset in 0..14 {
            let today = day(2024, 5, 1) + Duration::days(offset);
            for keyword in ["thisweek", "lastweek"] {
                match parse_date_spec_at(keyword, today).unwrap() {
                    DateSpec::Day(d) => assert_eq!(d.weekday(), Weekday::Mon),
                    DateSpec::Always => panic!("keyword must resolve to a day"),
                }
            }
        }
    }

    #[test]
    fn literal_dates_parse_and_format_back() {
        let parsed = parse_date_spec("2015-01-31").unwrap();
        assert_eq!(parsed, DateSpec::Day(day(2015, 1, 31)));
        assert_eq!(parsed.as_git_arg().as_deref(), Some("2015-01-31"));
    }

    #[test]
    fn malformed_dates_are_rejected_eagerly() {
        for input in ["31-01-2015", "2015/01/31", "soon", "2015-13-01", ""] {
            assert!(matches!(
                parse_date_spec(input),
                Err(HoursError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn aliases_fold_into_a_map() {
        let values = vec![
            "old@example.com=new@example.com".to_string(),
            " padded@example.com = new@example.com ".to_string(),
        ];
        let aliases = parse_email_aliases(&values);
        assert_eq!(aliases.len(), 2);
        assert_eq!(
            aliases.get("old@example.com").map(String::as_str),
            Some("new@example.com")
        );
        assert_eq!(
            aliases.get("padded@example.com").map(String::as_str),
            Some("new@example.com")
        );
    }

    #[test]
    fn malformed_aliases_are_skipped_not_fatal() {
        let values = vec![
            "no-separator".to_string(),
            "=missing-left-side".to_string(),
            "kept@example.com=canonical@example.com".to_string(),
        ];
        let aliases = parse_email_aliases(&values);
        assert_eq!(aliases.len(), 1);
        assert!(aliases.contains_key("kept@example.com"));
    }
}
