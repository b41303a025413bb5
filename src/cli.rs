use crate::config::Config;
use crate::error::HoursError;
use crate::{authors, git, report};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const EXAMPLES: &str = "Examples:
  Estimate hours of the repository in the current directory
      $ githours
  Developers commit more seldom: allow a 4h (240min) pause between commits
      $ githours --max-commit-diff 240
  Credit 5 hours of work before the first commit of each day
      $ githours --first-commit-add 300
  Estimate hours worked since yesterday
      $ githours --since yesterday
  Estimate hours worked since 2015-01-31
      $ githours --since 2015-01-31
  Estimate hours worked on the master branch only
      $ githours --branch master
  Group two email addresses as one person
      $ githours -e linus@torvalds.com=torvalds@linux-foundation.org";

#[derive(Parser)]
#[command(name = "githours")]
#[command(about = "Estimate working hours spent on a git repository from its commit history")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        value_name = "MINUTES",
        default_value_t = 120,
        help = "Maximum difference in minutes between commits counted to one session"
    )]
    pub max_commit_diff: u32,

    #[arg(
        short = 'a',
        long,
        value_name = "MINUTES",
        default_value_t = 120,
        help = "How many minutes the first commit of a session adds to the total"
    )]
    pub first_commit_add: u32,

    #[arg(
        short,
        long,
        value_name = "DATE",
        default_value = "always",
        help = "Analyze data since this date [always|today|yesterday|thisweek|lastweek|yyyy-mm-dd]"
    )]
    pub since: String,

    #[arg(
        short,
        long,
        value_name = "DATE",
        default_value = "always",
        help = "Analyze data until this date [always|today|yesterday|thisweek|lastweek|yyyy-mm-dd]"
    )]
    pub until: String,

    #[arg(
        short,
        long = "email",
        value_name = "OTHER=CANONICAL",
        help = "Group activity from one email address under another; may be repeated"
    )]
    pub email: Vec<String>,

    #[arg(
        short,
        long,
        value_name = "true|false",
        default_value_t = true,
        action = ArgAction::Set,
        help = "Include merge commits in the calculation"
    )]
    pub merge_request: bool,

    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Path to the git repository to analyze"
    )]
    pub path: PathBuf,

    #[arg(
        short,
        long,
        value_name = "BRANCH",
        help = "Analyze only commits reachable from this branch"
    )]
    pub branch: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::from_cli(&self)?;

        if git::is_shallow(&config.repo_path).context("Failed to inspect repository")? {
            return Err(HoursError::ShallowRepository.into());
        }

        let raw = git::fetch_commits(&config).context("Failed to read the commit log")?;
        let commits = git::normalize(raw, config.merge_request);
        let grouped = authors::group_by_author(commits, &config.email_aliases);
        let report = report::build(&grouped, &config);

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
