//! # Common Types
//!
//! The payload as it arrives over the wire and the resolved, read-only data
//! model the layouts and hit tests work on.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Payload

/// The JSON document handed to the chart, produced upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub authors: Vec<RawAuthor>,
    #[serde(default)]
    pub low_commit_authors: Vec<RawAuthor>,
    #[serde(default)]
    pub commits: Vec<RawCommit>,
    #[serde(default)]
    pub time_extent: Vec<String>,
    #[serde(default)]
    pub line_stats: LineStats,
    #[serde(default)]
    pub files_with_max_commits: Vec<RawFileInfo>,
    #[serde(default)]
    pub filestats_line_stats: LineStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub other_emails: Vec<String>,
    #[serde(default)]
    pub commits: Vec<CommitRef>,
}

/// Authors list their commits either by index into `commits` or inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommitRef {
    Index(usize),
    Inline(RawCommit),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCommit {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
    pub time: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub insertions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub local_day_minutes: Option<u32>,
    #[serde(default)]
    pub local_weekday_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFileInfo {
    pub file: String,
    #[serde(default)]
    pub authors: Vec<RawAuthor>,
    #[serde(default)]
    pub commits: Vec<RawFileCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFileCommit {
    pub commit_index: i64,
    #[serde(default)]
    pub insertions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
}

/// Global bounds of per-commit line changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStats {
    pub min: f64,
    pub max: f64,
    pub percentile_value: f64,
}

// --- Resolved model

/// A commit, identified by its position in the payload's commit list.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub index: usize,
    pub sha: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub message: String,
    /// Commit time in the author's own UTC offset
    pub time: DateTime<FixedOffset>,
    pub insertions: u64,
    pub deletions: u64,
    /// Minutes since local midnight
    pub local_day_minutes: u32,
    /// Minutes since local Monday 00:00
    pub local_weekday_minutes: u32,
}

impl Commit {
    pub fn utc(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }

    pub fn rhythm_minutes(&self, kind: RhythmKind) -> u32 {
        match kind {
            RhythmKind::HourOfDay => self.local_day_minutes,
            RhythmKind::DayOfWeek => self.local_weekday_minutes,
        }
    }
}

/// Members folded into the synthetic low-commit author row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthorGroup {
    pub emails: Vec<String>,
    pub names: Vec<String>,
}

/// One author row. The low-commit group is an `Author` whose `group` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    /// Row key: the email, or the joined member emails for the group
    pub key: String,
    pub name: String,
    pub other_emails: Vec<String>,
    /// Number of commits the payload attributes to this author
    pub listed_commits: usize,
    /// Resolved commit indices, ascending by time
    pub commits: Vec<usize>,
    pub group: Option<AuthorGroup>,
}

impl Author {
    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }

    /// Row label: the first name, or a summary for the group.
    pub fn label(&self) -> String {
        match &self.group {
            Some(group) => format!("& {} more authors", group.names.len()),
            None => self
                .name
                .split_whitespace()
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| self.key.clone()),
        }
    }

    pub fn commit_count(&self) -> usize {
        self.listed_commits.max(self.commits.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileAuthor {
    pub name: String,
    pub email: String,
}

/// One commit's change to a single file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileCommitEntry {
    pub commit_index: usize,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileCommitInfo {
    pub file: String,
    /// Committing authors, most commits first
    pub authors: Vec<FileAuthor>,
    /// Valid entries in payload order
    pub entries: Vec<FileCommitEntry>,
    /// Positions into `entries`, ascending by commit time
    pub by_time: Vec<usize>,
}

/// Bounds of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeExtent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Which cycle the rhythm view wraps commits around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RhythmKind {
    HourOfDay,
    DayOfWeek,
}

impl RhythmKind {
    pub fn period_minutes(self) -> f64 {
        match self {
            RhythmKind::HourOfDay => 1440.0,
            RhythmKind::DayOfWeek => 7.0 * 1440.0,
        }
    }

    pub fn marker_count(self) -> usize {
        match self {
            RhythmKind::HourOfDay => 8,
            RhythmKind::DayOfWeek => 7,
        }
    }
}

/// A reference in the payload that could not be resolved. Reported and skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DataIssue {
    UnparsableTime { commit: usize, value: String },
    UnknownAuthor { commit: usize, email: String },
    CommitIndexOutOfRange { file: String, index: i64 },
    InvalidTimeExtent { values: Vec<String> },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::UnparsableTime { commit, value } => {
                write!(f, "commit {} has unparsable time {:?}", commit, value)
            }
            DataIssue::UnknownAuthor { commit, email } => {
                write!(f, "commit {} has unknown author {:?}", commit, email)
            }
            DataIssue::CommitIndexOutOfRange { file, index } => {
                write!(f, "{} references missing commit {}", file, index)
            }
            DataIssue::InvalidTimeExtent { values } => {
                write!(f, "invalid time extent {:?}", values)
            }
        }
    }
}
